//! Cross-crate integration coverage.

pub mod flows;
pub mod scenarios;

#[cfg(test)]
pub(crate) mod fixtures {
    use enact_types::Document;
    use serde_json::{json, Value};

    /// Minimal Enact tool manifest satisfying the required fields.
    pub fn tool_document() -> Document {
        object(json!({
            "name": "greet",
            "description": "Say hello",
            "command": "echo hello",
            "enact": "1.0.0",
        }))
    }

    /// Convert a `json!` object literal into a document map.
    pub fn object(value: Value) -> Document {
        let Value::Object(map) = value else {
            panic!("fixture must be a JSON object");
        };
        map
    }
}
