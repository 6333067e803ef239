//! # Field Selection
//!
//! Policy-driven choice of which document fields participate in signing.
//!
//! Two built-in default sets exist: the Enact tool-manifest profile and a
//! generic record profile. Callers can override the set entirely
//! (`include_fields`), remove names (`exclude_fields`), or append extra
//! names to the defaults (`additional_critical_fields`).

use crate::errors::SigningError;
use enact_types::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `signatures` sequence is never part of the signed bytes, no matter
/// how the selection is configured.
pub const SIGNATURES_FIELD: &str = "signatures";

/// Configuration of a single selectable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    /// Document field name.
    pub name: &'static str,
    /// Whether a document must carry a non-empty value for this field when
    /// it is selected for signing.
    pub required: bool,
    /// Whether the field belongs to the security-critical default set.
    pub security_critical: bool,
    /// Human-readable description.
    pub description: Option<&'static str>,
}

/// Options controlling field selection and signing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SigningOptions {
    /// Use the Enact tool-manifest default set instead of the generic one.
    pub use_enact_defaults: bool,
    /// Explicit list of field names to sign. Overrides the default set
    /// entirely when present.
    pub include_fields: Option<Vec<String>>,
    /// Names removed from the selected set after defaults/include are
    /// resolved.
    pub exclude_fields: Vec<String>,
    /// Extra names appended when defaults are in effect. Ignored when
    /// `include_fields` is set.
    pub additional_critical_fields: Vec<String>,
    /// Reserved; only `secp256k1` is supported.
    pub algorithm: Option<String>,
}

impl SigningOptions {
    /// Options for the Enact tool-manifest profile.
    pub fn enact_defaults() -> Self {
        Self {
            use_enact_defaults: true,
            ..Self::default()
        }
    }
}

const ENACT_DEFAULT_FIELDS: [FieldConfig; 10] = [
    FieldConfig {
        name: "annotations",
        required: false,
        security_critical: true,
        description: Some("Behavioral annotations"),
    },
    FieldConfig {
        name: "command",
        required: true,
        security_critical: true,
        description: Some("Command executed by the tool"),
    },
    FieldConfig {
        name: "description",
        required: true,
        security_critical: true,
        description: Some("What the tool does"),
    },
    FieldConfig {
        name: "enact",
        required: false,
        security_critical: true,
        description: Some("Protocol version"),
    },
    FieldConfig {
        name: "env",
        required: false,
        security_critical: true,
        description: Some("Environment variable declarations"),
    },
    FieldConfig {
        name: "from",
        required: false,
        security_critical: true,
        description: Some("Container image"),
    },
    FieldConfig {
        name: "inputSchema",
        required: false,
        security_critical: true,
        description: Some("JSON Schema for tool inputs"),
    },
    FieldConfig {
        name: "name",
        required: true,
        security_critical: true,
        description: Some("Tool identifier"),
    },
    FieldConfig {
        name: "timeout",
        required: false,
        security_critical: true,
        description: Some("Execution timeout"),
    },
    FieldConfig {
        name: "version",
        required: false,
        security_critical: true,
        description: None,
    },
];

const GENERIC_DEFAULT_FIELDS: [FieldConfig; 4] = [
    FieldConfig {
        name: "id",
        required: true,
        security_critical: true,
        description: Some("Record identifier"),
    },
    FieldConfig {
        name: "content",
        required: true,
        security_critical: true,
        description: Some("Record payload"),
    },
    FieldConfig {
        name: "timestamp",
        required: true,
        security_critical: true,
        description: Some("Record timestamp"),
    },
    FieldConfig {
        name: "metadata",
        required: false,
        security_critical: false,
        description: None,
    },
];

/// The Enact tool-manifest default set.
pub fn enact_default_fields() -> &'static [FieldConfig] {
    &ENACT_DEFAULT_FIELDS
}

/// The generic record default set.
pub fn generic_default_fields() -> &'static [FieldConfig] {
    &GENERIC_DEFAULT_FIELDS
}

fn active_defaults(options: &SigningOptions) -> &'static [FieldConfig] {
    if options.use_enact_defaults {
        enact_default_fields()
    } else {
        generic_default_fields()
    }
}

/// A value that canonicalization treats as absent.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Resolve the set of field names the given options select, sorted in
/// ascending byte-lexicographic order and de-duplicated.
pub fn signed_field_names(options: &SigningOptions) -> Vec<String> {
    let mut names: Vec<String> = match &options.include_fields {
        Some(include) => include.clone(),
        None => active_defaults(options)
            .iter()
            .filter(|f| f.security_critical)
            .map(|f| f.name.to_string())
            .chain(options.additional_critical_fields.iter().cloned())
            .collect(),
    };

    names.retain(|name| name != SIGNATURES_FIELD && !options.exclude_fields.contains(name));
    names.sort();
    names.dedup();
    names
}

/// Project a document to the ordered mapping of its selected, non-empty
/// fields.
///
/// Fails with [`SigningError::MissingRequiredField`] when a field that is
/// required by the active default set and still selected is absent or
/// empty. Selected fields missing from the document are silently skipped;
/// excluded required fields are not validated.
pub fn select_fields(
    document: &Document,
    options: &SigningOptions,
) -> Result<Document, SigningError> {
    let names = signed_field_names(options);

    for field in active_defaults(options) {
        if !field.required || !names.iter().any(|n| n == field.name) {
            continue;
        }
        match document.get(field.name) {
            Some(value) if !is_empty_value(value) => {}
            _ => return Err(SigningError::MissingRequiredField(field.name.to_string())),
        }
    }

    let mut projected = Document::new();
    for name in names {
        if let Some(value) = document.get(&name) {
            if !is_empty_value(value) {
                projected.insert(name, value.clone());
            }
        }
    }
    Ok(projected)
}
