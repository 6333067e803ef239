//! # Acceptance Scenarios
//!
//! Fixed inputs with fixed expected outcomes, exercised end-to-end through
//! the boundary API with a temporary host root per test.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::object;
    use enact_security::{
        canonical_document, SecurityConfig, SecurityContext, SigningOptions,
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn fresh_context() -> (TempDir, SecurityContext) {
        let tmp = TempDir::new().unwrap();
        let context = SecurityContext::with_root(tmp.path());
        (tmp, context)
    }

    /// A minimal Enact tool under Enact defaults canonicalizes
    /// to exactly the four present critical fields, in order, and its
    /// signature verifies once the signer is trusted.
    #[test]
    fn test_minimal_tool_with_enact_defaults() {
        let (_tmp, context) = fresh_context();
        let document = object(json!({
            "name": "t",
            "description": "d",
            "command": "echo",
            "enact": "1.0.0",
        }));
        let options = SigningOptions::enact_defaults();

        let canonical = canonical_document(&document, &options).unwrap();
        let keys: Vec<&String> = canonical.keys().collect();
        assert_eq!(keys, ["command", "description", "enact", "name"]);

        let pair = context
            .key_store()
            .generate_and_store("signer", None)
            .unwrap();
        let signature = context.sign(&document, &pair.private_key, &options).unwrap();
        assert!(context.verify(&document, &signature, &options, None));
    }

    /// A command-only signature survives a metadata change.
    #[test]
    fn test_command_only_signature_survives_rename() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions {
            include_fields: Some(vec!["command".into()]),
            ..SigningOptions::enact_defaults()
        };

        let mut document = object(json!({ "name": "a", "command": "c" }));
        let pair = context
            .key_store()
            .generate_and_store("signer", None)
            .unwrap();
        let signature = context.sign(&document, &pair.private_key, &options).unwrap();

        document.insert("name".into(), json!("b"));
        assert!(context.verify(&document, &signature, &options, None));
    }

    /// The same command-only signature detects a command change.
    #[test]
    fn test_command_only_signature_detects_command_change() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions {
            include_fields: Some(vec!["command".into()]),
            ..SigningOptions::enact_defaults()
        };

        let mut document = object(json!({ "name": "a", "command": "c" }));
        let pair = context
            .key_store()
            .generate_and_store("signer", None)
            .unwrap();
        let signature = context.sign(&document, &pair.private_key, &options).unwrap();

        document.insert("command".into(), json!("c2"));
        assert!(!context.verify(&document, &signature, &options, None));
    }

    /// With `minimumSignatures = 2` a single valid signature is
    /// rejected; a second valid signature makes the document pass.
    #[test]
    fn test_threshold_of_two_needs_two_signatures() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions::enact_defaults();
        context.config_store().save(&SecurityConfig {
            allow_local_unsigned: false,
            minimum_signatures: 2,
        });

        let k1 = context.key_store().generate_and_store("k1", None).unwrap();
        let k2 = context.key_store().generate_and_store("k2", None).unwrap();

        let mut document = object(json!({
            "name": "t", "description": "d", "command": "c",
        }));
        let sig1 = context.sign(&document, &k1.private_key, &options).unwrap();
        let sig2 = context.sign(&document, &k2.private_key, &options).unwrap();

        document.insert("signatures".into(), json!([sig1.to_value()]));
        assert!(!context.verify(&document, &sig1, &options, None));

        document.insert(
            "signatures".into(),
            json!([sig1.to_value(), sig2.to_value()]),
        );
        assert!(context.verify(&document, &sig1, &options, None));
    }

    /// A document with an explicitly empty `signatures`
    /// sequence is accepted under the permissive default policy, dummy
    /// signature argument notwithstanding.
    #[test]
    fn test_unsigned_document_accepted_by_permissive_policy() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions::enact_defaults();
        context.config_store().save(&SecurityConfig {
            allow_local_unsigned: true,
            minimum_signatures: 1,
        });

        let mut document = object(json!({
            "name": "t", "description": "d", "command": "c",
        }));
        let dummy = context
            .sign(&document, &enact_crypto::generate_keypair().private_key, &options)
            .unwrap();
        document.insert("signatures".into(), json!([]));

        assert!(context.verify(&document, &dummy, &options, None));
    }

    /// Fallback verification recovers a stripped public key
    /// from the trust set, and fails once the signer's key is removed.
    #[test]
    fn test_fallback_verification_with_stripped_public_key() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions::enact_defaults();

        context.key_store().generate_and_store("k1", None).unwrap();
        let k2 = context.key_store().generate_and_store("k2", None).unwrap();
        context.key_store().generate_and_store("k3", None).unwrap();

        let document = object(json!({
            "name": "t", "description": "d", "command": "c",
        }));
        let mut signature = context.sign(&document, &k2.private_key, &options).unwrap();
        signature.public_key = String::new();

        assert!(context.verify(&document, &signature, &options, None));

        assert!(context.key_store().remove("k2"));
        assert!(!context.verify(&document, &signature, &options, None));
    }
}
