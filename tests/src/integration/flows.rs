//! # Cross-Crate Flows
//!
//! End-to-end flows over temporary host roots: foreign key material
//! entering the trust store, bundles moving between hosts, and policy
//! changes taking effect on the next verification.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::tool_document;
    use base64::{engine::general_purpose, Engine as _};
    use enact_crypto::generate_keypair;
    use enact_security::{KeyExportBundle, SecurityConfig, SecurityContext, SigningOptions};
    use std::fs;
    use tempfile::TempDir;

    fn fresh_context() -> (TempDir, SecurityContext) {
        let tmp = TempDir::new().unwrap();
        let context = SecurityContext::with_root(tmp.path());
        (tmp, context)
    }

    /// Foreign producers drop PEM files in non-SPKI shapes directly into
    /// the trusted directory; the trust snapshot still canonicalizes them
    /// and verification proceeds over the decoded keys.
    #[test]
    fn test_foreign_pem_shapes_in_trust_directory() {
        let (tmp, context) = fresh_context();
        let options = SigningOptions::enact_defaults();
        let signer = generate_keypair();

        // Raw compressed body instead of SubjectPublicKeyInfo.
        let trusted_dir = tmp.path().join("trusted-keys");
        fs::create_dir_all(&trusted_dir).unwrap();
        let raw = hex::decode(&signer.public_key).unwrap();
        let body = base64_wrap(&raw);
        fs::write(
            trusted_dir.join("foreign-public.pem"),
            format!("-----BEGIN PUBLIC KEY-----\n{body}-----END PUBLIC KEY-----\n"),
        )
        .unwrap();

        let snapshot = context.key_store().all_trusted_public_keys();
        assert_eq!(snapshot, vec![signer.public_key.clone()]);

        let signature = context
            .sign(&tool_document(), &signer.private_key, &options)
            .unwrap();
        assert!(context.verify(&tool_document(), &signature, &options, None));
    }

    /// A public export bundle from one host becomes a trusted key on
    /// another, and signatures travel with the document.
    #[test]
    fn test_trust_travels_between_hosts_via_export() {
        let (tmp_a, host_a) = fresh_context();
        let (_tmp_b, host_b) = fresh_context();
        let options = SigningOptions::enact_defaults();

        host_a
            .key_store()
            .generate_and_store("release", Some("release signer"))
            .unwrap();
        let bundle_path = tmp_a.path().join("release.json");
        host_a
            .key_store()
            .export_to_file("release", &bundle_path, false)
            .unwrap();

        let bundle: KeyExportBundle =
            serde_json::from_str(&fs::read_to_string(&bundle_path).unwrap()).unwrap();
        assert!(bundle.private_key.is_none());
        host_b
            .key_store()
            .import_public_key("release", &bundle.public_key, None)
            .unwrap();

        let signature = host_a
            .sign_with_stored_key(&tool_document(), "release", &options)
            .unwrap();
        assert!(host_b.verify(&tool_document(), &signature, &options, None));
    }

    /// A private export bundle restores full signing capability elsewhere.
    #[test]
    fn test_private_bundle_restores_signing() {
        let (tmp_a, host_a) = fresh_context();
        let (_tmp_b, host_b) = fresh_context();
        let options = SigningOptions::enact_defaults();

        let pair = host_a
            .key_store()
            .generate_and_store("release", None)
            .unwrap();
        let bundle_path = tmp_a.path().join("release-full.json");
        host_a
            .key_store()
            .export_to_file("release", &bundle_path, true)
            .unwrap();

        let bundle: KeyExportBundle =
            serde_json::from_str(&fs::read_to_string(&bundle_path).unwrap()).unwrap();
        let restored = host_b
            .key_store()
            .import_private_key("release", &bundle.private_key.unwrap(), None)
            .unwrap();
        assert_eq!(restored.public_key, pair.public_key);

        let signature = host_b
            .sign_with_stored_key(&tool_document(), "release", &options)
            .unwrap();
        assert!(host_b.verify(&tool_document(), &signature, &options, None));
    }

    /// Removing a key from the trust directory takes effect on the next
    /// verification; the snapshot is per-call.
    #[test]
    fn test_trust_revocation_is_immediate() {
        let (_tmp, context) = fresh_context();
        let options = SigningOptions::enact_defaults();

        let pair = context
            .key_store()
            .generate_and_store("release", None)
            .unwrap();
        let signature = context
            .sign(&tool_document(), &pair.private_key, &options)
            .unwrap();

        assert!(context.verify(&tool_document(), &signature, &options, None));
        assert!(context.key_store().remove("release"));
        assert!(!context.verify(&tool_document(), &signature, &options, None));
    }

    /// Policy configuration exported from one host drives verification on
    /// another after import.
    #[test]
    fn test_policy_travels_between_hosts() {
        let (tmp_a, host_a) = fresh_context();
        let (_tmp_b, host_b) = fresh_context();
        let options = SigningOptions::enact_defaults();

        host_a.config_store().save(&SecurityConfig {
            allow_local_unsigned: false,
            minimum_signatures: 1,
        });
        let exported = tmp_a.path().join("policy.json");
        assert!(host_a.config_store().export_to(&exported));
        host_b.config_store().import_from(&exported).unwrap();

        // Unsigned documents are now rejected on host B too.
        let mut document = tool_document();
        document.insert("signatures".into(), serde_json::json!([]));
        let dummy = host_b
            .sign(&tool_document(), &generate_keypair().private_key, &options)
            .unwrap();
        assert!(!host_b.verify(&document, &dummy, &options, None));
    }

    fn base64_wrap(raw: &[u8]) -> String {
        let mut body = general_purpose::STANDARD.encode(raw);
        body.push('\n');
        body
    }
}
