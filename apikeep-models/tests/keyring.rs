//! Credential store tests against the platform keyring.
//!
//! Gated behind the `integration` feature flag because they need a running
//! secret service (or Keychain / Credential Manager). Run with:
//!
//! ```sh
//! cargo test -p apikeep-models --features integration
//! ```

#![cfg(feature = "integration")]

use apikeep_models::Error;
use apikeep_models::auth::{CredentialSource, CredentialStore};

/// Service name unique to this process so parallel runs don't collide.
fn service(test: &str) -> String {
    format!("apikeep-test-{test}-{}", std::process::id())
}

#[test]
fn stored_key_is_read_back_by_a_fresh_store() {
    let service = service("roundtrip");
    CredentialStore::new(&service)
        .set("OpenAI", "  sk-roundtrip  ")
        .expect("store key");

    let store = CredentialStore::new(&service);
    let key = store.get("OpenAI");
    let source = store.credential_source("OpenAI");
    let listed = store.list_vendors(["Groq", "OpenAI"]);
    store.delete("OpenAI").expect("delete key");

    assert_eq!(key.unwrap().expose_secret(), "sk-roundtrip");
    assert_eq!(source, Some(CredentialSource::Keyring));
    assert_eq!(listed, vec!["OpenAI".to_string()]);
}

#[test]
fn set_overwrites_previous_key() {
    let service = service("overwrite");
    let store = CredentialStore::new(&service);
    store.set("DeepSeek", "sk-old").expect("store first key");
    store.set("DeepSeek", "sk-new").expect("store second key");

    let key = store.get("DeepSeek");
    store.delete("DeepSeek").expect("delete key");

    assert_eq!(key.unwrap().expose_secret(), "sk-new");
}

#[test]
fn deleted_key_is_gone() {
    let service = service("delete");
    let store = CredentialStore::new(&service);
    store.set("Cohere", "co-key").expect("store key");
    store.delete("Cohere").expect("delete key");

    assert!(!store.has_in_keyring("Cohere"));
    assert!(matches!(
        store.get("Cohere"),
        Err(Error::CredentialsNotFound(v)) if v == "Cohere"
    ));
    assert!(matches!(
        store.delete("Cohere"),
        Err(Error::CredentialsNotFound(v)) if v == "Cohere"
    ));
}
