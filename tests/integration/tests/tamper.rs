//! Tamper detection on ciphertext modified directly in the database.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use passvault_integration_tests::Deployment;
use passvault_secrets::{SecretError, SqliteSecretStore};
use std::time::Duration;

async fn raw_store(deployment: &Deployment) -> SqliteSecretStore {
    SqliteSecretStore::open(&deployment.db_path(), Duration::from_secs(5))
        .await
        .unwrap()
}

async fn stored_ciphertext(store: &SqliteSecretStore, owner: &str) -> String {
    sqlx::query_scalar("SELECT password FROM passwords WHERE owner_id = ?")
        .bind(owner)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

async fn overwrite_ciphertext(store: &SqliteSecretStore, owner: &str, ciphertext: &str) {
    sqlx::query("UPDATE passwords SET password = ? WHERE owner_id = ?")
        .bind(ciphertext)
        .bind(owner)
        .execute(store.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_flipping_any_byte_fails_integrity() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();

    let store = raw_store(&deployment).await;
    let original = stored_ciphertext(&store, "user-42").await;
    let blob = STANDARD.decode(&original).unwrap();

    for idx in 0..blob.len() {
        let mut tampered = blob.clone();
        tampered[idx] ^= 0xff;
        overwrite_ciphertext(&store, "user-42", &STANDARD.encode(&tampered)).await;

        match vault.retrieve_secret("user-42").await {
            Err(SecretError::Integrity(_)) => {}
            other => panic!("byte {idx}: expected integrity error, got {other:?}"),
        }
    }

    overwrite_ciphertext(&store, "user-42", &original).await;
    let secret = vault.retrieve_secret("user-42").await.unwrap().unwrap();
    assert_eq!(secret.expose_secret(), "Tr0ub4dor&3");
}

#[tokio::test]
async fn test_truncated_ciphertext_fails_integrity() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();

    let store = raw_store(&deployment).await;
    let blob = STANDARD.decode(stored_ciphertext(&store, "user-42").await).unwrap();
    overwrite_ciphertext(&store, "user-42", &STANDARD.encode(&blob[..blob.len() / 2])).await;

    let result = vault.retrieve_secret("user-42").await;
    assert!(matches!(result, Err(SecretError::Integrity(_))));
}

#[tokio::test]
async fn test_ciphertext_does_not_contain_plaintext() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();

    let store = raw_store(&deployment).await;
    let ciphertext = stored_ciphertext(&store, "user-42").await;
    assert!(!ciphertext.contains("Tr0ub4dor&3"));

    let blob = STANDARD.decode(&ciphertext).unwrap();
    assert!(!blob.windows(11).any(|w| w == b"Tr0ub4dor&3"));
}

#[tokio::test]
async fn test_non_utf8_stored_text_fails_integrity() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();

    let store = raw_store(&deployment).await;
    let mut raw = stored_ciphertext(&store, "user-42").await.into_bytes();
    let mid = raw.len() / 2;
    raw[mid] ^= 0x80;

    sqlx::query("UPDATE passwords SET password = CAST(? AS TEXT) WHERE owner_id = ?")
        .bind(raw)
        .bind("user-42")
        .execute(store.pool())
        .await
        .unwrap();

    let result = vault.retrieve_secret("user-42").await;
    assert!(matches!(result, Err(SecretError::Integrity(_))));
}
