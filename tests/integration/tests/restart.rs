//! Key and record persistence across simulated process restarts.

use passvault_integration_tests::Deployment;
use passvault_secrets::{KeySource, SecretError};

#[tokio::test]
async fn test_secret_survives_restart() {
    let deployment = Deployment::new();

    let vault = deployment.start().await;
    assert!(matches!(vault.keys().source(), KeySource::Generated(_)));
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();
    drop(vault);

    let restarted = deployment.start().await;
    assert!(matches!(restarted.keys().source(), KeySource::File(_)));
    let secret = restarted.retrieve_secret("user-42").await.unwrap().unwrap();
    assert_eq!(secret.expose_secret(), "Tr0ub4dor&3");
}

#[tokio::test]
async fn test_key_file_written_once() {
    let deployment = Deployment::new();

    deployment.start().await;
    let first = std::fs::read(deployment.key_path()).unwrap();

    deployment.start().await;
    deployment.start().await;
    let later = std::fs::read(deployment.key_path()).unwrap();

    assert_eq!(first.len(), 32);
    assert_eq!(first, later);
}

#[tokio::test]
async fn test_first_match_survives_restart() {
    let deployment = Deployment::new();

    let vault = deployment.start().await;
    vault.store_secret("user-42", "P1-original").await.unwrap();
    drop(vault);

    let vault = deployment.start().await;
    vault.store_secret("user-42", "P2-later").await.unwrap();
    drop(vault);

    let vault = deployment.start().await;
    let secret = vault.retrieve_secret("user-42").await.unwrap().unwrap();
    assert_eq!(secret.expose_secret(), "P1-original");
    assert_eq!(vault.record_count("user-42").await.unwrap(), 2);
}

#[tokio::test]
async fn test_swapped_key_file_makes_records_undecryptable() {
    let deployment = Deployment::new();

    let vault = deployment.start().await;
    vault.store_secret("user-42", "Tr0ub4dor&3").await.unwrap();
    drop(vault);

    std::fs::remove_file(deployment.key_path()).unwrap();

    let vault = deployment.start().await;
    assert!(matches!(vault.keys().source(), KeySource::Generated(_)));
    let result = vault.retrieve_secret("user-42").await;
    assert!(matches!(result, Err(SecretError::Integrity(_))));
}

#[tokio::test]
async fn test_unknown_owner_after_restart() {
    let deployment = Deployment::new();
    deployment.start().await.store_secret("someone", "pw").await.unwrap();

    let vault = deployment.start().await;
    assert!(vault.retrieve_secret("nonexistent-id").await.unwrap().is_none());
}
