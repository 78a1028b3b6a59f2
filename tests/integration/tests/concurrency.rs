//! Concurrent callers sharing one vault.

use passvault_integration_tests::Deployment;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stores_same_owner_all_persist() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let vault = vault.clone();
        handles.push(tokio::spawn(async move {
            vault.store_secret("shared", &format!("password-{i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(vault.record_count("shared").await.unwrap(), 16);
    let first = vault.retrieve_secret("shared").await.unwrap().unwrap();
    assert!(first.expose_secret().starts_with("password-"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_round_trips_different_owners() {
    let deployment = Deployment::new();
    let vault = deployment.start().await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let vault = vault.clone();
        handles.push(tokio::spawn(async move {
            let owner = format!("user-{i}");
            let issued = vault.issue_password(&owner, Some(20)).await.unwrap();
            let retrieved = vault.retrieve_secret(&owner).await.unwrap().unwrap();
            assert_eq!(retrieved, issued);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(vault.owners().await.unwrap().len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_processes_share_database() {
    let deployment = Deployment::new();
    let a = deployment.start().await;
    let b = deployment.start().await;

    a.store_secret("user-42", "from-a").await.unwrap();
    b.store_secret("user-42", "from-b").await.unwrap();

    let secret = b.retrieve_secret("user-42").await.unwrap().unwrap();
    assert_eq!(secret.expose_secret(), "from-a");
    assert_eq!(a.record_count("user-42").await.unwrap(), 2);
}
