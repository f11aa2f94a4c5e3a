//! MongoUserRepository against a real MongoDB.
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::{MongoUserRepository, NewUser, UserError, UserRepository};
use test_utils::{TestDataBuilder, TestMongo};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_rejected_by_unique_index() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_duplicate_email_is_rejected_by_unique_index");
    let repo = MongoUserRepository::new(&mongo.database(&data.database_name()));
    repo.create_indexes().await.unwrap();

    let email = data.email("ada");
    repo.create(NewUser {
        name: "Ada".into(),
        email: email.clone(),
    })
    .await
    .unwrap();

    let err = repo
        .create(NewUser {
            name: "Other Ada".into(),
            email: email.clone(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, UserError::DuplicateEmail(e) if e == email));
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_indexes_is_idempotent() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_create_indexes_is_idempotent");
    let repo = MongoUserRepository::new(&mongo.database(&data.database_name()));

    repo.create_indexes().await.unwrap();
    repo.create_indexes().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_returns_stored_users() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_find_all_returns_stored_users");
    let repo = MongoUserRepository::new(&mongo.database(&data.database_name()));

    let stored = repo
        .create(NewUser {
            name: "Grace".into(),
            email: data.email("grace"),
        })
        .await
        .unwrap();

    assert_eq!(repo.find_all().await.unwrap(), vec![stored]);
}
