//! MongoTaskRepository against a real MongoDB.
//!
//! Run with `cargo test -p domain_tasks -- --ignored` (requires Docker).

use domain_tasks::{MongoTaskRepository, NewTask, TaskError, TaskRepository};
use test_utils::{TestDataBuilder, TestMongo};

fn new_task(title: &str, user_id: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: "desc".to_string(),
        user_id: user_id.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_then_find_all_in_insertion_order() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_save_then_find_all_in_insertion_order");
    let repo = MongoTaskRepository::new(&mongo.database(&data.database_name()));

    let first = repo.save(new_task("first", &data.user_id())).await.unwrap();
    let second = repo.save(new_task("second", &data.user_id())).await.unwrap();

    let tasks = repo.find_all().await.unwrap();
    assert_eq!(tasks, vec![first, second]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_on_empty_collection() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_find_all_on_empty_collection");
    let repo = MongoTaskRepository::new(&mongo.database(&data.database_name()));

    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_rejects_empty_fields() {
    let mongo = TestMongo::new().await;
    let data = TestDataBuilder::from_test_name("test_save_rejects_empty_fields");
    let repo = MongoTaskRepository::new(&mongo.database(&data.database_name()));

    let err = repo.save(new_task("", &data.user_id())).await.unwrap_err();

    assert!(matches!(err, TaskError::Validation(fields) if fields == vec!["title"]));
    assert!(repo.find_all().await.unwrap().is_empty());
}
