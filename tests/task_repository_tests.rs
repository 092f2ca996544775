use sea_orm::DatabaseConnection;
use tasklist_server::task::{OrmTaskRepository, TaskRecord, TaskRepository};

mod common;

pub struct TestContext {
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let db = common::setup_db().await?;
    Ok(TestContext { db })
}

fn record(id: Option<i32>, text: &str, status: bool) -> TaskRecord {
    TaskRecord {
        id,
        text: text.to_string(),
        status,
    }
}

#[tokio::test]
async fn save_without_id_inserts_and_assigns_identity() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    let saved = repository
        .save(record(None, "buy milk", false))
        .await
        .expect("Failed to save task");

    // Round-trip: looking the task up again yields a deep-equal copy.
    let found = repository
        .find_by_id(saved.id())
        .await
        .expect("Failed to find task")
        .expect("Task should exist");
    assert_eq!(found, saved);
    assert_eq!(found.text(), "buy milk");
    assert!(!found.status());
}

#[tokio::test]
async fn save_with_id_overwrites_the_existing_row() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    let saved = repository
        .save(record(None, "initial", false))
        .await
        .expect("Failed to save task");

    let updated = repository
        .save(record(Some(saved.id()), "changed", true))
        .await
        .expect("Failed to overwrite task");

    assert_eq!(updated.id(), saved.id());
    assert_eq!(updated.text(), "changed");
    assert!(updated.status());

    // Still a single row.
    let all = repository.find_all().await.expect("Failed to list tasks");
    assert_eq!(all, vec![updated]);
}

#[tokio::test]
async fn find_all_returns_tasks_in_primary_key_order() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    let first = repository.save(record(None, "one", false)).await.unwrap();
    let second = repository.save(record(None, "two", false)).await.unwrap();
    let third = repository.save(record(None, "three", true)).await.unwrap();

    let all = repository.find_all().await.expect("Failed to list tasks");
    assert_eq!(all, vec![first, second, third]);
}

#[tokio::test]
async fn find_by_id_of_missing_row_returns_none() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    let found = repository
        .find_by_id(99)
        .await
        .expect("Lookup of a missing ID must not fail");
    assert_eq!(found, None);
}

#[tokio::test]
async fn delete_by_id_of_missing_row_is_a_noop() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    repository
        .delete_by_id(99)
        .await
        .expect("Delete of a missing ID must not fail");
}

#[tokio::test]
async fn delete_by_id_removes_the_row() {
    let state = setup().await.expect("Failed to setup test context");
    let repository = OrmTaskRepository::new(&state.db);

    let saved = repository.save(record(None, "doomed", false)).await.unwrap();
    let kept = repository.save(record(None, "kept", false)).await.unwrap();

    repository
        .delete_by_id(saved.id())
        .await
        .expect("Failed to delete task");

    let all = repository.find_all().await.expect("Failed to list tasks");
    assert_eq!(all, vec![kept]);
}
