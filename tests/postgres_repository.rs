//! `PostgreSQL` repository tests.
//!
//! These need a running database and are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/todo_test cargo test -- --ignored
//! ```

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;
use sqlx::Row;

use common::{body_json, create_test_router, post_todo};
use todo_service::domain::{TodoItem, TodoItemId};
use todo_service::infrastructure::postgres::connect_pool;
use todo_service::infrastructure::{
    PostgresTodoItemRepository, RepositoryError, RepositoryFactory, StorageConfig, StorageMode,
    TodoItemRepository,
};

async fn repository() -> PostgresTodoItemRepository {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = connect_pool(&database_url, 2, Duration::from_secs(5))
        .await
        .unwrap();
    let repository = PostgresTodoItemRepository::new(pool);
    repository.ensure_schema().await.unwrap();
    repository
}

#[rstest]
#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn test_save_inserts_row() {
    let repository = repository().await;
    let item = TodoItem::create(TodoItemId::generate(), "Buy milk", true).unwrap();

    repository.save(&item).await.unwrap();

    let row = sqlx::query("SELECT title, is_complete FROM todo_items WHERE id = $1")
        .bind(*item.id().as_uuid())
        .fetch_one(repository.pool())
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("title"), "Buy milk");
    assert!(row.get::<bool, _>("is_complete"));
}

#[rstest]
#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn test_duplicate_id_is_reported() {
    let repository = repository().await;
    let item = TodoItem::open(TodoItemId::generate(), "Buy milk").unwrap();

    repository.save(&item).await.unwrap();
    let result = repository.save(&item).await;

    assert_eq!(result, Err(RepositoryError::DuplicateId(item.id())));
}

#[rstest]
#[tokio::test]
#[ignore] // requires DATABASE_URL
async fn test_factory_creates_schema_and_serves_requests() {
    let config = StorageConfig {
        mode: StorageMode::Postgres,
        database_url: std::env::var("DATABASE_URL").ok(),
        max_connections: 2,
    };
    let repository = RepositoryFactory::new(config).create().await.unwrap();
    let router = create_test_router(Arc::clone(&repository));

    let response = post_todo(router, json!({ "title": "Water the plants" }).to_string()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["title"], "Water the plants");
}
