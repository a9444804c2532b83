//! `edge-server migrate` against a fresh and an existing database.

use chrono::Duration;
use edge_server::migrate;
use storage::Database;
use tempfile::TempDir;

#[tokio::test]
async fn test_migrate_creates_schema_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("migrate.db").display());

    let first = migrate(&url).await.unwrap();
    for table in [
        "conversation_messages",
        "member",
        "organization",
        "product",
        "product_subscription",
        "session",
        "user",
    ] {
        assert!(first.tables.iter().any(|t| t == table), "missing {}", table);
    }
    assert_eq!(first.message_count, 0);

    let second = migrate(&url).await.unwrap();
    assert_eq!(first.tables, second.tables);
}

#[tokio::test]
async fn test_migrate_prunes_expired_sessions() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("migrate.db").display());
    let db = Database::connect(&url).await.unwrap();
    db.accounts().create_user("42", "Ada", "a@x.com").await.unwrap();
    db.sessions().create("42", Duration::seconds(-10)).await.unwrap();
    let live = db.sessions().create("42", Duration::hours(1)).await.unwrap();

    let report = migrate(&url).await.unwrap();

    assert_eq!(report.expired_sessions_removed, 1);
    assert!(db.sessions().find_by_token(&live).await.unwrap().is_some());
}
