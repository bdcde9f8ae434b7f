use groupboard_store::db::Db;
use groupboard_store::errors::StoreError;
use groupboard_store::models::channel::{Channel, NewChannel};
use groupboard_store::seed;
use serde_json::{Map, Value};

async fn test_db() -> Db {
    Db::connect_in_memory().await.expect("in-memory db")
}

async fn insert_group(db: &Db, name: &str) -> i64 {
    sqlx::query("INSERT INTO groups(name) VALUES (?)")
        .bind(name)
        .execute(&db.0)
        .await
        .expect("insert group")
        .last_insert_rowid()
}

async fn channel_count(db: &Db) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM channels")
        .fetch_one(&db.0)
        .await
        .expect("count channels")
}

#[tokio::test]
async fn insert_assigns_id_and_round_trips() {
    let db = test_db().await;
    let gid = insert_group(&db, "General").await;

    let ch = NewChannel::new("Announcements", gid)
        .insert(&db)
        .await
        .expect("insert channel");

    assert_eq!(
        ch.to_json(),
        serde_json::json!({
            "id": ch.id,
            "name": "Announcements",
            "attributes": {},
            "group_id": gid,
        })
    );

    let stored = Channel::fetch(&db, ch.id).await.expect("fetch").expect("row");
    assert_eq!(stored, ch);
}

#[tokio::test]
async fn attributes_persist_and_default_empty() {
    let db = test_db().await;
    let gid = insert_group(&db, "Music").await;

    let mut attrs = Map::new();
    attrs.insert("genre".to_string(), Value::String("jazz".to_string()));
    attrs.insert("nsfw".to_string(), Value::Bool(false));

    let with = NewChannel::new("Artist", gid)
        .with_attributes(attrs.clone())
        .insert(&db)
        .await
        .expect("insert with attributes");
    let without = NewChannel::new("Music Genre", gid)
        .insert(&db)
        .await
        .expect("insert without attributes");

    let stored = Channel::fetch(&db, with.id).await.expect("fetch").expect("row");
    assert_eq!(stored.attributes, attrs);
    let stored = Channel::fetch(&db, without.id).await.expect("fetch").expect("row");
    assert!(stored.attributes.is_empty());
}

#[tokio::test]
async fn duplicate_name_in_same_group_conflicts() {
    let db = test_db().await;
    let gid = insert_group(&db, "Support").await;

    let first = NewChannel::new("FAQ", gid).insert(&db).await.expect("first insert");
    let err = NewChannel::new("FAQ", gid)
        .insert(&db)
        .await
        .expect_err("second insert must fail");
    assert!(matches!(err, StoreError::Conflict));

    // the first row is untouched
    assert_eq!(channel_count(&db).await, 1);
    let stored = Channel::fetch(&db, first.id).await.expect("fetch").expect("row");
    assert_eq!(stored.name, "FAQ");
}

#[tokio::test]
async fn same_name_under_another_group_is_fine() {
    let db = test_db().await;
    let a = insert_group(&db, "General").await;
    let b = insert_group(&db, "Support").await;

    NewChannel::new("Announcements", a).insert(&db).await.expect("group a");
    NewChannel::new("Announcements", b).insert(&db).await.expect("group b");
    assert_eq!(channel_count(&db).await, 2);
}

#[tokio::test]
async fn insert_with_absent_group_fails() {
    let db = test_db().await;
    let err = NewChannel::new("Orphan", 999)
        .insert(&db)
        .await
        .expect_err("foreign key must reject");
    assert!(matches!(err, StoreError::Database(_)));
    assert_eq!(channel_count(&db).await, 0);
}

#[tokio::test]
async fn empty_name_is_rejected_before_writing() {
    let db = test_db().await;
    let gid = insert_group(&db, "General").await;

    for name in ["", "   "] {
        let err = NewChannel::new(name, gid)
            .insert(&db)
            .await
            .expect_err("empty name must fail");
        assert!(matches!(err, StoreError::EmptyName));
    }
    assert_eq!(channel_count(&db).await, 0);
}

#[tokio::test]
async fn resolving_a_missing_group_is_an_error() {
    let db = test_db().await;
    insert_group(&db, "Support").await;

    let err = seed::resolve_groups(&db, &["Support", "General"])
        .await
        .expect_err("General is absent");
    match err {
        StoreError::UnknownGroup(name) => assert_eq!(name, "General"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn seeding_is_idempotent_across_runs() {
    let db = test_db().await;
    let total = seed::HOME_PAGE_CHANNELS.len() + seed::SHARED_INTEREST_CHANNELS.len();

    let first = seed::run(&db).await.expect("first run");
    assert_eq!(first.created, total);
    assert_eq!(first.skipped, 0);

    let second = seed::run(&db).await.expect("second run");
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, total);

    assert_eq!(channel_count(&db).await, total as i64);
}

#[tokio::test]
async fn conflict_does_not_abort_the_rest_of_the_batch() {
    let db = test_db().await;
    let gid = insert_group(&db, "Satire").await;
    NewChannel::new("Memes", gid).insert(&db).await.expect("pre-existing row");

    let report = seed::seed_channels(&db, &[("Humor", gid), ("Memes", gid), ("Irony", gid)])
        .await
        .expect("batch survives the conflict");
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(channel_count(&db).await, 3);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = test_db().await;
    sqlx::migrate!("./migrations")
        .run(&db.0)
        .await
        .expect("re-running migrations is a no-op");
}
