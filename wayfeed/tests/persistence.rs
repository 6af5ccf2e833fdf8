//! Store adapter: revival round-trips, corruption fallback, file backend.

mod common;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use wayfeed::{
    Comment, FileStore, MemoryStore, NOTIFICATIONS_KEY, POSTS_KEY, Post, Store, USERS_KEY, seed,
};

#[test]
fn post_timestamps_revive_through_a_round_trip() {
    let t = Utc.with_ymd_and_hms(2024, 4, 2, 8, 15, 30).single().expect("valid timestamp");
    let t2 = Utc.with_ymd_and_hms(2024, 4, 3, 19, 0, 5).single().expect("valid timestamp");

    let alice = common::user(1, "Alice Gray", true);
    let mut post = common::post(1, &alice, "Bali Sunrise", "Bali", &["beach"]);
    post.created_at = t;
    post.comments.push(Comment {
        id: 1,
        user: alice,
        text: "Stunning".to_string(),
        created_at: t2,
        likes: 0,
        is_reported: false,
    });

    let mut store = Store::new(MemoryStore::new());
    store.save_collection(POSTS_KEY, &[post]).expect("save should succeed");
    let loaded: Vec<Post> = store.load_collection(POSTS_KEY, Vec::new());
    assert_eq!(loaded[0].created_at, t);
    assert_eq!(loaded[0].comments[0].created_at, t2);
}

#[test]
fn zone_less_timestamps_are_read_as_utc() {
    let payload = r#"[{
        "id": 1,
        "type": "admin",
        "message": "Welcome!",
        "createdAt": "2024-04-02T08:15:30",
        "read": false
    }]"#;
    let backend = MemoryStore::new().with_entry(NOTIFICATIONS_KEY, payload);
    let store = Store::new(backend);
    let loaded: Vec<wayfeed::Notification> = store.load_collection(NOTIFICATIONS_KEY, Vec::new());
    let expected = Utc.with_ymd_and_hms(2024, 4, 2, 8, 15, 30).single().expect("valid timestamp");
    assert_eq!(loaded[0].created_at, expected);
}

#[test]
fn corrupt_collection_falls_back_to_seed() {
    common::init_logging();
    let backend = MemoryStore::new().with_entry(USERS_KEY, r#"[{"id": "not-a-number"}]"#);
    let store = Store::new(backend);
    let loaded = store.load_collection(USERS_KEY, seed::users());
    assert_eq!(loaded[0].name, "Sarah Chen");
}

#[test]
fn unparseable_timestamp_counts_as_corruption() {
    common::init_logging();
    let payload = r#"[{
        "id": 1,
        "type": "admin",
        "message": "Welcome!",
        "createdAt": "yesterday-ish",
        "read": false
    }]"#;
    let backend = MemoryStore::new().with_entry(NOTIFICATIONS_KEY, payload);
    let store = Store::new(backend);
    let loaded = store.load_collection(NOTIFICATIONS_KEY, seed::notifications());
    assert_eq!(loaded.len(), seed::notifications().len());
}

#[test]
fn file_store_round_trips_across_instances() {
    let dir = TempDir::new().expect("temp dir");
    let alice = common::user(1, "Alice Gray", true);
    let posts = vec![common::post(1, &alice, "Bali Sunrise", "Bali", &["beach"])];

    {
        let backend = FileStore::open(dir.path()).expect("open should succeed");
        let mut store = Store::new(backend);
        store.save_collection(POSTS_KEY, &posts).expect("save should succeed");
    }

    let backend = FileStore::open(dir.path()).expect("open should succeed");
    let store = Store::new(backend);
    let loaded: Vec<Post> = store.load_collection(POSTS_KEY, Vec::new());
    assert_eq!(loaded, posts);
}

#[test]
fn saved_ids_survive_as_an_ordered_sequence() {
    let dir = TempDir::new().expect("temp dir");
    {
        let backend = FileStore::open(dir.path()).expect("open should succeed");
        let mut store = Store::new(backend);
        let ids = [9, 2, 5].into_iter().collect();
        store.save_saved_ids(&ids).expect("save should succeed");
    }
    let backend = FileStore::open(dir.path()).expect("open should succeed");
    let raw = std::fs::read_to_string(dir.path().join("savedPostIds.json")).expect("file exists");
    assert_eq!(raw, "[2,5,9]");
    let store = Store::new(backend);
    assert_eq!(store.load_saved_ids(), [2, 5, 9].into_iter().collect());
}
