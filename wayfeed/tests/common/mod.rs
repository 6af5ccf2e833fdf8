//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use wayfeed::{Post, Repository, User};

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid timestamp")
}

pub fn user(id: u64, name: &str, verified: bool) -> User {
    User {
        id,
        name: name.to_string(),
        username: format!("@{}", name.to_lowercase().replace(' ', "_")),
        avatar: format!("https://example.com/avatars/{id}.jpeg"),
        verified,
        bio: None,
        location: None,
        joined_date: base_time() - Duration::days(365),
        followers_count: 10,
        following_count: 10,
        posts_count: 0,
    }
}

pub fn post(id: u64, author: &User, title: &str, location: &str, tags: &[&str]) -> Post {
    Post {
        id,
        user: author.clone(),
        title: title.to_string(),
        description: format!("A story about {location} worth reading twice"),
        image: format!("https://example.com/images/{id}.jpeg"),
        location: location.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        likes: 0,
        comments: Vec::new(),
        created_at: base_time() - Duration::days(id as i64),
        is_liked: false,
        is_reported: false,
        report_count: 0,
    }
}

/// Two users and two posts, newest-first. The first user (Alice, id 1) is
/// the current actor and owns the Bali post; Bob owns the Paris one.
pub fn repository() -> Repository {
    let mut alice = user(1, "Alice Gray", true);
    let mut bob = user(2, "Bob Stone", false);
    alice.posts_count = 1;
    bob.posts_count = 1;
    let posts = vec![
        post(1, &alice, "Bali Sunrise", "Bali", &["beach"]),
        post(2, &bob, "Paris Walk", "Paris", &["culture"]),
    ];
    Repository::new(vec![alice, bob], posts, Vec::new(), BTreeSet::new())
}
