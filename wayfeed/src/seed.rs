//! Default dataset used when a stored collection is absent or unreadable.

use chrono::{Duration, Utc};

use crate::model::{Comment, Notification, NotificationKind, Post, User};

/// Seed users. The first entry is the current actor.
pub fn users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: 1,
            name: "Sarah Chen".to_string(),
            username: "@sarahexplores".to_string(),
            avatar: "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=150"
                .to_string(),
            verified: true,
            bio: Some("Chasing sunrises on six continents".to_string()),
            location: Some("Singapore".to_string()),
            joined_date: now - Duration::days(820),
            followers_count: 12400,
            following_count: 310,
            posts_count: 2,
        },
        User {
            id: 2,
            name: "Marco Rossi".to_string(),
            username: "@marcowanders".to_string(),
            avatar: "https://images.pexels.com/photos/91227/pexels-photo-91227.jpeg?auto=compress&cs=tinysrgb&w=150"
                .to_string(),
            verified: false,
            bio: Some("Slow travel and street food".to_string()),
            location: Some("Bologna, Italy".to_string()),
            joined_date: now - Duration::days(410),
            followers_count: 980,
            following_count: 542,
            posts_count: 1,
        },
        User {
            id: 3,
            name: "Aiko Tanaka".to_string(),
            username: "@aiko_onsen".to_string(),
            avatar: "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150"
                .to_string(),
            verified: true,
            bio: None,
            location: Some("Kyoto, Japan".to_string()),
            joined_date: now - Duration::days(150),
            followers_count: 5200,
            following_count: 88,
            posts_count: 0,
        },
    ]
}

/// Seed posts, newest-first. Authors are drawn from [`users`].
pub fn posts() -> Vec<Post> {
    let now = Utc::now();
    let users = users();
    let sarah = users[0].clone();
    let marco = users[1].clone();

    vec![
        Post {
            id: 3,
            user: sarah.clone(),
            title: "Bali Sunrise at Mount Batur".to_string(),
            description: "We started the hike at 3am and reached the rim just as the sky \
                          turned orange. Worth every step."
                .to_string(),
            image: "https://images.pexels.com/photos/2166559/pexels-photo-2166559.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            location: "Bali, Indonesia".to_string(),
            tags: vec!["adventure".to_string(), "hiking".to_string(), "beach".to_string()],
            likes: 214,
            comments: vec![Comment {
                id: 1,
                user: marco.clone(),
                text: "Adding this to my list right now.".to_string(),
                created_at: now - Duration::days(2),
                likes: 4,
                is_reported: false,
            }],
            created_at: now - Duration::days(3),
            is_liked: false,
            is_reported: false,
            report_count: 0,
        },
        Post {
            id: 2,
            user: marco,
            title: "A Week of Markets in Marrakech".to_string(),
            description: "Seven days of tagines, mint tea and getting happily lost in the \
                          souks of the medina."
                .to_string(),
            image: "https://images.pexels.com/photos/3889843/pexels-photo-3889843.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            location: "Marrakech, Morocco".to_string(),
            tags: vec!["culture".to_string(), "food".to_string()],
            likes: 89,
            comments: Vec::new(),
            created_at: now - Duration::days(9),
            is_liked: false,
            is_reported: false,
            report_count: 0,
        },
        Post {
            id: 1,
            user: sarah,
            title: "Kayaking the Fjords".to_string(),
            description: "Paddling under thousand-meter cliffs in total silence. Norway in \
                          September is criminally underrated."
                .to_string(),
            image: "https://images.pexels.com/photos/1497582/pexels-photo-1497582.jpeg?auto=compress&cs=tinysrgb&w=800"
                .to_string(),
            location: "Geirangerfjord, Norway".to_string(),
            tags: vec!["nature".to_string(), "adventure".to_string()],
            likes: 156,
            comments: Vec::new(),
            created_at: now - Duration::days(21),
            is_liked: false,
            is_reported: false,
            report_count: 0,
        },
    ]
}

/// Seed notifications, newest-first.
pub fn notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: 2,
            kind: NotificationKind::Follow,
            message: "Aiko Tanaka started following you".to_string(),
            created_at: now - Duration::days(1),
            read: false,
            post_id: None,
            user_id: Some(3),
        },
        Notification {
            id: 1,
            kind: NotificationKind::Admin,
            message: "Welcome to the travel community!".to_string(),
            created_at: now - Duration::days(14),
            read: true,
            post_id: None,
            user_id: None,
        },
    ]
}
