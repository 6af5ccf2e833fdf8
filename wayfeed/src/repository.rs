//! Entity repository: the single authoritative in-memory holder of users,
//! posts, notifications and saved-post membership.
//!
//! All mutation goes through the operations here, including every update to
//! a denormalized counter (`posts_count`, `likes`); callers never touch
//! counters directly. Operations addressed to a missing id return
//! [`FeedError::NotFound`] instead of silently doing nothing.
//!
//! Id issuance: posts and notifications draw from per-collection monotonic
//! counters owned by the repository, seeded to `max(existing ids) + 1` at
//! construction. Nothing is ever deleted in-session, so the observable id
//! sequence is identical to recomputing `max + 1` on each insert, while
//! staying safe if a future caller introduces real concurrency. Comment ids
//! are scoped to their parent post and remain `max + 1` within it.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::errors::{EntityKind, FeedError};
use crate::model::{Comment, Notification, NotificationKind, Post, PostContent, ProfilePatch, User};

/// Outcome of a like toggle, carrying what the controller needs to decide
/// notification emission.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeChange {
    pub post_id: u64,
    /// Whether the current actor likes the post after the toggle.
    pub liked: bool,
    /// The post's like counter after the toggle.
    pub likes: u64,
    pub owner_id: u64,
    pub title: String,
}

/// Outcome of adding a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentChange {
    pub post_id: u64,
    pub comment_id: u64,
    pub owner_id: u64,
    pub title: String,
}

/// The in-memory source of truth.
///
/// Owns all four collections plus the saved-post-id set. Views borrow from
/// it for the duration of a render; the interaction controller is the only
/// writer.
#[derive(Debug)]
pub struct Repository {
    users: Vec<User>,
    posts: Vec<Post>,
    notifications: Vec<Notification>,
    saved_post_ids: BTreeSet<u64>,
    next_post_id: u64,
    next_notification_id: u64,
    current_user_id: u64,
}

impl Repository {
    /// Build a repository around loaded (or seeded) collections. The first
    /// user in `users` becomes the current actor.
    pub fn new(
        users: Vec<User>,
        posts: Vec<Post>,
        notifications: Vec<Notification>,
        saved_post_ids: BTreeSet<u64>,
    ) -> Self {
        let next_post_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let next_notification_id = notifications.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let current_user_id = users.first().map(|u| u.id).unwrap_or(0);
        Self {
            users,
            posts,
            notifications,
            saved_post_ids,
            next_post_id,
            next_notification_id,
            current_user_id,
        }
    }

    // Read accessors. Posts and notifications are kept newest-first; that
    // order is canonical and filtering never re-sorts it.

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn saved_post_ids(&self) -> &BTreeSet<u64> {
        &self.saved_post_ids
    }

    pub fn post(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn current_user_id(&self) -> u64 {
        self.current_user_id
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user(self.current_user_id)
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Flip the viewer-relative like flag on a post, moving `likes` in
    /// lockstep: false→true adds one, true→false removes one. `likes` can
    /// never go negative.
    pub fn toggle_like(&mut self, post_id: u64) -> Result<LikeChange, FeedError> {
        let post = self.post_mut(post_id)?;
        if post.is_liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes += 1;
        }
        post.is_liked = !post.is_liked;
        Ok(LikeChange {
            post_id,
            liked: post.is_liked,
            likes: post.likes,
            owner_id: post.user.id,
            title: post.title.clone(),
        })
    }

    /// Toggle the post's membership in the saved set. Returns whether the
    /// post is saved after the toggle.
    pub fn toggle_save(&mut self, post_id: u64) -> Result<bool, FeedError> {
        if self.post(post_id).is_none() {
            return Err(FeedError::NotFound {
                entity: EntityKind::Post,
                id: post_id,
            });
        }
        if self.saved_post_ids.remove(&post_id) {
            Ok(false)
        } else {
            self.saved_post_ids.insert(post_id);
            Ok(true)
        }
    }

    /// Mark a post as reported and bump its report counter.
    pub fn set_reported(&mut self, post_id: u64) -> Result<(), FeedError> {
        let post = self.post_mut(post_id)?;
        post.is_reported = true;
        post.report_count += 1;
        Ok(())
    }

    /// Create a post from validated content, attributed to `author_id`.
    ///
    /// The author snapshot embedded in the post is taken before the
    /// author's `posts_count` is incremented, matching the order the
    /// original client captured it in. The new post is prepended, keeping
    /// the collection newest-first. Returns the assigned id.
    pub fn add_post(&mut self, content: PostContent, author_id: u64) -> Result<u64, FeedError> {
        let author = self
            .user(author_id)
            .ok_or(FeedError::NotFound {
                entity: EntityKind::User,
                id: author_id,
            })?
            .clone();

        let id = self.next_post_id;
        self.next_post_id += 1;

        self.posts.insert(
            0,
            Post {
                id,
                user: author,
                title: content.title,
                description: content.description,
                image: content.image,
                location: content.location,
                tags: content.tags,
                likes: 0,
                comments: Vec::new(),
                created_at: Utc::now(),
                is_liked: false,
                is_reported: false,
                report_count: 0,
            },
        );

        // Already checked above, so this cannot fail.
        if let Some(user) = self.users.iter_mut().find(|u| u.id == author_id) {
            user.posts_count += 1;
        }
        Ok(id)
    }

    /// Append a comment to a post. The comment id is `max + 1` within that
    /// post's comment sequence (1 for the first comment).
    pub fn add_comment(
        &mut self,
        post_id: u64,
        text: impl Into<String>,
        author_id: u64,
    ) -> Result<CommentChange, FeedError> {
        let author = self
            .user(author_id)
            .ok_or(FeedError::NotFound {
                entity: EntityKind::User,
                id: author_id,
            })?
            .clone();

        let post = self.post_mut(post_id)?;
        let comment_id = post.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        post.comments.push(Comment {
            id: comment_id,
            user: author,
            text: text.into(),
            created_at: Utc::now(),
            likes: 0,
            is_reported: false,
        });
        Ok(CommentChange {
            post_id,
            comment_id,
            owner_id: post.user.id,
            title: post.title.clone(),
        })
    }

    /// Merge the fields present in `patch` into the identified user. Values
    /// are applied as given; no validation is performed.
    pub fn edit_user(&mut self, user_id: u64, patch: ProfilePatch) -> Result<(), FeedError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(FeedError::NotFound {
                entity: EntityKind::User,
                id: user_id,
            })?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = patch.location {
            user.location = Some(location);
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = avatar;
        }
        Ok(())
    }

    /// Prepend a new unread notification and return its id.
    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        post_id: Option<u64>,
        user_id: Option<u64>,
    ) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.insert(
            0,
            Notification {
                id,
                kind,
                message: message.into(),
                created_at: Utc::now(),
                read: false,
                post_id,
                user_id,
            },
        );
        id
    }

    /// Mark one notification read. Idempotent.
    pub fn mark_notification_read(&mut self, id: u64) -> Result<(), FeedError> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(FeedError::NotFound {
                entity: EntityKind::Notification,
                id,
            })?;
        notification.read = true;
        Ok(())
    }

    /// Mark every notification read. Idempotent.
    pub fn mark_all_notifications_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    fn post_mut(&mut self, id: u64) -> Result<&mut Post, FeedError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FeedError::NotFound {
                entity: EntityKind::Post,
                id,
            })
    }
}
