//! Entity types for the travel feed.
//!
//! Field names are renamed to camelCase on the wire so that serialized
//! collections stay byte-compatible with the payloads the original client
//! kept in browser local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationIssue};

/// Minimum description length accepted by post creation.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Maximum title length accepted by post creation.
pub const MAX_TITLE_LEN: usize = 100;
/// Title substituted when a draft leaves the title blank.
pub const DEFAULT_TITLE: &str = "Travel Experience";
/// Image used when a draft carries no image reference.
pub const FALLBACK_IMAGE: &str =
    "https://images.pexels.com/photos/1591373/pexels-photo-1591373.jpeg?auto=compress&cs=tinysrgb&w=800";

/// A user of the travel feed.
///
/// `followers_count`, `following_count` and `posts_count` are denormalized
/// aggregates; `posts_count` is kept in sync by the repository whenever a
/// post is attributed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub avatar: String,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub joined_date: DateTime<Utc>,
    pub followers_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
}

/// A travel post.
///
/// `user` is an embedded snapshot of the author taken at creation time, not
/// a live reference; later profile edits do not rewrite it. `is_liked` is
/// viewer-relative: it records whether the single current actor has liked
/// the post, and moves in lockstep with `likes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user: User,
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub tags: Vec<String>,
    pub likes: u64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_reported: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub report_count: u64,
}

impl Post {
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user.id == user_id
    }
}

/// A comment on a post. Ids are unique within the parent post's comment
/// sequence only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub user: User,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_reported: bool,
}

/// A notification shown in the notification panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Precomputed display string, e.g. `Sarah Chen liked your post "..."`.
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Closed set of notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Admin,
    Report,
}

/// Raw post-creation form input, before validation.
///
/// `tags` is the untokenized comma-separated string the form collects.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub tags: String,
    pub image: String,
}

impl PostDraft {
    /// Validate the draft and normalize it into post content.
    ///
    /// Rules: description is required and must be at least
    /// [`MIN_DESCRIPTION_LEN`] characters after trimming; location is
    /// required; title may not exceed [`MAX_TITLE_LEN`] characters. A blank
    /// title falls back to [`DEFAULT_TITLE`], a blank image to
    /// [`FALLBACK_IMAGE`], and tags are split on commas with blanks dropped.
    pub fn validate(&self) -> Result<PostContent, ValidationError> {
        let mut issues = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            issues.push(ValidationIssue::new(
                "description",
                "validation.required",
                "Description is required",
            ));
        } else if description.chars().count() < MIN_DESCRIPTION_LEN {
            issues.push(ValidationIssue::new(
                "description",
                "validation.length",
                format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            ));
        }

        let location = self.location.trim();
        if location.is_empty() {
            issues.push(ValidationIssue::new(
                "location",
                "validation.required",
                "Location is required",
            ));
        }

        let title = self.title.trim();
        if title.chars().count() > MAX_TITLE_LEN {
            issues.push(ValidationIssue::new(
                "title",
                "validation.length",
                format!("Title must be less than {MAX_TITLE_LEN} characters"),
            ));
        }

        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }

        Ok(PostContent {
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            description: description.to_string(),
            location: location.to_string(),
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            image: if self.image.trim().is_empty() {
                FALLBACK_IMAGE.to_string()
            } else {
                self.image.clone()
            },
        })
    }
}

/// Validated, normalized content ready for [`Repository::add_post`].
///
/// [`Repository::add_post`]: crate::repository::Repository::add_post
#[derive(Debug, Clone, PartialEq)]
pub struct PostContent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub image: String,
}

/// Partial profile update; only fields that are `Some` are merged. Values
/// are applied as given, without validation.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}
