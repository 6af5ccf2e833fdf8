//! View filter engine: a pure projection from the post collection to the
//! currently visible list.
//!
//! Steps, in order: select the base set by view mode, apply the free-text
//! query, then (explore only) apply the structured filters conjunctively.
//! The base-set order (newest-first) is preserved throughout; filtering
//! never re-sorts.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use crate::model::Post;
use crate::view::ViewMode;

/// Sentinel meaning "no destination filter".
pub const ALL_DESTINATIONS: &str = "All Destinations";
/// Sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Structured criteria for the explore view. Each filter is independent and
/// skipped at its sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreFilters {
    /// Substring match against post location; [`ALL_DESTINATIONS`] skips.
    pub destination: String,
    /// Substring match against any tag; [`ALL_CATEGORIES`] skips.
    pub category: String,
    /// Window over `created_at`.
    pub date_range: DateRange,
    /// Contributor restriction.
    pub contributor: Contributor,
}

impl Default for ExploreFilters {
    fn default() -> Self {
        Self {
            destination: ALL_DESTINATIONS.to_string(),
            category: ALL_CATEGORIES.to_string(),
            date_range: DateRange::Any,
            contributor: Contributor::All,
        }
    }
}

/// How far back a post's `created_at` may lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    Any,
    LastWeek,
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    LastYear,
}

impl DateRange {
    fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = match self {
            DateRange::Any => return None,
            DateRange::LastWeek => 7,
            DateRange::LastMonth => 30,
            DateRange::LastThreeMonths => 90,
            DateRange::LastSixMonths => 180,
            DateRange::LastYear => 365,
        };
        Some(now - Duration::days(days))
    }
}

/// Contributor restriction. Only the verified-author variant is backed by
/// the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contributor {
    #[default]
    All,
    Verified,
}

/// Everything the projection depends on besides the posts themselves.
#[derive(Debug, Clone)]
pub struct FeedQuery<'a> {
    pub mode: ViewMode,
    pub current_user_id: u64,
    pub saved_post_ids: &'a BTreeSet<u64>,
    /// Free-text query; blank after trimming means absent.
    pub search: &'a str,
    /// Structured criteria, applied in [`ViewMode::Explore`] only.
    pub filters: &'a ExploreFilters,
    /// Reference instant for the date-range filter.
    pub now: DateTime<Utc>,
}

/// Compute the visible post list. Pure: no side effects, no state of its
/// own; must be re-evaluated whenever any input changes.
pub fn visible_posts<'a>(posts: &'a [Post], query: &FeedQuery<'_>) -> Vec<&'a Post> {
    let mut visible: Vec<&Post> = match query.mode {
        ViewMode::Trips => posts
            .iter()
            .filter(|p| p.is_owned_by(query.current_user_id))
            .collect(),
        ViewMode::Saved => posts
            .iter()
            .filter(|p| query.saved_post_ids.contains(&p.id))
            .collect(),
        _ => posts.iter().collect(),
    };

    let needle = query.search.trim().to_lowercase();
    if !needle.is_empty() {
        visible.retain(|post| matches_text(post, &needle));
    }

    if query.mode == ViewMode::Explore {
        let filters = query.filters;
        if filters.destination != ALL_DESTINATIONS && !filters.destination.is_empty() {
            let destination = filters.destination.to_lowercase();
            visible.retain(|post| post.location.to_lowercase().contains(&destination));
        }
        if filters.category != ALL_CATEGORIES && !filters.category.is_empty() {
            let category = filters.category.to_lowercase();
            visible.retain(|post| {
                post.tags.iter().any(|tag| tag.to_lowercase().contains(&category))
            });
        }
        if let Some(cutoff) = filters.date_range.cutoff(query.now) {
            visible.retain(|post| post.created_at >= cutoff);
        }
        if filters.contributor == Contributor::Verified {
            visible.retain(|post| post.user.verified);
        }
    }

    visible
}

fn matches_text(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.description.to_lowercase().contains(needle)
        || post.location.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
