//! Wayfeed core library.
//!
//! The client-side state core of a travel-sharing feed: an entity
//! repository over users, posts, notifications and saved-post membership;
//! a persistent store adapter with timestamp revival; a pure view-filter
//! engine; an interaction controller with per-action sequencing; and the
//! view-mode state machine. Rendering is out of scope; every view is a
//! projection of the repository plus transient UI state.

pub mod controller;
pub mod errors;
pub mod filter;
pub mod model;
pub mod repository;
pub mod seed;
pub mod store;
pub mod view;

pub use controller::{Action, Controller, Latency};
pub use errors::{EntityKind, FeedError, ReviveError, StoreError, ValidationError, ValidationIssue};
pub use filter::{
    ALL_CATEGORIES, ALL_DESTINATIONS, Contributor, DateRange, ExploreFilters, FeedQuery,
    visible_posts,
};
pub use model::{
    Comment, Notification, NotificationKind, Post, PostContent, PostDraft, ProfilePatch, User,
};
pub use repository::{CommentChange, LikeChange, Repository};
pub use store::{
    FileStore, MemoryStore, NOTIFICATIONS_KEY, POSTS_KEY, SAVED_IDS_KEY, Store, StoreBackend,
    USERS_KEY,
};
pub use view::{Layout, ViewMode, ViewState};
