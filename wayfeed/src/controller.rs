//! Interaction controller: orchestrates user-triggered state transitions.
//!
//! Each action wraps a repository mutation with (a) an optional simulated
//! latency standing in for a remote call, (b) a per-action in-flight guard
//! that rejects duplicate submissions while one is pending, and (c) for
//! likes and comments, a notification side effect on positive transitions.
//! Within one action the repository mutation, any notification emission and
//! the durability writes complete under a single state lock, so they appear
//! as one unit before the next action on the same entity is accepted.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use log::debug;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::errors::{EntityKind, FeedError, StoreError};
use crate::filter::{self, ExploreFilters, FeedQuery};
use crate::model::{NotificationKind, Post, PostDraft, ProfilePatch, User};
use crate::repository::{CommentChange, LikeChange, Repository};
use crate::seed;
use crate::store::{NOTIFICATIONS_KEY, POSTS_KEY, Store, StoreBackend, USERS_KEY};
use crate::view::ViewState;

/// Simulated per-action latencies. Defaults mirror the delays the original
/// client used; [`Latency::none`] turns them off for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub like: Duration,
    pub save: Duration,
    pub report: Duration,
    pub comment: Duration,
    pub create_post: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            like: Duration::from_millis(300),
            save: Duration::from_millis(200),
            report: Duration::from_millis(500),
            comment: Duration::from_millis(500),
            create_post: Duration::from_millis(1000),
        }
    }
}

impl Latency {
    pub fn none() -> Self {
        Self {
            like: Duration::ZERO,
            save: Duration::ZERO,
            report: Duration::ZERO,
            comment: Duration::ZERO,
            create_post: Duration::ZERO,
        }
    }
}

/// A logical user action, keyed by the entity it targets. Two submissions
/// with the same key conflict; actions on different entities never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Like(u64),
    Save(u64),
    Report(u64),
    Comment(u64),
    CreatePost,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Like(id) => write!(f, "like post {id}"),
            Action::Save(id) => write!(f, "save post {id}"),
            Action::Report(id) => write!(f, "report post {id}"),
            Action::Comment(id) => write!(f, "comment on post {id}"),
            Action::CreatePost => f.write_str("create post"),
        }
    }
}

/// The single writer over the repository and the durable store.
///
/// Constructed per session; there is no global instance, so tests can run
/// any number of independent controllers.
#[derive(Debug)]
pub struct Controller<B> {
    state: Mutex<State<B>>,
    in_flight: StdMutex<HashSet<Action>>,
    latency: Latency,
}

#[derive(Debug)]
struct State<B> {
    repo: Repository,
    store: Store<B>,
}

impl<B: StoreBackend> Controller<B> {
    pub fn new(repository: Repository, store: Store<B>, latency: Latency) -> Self {
        Self {
            state: Mutex::new(State {
                repo: repository,
                store,
            }),
            in_flight: StdMutex::new(HashSet::new()),
            latency,
        }
    }

    /// Load all collections from `backend`, seeding any that are absent or
    /// unreadable, and build a controller around them.
    pub fn open(backend: B, latency: Latency) -> Self {
        let store = Store::new(backend);
        let users = store.load_collection(USERS_KEY, seed::users());
        let posts = store.load_collection(POSTS_KEY, seed::posts());
        let notifications = store.load_collection(NOTIFICATIONS_KEY, seed::notifications());
        let saved = store.load_saved_ids();
        let repository = Repository::new(users, posts, notifications, saved);
        Self::new(repository, store, latency)
    }

    /// Run a read-only closure against the repository.
    pub async fn with_repository<R>(&self, f: impl FnOnce(&Repository) -> R) -> R {
        let state = self.state.lock().await;
        f(&state.repo)
    }

    /// Project the currently visible post list for a view.
    pub async fn visible_posts(&self, view: &ViewState, filters: &ExploreFilters) -> Vec<Post> {
        let state = self.state.lock().await;
        let query = FeedQuery {
            mode: view.mode(),
            current_user_id: state.repo.current_user_id(),
            saved_post_ids: state.repo.saved_post_ids(),
            search: view.search_query(),
            filters,
            now: Utc::now(),
        };
        filter::visible_posts(state.repo.posts(), &query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn unread_notification_count(&self) -> usize {
        self.with_repository(|repo| repo.unread_notification_count()).await
    }

    /// Toggle the like on a post. Emits a notification only on the positive
    /// transition (liking, not unliking) and never for the actor's own
    /// post.
    pub async fn like(&self, post_id: u64) -> Result<LikeChange, FeedError> {
        let _guard = self.begin(Action::Like(post_id))?;
        sleep(self.latency.like).await;

        let mut state = self.state.lock().await;
        let change = state.repo.toggle_like(post_id)?;
        debug!(
            "post {post_id}: liked={} likes={}",
            change.liked, change.likes
        );
        // Persist in mutation order: posts before the notification side
        // effect, so a failed posts write never strands a notification in
        // the durable store.
        state.persist_posts()?;
        if change.liked && change.owner_id != state.repo.current_user_id() {
            let actor = state.current_user()?.clone();
            let message = format!("{} liked your post \"{}\"", actor.name, change.title);
            state
                .repo
                .add_notification(NotificationKind::Like, message, Some(post_id), Some(actor.id));
            state.persist_notifications()?;
        }
        Ok(change)
    }

    /// Toggle the post's membership in the saved set. Returns whether it is
    /// saved afterwards.
    pub async fn save(&self, post_id: u64) -> Result<bool, FeedError> {
        let _guard = self.begin(Action::Save(post_id))?;
        sleep(self.latency.save).await;

        let mut state = self.state.lock().await;
        let saved = state.repo.toggle_save(post_id)?;
        debug!("post {post_id}: saved={saved}");
        state.persist_saved_ids()?;
        Ok(saved)
    }

    /// Report a post.
    pub async fn report(&self, post_id: u64) -> Result<(), FeedError> {
        let _guard = self.begin(Action::Report(post_id))?;
        sleep(self.latency.report).await;

        let mut state = self.state.lock().await;
        state.repo.set_reported(post_id)?;
        debug!("post {post_id}: reported");
        state.persist_posts()?;
        Ok(())
    }

    /// Add a comment to a post. Every comment is a positive transition, so
    /// a notification is emitted unless the actor owns the post.
    pub async fn comment(&self, post_id: u64, text: impl Into<String>) -> Result<CommentChange, FeedError> {
        let _guard = self.begin(Action::Comment(post_id))?;
        sleep(self.latency.comment).await;

        let mut state = self.state.lock().await;
        let actor_id = state.repo.current_user_id();
        let change = state.repo.add_comment(post_id, text, actor_id)?;
        debug!("post {post_id}: comment {} added", change.comment_id);
        state.persist_posts()?;
        if change.owner_id != actor_id {
            let actor = state.current_user()?.clone();
            let message = format!("{} commented on your post \"{}\"", actor.name, change.title);
            state
                .repo
                .add_notification(NotificationKind::Comment, message, Some(post_id), Some(actor.id));
            state.persist_notifications()?;
        }
        Ok(change)
    }

    /// Validate a draft and create a post attributed to the current actor.
    /// Validation failures surface before any latency or mutation.
    pub async fn create_post(&self, draft: PostDraft) -> Result<u64, FeedError> {
        let _guard = self.begin(Action::CreatePost)?;
        let content = draft.validate()?;
        sleep(self.latency.create_post).await;

        let mut state = self.state.lock().await;
        let author_id = state.repo.current_user_id();
        let post_id = state.repo.add_post(content, author_id)?;
        debug!("post {post_id} created by user {author_id}");
        state.persist_posts()?;
        state.persist_users()?;
        Ok(post_id)
    }

    /// Merge a profile patch into the current actor's record.
    pub async fn edit_profile(&self, patch: ProfilePatch) -> Result<(), FeedError> {
        let mut state = self.state.lock().await;
        let user_id = state.repo.current_user_id();
        state.repo.edit_user(user_id, patch)?;
        debug!("user {user_id}: profile updated");
        state.persist_users()?;
        Ok(())
    }

    /// Mark one notification read.
    pub async fn mark_notification_read(&self, id: u64) -> Result<(), FeedError> {
        let mut state = self.state.lock().await;
        state.repo.mark_notification_read(id)?;
        state.persist_notifications()?;
        Ok(())
    }

    /// Mark every notification read.
    pub async fn mark_all_notifications_read(&self) -> Result<(), FeedError> {
        let mut state = self.state.lock().await;
        state.repo.mark_all_notifications_read();
        state.persist_notifications()?;
        Ok(())
    }

    fn begin(&self, action: Action) -> Result<InFlightGuard<'_>, FeedError> {
        let mut pending = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(action) {
            return Err(FeedError::ActionInFlight {
                action: action.to_string(),
            });
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            action,
        })
    }
}

impl<B: StoreBackend> State<B> {
    fn current_user(&self) -> Result<&User, FeedError> {
        self.repo.current_user().ok_or(FeedError::NotFound {
            entity: EntityKind::User,
            id: self.repo.current_user_id(),
        })
    }

    fn persist_posts(&mut self) -> Result<(), StoreError> {
        self.store.save_collection(POSTS_KEY, self.repo.posts())
    }

    fn persist_users(&mut self) -> Result<(), StoreError> {
        self.store.save_collection(USERS_KEY, self.repo.users())
    }

    fn persist_notifications(&mut self) -> Result<(), StoreError> {
        self.store
            .save_collection(NOTIFICATIONS_KEY, self.repo.notifications())
    }

    fn persist_saved_ids(&mut self) -> Result<(), StoreError> {
        self.store.save_saved_ids(self.repo.saved_post_ids())
    }
}

/// Releases the in-flight slot when an action finishes, whichever way it
/// exits.
struct InFlightGuard<'a> {
    set: &'a StdMutex<HashSet<Action>>,
    action: Action,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        pending.remove(&self.action);
    }
}
