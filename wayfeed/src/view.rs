//! View-mode state machine and transient UI state.
//!
//! Purely synchronous and single-threaded: transitions are unconditional
//! except that a detail view always carries the post it was opened for.
//! None of this state is persisted.

/// Top-level screen or modal currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Feed,
    Create,
    Detail,
    Notifications,
    Explore,
    Trips,
    Saved,
    Groups,
    Bookings,
    Reports,
    Profile,
}

impl ViewMode {
    /// Modal-like states close back to the feed rather than standing in the
    /// main navigation.
    pub fn is_modal(self) -> bool {
        matches!(
            self,
            ViewMode::Create | ViewMode::Detail | ViewMode::Notifications | ViewMode::Profile
        )
    }
}

/// Layout toggle for the post grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    List,
}

/// Transient UI state: the active view, selected entities and the free-text
/// search query. The repository is never touched from here.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    mode: ViewMode,
    selected_post: Option<u64>,
    selected_user: Option<u64>,
    search_query: String,
    layout: Layout,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The post a detail view was opened for.
    pub fn selected_post(&self) -> Option<u64> {
        self.selected_post
    }

    /// The profile subject. `None` means the current actor.
    pub fn selected_user(&self) -> Option<u64> {
        self.selected_user
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Switch views through the main navigation. Clears the search query.
    pub fn navigate(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.search_query.clear();
    }

    /// Open the post-creation modal.
    pub fn open_create(&mut self) {
        self.mode = ViewMode::Create;
    }

    /// Open the detail view for a post.
    pub fn open_post(&mut self, post_id: u64) {
        self.selected_post = Some(post_id);
        self.mode = ViewMode::Detail;
    }

    /// Open the notification panel.
    pub fn open_notifications(&mut self) {
        self.mode = ViewMode::Notifications;
    }

    /// Open a profile view. `None` shows the current actor.
    pub fn open_profile(&mut self, user_id: Option<u64>) {
        self.selected_user = user_id;
        self.mode = ViewMode::Profile;
    }

    /// Close whatever modal is open: back to the feed, selections cleared.
    /// The search query survives a modal close.
    pub fn close(&mut self) {
        self.mode = ViewMode::Feed;
        self.selected_post = None;
        self.selected_user = None;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_feed() {
        let state = ViewState::new();
        assert_eq!(state.mode(), ViewMode::Feed);
        assert_eq!(state.selected_post(), None);
    }

    #[test]
    fn navigation_clears_the_search_query() {
        let mut state = ViewState::new();
        state.set_search_query("bali");
        state.navigate(ViewMode::Explore);
        assert_eq!(state.search_query(), "");
        assert_eq!(state.mode(), ViewMode::Explore);
    }

    #[test]
    fn close_returns_to_feed_and_clears_selections() {
        let mut state = ViewState::new();
        state.set_search_query("kyoto");
        state.open_post(3);
        assert_eq!(state.mode(), ViewMode::Detail);
        state.close();
        assert_eq!(state.mode(), ViewMode::Feed);
        assert_eq!(state.selected_post(), None);
        // Modal close keeps the query; only main navigation clears it.
        assert_eq!(state.search_query(), "kyoto");
    }

    #[test]
    fn profile_defaults_to_the_current_actor() {
        let mut state = ViewState::new();
        state.open_profile(None);
        assert_eq!(state.mode(), ViewMode::Profile);
        assert_eq!(state.selected_user(), None);
        state.open_profile(Some(2));
        assert_eq!(state.selected_user(), Some(2));
        state.close();
        assert_eq!(state.selected_user(), None);
    }

    #[test]
    fn modal_states_are_classified() {
        for mode in [
            ViewMode::Create,
            ViewMode::Detail,
            ViewMode::Notifications,
            ViewMode::Profile,
        ] {
            assert!(mode.is_modal());
        }
        assert!(!ViewMode::Explore.is_modal());
    }
}
