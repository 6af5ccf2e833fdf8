//! View filter engine: base-set selection, text search, explore filters.

mod common;

use std::collections::BTreeSet;

use chrono::Duration;
use wayfeed::{
    Contributor, DateRange, ExploreFilters, FeedQuery, Post, Repository, ViewMode, visible_posts,
};

fn query<'a>(
    mode: ViewMode,
    saved: &'a BTreeSet<u64>,
    search: &'a str,
    filters: &'a ExploreFilters,
) -> FeedQuery<'a> {
    FeedQuery {
        mode,
        current_user_id: 1,
        saved_post_ids: saved,
        search,
        filters,
        now: common::base_time(),
    }
}

fn titles(posts: &[&Post]) -> Vec<String> {
    posts.iter().map(|p| p.title.clone()).collect()
}

#[test]
fn feed_mode_shows_everything_newest_first() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Bali Sunrise", "Paris Walk"]);
}

#[test]
fn trips_mode_shows_only_the_actors_posts() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Trips, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Bali Sunrise"]);
}

#[test]
fn saved_mode_follows_set_membership() {
    let repo = common::repository();
    let saved: BTreeSet<u64> = [2].into_iter().collect();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Saved, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Paris Walk"]);
}

#[test]
fn text_query_is_case_insensitive_and_matches_tags() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let by_tag = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "CULTURE", &filters));
    assert_eq!(titles(&by_tag), vec!["Paris Walk"]);
    let by_location = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "bali", &filters));
    assert_eq!(titles(&by_location), vec!["Bali Sunrise"]);
}

#[test]
fn whitespace_query_is_treated_as_absent() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "   ", &filters));
    assert_eq!(visible.len(), 2);
}

#[test]
fn explore_destination_filter_selects_by_location() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters {
        destination: "Bali".to_string(),
        ..Default::default()
    };
    let visible = visible_posts(repo.posts(), &query(ViewMode::Explore, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Bali Sunrise"]);
}

#[test]
fn destination_filter_is_ignored_outside_explore() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters {
        destination: "Bali".to_string(),
        ..Default::default()
    };
    let visible = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "", &filters));
    assert_eq!(visible.len(), 2);
}

#[test]
fn explore_filters_compose_conjunctively() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters {
        destination: "Bali".to_string(),
        category: "culture".to_string(),
        ..Default::default()
    };
    // Bali matches the destination but not the category; Paris the reverse.
    let visible = visible_posts(repo.posts(), &query(ViewMode::Explore, &saved, "", &filters));
    assert!(visible.is_empty());
}

#[test]
fn sentinel_values_skip_their_filters() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Explore, &saved, "", &filters));
    assert_eq!(visible.len(), 2);
}

#[test]
fn date_range_windows_on_created_at() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters {
        date_range: DateRange::LastWeek,
        ..Default::default()
    };
    // Fixture posts are one and two days old; push one outside the window.
    let mut posts: Vec<Post> = repo.posts().to_vec();
    posts[1].created_at = common::base_time() - Duration::days(30);
    let visible = visible_posts(&posts, &query(ViewMode::Explore, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Bali Sunrise"]);
}

#[test]
fn verified_contributor_filter_checks_the_author() {
    let repo = common::repository();
    let saved = BTreeSet::new();
    let filters = ExploreFilters {
        contributor: Contributor::Verified,
        ..Default::default()
    };
    // Alice is verified, Bob is not.
    let visible = visible_posts(repo.posts(), &query(ViewMode::Explore, &saved, "", &filters));
    assert_eq!(titles(&visible), vec!["Bali Sunrise"]);
}

#[test]
fn filtering_preserves_base_order() {
    let alice = common::user(1, "Alice Gray", true);
    let posts: Vec<Post> = (1..=5)
        .map(|id| common::post(id, &alice, &format!("Stop {id} in Bali"), "Bali", &["beach"]))
        .collect();
    let repo = Repository::new(vec![alice], posts, Vec::new(), BTreeSet::new());
    let saved = BTreeSet::new();
    let filters = ExploreFilters::default();
    let visible = visible_posts(repo.posts(), &query(ViewMode::Feed, &saved, "bali", &filters));
    let ids: Vec<u64> = visible.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
