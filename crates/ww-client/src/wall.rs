//! Blessings wall view-model.
//!
//! Fetches the list once, re-sorts it newest first and pages through it
//! locally. Changing page never refetches; only `refresh` does.

use tracing::warn;
use ww_core::models::GuestMessage;
use ww_core::wall::{into_columns, sort_newest_first, Pager, COLUMN_COUNT, PAGE_SIZE};

use crate::api::WishesApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallState {
    Loading,
    Failed,
    Empty,
    Loaded,
}

pub struct BlessingsWall {
    state: WallState,
    messages: Vec<GuestMessage>,
    pager: Pager,
}

impl Default for BlessingsWall {
    fn default() -> Self {
        Self::new()
    }
}

impl BlessingsWall {
    pub fn new() -> Self {
        Self {
            state: WallState::Loading,
            messages: Vec::new(),
            pager: Pager::new(0, PAGE_SIZE),
        }
    }

    /// One fetch of the full list. Any failure, including an unexpected
    /// body shape, lands in `Failed`; there is no retry.
    pub async fn load<A: WishesApi + ?Sized>(&mut self, api: &A) {
        self.state = WallState::Loading;
        match api.fetch_wishes().await {
            Ok(mut messages) => {
                sort_newest_first(&mut messages);
                self.pager = Pager::new(messages.len(), PAGE_SIZE);
                self.state = if messages.is_empty() {
                    WallState::Empty
                } else {
                    WallState::Loaded
                };
                self.messages = messages;
            }
            Err(e) => {
                warn!(error = %e, "could not load blessings");
                self.state = WallState::Failed;
            }
        }
    }

    /// Refetches after a new submission. Same as `load`.
    pub async fn refresh<A: WishesApi + ?Sized>(&mut self, api: &A) {
        self.load(api).await;
    }

    pub fn state(&self) -> WallState {
        self.state
    }

    /// All fetched messages, newest first.
    pub fn messages(&self) -> &[GuestMessage] {
        &self.messages
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn current_page_items(&self) -> &[GuestMessage] {
        self.pager.slice(&self.messages)
    }

    /// The current page dealt into three columns.
    pub fn current_columns(&self) -> Vec<Vec<&GuestMessage>> {
        into_columns(self.current_page_items(), COLUMN_COUNT)
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, MockWishesApi};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn messages(n: usize) -> Vec<GuestMessage> {
        let base = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        (0..n)
            .map(|i| GuestMessage {
                id: Uuid::new_v4(),
                name: format!("guest {i}"),
                message: "hi".into(),
                timestamp: base + Duration::minutes(i as i64),
            })
            .collect()
    }

    fn api_returning(list: Vec<GuestMessage>) -> MockWishesApi {
        let mut api = MockWishesApi::new();
        api.expect_fetch_wishes()
            .times(1)
            .returning(move || Ok(list.clone()));
        api
    }

    #[tokio::test]
    async fn test_starts_loading() {
        assert_eq!(BlessingsWall::new().state(), WallState::Loading);
    }

    #[tokio::test]
    async fn test_load_sorts_newest_first() {
        let api = api_returning(messages(5));
        let mut wall = BlessingsWall::new();
        wall.load(&api).await;

        assert_eq!(wall.state(), WallState::Loaded);
        let names: Vec<_> = wall.messages().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["guest 4", "guest 3", "guest 2", "guest 1", "guest 0"]);
    }

    #[tokio::test]
    async fn test_empty_list() {
        let api = api_returning(Vec::new());
        let mut wall = BlessingsWall::new();
        wall.load(&api).await;
        assert_eq!(wall.state(), WallState::Empty);
        assert!(wall.current_columns().iter().all(Vec::is_empty));
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let mut api = MockWishesApi::new();
        api.expect_fetch_wishes().returning(|| {
            Err(ClientError::Status {
                status: 500,
                message: "Failed to process wish".into(),
            })
        });
        let mut wall = BlessingsWall::new();
        wall.load(&api).await;
        assert_eq!(wall.state(), WallState::Failed);
    }

    #[tokio::test]
    async fn test_paging_does_not_refetch() {
        // `times(1)` on the mock fails the test if paging fetched again.
        let api = api_returning(messages(20));
        let mut wall = BlessingsWall::new();
        wall.load(&api).await;

        assert_eq!(wall.pager().total_pages(), 3);
        assert_eq!(wall.current_page_items().len(), 9);
        assert!(wall.next_page());
        assert!(wall.next_page());
        assert_eq!(wall.current_page_items().len(), 2);
        assert!(!wall.next_page());
        assert!(!wall.go_to(0));
        assert_eq!(wall.pager().current(), 3);
        assert!(wall.go_to(1));
        assert!(!wall.previous_page());
    }

    #[tokio::test]
    async fn test_columns_round_robin() {
        let api = api_returning(messages(7));
        let mut wall = BlessingsWall::new();
        wall.load(&api).await;

        let columns = wall.current_columns();
        let sizes: Vec<_> = columns.iter().map(Vec::len).collect();
        assert_eq!(sizes, [3, 2, 2]);
        assert_eq!(columns[0][0].name, "guest 6");
        assert_eq!(columns[1][0].name, "guest 5");
        assert_eq!(columns[0][1].name, "guest 3");
    }

    #[tokio::test]
    async fn test_refresh_resets_to_first_page() {
        let mut api = MockWishesApi::new();
        let mut calls = 0;
        api.expect_fetch_wishes().times(2).returning(move || {
            calls += 1;
            Ok(messages(if calls == 1 { 20 } else { 21 }))
        });

        let mut wall = BlessingsWall::new();
        wall.load(&api).await;
        wall.go_to(3);
        wall.refresh(&api).await;
        assert_eq!(wall.pager().current(), 1);
        assert_eq!(wall.messages().len(), 21);
    }
}
