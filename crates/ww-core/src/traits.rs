//! # Core Traits (Ports)
//!
//! Any store plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::GuestMessage;

/// Persistence contract for the guestbook: one named, ordered list.
///
/// The list is head-inserted, so `read_all` returns the newest insertion
/// first. Concurrent appends are ordered by whatever the backend's own
/// insert primitive guarantees; readers re-sort by timestamp anyway.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts the message at the head of the list and returns it.
    async fn append(&self, message: GuestMessage) -> anyhow::Result<GuestMessage>;

    /// Returns the whole list in store order.
    async fn read_all(&self) -> anyhow::Result<Vec<GuestMessage>>;

    /// Short backend identifier, used in logs and the health check.
    fn name(&self) -> &'static str;
}

/// Normalizes a store's retention cap: `Some(0)` means no cap, same as `None`.
///
/// A zero cap would otherwise delete the record an `append` just returned.
pub fn retention_cap(max_messages: Option<usize>) -> Option<usize> {
    max_messages.filter(|&cap| cap > 0)
}
