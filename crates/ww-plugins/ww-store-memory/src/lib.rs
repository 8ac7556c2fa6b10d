//! # ww-store-memory
//!
//! In-process implementation of `MessageStore`.
//! Nothing survives a restart; used for local development and tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use ww_core::models::GuestMessage;
use ww_core::traits::{retention_cap, MessageStore};

#[derive(Default)]
pub struct MemoryMessageStore {
    list: RwLock<VecDeque<GuestMessage>>,
    /// Oldest records beyond this many are dropped after each append.
    max_messages: Option<usize>,
}

impl MemoryMessageStore {
    /// `Some(0)` is treated as no cap.
    pub fn new(max_messages: Option<usize>) -> Self {
        Self {
            list: RwLock::new(VecDeque::new()),
            max_messages: retention_cap(max_messages),
        }
    }

    /// Pre-populates the store, newest first, as if `messages` had been
    /// appended in reverse order.
    pub fn with_messages(messages: Vec<GuestMessage>) -> Self {
        Self {
            list: RwLock::new(messages.into()),
            max_messages: None,
        }
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, message: GuestMessage) -> anyhow::Result<GuestMessage> {
        let mut list = self.list.write().await;
        list.push_front(message.clone());
        if let Some(cap) = self.max_messages {
            list.truncate(cap);
        }
        debug!(id = %message.id, len = list.len(), "appended wish");
        Ok(message)
    }

    async fn read_all(&self) -> anyhow::Result<Vec<GuestMessage>> {
        Ok(self.list.read().await.iter().cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
