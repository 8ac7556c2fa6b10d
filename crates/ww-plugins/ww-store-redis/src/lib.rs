//! # ww-store-redis
//!
//! Redis list implementation of `MessageStore`.
//! Each element of the list is one record's JSON. Writes are `LPUSH` (plus
//! `LTRIM` when a retention cap is set), reads are `LRANGE 0 -1`.

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Config, Pool, Runtime};
use tracing::{info, warn};
use ww_core::models::GuestMessage;
use ww_core::traits::{retention_cap, MessageStore};

pub struct RedisMessageStore {
    pool: Pool,
    list_key: String,
    max_messages: Option<usize>,
}

impl RedisMessageStore {
    /// Builds a connection pool for `url`. Connections are opened lazily, so a
    /// bad host surfaces on the first request rather than here.
    pub fn connect(url: &str, list_key: &str, max_messages: Option<usize>) -> anyhow::Result<Self> {
        let pool = Config::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        info!(list_key, "redis message store configured");
        Ok(Self::from_pool(pool, list_key, max_messages))
    }

    /// `Some(0)` is treated as no cap.
    pub fn from_pool(pool: Pool, list_key: &str, max_messages: Option<usize>) -> Self {
        Self {
            pool,
            list_key: list_key.to_string(),
            max_messages: retention_cap(max_messages),
        }
    }
}

fn encode(message: &GuestMessage) -> anyhow::Result<String> {
    Ok(serde_json::to_string(message)?)
}

/// Decodes list elements, skipping any that are not a valid record.
fn decode_entries(raw: Vec<String>) -> Vec<GuestMessage> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_str(&entry) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(index, error = %e, "skipping undecodable list entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl MessageStore for RedisMessageStore {
    async fn append(&self, message: GuestMessage) -> anyhow::Result<GuestMessage> {
        let payload = encode(&message)?;
        let mut conn = self.pool.get().await?;

        let _: () = conn.lpush(self.list_key.as_str(), payload).await?;
        if let Some(cap) = self.max_messages {
            let stop = isize::try_from(cap).unwrap_or(isize::MAX) - 1;
            let _: () = conn.ltrim(self.list_key.as_str(), 0, stop).await?;
        }

        Ok(message)
    }

    async fn read_all(&self) -> anyhow::Result<Vec<GuestMessage>> {
        let mut conn = self.pool.get().await?;
        let raw: Vec<String> = conn.lrange(self.list_key.as_str(), 0, -1).await?;
        Ok(decode_entries(raw))
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
