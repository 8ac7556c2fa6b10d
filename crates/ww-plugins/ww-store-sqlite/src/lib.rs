//! # ww-store-sqlite Implementation
//!
//! Maps the guestbook list onto a SQLite table. Head insertion is modelled by
//! an autoincrement `seq` column; reads walk it in descending order, which is
//! the same "newest insertion first" order a list store returns.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;
use ww_core::models::GuestMessage;
use ww_core::traits::{retention_cap, MessageStore};

pub struct SqliteMessageStore {
    pool: SqlitePool,
    /// Rows are scoped to one list key, so several lists can share a file.
    list_key: String,
    max_messages: Option<usize>,
}

impl SqliteMessageStore {
    /// Opens (creating if missing) the database at `url` and ensures the schema.
    pub async fn connect(
        url: &str,
        list_key: &str,
        max_messages: Option<usize>,
    ) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database, so in-memory
        // stores are pinned to a single connection that never expires.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url, list_key, "connected to sqlite message store");
        Self::from_pool(pool, list_key, max_messages).await
    }

    /// Wraps an existing pool and ensures the schema. `Some(0)` is treated
    /// as no cap.
    pub async fn from_pool(
        pool: SqlitePool,
        list_key: &str,
        max_messages: Option<usize>,
    ) -> anyhow::Result<Self> {
        let store = Self {
            pool,
            list_key: list_key.to_string(),
            max_messages: retention_cap(max_messages),
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guest_messages (
                seq       INTEGER PRIMARY KEY AUTOINCREMENT,
                list_key  TEXT NOT NULL,
                id        TEXT NOT NULL UNIQUE,
                name      TEXT NOT NULL,
                message   TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_guest_messages_list ON guest_messages(list_key, seq)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes every row of this list outside the newest `cap`.
    async fn trim(&self, cap: usize) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM guest_messages
            WHERE list_key = ?
              AND seq NOT IN (
                SELECT seq FROM guest_messages
                WHERE list_key = ?
                ORDER BY seq DESC
                LIMIT ?
              )
            "#,
        )
        .bind(&self.list_key)
        .bind(&self.list_key)
        .bind(i64::try_from(cap).unwrap_or(i64::MAX))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_message(row: &SqliteRow) -> anyhow::Result<GuestMessage> {
    let id: String = row.try_get("id")?;
    let timestamp: DateTime<Utc> = row.try_get("timestamp")?;
    Ok(GuestMessage {
        id: Uuid::parse_str(&id)?,
        name: row.try_get("name")?,
        message: row.try_get("message")?,
        timestamp,
    })
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn append(&self, message: GuestMessage) -> anyhow::Result<GuestMessage> {
        sqlx::query(
            "INSERT INTO guest_messages (list_key, id, name, message, timestamp) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&self.list_key)
        .bind(message.id.to_string())
        .bind(&message.name)
        .bind(&message.message)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;

        if let Some(cap) = self.max_messages {
            let dropped = self.trim(cap).await?;
            if dropped > 0 {
                debug!(dropped, cap, "trimmed guestbook to retention cap");
            }
        }

        Ok(message)
    }

    async fn read_all(&self) -> anyhow::Result<Vec<GuestMessage>> {
        let rows = sqlx::query(
            "SELECT id, name, message, timestamp FROM guest_messages WHERE list_key = ? ORDER BY seq DESC",
        )
        .bind(&self.list_key)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_message).collect()
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ww_core::models::NewWish;

    async fn memory_store(cap: Option<usize>) -> SqliteMessageStore {
        SqliteMessageStore::connect("sqlite::memory:", "wedding_wishes", cap)
            .await
            .expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn test_append_and_read_back_newest_first() {
        let store = memory_store(None).await;

        let first = store
            .append(NewWish::new("Ada", "Congrats!").into_message())
            .await
            .unwrap();
        let second = store
            .append(NewWish::new("Grace", "Cheers").into_message())
            .await
            .unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(all[1].name, "Ada");
        assert_eq!(all[1].message, "Congrats!");
    }

    #[tokio::test]
    async fn test_timestamp_survives_round_trip() {
        let store = memory_store(None).await;
        let ts = Utc.with_ymd_and_hms(2025, 6, 14, 17, 30, 0).unwrap() + Duration::milliseconds(250);
        let mut message = NewWish::new("Ada", "hi").into_message();
        message.timestamp = ts;
        store.append(message).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all[0].timestamp, ts);
    }

    #[tokio::test]
    async fn test_duplicate_submissions_are_distinct_records() {
        let store = memory_store(None).await;
        store.append(NewWish::new("Ada", "same").into_message()).await.unwrap();
        store.append(NewWish::new("Ada", "same").into_message()).await.unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }

    #[tokio::test]
    async fn test_retention_cap_keeps_newest() {
        let store = memory_store(Some(3)).await;
        for i in 0..5 {
            store
                .append(NewWish::new(format!("guest {i}"), "hi").into_message())
                .await
                .unwrap();
        }
        let names: Vec<_> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["guest 4", "guest 3", "guest 2"]);
    }

    #[tokio::test]
    async fn test_zero_cap_keeps_everything() {
        let store = memory_store(Some(0)).await;
        let stored = store
            .append(NewWish::new("Ada", "hi").into_message())
            .await
            .unwrap();

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_lists_are_isolated_by_key() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let wishes = SqliteMessageStore::from_pool(pool.clone(), "wedding_wishes", None)
            .await
            .unwrap();
        let other = SqliteMessageStore::from_pool(pool, "rehearsal", None)
            .await
            .unwrap();

        wishes.append(NewWish::new("Ada", "hi").into_message()).await.unwrap();
        assert_eq!(wishes.read_all().await.unwrap().len(), 1);
        assert!(other.read_all().await.unwrap().is_empty());
    }
}
