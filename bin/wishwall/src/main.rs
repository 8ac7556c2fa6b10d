//! # Wishwall server
//!
//! Assembles the application from the compiled-in store plugins and the
//! layered settings, then serves the wall and the wishes endpoint.

use std::sync::Arc;

use anyhow::bail;
use configs::{LogFormat, LoggingSettings, Settings, StoreBackend, StoreSettings};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ww_core::traits::MessageStore;

#[cfg(feature = "store-memory")]
use ww_store_memory::MemoryMessageStore;

#[cfg(feature = "store-sqlite")]
use ww_store_sqlite::SqliteMessageStore;

#[cfg(feature = "store-redis")]
use {secrecy::ExposeSecret, ww_store_redis::RedisMessageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.logging);

    let store = build_store(&settings.store).await?;
    info!(
        backend = store.name(),
        list_key = %settings.store.list_key,
        retention = ?settings.store.retention(),
        "message store ready"
    );

    ww_api::serve(store, &settings.server.bind_addr()).await
}

/// `RUST_LOG` wins over the configured filter when set.
fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

async fn build_store(settings: &StoreSettings) -> anyhow::Result<Arc<dyn MessageStore>> {
    let cap = settings.retention();

    match settings.backend {
        #[cfg(feature = "store-memory")]
        StoreBackend::Memory => Ok(Arc::new(MemoryMessageStore::new(cap))),

        #[cfg(feature = "store-sqlite")]
        StoreBackend::Sqlite => {
            let store =
                SqliteMessageStore::connect(&settings.sqlite_url, &settings.list_key, cap).await?;
            Ok(Arc::new(store))
        }

        #[cfg(feature = "store-redis")]
        StoreBackend::Redis => {
            let Some(url) = settings.redis_url.as_ref() else {
                bail!("store.redis_url is required for the redis backend");
            };
            let store = RedisMessageStore::connect(url.expose_secret(), &settings.list_key, cap)?;
            Ok(Arc::new(store))
        }

        #[allow(unreachable_patterns)]
        other => bail!("store backend {other:?} was not compiled into this binary"),
    }
}
