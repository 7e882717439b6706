use crate::error::{cache_error, AppResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// Redis keys
mod keys {
    pub const CACHE_PREFIX: &str = "madrassa:cache:";
    /// 30 days in seconds
    pub const EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;
}

/// Storage for the last good copy of a collection, as serialized JSON
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Read the stored payload of a collection
    async fn load(&self, collection: &str) -> AppResult<Option<String>>;

    /// Replace the stored payload of a collection
    async fn store(&self, collection: &str, payload: &str) -> AppResult<()>;

    /// Drop the stored payload of a collection
    async fn clear(&self, collection: &str) -> AppResult<()>;
}

/// Redis-backed cache store
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    /// Create a store for the given Redis URL
    pub fn new(redis_url: &str) -> AppResult<Self> {
        info!("Using Redis fallback cache at {}", redis_url);

        let client = RedisClient::open(redis_url)
            .map_err(|e| cache_error(&format!("Failed to create Redis client: {}", e)))?;

        Ok(Self { client })
    }

    /// Get a Redis connection from the client
    async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| cache_error(&format!("Failed to connect to Redis: {}", e)))
    }

    /// Check that Redis answers
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn key(collection: &str) -> String {
        format!("{}{}", keys::CACHE_PREFIX, collection)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn load(&self, collection: &str) -> AppResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let payload: Option<String> = conn.get(Self::key(collection)).await?;
        Ok(payload)
    }

    async fn store(&self, collection: &str, payload: &str) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        let key = Self::key(collection);

        conn.set::<_, _, ()>(&key, payload).await?;
        conn.expire::<_, ()>(&key, keys::EXPIRY_SECONDS).await?;

        Ok(())
    }

    async fn clear(&self, collection: &str) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        conn.del::<_, ()>(Self::key(collection)).await?;
        Ok(())
    }
}

/// In-process cache store, used when Redis is not configured or unreachable
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn load(&self, collection: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(collection).cloned())
    }

    async fn store(&self, collection: &str, payload: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(collection.to_string(), payload.to_string());
        Ok(())
    }

    async fn clear(&self, collection: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(collection);
        Ok(())
    }
}
