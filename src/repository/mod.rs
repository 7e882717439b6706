//! Typed CRUD over the administration API.

pub mod cache;
pub mod fallback;

pub use cache::{CacheStore, InMemoryStore, RedisStore};
pub use fallback::{CachedRepository, FallbackPolicy, Listed, Origin};

use crate::api::{decode_list, ApiTransport, ListQuery, Page};
use crate::error::{validation_error, AppResult, Error};
use crate::models::Resource;
use reqwest::Method;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// Check the required fields of a record before it is submitted
pub fn validate<T: Resource>(record: &T) -> AppResult<()> {
    let missing = record.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(validation_error(missing))
    }
}

/// CRUD access to one collection
pub struct Repository<T> {
    transport: Arc<dyn ApiTransport>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _record: PhantomData,
        }
    }
}

impl<T: Resource> Repository<T> {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            _record: PhantomData,
        }
    }

    /// Fetch one page of the collection
    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<T>> {
        let path = query.to_path(T::PATH);
        let value = self.transport.request(Method::GET, &path, None).await?;
        let page = decode_list(value, T::COLLECTION, query.page.unwrap_or(1))?;
        debug!("{}: {} of {} records", T::COLLECTION, page.items.len(), page.total_count);
        Ok(page)
    }

    /// Fetch the records matching a single field filter
    pub async fn list_by(&self, field: &str, value: &str) -> AppResult<Vec<T>> {
        let query = ListQuery::new().filter(field, value);
        Ok(self.list(&query).await?.items)
    }

    /// Fetch one record
    pub async fn get(&self, id: &str) -> AppResult<T> {
        let path = T::item_path(id);
        match self.transport.request(Method::GET, &path, None).await? {
            Value::Null => Err(Error::NotFound(path)),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Create a record; nothing is sent when required fields are missing
    pub async fn create(&self, record: &T) -> AppResult<T> {
        validate(record)?;
        let body = serde_json::to_value(record)?;
        let value = self
            .transport
            .request(Method::POST, T::PATH, Some(&body))
            .await?;
        info!("Created record in {}", T::COLLECTION);
        Self::echo_or_decode(value, record)
    }

    /// Replace a record; nothing is sent when required fields are missing
    pub async fn update(&self, id: &str, record: &T) -> AppResult<T> {
        validate(record)?;
        let body = serde_json::to_value(record)?;
        let value = self
            .transport
            .request(Method::PUT, &T::item_path(id), Some(&body))
            .await?;
        info!("Updated {} in {}", id, T::COLLECTION);
        Self::echo_or_decode(value, record)
    }

    /// Apply a partial update
    pub async fn patch(&self, id: &str, changes: &Value) -> AppResult<T> {
        let path = T::item_path(id);
        match self
            .transport
            .request(Method::PATCH, &path, Some(changes))
            .await?
        {
            // Some endpoints answer 204; read the record back
            Value::Null => self.get(id).await,
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.transport
            .request(Method::DELETE, &T::item_path(id), None)
            .await?;
        info!("Deleted {} from {}", id, T::COLLECTION);
        Ok(())
    }

    /// Decode the server's copy, or keep the submitted one when the body is empty
    fn echo_or_decode(value: Value, submitted: &T) -> AppResult<T> {
        match value {
            Value::Null => Ok(submitted.clone()),
            value => Ok(serde_json::from_value(value)?),
        }
    }
}
