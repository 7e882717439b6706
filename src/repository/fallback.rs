//! Repository wrapper that mirrors complete listings into a [`CacheStore`] and
//! serves the mirror while the API cannot be reached.
//!
//! The mirror is never merged with live data. An API that answers, even with an
//! error status or an empty list, is always authoritative.

use super::cache::CacheStore;
use super::Repository;
use crate::api::{ListQuery, Page};
use crate::error::AppResult;
use crate::filter::{KindFilter, RecordFilter};
use crate::models::{Resource, Searchable};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// When a cached listing may stand in for the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Serve the cache only when the API is unreachable
    #[default]
    WhenUnavailable,
    /// Never read or write the cache
    Never,
}

/// Where a listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Api,
    Cache,
}

/// A page together with its origin
#[derive(Debug, Clone, Serialize)]
pub struct Listed<T> {
    pub page: Page<T>,
    pub origin: Origin,
}

impl<T> Listed<T> {
    pub fn from_cache(&self) -> bool {
        self.origin == Origin::Cache
    }
}

/// A [`Repository`] with an offline mirror of its collection
pub struct CachedRepository<T> {
    inner: Repository<T>,
    store: Arc<dyn CacheStore>,
    policy: FallbackPolicy,
}

impl<T: Resource + Searchable> CachedRepository<T> {
    pub fn new(inner: Repository<T>, store: Arc<dyn CacheStore>, policy: FallbackPolicy) -> Self {
        Self {
            inner,
            store,
            policy,
        }
    }

    /// List through the API, falling back to the mirror per the policy
    pub async fn list(&self, query: &ListQuery) -> AppResult<Listed<T>> {
        match self.inner.list(query).await {
            Ok(page) => {
                if self.policy != FallbackPolicy::Never
                    && query.is_unfiltered()
                    && page.items.len() == page.total_count
                {
                    self.remember(&page.items).await;
                }
                Ok(Listed {
                    page,
                    origin: Origin::Api,
                })
            }
            Err(err) if err.is_unavailable() && self.policy == FallbackPolicy::WhenUnavailable => {
                match self.recall(query).await {
                    Some(page) => {
                        warn!(
                            "API unavailable, serving {} {} from cache: {}",
                            page.items.len(),
                            T::COLLECTION,
                            err
                        );
                        Ok(Listed {
                            page,
                            origin: Origin::Cache,
                        })
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Drop the mirror of this collection
    pub async fn forget(&self) -> AppResult<()> {
        self.store.clear(T::COLLECTION).await
    }

    async fn remember(&self, items: &[T]) {
        let payload = match serde_json::to_string(items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize {} for the cache: {}", T::COLLECTION, e);
                return;
            }
        };
        // A failing mirror must not fail the listing
        match self.store.store(T::COLLECTION, &payload).await {
            Ok(()) => debug!("Cached {} {}", items.len(), T::COLLECTION),
            Err(e) => warn!("Could not cache {}: {}", T::COLLECTION, e),
        }
    }

    async fn recall(&self, query: &ListQuery) -> Option<Page<T>> {
        let payload = match self.store.load(T::COLLECTION).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read cached {}: {}", T::COLLECTION, e);
                return None;
            }
        };
        let items: Vec<T> = match serde_json::from_str(&payload) {
            Ok(items) => items,
            Err(e) => {
                warn!("Discarding unreadable cache for {}: {}", T::COLLECTION, e);
                return None;
            }
        };
        Some(apply_query(items, query))
    }
}

/// Apply search, field filters and paging to a cached listing
fn apply_query<T: Resource + Searchable>(items: Vec<T>, query: &ListQuery) -> Page<T> {
    let text = RecordFilter::new(query.search.as_deref(), KindFilter::All);
    let matching: Vec<T> = text
        .retain(items)
        .into_iter()
        .filter(|item| matches_fields(item, &query.filters))
        .collect();

    let page = query.page.unwrap_or(1).max(1);
    let total_count = matching.len();
    let items = match query.limit {
        Some(limit) if limit > 0 => matching
            .into_iter()
            .skip((page as usize - 1) * limit as usize)
            .take(limit as usize)
            .collect(),
        _ => matching,
    };

    Page {
        items,
        total_count,
        page,
    }
}

/// Compare field filters against the record's JSON representation
fn matches_fields<T: Serialize>(item: &T, filters: &[(String, String)]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let Ok(Value::Object(fields)) = serde_json::to_value(item) else {
        return false;
    };
    filters.iter().all(|(field, expected)| match fields.get(field) {
        Some(Value::String(actual)) => actual == expected,
        Some(Value::Bool(actual)) => actual.to_string() == *expected,
        Some(Value::Number(actual)) => actual.to_string() == *expected,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;

    fn program(name: &str, level: &str, active: bool) -> Program {
        Program {
            id: name.to_lowercase(),
            name: name.into(),
            level: Some(level.into()),
            is_active: active,
            ..Default::default()
        }
    }

    fn programs() -> Vec<Program> {
        vec![
            program("Koran", "beginner", true),
            program("Arabisch", "beginner", false),
            program("Fiqh", "advanced", true),
        ]
    }

    #[test]
    fn cached_listing_applies_search_and_fields() {
        let page = apply_query(programs(), &ListQuery::new().search("ARAB"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Arabisch");

        let page = apply_query(programs(), &ListQuery::new().filter("level", "beginner"));
        assert_eq!(page.total_count, 2);

        let page = apply_query(programs(), &ListQuery::new().filter("isActive", "true"));
        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Koran", "Fiqh"]);
    }

    #[test]
    fn cached_listing_pages_locally() {
        let page = apply_query(programs(), &ListQuery::new().page(2).limit(2));
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Fiqh");
        assert_eq!(page.total_pages(2), 2);
    }
}
