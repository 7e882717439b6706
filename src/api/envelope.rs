//! Normalization of list responses.
//!
//! The API answers list requests either with a bare JSON array or with an
//! envelope `{ "<collection>": [...], "totalCount": n }`. Both are turned into a
//! [`Page`] here and nowhere else.

use crate::error::{AppResult, Error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: u32,
}

impl<T> Page<T> {
    /// A page holding every record of the collection
    pub fn complete(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self {
            items,
            total_count,
            page: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages for the given page size (at least one)
    pub fn total_pages(&self, page_size: u32) -> u32 {
        if page_size == 0 {
            return 1;
        }
        let pages = self.total_count.div_ceil(page_size as usize) as u32;
        pages.max(1)
    }
}

/// Decode a list response for the collection named `collection`
pub fn decode_list<T: DeserializeOwned>(
    value: Value,
    collection: &str,
    page: u32,
) -> AppResult<Page<T>> {
    match value {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(value)?;
            Ok(Page {
                page,
                ..Page::complete(items)
            })
        }
        Value::Object(mut map) => {
            let raw_items = map.remove(collection).ok_or_else(|| {
                Error::Decode(format!("envelope has no \"{}\" collection", collection))
            })?;
            let items: Vec<T> = serde_json::from_value(raw_items)?;
            let total_count = map
                .get("totalCount")
                .and_then(Value::as_u64)
                .map(|n| n as usize)
                .unwrap_or(items.len());
            Ok(Page {
                items,
                total_count,
                page,
            })
        }
        Value::Null => Ok(Page {
            page,
            ..Page::complete(Vec::new())
        }),
        other => Err(Error::Decode(format!(
            "expected list or envelope, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn bare_array_and_envelope_agree() {
        let bare: Page<Row> = decode_list(json!([{"id": "1"}, {"id": "2"}]), "programs", 1).unwrap();
        let wrapped: Page<Row> = decode_list(
            json!({"programs": [{"id": "1"}, {"id": "2"}], "totalCount": 2}),
            "programs",
            1,
        )
        .unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn envelope_total_count_exceeds_page() {
        let page: Page<Row> =
            decode_list(json!({"students": [{"id": "1"}], "totalCount": 41}), "students", 3).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 41);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages(20), 3);
    }

    #[test]
    fn envelope_without_collection_is_rejected() {
        let result: AppResult<Page<Row>> = decode_list(json!({"items": [], "totalCount": 0}), "students", 1);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn scalar_is_rejected() {
        let result: AppResult<Page<Row>> = decode_list(json!("ok"), "students", 1);
        assert!(result.is_err());
    }

    #[test]
    fn empty_page_has_one_page() {
        let page: Page<Row> = Page::complete(Vec::new());
        assert_eq!(page.total_pages(25), 1);
    }
}
