//! Localized, user-facing notices.
//!
//! Raw error text never reaches the user: it is logged, and the user gets a
//! fixed message for the error's category.

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Translate a key in the current locale
pub fn tr(key: &str) -> String {
    t!(key).to_string()
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Notice after a successful create
    pub fn created() -> Self {
        Self::new(NoticeLevel::Success, t!("notice.created"))
    }

    /// Notice after a successful update
    pub fn updated() -> Self {
        Self::new(NoticeLevel::Success, t!("notice.updated"))
    }

    /// Notice after a successful delete
    pub fn deleted() -> Self {
        Self::new(NoticeLevel::Success, t!("notice.deleted"))
    }

    /// Empty-state message for a list
    pub fn empty() -> Self {
        Self::new(NoticeLevel::Info, t!("notice.empty"))
    }

    /// Shown when a list comes from the fallback cache
    pub fn served_from_cache() -> Self {
        Self::new(NoticeLevel::Warning, t!("notice.offline_cache"))
    }

    /// Map an error onto its fixed notice, logging the raw detail
    pub fn from_error(err: &Error) -> Self {
        error!("{:?}", err);

        match err {
            Error::Validation { fields } => {
                let fields = fields.join(", ");
                Self::new(
                    NoticeLevel::Warning,
                    t!("notice.validation", fields = fields.as_str()),
                )
            }
            Error::NotFound(_) => Self::new(NoticeLevel::Info, t!("notice.not_found")),
            Error::Unavailable(_) => Self::new(NoticeLevel::Error, t!("notice.unavailable")),
            Error::Api { .. } | Error::Decode(_) => {
                Self::new(NoticeLevel::Error, t!("notice.request_failed"))
            }
            Error::Cache(_)
            | Error::Config(_)
            | Error::Environment(_)
            | Error::Io(_)
            | Error::Other(_) => Self::new(NoticeLevel::Error, t!("notice.unexpected")),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "i",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "✗",
        };
        write!(f, "[{}] {}", marker, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{api_error, validation_error};

    #[test]
    fn api_failures_hide_status_detail() {
        rust_i18n::set_locale("en");
        let notice = Notice::from_error(&api_error(500));
        assert!(notice.is_error());
        assert!(!notice.message.contains("500"));
    }

    #[test]
    fn validation_lists_missing_fields() {
        rust_i18n::set_locale("en");
        let notice = Notice::from_error(&validation_error(["firstName", "phone"]));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("firstName, phone"));
    }

    #[test]
    fn not_found_is_informational() {
        let notice = Notice::from_error(&Error::NotFound("/students/9".into()));
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(!notice.message.contains("/students/9"));
    }
}
