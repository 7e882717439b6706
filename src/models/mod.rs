//! Typed records of the administration API.
//!
//! Every record type knows its collection path, the key its list envelope uses,
//! which fields must be filled before it may be submitted, and which display
//! fields the free-text filter looks at.

pub mod academics;
pub mod calendar;
pub mod people;
pub mod records;

pub use academics::{ClassGroup, Course, Program, ScheduleEntry};
pub use calendar::{CalendarEvent, EventType};
pub use people::{Guardian, Student, StudentStatus, Teacher};
pub use records::{Assessment, AssessmentType, AttendanceRecord, AttendanceStatus, Grade};

use crate::notify::tr;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type served by one REST collection
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base
    const PATH: &'static str;
    /// Collection key inside a list envelope, also used as the cache key
    const COLLECTION: &'static str;

    /// Server-assigned identifier, empty for records not yet created
    fn id(&self) -> &str;

    /// Names (as the API spells them) of required fields left empty
    fn missing_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Path of a single record
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// Display fields consulted by the client-side filters
pub trait Searchable {
    /// Fields checked by the free-text filter
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against the type filter; records without one never match a
    /// specific type
    fn kind(&self) -> Option<&str> {
        None
    }
}

/// Tabular rendering of a record
pub trait Listing {
    /// Localized column headers
    fn columns() -> Vec<String>;
    /// Cell values, in column order
    fn cells(&self) -> Vec<String>;
}

/// Collect the names of blank required text fields
pub(crate) fn blank_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Render an optional value as a table cell
pub(crate) fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// Full display name, "first last"
pub(crate) fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Localized column headers from translation keys
pub(crate) fn headers(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| tr(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_reports_whitespace_as_missing() {
        let missing = blank_fields(&[("firstName", "  "), ("lastName", "Yilmaz"), ("phone", "")]);
        assert_eq!(missing, vec!["firstName", "phone"]);
    }

    #[test]
    fn full_name_trims_parts() {
        assert_eq!(full_name(" Amina ", "El Idrissi"), "Amina El Idrissi");
        assert_eq!(full_name("", "Bakker"), "Bakker");
    }
}
