use super::{blank_fields, cell, headers, Listing, Resource, Searchable};
use crate::notify::tr;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Exam,
    Class,
    Holiday,
    #[default]
    Event,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Exam => "exam",
            EventType::Class => "class",
            EventType::Holiday => "holiday",
            EventType::Event => "event",
        }
    }
}

/// Calendar event as served by the API; read-only once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// ISO calendar date, possibly followed by a time part
    #[serde(default)]
    pub date: String,
    /// HH:MM
    #[serde(default)]
    pub start_time: String,
    /// HH:MM
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

impl CalendarEvent {
    /// Whether the event falls on the given day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date.starts_with(&day.format("%Y-%m-%d").to_string())
    }

    /// Calendar day of the event, if the date parses
    pub fn day(&self) -> Option<NaiveDate> {
        let date_part = self.date.get(..10)?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

impl Resource for CalendarEvent {
    const PATH: &'static str = "/calendar-events";
    const COLLECTION: &'static str = "events";

    fn id(&self) -> &str {
        &self.id
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("title", self.title.as_str()), ("date", self.date.as_str())])
    }
}

impl Searchable for CalendarEvent {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.location.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn kind(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }
}

impl Listing for CalendarEvent {
    fn columns() -> Vec<String> {
        headers(&[
            "column.date",
            "column.time",
            "column.title",
            "column.type",
            "column.location",
        ])
    }

    fn cells(&self) -> Vec<String> {
        let time = if self.start_time.is_empty() {
            tr("calendar.all_day")
        } else {
            format!("{}-{}", self.start_time, self.end_time)
        };
        let location = if self.location.is_empty() {
            None
        } else {
            Some(self.location.clone())
        };
        vec![
            self.date.get(..10).unwrap_or(&self.date).to_string(),
            time,
            self.title.clone(),
            tr(&format!("event_type.{}", self.kind.as_str())),
            cell(&location),
        ]
    }
}
