//! Vertical placement of timed items in the week and day views.
//!
//! The column starts at 07:00 with one 48px row per hour. Items outside the
//! window are not clamped: they get a negative `top` or run past the last row.

use super::time::{parse_time, week_dates};
use crate::models::{CalendarEvent, ScheduleEntry};
use chrono::NaiveDate;
use serde::Serialize;

/// Pixel height of one hour row
pub const HOUR_HEIGHT: f64 = 48.0;

/// First hour shown in the column
pub const DAY_START_HOUR: u32 = 7;

/// Hour at which the column ends
pub const DAY_END_HOUR: u32 = 21;

/// Minimum block height in the week view
pub const MIN_HEIGHT_WEEK: f64 = 20.0;

/// Minimum block height in the day view
pub const MIN_HEIGHT_DAY: f64 = 30.0;

/// Which timed view a block is laid out for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutView {
    Week,
    Day,
}

impl LayoutView {
    pub fn min_height(&self) -> f64 {
        match self {
            LayoutView::Week => MIN_HEIGHT_WEEK,
            LayoutView::Day => MIN_HEIGHT_DAY,
        }
    }
}

/// Vertical position of a block, in pixels from the top of the column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedBlock {
    pub top: f64,
    pub height: f64,
}

/// Anything with an HH:MM start and end time
pub trait Timed {
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;
}

impl Timed for CalendarEvent {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

impl Timed for ScheduleEntry {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// Labels of the hour rows, "07:00" through "20:00"
pub fn hour_labels() -> Vec<String> {
    (DAY_START_HOUR..DAY_END_HOUR)
        .map(|hour| format!("{:02}:00", hour))
        .collect()
}

/// Lay out a start/end pair; `None` when either time does not parse
pub fn layout_times(start: &str, end: &str, view: LayoutView) -> Option<TimedBlock> {
    let (start_hour, start_minute) = parse_time(start)?;
    let (end_hour, end_minute) = parse_time(end)?;

    let start_hours = start_hour as f64 + start_minute as f64 / 60.0;
    let end_hours = end_hour as f64 + end_minute as f64 / 60.0;

    let top = (start_hours - DAY_START_HOUR as f64) * HOUR_HEIGHT;
    let height = ((end_hours - start_hours) * HOUR_HEIGHT).max(view.min_height());

    Some(TimedBlock { top, height })
}

/// Lay out a timed item
pub fn layout<T: Timed + ?Sized>(item: &T, view: LayoutView) -> Option<TimedBlock> {
    layout_times(item.start_time(), item.end_time(), view)
}

/// An item together with its block
#[derive(Debug, Clone, Serialize)]
pub struct PlacedItem<T> {
    #[serde(flatten)]
    pub item: T,
    pub block: TimedBlock,
}

/// Split items into placed blocks (sorted top-down) and items without a usable time
pub fn place<T: Timed + Clone>(items: &[T], view: LayoutView) -> (Vec<PlacedItem<T>>, Vec<T>) {
    let mut placed = Vec::new();
    let mut unplaced = Vec::new();

    for item in items {
        match layout(item, view) {
            Some(block) => placed.push(PlacedItem {
                item: item.clone(),
                block,
            }),
            None => unplaced.push(item.clone()),
        }
    }

    placed.sort_by(|a, b| a.block.top.total_cmp(&b.block.top));
    (placed, unplaced)
}

/// One day column of the week or day view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: NaiveDate,
    pub timed: Vec<PlacedItem<CalendarEvent>>,
    /// Events without a parseable time, listed as all-day items
    pub all_day: Vec<CalendarEvent>,
}

/// Lay out the events of one day
pub fn day_column(date: NaiveDate, events: &[CalendarEvent], view: LayoutView) -> DayColumn {
    let todays: Vec<CalendarEvent> = events.iter().filter(|e| e.is_on(date)).cloned().collect();
    let (timed, all_day) = place(&todays, view);
    DayColumn {
        date,
        timed,
        all_day,
    }
}

/// Lay out Monday..Sunday of the week containing `reference`
pub fn week_columns(reference: NaiveDate, events: &[CalendarEvent]) -> Vec<DayColumn> {
    week_dates(reference)
        .into_iter()
        .map(|date| day_column(date, events, LayoutView::Week))
        .collect()
}

/// One weekday column of a class group's recurring schedule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleColumn {
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    pub timed: Vec<PlacedItem<ScheduleEntry>>,
    pub unplaced: Vec<ScheduleEntry>,
}

/// Lay out a weekly schedule, one column per weekday
pub fn schedule_columns(entries: &[ScheduleEntry]) -> Vec<ScheduleColumn> {
    (0..7u8)
        .map(|day_of_week| {
            let entries: Vec<ScheduleEntry> = entries
                .iter()
                .filter(|entry| entry.day_of_week == day_of_week)
                .cloned()
                .collect();
            let (timed, unplaced) = place(&entries, LayoutView::Week);
            ScheduleColumn {
                day_of_week,
                timed,
                unplaced,
            }
        })
        .collect()
}
