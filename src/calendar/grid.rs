use crate::error::{validation_error, AppResult};
use crate::models::CalendarEvent;
use chrono::{Datelike, Duration, Months, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;

/// Number of cells in a month grid: six Monday-first weeks
pub const GRID_CELLS: usize = 42;

/// Number of days per grid row
pub const DAYS_PER_WEEK: usize = 7;

/// One day in the month grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayCell {
    /// Day of month (1..=31)
    pub day: u32,
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub is_current_month: bool,
    pub is_today: bool,
}

/// A 6x7 month grid, Monday-first
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarDayCell>,
}

impl MonthGrid {
    /// The grid as six weeks of seven cells
    pub fn rows(&self) -> impl Iterator<Item = &[CalendarDayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Cell showing the given date, if the grid covers it
    pub fn cell_for(&self, date: NaiveDate) -> Option<&CalendarDayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    /// Number of leading cells taken from the previous month
    pub fn leading_days(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| !cell.is_current_month)
            .count()
    }
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    let first = first_of_month(year, month)?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| validation_error(["year"]))?;
    Ok((next - first).num_days() as u32)
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(validation_error(["month"]));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| validation_error(["year"]))
}

/// Events falling on the given day, in input order
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<CalendarEvent> {
    events.iter().filter(|e| e.is_on(date)).cloned().collect()
}

/// Build the 42-cell month grid for `year`/`month`.
///
/// Leading cells pad back to the Monday before the 1st, trailing cells pad
/// forward to 42. `today` decides `is_today` on every cell, spillover cells
/// included: this goes beyond marking only days of the shown month, so a
/// trailing cell that shows today is highlighted as well.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> AppResult<MonthGrid> {
    let first_day = first_of_month(year, month)?;
    let days = days_in_month(year, month)?;

    // Monday = 0 .. Sunday = 6
    let starting_day_of_week = first_day.weekday().num_days_from_monday() as i64;
    let grid_start = first_day - Duration::days(starting_day_of_week);

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            let is_current_month = offset >= starting_day_of_week
                && offset < starting_day_of_week + days as i64;
            CalendarDayCell {
                day: date.day(),
                date,
                events: events_on(events, date),
                is_current_month,
                is_today: date == today,
            }
        })
        .collect();

    Ok(MonthGrid { year, month, cells })
}

/// Calendar view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

impl CalendarView {
    /// Reference date `steps` views away (negative steps go back): whole
    /// calendar months, weeks or days, computed in one jump.
    ///
    /// Month steps land on the 1st of the target month. Zero steps keep the
    /// reference, and a jump past the supported date range keeps it too.
    pub fn shift(&self, reference: NaiveDate, steps: i32) -> NaiveDate {
        if steps == 0 {
            return reference;
        }
        match self {
            CalendarView::Month => {
                let first = reference.with_day(1).unwrap_or(reference);
                let months = Months::new(steps.unsigned_abs());
                let moved = if steps > 0 {
                    first.checked_add_months(months)
                } else {
                    first.checked_sub_months(months)
                };
                moved.unwrap_or(reference)
            }
            CalendarView::Week => shift_days(reference, 7 * i64::from(steps)),
            CalendarView::Day => shift_days(reference, i64::from(steps)),
        }
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(day: &str) -> CalendarEvent {
        CalendarEvent {
            id: day.to_string(),
            title: "Wiskunde toets".to_string(),
            date: day.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn every_month_has_42_cells() {
        let today = date(2025, 3, 15);
        for year in [1999, 2000, 2024, 2025, 2100] {
            for month in 1..=12 {
                let grid = build_month_grid(year, month, &[], today).unwrap();
                assert_eq!(grid.cells.len(), GRID_CELLS, "{}-{}", year, month);
                assert_eq!(grid.rows().count(), 6);
                assert_eq!(
                    grid.cells.iter().filter(|c| c.is_current_month).count() as u32,
                    days_in_month(year, month).unwrap()
                );
                assert_eq!(grid.cells[0].date.weekday(), chrono::Weekday::Mon);
            }
        }
    }

    #[test]
    fn wednesday_start_has_two_leading_days() {
        // 1 January 2025 is a Wednesday
        let grid = build_month_grid(2025, 1, &[], date(2025, 1, 10)).unwrap();
        assert_eq!(grid.leading_days(), 2);
        assert_eq!(grid.cells[0].date, date(2024, 12, 30));
        assert_eq!(grid.cells[1].date, date(2024, 12, 31));
        assert_eq!(grid.cells[2].day, 1);
        assert!(grid.cells[2].is_current_month);
    }

    #[test]
    fn sunday_start_has_six_leading_days() {
        // 1 June 2025 is a Sunday
        let grid = build_month_grid(2025, 6, &[], date(2025, 6, 1)).unwrap();
        assert_eq!(grid.leading_days(), 6);
        assert!(grid.cells[6].is_today);
    }

    #[test]
    fn monday_start_has_no_leading_days() {
        // 1 February 2021 is a Monday; the 28 days fill four rows exactly
        let grid = build_month_grid(2021, 2, &[], date(2021, 2, 1)).unwrap();
        assert_eq!(grid.leading_days(), 0);
        assert!(grid.cells[28..].iter().all(|c| !c.is_current_month));
        assert_eq!(grid.cells[41].date, date(2021, 3, 14));
    }

    #[test]
    fn exactly_one_cell_is_today() {
        let today = date(2025, 3, 15);
        let grid = build_month_grid(2025, 3, &[], today).unwrap();
        let todays: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);
    }

    #[test]
    fn spillover_cell_can_be_today() {
        // Viewing February 2025 on 2 March: the trailing cell is today
        let grid = build_month_grid(2025, 2, &[], date(2025, 3, 2)).unwrap();
        let today = grid.cell_for(date(2025, 3, 2)).unwrap();
        assert!(today.is_today);
        assert!(!today.is_current_month);
    }

    #[test]
    fn event_lands_in_its_own_cell_only() {
        let events = vec![event_on("2025-03-15"), event_on("2025-04-15")];
        let grid = build_month_grid(2025, 3, &events, date(2025, 3, 1)).unwrap();
        for cell in &grid.cells {
            if cell.date == date(2025, 3, 15) {
                assert_eq!(cell.events.len(), 1);
                assert_eq!(cell.events[0].date, "2025-03-15");
            } else {
                assert!(cell.events.is_empty(), "unexpected event on {}", cell.date);
            }
        }
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(build_month_grid(2025, 0, &[], date(2025, 1, 1)).is_err());
        assert!(build_month_grid(2025, 13, &[], date(2025, 1, 1)).is_err());
    }

    #[test]
    fn days_in_february() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn navigation_steps() {
        assert_eq!(CalendarView::Month.shift(date(2024, 12, 31), 1), date(2025, 1, 1));
        assert_eq!(CalendarView::Month.shift(date(2025, 1, 20), -1), date(2024, 12, 1));
        assert_eq!(CalendarView::Month.shift(date(2025, 1, 20), 14), date(2026, 3, 1));
        assert_eq!(CalendarView::Month.shift(date(2025, 1, 20), 0), date(2025, 1, 20));
        assert_eq!(CalendarView::Week.shift(date(2025, 3, 15), 1), date(2025, 3, 22));
        assert_eq!(CalendarView::Week.shift(date(2025, 3, 15), -3), date(2025, 2, 22));
        assert_eq!(CalendarView::Day.shift(date(2025, 3, 1), -1), date(2025, 2, 28));
    }

    #[test]
    fn huge_offsets_return_at_once() {
        let reference = date(2025, 3, 15);
        assert_eq!(CalendarView::Day.shift(reference, i32::MAX), reference);
        assert_eq!(CalendarView::Week.shift(reference, i32::MIN), reference);
        assert_eq!(CalendarView::Month.shift(reference, i32::MAX), reference);
    }
}
