//! Calendar views: the Monday-first month grid and the timed week/day layout.

pub mod grid;
pub mod layout;
pub mod time;

pub use grid::{build_month_grid, days_in_month, CalendarDayCell, CalendarView, MonthGrid};
pub use layout::{
    day_column, layout, layout_times, schedule_columns, week_columns, DayColumn, LayoutView,
    ScheduleColumn, TimedBlock,
};
pub use time::{parse_date, parse_time, today_in};
