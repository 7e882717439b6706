use crate::api::ListQuery;
use crate::calendar::layout::{hour_labels, DAY_END_HOUR, DAY_START_HOUR, HOUR_HEIGHT};
use crate::calendar::{
    build_month_grid, day_column, parse_date, week_columns, CalendarView, DayColumn, LayoutView,
    MonthGrid,
};
use crate::commands::{CommandContext, CommandResult};
use crate::filter::{KindFilter, RecordFilter};
use crate::models::CalendarEvent;
use crate::notify::{tr, Notice};
use chrono::{Datelike, NaiveDate};
use tracing::info;

/// Options of the calendar command
#[derive(Debug, Clone)]
pub struct CalendarArgs {
    pub view: CalendarView,
    pub date: Option<String>,
    pub offset: i32,
    pub kind: Option<String>,
    pub search: Option<String>,
}

/// Show the calendar in the requested view
pub async fn calendar(ctx: &CommandContext, args: &CalendarArgs) -> CommandResult {
    let today = ctx.today().await?;
    let reference = match &args.date {
        Some(date) => parse_date(date)?,
        None => today,
    };
    let reference = args.view.shift(reference, args.offset);
    info!("Calendar {:?} view at {}", args.view, reference);

    let listed = ctx
        .cached_repository::<CalendarEvent>()
        .await
        .list(&ListQuery::new())
        .await?;
    let cache_notice = listed
        .from_cache()
        .then(|| Notice::served_from_cache().to_string());
    let filter = RecordFilter::new(args.search.as_deref(), KindFilter::parse(args.kind.as_deref()));
    let events = filter.retain(listed.page.items);

    let output = match args.view {
        CalendarView::Month => {
            let grid = build_month_grid(reference.year(), reference.month(), &events, today)?;
            ctx.render(&grid, render_month)?
        }
        CalendarView::Week => {
            let columns = week_columns(reference, &events);
            ctx.render(&columns, |columns| render_week(columns))?
        }
        CalendarView::Day => {
            let column = day_column(reference, &events, LayoutView::Day);
            ctx.render(&column, render_day)?
        }
    };

    match cache_notice {
        Some(notice) if !ctx.json => Ok(format!("{}\n{}", notice, output)),
        _ => Ok(output),
    }
}

fn weekday_header() -> String {
    (0..7)
        .map(|i| format!("{:>5}", tr(&format!("weekday_short.{}", i))))
        .collect::<String>()
}

fn month_title(year: i32, month: u32) -> String {
    format!("{} {}", tr(&format!("month.{}", month)), year)
}

fn event_line(event: &CalendarEvent) -> String {
    let time = if event.start_time.is_empty() {
        tr("calendar.all_day")
    } else {
        format!("{}-{}", event.start_time, event.end_time)
    };
    let mut line = format!(
        "{}  {} ({})",
        time,
        event.title,
        tr(&format!("event_type.{}", event.kind.as_str()))
    );
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    line
}

/// Month grid as text: `[d]` marks today, `*` marks days with events and
/// days of adjacent months are shown in parentheses
pub fn render_month(grid: &MonthGrid) -> String {
    let mut lines = vec![month_title(grid.year, grid.month), weekday_header()];

    for week in grid.rows() {
        let row: String = week
            .iter()
            .map(|cell| {
                let day = if cell.is_today {
                    format!("[{}]", cell.day)
                } else if cell.is_current_month {
                    cell.day.to_string()
                } else {
                    format!("({})", cell.day)
                };
                let marker = if cell.events.is_empty() { "" } else { "*" };
                format!("{:>5}", format!("{}{}", day, marker))
            })
            .collect();
        lines.push(row);
    }

    let with_events: Vec<_> = grid
        .cells
        .iter()
        .filter(|cell| cell.is_current_month && !cell.events.is_empty())
        .collect();
    lines.push(String::new());
    if with_events.is_empty() {
        lines.push(Notice::empty().to_string());
    }
    for cell in with_events {
        for event in &cell.events {
            lines.push(format!("{}  {}", cell.date.format("%d-%m"), event_line(event)));
        }
    }

    lines.join("\n")
}

fn day_heading(date: NaiveDate) -> String {
    let weekday = date.weekday().num_days_from_monday();
    format!(
        "{} {}",
        tr(&format!("weekday.{}", weekday)),
        date.format("%d-%m-%Y")
    )
}

/// Week view as text, one block per day
pub fn render_week(columns: &[DayColumn]) -> String {
    let mut lines = Vec::new();
    for column in columns {
        lines.push(day_heading(column.date));
        if column.timed.is_empty() && column.all_day.is_empty() {
            lines.push("  -".to_string());
        }
        for event in &column.all_day {
            lines.push(format!("  {}", event_line(event)));
        }
        for placed in &column.timed {
            lines.push(format!("  {}", event_line(&placed.item)));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

/// Day view as text: the hour rows with each event at its starting row.
///
/// Events starting before the first row are listed above it, events starting
/// after the last row below it.
pub fn render_day(column: &DayColumn) -> String {
    let mut lines = vec![day_heading(column.date)];
    for event in &column.all_day {
        lines.push(format!("        {}", event_line(event)));
    }

    let row_of = |top: f64| (top / HOUR_HEIGHT).floor() as i64;
    let rows = (DAY_END_HOUR - DAY_START_HOUR) as i64;

    for placed in column.timed.iter().filter(|p| row_of(p.block.top) < 0) {
        lines.push(format!("        {}", event_line(&placed.item)));
    }
    for (row, label) in hour_labels().iter().enumerate() {
        let starting: Vec<String> = column
            .timed
            .iter()
            .filter(|p| row_of(p.block.top) == row as i64)
            .map(|p| event_line(&p.item))
            .collect();
        if starting.is_empty() {
            lines.push(format!("{}  |", label));
        } else {
            lines.push(format!("{}  | {}", label, starting.join(" ; ")));
        }
    }
    for placed in column.timed.iter().filter(|p| row_of(p.block.top) >= rows) {
        lines.push(format!("        {}", event_line(&placed.item)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_month_grid;

    fn event(date: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            title: "Wiskunde toets".into(),
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
            ..Default::default()
        }
    }

    #[test]
    fn month_text_marks_today_and_events() {
        let events = vec![event("2025-03-20", "09:30", "10:15")];
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let grid = build_month_grid(2025, 3, &events, today).unwrap();
        let text = render_month(&grid);
        assert!(text.contains("[15]"));
        assert!(text.contains("20*"));
        assert!(text.contains("(24)"));
        assert!(text.contains("20-03  09:30-10:15  Wiskunde toets"));
    }

    #[test]
    fn day_text_places_events_on_hour_rows() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let events = vec![
            event("2025-03-15", "09:30", "10:15"),
            event("2025-03-15", "06:00", "07:00"),
        ];
        let column = day_column(date, &events, LayoutView::Day);
        let text = render_day(&column);
        let lines: Vec<&str> = text.lines().collect();
        // heading, early event, then 14 hour rows
        assert_eq!(lines.len(), 16);
        assert!(lines[1].contains("06:00-07:00"));
        assert!(lines[4].starts_with("09:00  | 09:30-10:15"));
    }
}
