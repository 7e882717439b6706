use chrono::{Datelike, Duration, NaiveDate, Weekday};
use madrassa::calendar::{build_month_grid, days_in_month, layout_times, today_in, LayoutView};
use madrassa::config::Config;
use madrassa::filter::{KindFilter, RecordFilter};
use madrassa::grading::{dutch_grade, is_passing, percentage};
use madrassa::models::{CalendarEvent, Course};

/// Smoke test to verify that a config can be built without the environment
#[tokio::test]
async fn test_config_defaults() {
    let config = Config::with_api_url("http://localhost:8080/api");

    assert_eq!(config.api_url, "http://localhost:8080/api");
    assert!(config.api_token.is_none());
    assert!(config.redis_url.is_none());
    assert_eq!(config.locale, "nl");
    assert!(config.tz().is_ok());
}

/// Every month of a few years renders as 42 Monday-first cells
#[tokio::test]
async fn test_month_grid_properties() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();

    for year in [2024, 2025, 2026] {
        for month in 1..=12 {
            let grid = build_month_grid(year, month, &[], today).unwrap();
            assert_eq!(grid.cells.len(), 42, "{}-{}", year, month);
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Mon);

            // Consecutive dates
            for pair in grid.cells.windows(2) {
                assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
            }

            let in_month = grid.cells.iter().filter(|c| c.is_current_month).count() as u32;
            assert_eq!(in_month, days_in_month(year, month).unwrap());
            assert!(grid.leading_days() < 7);

            let today_cells = grid.cells.iter().filter(|c| c.is_today).count();
            let expected = usize::from(grid.cell_for(today).is_some());
            assert_eq!(today_cells, expected);
        }
    }
}

/// Exactly one cell of the current month is today
#[tokio::test]
async fn test_today_marked_once() {
    let config = Config::with_api_url("http://localhost:8080/api");
    let today = today_in(config.tz().unwrap());

    let grid = build_month_grid(today.year(), today.month(), &[], today).unwrap();
    let marked: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();

    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].date, today);
    assert!(marked[0].is_current_month);
}

/// A 09:30-10:15 block sits two and a half hours below the top of the day
#[tokio::test]
async fn test_timed_layout() {
    let block = layout_times("09:30", "10:15", LayoutView::Week).unwrap();
    assert_eq!(block.top, 120.0);
    assert_eq!(block.height, 36.0);

    let short = layout_times("09:00", "09:05", LayoutView::Day).unwrap();
    assert_eq!(short.height, 30.0);

    assert!(layout_times("", "10:00", LayoutView::Week).is_none());
}

/// Search and type filter combine
#[tokio::test]
async fn test_course_filter() {
    let courses = vec![
        Course {
            id: "1".into(),
            name: "Wiskunde".into(),
            academic_year: "2024-2025".into(),
            ..Default::default()
        },
        Course {
            id: "2".into(),
            name: "Geschiedenis".into(),
            academic_year: "2025-2026".into(),
            description: Some("Islamitische geschiedenis".into()),
            ..Default::default()
        },
    ];

    let filter = RecordFilter::new(Some("wis"), KindFilter::All);
    let found = filter.apply(&courses);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Wiskunde");

    let everything = RecordFilter::new(Some("  "), KindFilter::parse(Some("all")));
    assert_eq!(everything.apply(&courses).len(), 2);

    let by_year = RecordFilter::new(None, KindFilter::parse(Some("2025-2026")));
    let found = by_year.apply(&courses);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Geschiedenis");
}

/// Events carry their own day
#[tokio::test]
async fn test_event_days() {
    let event = CalendarEvent {
        title: "Ouderavond".into(),
        date: "2025-03-14T00:00:00Z".into(),
        ..Default::default()
    };
    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    assert!(event.is_on(day));
    assert_eq!(event.day(), Some(day));
}

/// Percentages turn into grades on the 1-10 scale
#[tokio::test]
async fn test_grading() {
    let pct = percentage(33.0, 40.0).unwrap();
    assert_eq!(pct, 82.5);
    assert_eq!(dutch_grade(pct), 8.3);
    assert!(is_passing(dutch_grade(pct)));
    assert!(!is_passing(dutch_grade(50.0)));
    assert_eq!(percentage(10.0, 0.0), None);
}
