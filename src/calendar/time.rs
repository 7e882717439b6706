use crate::error::{validation_error, AppResult};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse a date given as YYYY-MM-DD
pub fn parse_date(date_str: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| validation_error(["date"]))
}

/// Today's calendar date in the given time zone
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven days Monday..Sunday of the week containing `date`
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(date);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30"), Some((9, 30)));
        assert_eq!(parse_time("9:30"), Some((9, 30)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));
        assert_eq!(parse_time("00:00"), Some((0, 0)));

        // Invalid times
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("12:60"), None);
        assert_eq!(parse_time("12:30:00"), None);
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("half tien"), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        assert!(parse_date("15-03-2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_week_start() {
        // Monday, 2023-01-02
        let monday = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(week_start(monday), monday);

        // Wednesday, 2023-01-04
        let wednesday = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();
        assert_eq!(week_start(wednesday), monday);

        // Sunday, 2023-01-08 still belongs to the week starting on Monday the 2nd
        let sunday = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn week_crosses_month_boundary() {
        let days = week_dates(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 24).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }
}
