//! 时间工具函数 — 业务时区与日期解析
//!
//! 预约日期/时段在数据库里存为文本 (`YYYY-MM-DD` / `HH:MM`)，
//! 这里负责解析、校验，以及按业务时区计算"今天"和"本周"。

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时段开始时间 (HH:MM)
pub fn parse_start_time(start: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(start, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid start time format: {}", start)))
}

/// 业务时区下的当前时刻
pub fn now_in_tz(tz: Tz) -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&tz)
}

/// 业务时区下的今天
pub fn today_in_tz(tz: Tz) -> NaiveDate {
    now_in_tz(tz).date_naive()
}

/// 包含 `date` 的那一周的 [周一, 周日] (ISO 周)
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    let monday = date - Duration::days(days_from_monday);
    let sunday = monday + Duration::days(6);
    (monday, sunday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-08-25").is_ok());
        assert!(parse_date("25/08/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_parse_start_time() {
        assert!(parse_start_time("10:30").is_ok());
        assert!(parse_start_time("25:00").is_err());
        assert!(parse_start_time("abc").is_err());
    }

    #[test]
    fn test_week_bounds_are_monday_to_sunday() {
        // 2026-08-26 是周三
        let (monday, sunday) = week_bounds(date("2026-08-26"));
        assert_eq!(monday, date("2026-08-24"));
        assert_eq!(sunday, date("2026-08-30"));

        // 周一和周日都落在自己的那一周
        assert_eq!(week_bounds(date("2026-08-24")).0, date("2026-08-24"));
        assert_eq!(week_bounds(date("2026-08-30")).1, date("2026-08-30"));
    }

    #[test]
    fn test_week_bounds_weekday_sanity() {
        let (monday, sunday) = week_bounds(date("2026-01-01"));
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(sunday.weekday(), Weekday::Sun);
    }
}
