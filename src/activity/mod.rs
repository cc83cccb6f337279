//! Daily activity series built from per-day point totals

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Days shown in the activity chart
pub const ACTIVITY_WINDOW_DAYS: u32 = 30;

/// Days covered by the contribution calendar
pub const CALENDAR_DAYS: u32 = 365;

/// Longest series [`daily_series`] will build (about ten years)
pub const MAX_SERIES_DAYS: u32 = 3_660;

/// Points earned per calendar day, as published in `dailyPoints`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityHistory {
    #[serde(default)]
    pub daily_points: BTreeMap<NaiveDate, f64>,
}

impl ActivityHistory {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn points_on(&self, date: NaiveDate) -> f64 {
        self.daily_points.get(&date).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoints {
    pub date: NaiveDate,
    pub points: f64,
}

/// The `days` days ending at `today`, oldest first, gaps filled with zero.
///
/// `days` is capped at [`MAX_SERIES_DAYS`]; days before the earliest
/// representable date are left out.
pub fn daily_series(history: &ActivityHistory, today: NaiveDate, days: u32) -> Vec<DailyPoints> {
    (0..days.min(MAX_SERIES_DAYS))
        .rev()
        .filter_map(|back| {
            let date = today.checked_sub_signed(Duration::days(i64::from(back)))?;
            Some(DailyPoints { date, points: history.points_on(date) })
        })
        .collect()
}

/// The last year of activity in rows of seven days.
///
/// Weeks are counted from the first day of the window, not aligned to
/// weekdays, so the final row is short.
pub fn contribution_calendar(history: &ActivityHistory, today: NaiveDate) -> Vec<Vec<DailyPoints>> {
    daily_series(history, today, CALENDAR_DAYS)
        .chunks(7)
        .map(|week| week.to_vec())
        .collect()
}

/// Shade of a calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Intensity {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
    Max,
}

impl Intensity {
    pub fn classify(points: f64) -> Self {
        if points == 0.0 {
            Intensity::None
        } else if points < 10.0 {
            Intensity::Low
        } else if points < 25.0 {
            Intensity::Moderate
        } else if points < 50.0 {
            Intensity::High
        } else if points < 75.0 {
            Intensity::VeryHigh
        } else {
            Intensity::Max
        }
    }

    /// 0 (empty) through 5 (darkest)
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history() -> ActivityHistory {
        ActivityHistory::from_json_str(
            r#"{"dailyPoints": {"2024-03-01": 12.5, "2024-02-28": 3, "2023-01-01": 99}}"#,
        )
        .expect("Failed to parse")
    }

    #[test]
    fn test_daily_series_window() {
        let series = daily_series(&history(), date(2024, 3, 1), ACTIVITY_WINDOW_DAYS);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().date, date(2024, 3, 1));
        assert_eq!(series.first().unwrap().date, date(2024, 2, 1));
        assert_eq!(series.last().unwrap().points, 12.5);
        // 2024 is a leap year: Feb 29 sits between the two recorded days
        assert_eq!(series[27].date, date(2024, 2, 28));
        assert_eq!(series[27].points, 3.0);
        assert_eq!(series[28].points, 0.0);
    }

    #[test]
    fn test_points_outside_window_are_ignored() {
        let series = daily_series(&history(), date(2024, 3, 1), ACTIVITY_WINDOW_DAYS);
        let total: f64 = series.iter().map(|d| d.points).sum();
        assert_eq!(total, 15.5);
    }

    #[test]
    fn test_calendar_shape() {
        let weeks = contribution_calendar(&history(), date(2024, 3, 1));
        assert_eq!(weeks.len(), 53);
        assert!(weeks[..52].iter().all(|w| w.len() == 7));
        assert_eq!(weeks[52].len(), 1);
        assert_eq!(weeks[52][0].date, date(2024, 3, 1));
    }

    #[test]
    fn test_intensity_thresholds() {
        assert_eq!(Intensity::classify(0.0), Intensity::None);
        assert_eq!(Intensity::classify(9.99), Intensity::Low);
        assert_eq!(Intensity::classify(10.0), Intensity::Moderate);
        assert_eq!(Intensity::classify(24.0), Intensity::Moderate);
        assert_eq!(Intensity::classify(25.0), Intensity::High);
        assert_eq!(Intensity::classify(50.0), Intensity::VeryHigh);
        assert_eq!(Intensity::classify(75.0), Intensity::Max);
        assert_eq!(Intensity::Max.level(), 5);
        assert_eq!(Intensity::None.level(), 0);
    }

    #[test]
    fn test_daily_series_is_capped() {
        let today = date(2024, 1, 1);
        let series = daily_series(&ActivityHistory::default(), today, 100_000_000);
        assert_eq!(series.len(), MAX_SERIES_DAYS as usize);
        assert_eq!(series.last().unwrap().date, today);
        assert!(series.iter().all(|d| d.points == 0.0));
    }

    #[test]
    fn test_daily_series_stops_at_earliest_date() {
        let today = NaiveDate::MIN + Duration::days(4);
        let series = daily_series(&ActivityHistory::default(), today, ACTIVITY_WINDOW_DAYS);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].date, NaiveDate::MIN);
        assert_eq!(series[4].date, today);
    }

    #[test]
    fn test_empty_history() {
        let empty = ActivityHistory::from_json_str("{}").expect("Failed to parse");
        let series = daily_series(&empty, date(2024, 3, 1), 7);
        assert!(series.iter().all(|d| d.points == 0.0));
    }
}
