//! Cycle and pregnancy date math for the planning/pregnancy dashboards.
//!
//! All functions are pure over a supplied "today" so the handlers stay thin
//! and the arithmetic stays testable.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FertilityStatus {
    Low,
    High,
    PostOvulation,
}

#[derive(Serialize, Debug, Clone)]
pub struct FertilityOverview {
    pub cycle_day: i64,
    pub cycle_length: u32,
    pub period_duration: u32,
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    /// The day before, of, and after ovulation.
    pub best_days: [NaiveDate; 3],
    pub days_until_ovulation: i64,
    pub status: FertilityStatus,
    /// Percent, from the fixed step table.
    pub conception_probability: u8,
}

/// Derive the fertile window from the last period date and cycle length:
/// ovulation falls 14 days before the end of the cycle, the window opens
/// 5 days before ovulation.
pub fn fertility_overview(
    last_period: NaiveDate,
    cycle_length: u32,
    period_duration: u32,
    today: NaiveDate,
) -> FertilityOverview {
    let cycle_day = (today - last_period).num_days() + 1;
    let ovulation_day = cycle_length as i64 - 14;
    let fertile_start_day = ovulation_day - 5;
    let fertile_end_day = ovulation_day;

    let ovulation_date = last_period + Duration::days(ovulation_day);
    let fertile_window_start = last_period + Duration::days(fertile_start_day);
    let fertile_window_end = last_period + Duration::days(fertile_end_day);

    let status = if (fertile_start_day..=fertile_end_day).contains(&cycle_day) {
        FertilityStatus::High
    } else if cycle_day < fertile_start_day {
        FertilityStatus::Low
    } else {
        FertilityStatus::PostOvulation
    };

    FertilityOverview {
        cycle_day,
        cycle_length,
        period_duration,
        ovulation_date,
        fertile_window_start,
        fertile_window_end,
        best_days: [
            ovulation_date - Duration::days(1),
            ovulation_date,
            ovulation_date + Duration::days(1),
        ],
        days_until_ovulation: ovulation_day - cycle_day,
        status,
        conception_probability: conception_probability(
            cycle_day,
            fertile_start_day,
            fertile_end_day,
            ovulation_day,
        ),
    }
}

/// Step table for conception probability by cycle day.
fn conception_probability(
    cycle_day: i64,
    fertile_start: i64,
    fertile_end: i64,
    ovulation_day: i64,
) -> u8 {
    if cycle_day == ovulation_day {
        70
    } else if cycle_day == ovulation_day - 1 || cycle_day == ovulation_day + 1 {
        65
    } else if cycle_day == ovulation_day - 2 {
        55
    } else if (fertile_start..=fertile_end).contains(&cycle_day) {
        40
    } else if cycle_day > fertile_end && cycle_day < ovulation_day + 3 {
        20
    } else {
        5
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct PregnancyOverview {
    pub days_pregnant: i64,
    /// 1..=40
    pub current_week: u32,
    /// 1..=9
    pub current_month: u32,
    pub trimester: &'static str,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
}

/// Week/month/trimester derived from the last menstrual period. Due date is
/// the caller-provided one when set, otherwise LMP + 280 days.
pub fn pregnancy_overview(
    last_period: NaiveDate,
    expected_due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> PregnancyOverview {
    let days_pregnant = (today - last_period).num_days();
    let current_week = (days_pregnant / 7 + 1).clamp(1, 40) as u32;
    let current_month = ((current_week as f64 / 4.33).ceil() as i64).clamp(1, 9) as u32;

    let trimester = if current_week > 27 {
        "3rd"
    } else if current_week > 13 {
        "2nd"
    } else {
        "1st"
    };

    let due_date = expected_due_date.unwrap_or(last_period + Duration::days(280));

    PregnancyOverview {
        days_pregnant,
        current_week,
        current_month,
        trimester,
        due_date,
        days_remaining: (due_date - today).num_days().max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_cycle_window() {
        // 28-day cycle: ovulation on cycle day 14, window days 9..=14
        let lmp = date(2026, 8, 1);
        let o = fertility_overview(lmp, 28, 5, date(2026, 8, 10));
        assert_eq!(o.cycle_day, 10);
        assert_eq!(o.ovulation_date, date(2026, 8, 15));
        assert_eq!(o.fertile_window_start, date(2026, 8, 10));
        assert_eq!(o.fertile_window_end, date(2026, 8, 15));
        assert_eq!(o.status, FertilityStatus::High);
        assert_eq!(o.days_until_ovulation, 4);
    }

    #[test]
    fn probability_peaks_on_ovulation_day() {
        let lmp = date(2026, 8, 1);
        // cycle day 14 == ovulation day for a 28-day cycle
        let on = fertility_overview(lmp, 28, 5, date(2026, 8, 14));
        assert_eq!(on.conception_probability, 70);

        let before = fertility_overview(lmp, 28, 5, date(2026, 8, 13));
        assert_eq!(before.conception_probability, 65);

        let early = fertility_overview(lmp, 28, 5, date(2026, 8, 3));
        assert_eq!(early.conception_probability, 5);
        assert_eq!(early.status, FertilityStatus::Low);

        let late = fertility_overview(lmp, 28, 5, date(2026, 8, 25));
        assert_eq!(late.conception_probability, 5);
        assert_eq!(late.status, FertilityStatus::PostOvulation);
    }

    #[test]
    fn longer_cycle_shifts_ovulation() {
        // 32-day cycle: ovulation on day 18
        let o = fertility_overview(date(2026, 8, 1), 32, 5, date(2026, 8, 1));
        assert_eq!(o.ovulation_date, date(2026, 8, 19));
        assert_eq!(o.fertile_window_start, date(2026, 8, 14));
    }

    #[test]
    fn pregnancy_week_and_trimester() {
        let lmp = date(2026, 1, 1);
        let o = pregnancy_overview(lmp, None, date(2026, 1, 1));
        assert_eq!(o.current_week, 1);
        assert_eq!(o.trimester, "1st");
        assert_eq!(o.due_date, date(2026, 10, 8)); // LMP + 280

        let mid = pregnancy_overview(lmp, None, date(2026, 5, 1));
        assert_eq!(mid.days_pregnant, 120);
        assert_eq!(mid.current_week, 18);
        assert_eq!(mid.trimester, "2nd");
        assert_eq!(mid.current_month, 5);

        let late = pregnancy_overview(lmp, None, date(2026, 8, 1));
        assert_eq!(late.trimester, "3rd");
    }

    #[test]
    fn pregnancy_week_clamped_to_40() {
        let lmp = date(2025, 1, 1);
        let o = pregnancy_overview(lmp, None, date(2026, 8, 1));
        assert_eq!(o.current_week, 40);
        assert_eq!(o.current_month, 9);
        assert_eq!(o.days_remaining, 0); // past due, never negative
    }

    #[test]
    fn provided_due_date_wins() {
        let o = pregnancy_overview(date(2026, 1, 1), Some(date(2026, 10, 1)), date(2026, 2, 1));
        assert_eq!(o.due_date, date(2026, 10, 1));
    }
}
