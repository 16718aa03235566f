//! Dashboard aggregates and the planning/pregnancy overviews. All numbers
//! are computed in-process from the stored logs on every request.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::cycle::{fertility_overview, pregnancy_overview, FertilityOverview, PregnancyOverview};
use crate::models::{
    Baby, FeedingLog, MilestoneStatus, SleepLog, User, VaccinationStatus,
};
use crate::rest::tracking::{end_of_day, start_of_day};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};
use crate::schedule;

const FEEDING_INTERVAL_HOURS: i64 = 3;

#[derive(Serialize)]
pub struct BabySummary {
    pub id: String,
    pub name: String,
    pub age_in_months: i32,
    pub age_in_weeks: i64,
    pub age_in_days: i64,
}

#[derive(Serialize)]
pub struct FeedingStats {
    pub today_count: usize,
    /// Feedings per day over the last 7 days, one decimal.
    pub weekly_average: f64,
    /// Busiest feeding hour over the week, `H:00 AM/PM`, `--` when empty.
    pub peak_hour: String,
    pub last_feeding: Option<DateTime<Utc>>,
    pub next_suggested: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct SleepStats {
    pub today_hours: f64,
    pub today_sessions: usize,
    pub weekly_average_hours: f64,
    pub weekly_sessions: usize,
}

#[derive(Serialize)]
pub struct VaccinationStats {
    pub total: usize,
    pub completed: usize,
    pub upcoming: usize,
    pub completion_percent: u32,
    pub next_vaccine: Option<String>,
    pub next_vaccine_date: Option<chrono::NaiveDate>,
}

#[derive(Serialize)]
pub struct MilestoneStats {
    pub total: usize,
    pub completed: usize,
    pub completion_percent: u32,
}

#[derive(Serialize)]
pub struct Dashboard {
    pub baby: BabySummary,
    pub feeding: FeedingStats,
    pub sleep: SleepStats,
    pub vaccination: VaccinationStats,
    pub milestones: MilestoneStats,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Dashboard>>> {
    let baby = state
        .storage
        .get_baby_owned(&baby_id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let now = Utc::now();
    let today = now.date_naive();
    let today_range = Some((start_of_day(today), end_of_day(today)));
    let week_range = Some((start_of_day(today - Duration::days(6)), end_of_day(today)));

    let today_feedings = state
        .storage
        .feeding_logs_in_range(&baby.id, &user.id, today_range)?;
    let week_feedings = state
        .storage
        .feeding_logs_in_range(&baby.id, &user.id, week_range)?;
    let today_sleep = state
        .storage
        .sleep_logs_in_range(&baby.id, &user.id, today_range)?;
    let week_sleep = state
        .storage
        .sleep_logs_in_range(&baby.id, &user.id, week_range)?;
    let vaccinations = state.storage.vaccinations_for_baby(&baby.id, &user.id)?;
    let milestones = state.storage.milestones_for_baby(&baby.id, &user.id)?;

    let last_feeding = week_feedings.first().map(|l| l.time);
    let feeding = FeedingStats {
        today_count: today_feedings.len(),
        weekly_average: round1(week_feedings.len() as f64 / 7.0),
        peak_hour: peak_feeding_hour(&week_feedings),
        last_feeding,
        next_suggested: last_feeding.map(|t| t + Duration::hours(FEEDING_INTERVAL_HOURS)),
    };

    let sleep = SleepStats {
        today_hours: round1(total_sleep_minutes(&today_sleep, now) as f64 / 60.0),
        today_sessions: today_sleep.len(),
        weekly_average_hours: round1(total_sleep_minutes(&week_sleep, now) as f64 / 60.0 / 7.0),
        weekly_sessions: week_sleep.len(),
    };

    let completed_vaccinations = vaccinations
        .iter()
        .filter(|v| v.status == VaccinationStatus::Completed)
        .count();
    let mut open: Vec<_> = vaccinations
        .iter()
        .filter(|v| {
            matches!(
                v.status,
                VaccinationStatus::Pending | VaccinationStatus::Scheduled
            )
        })
        .collect();
    open.sort_by_key(|v| (v.recommended_age, v.scheduled_date));
    let vaccination = VaccinationStats {
        total: vaccinations.len(),
        completed: completed_vaccinations,
        upcoming: open.len(),
        completion_percent: percent(completed_vaccinations, vaccinations.len()),
        next_vaccine: open.first().map(|v| v.name.clone()),
        next_vaccine_date: open.first().and_then(|v| v.scheduled_date),
    };

    let completed_milestones = milestones
        .iter()
        .filter(|m| m.status == MilestoneStatus::Completed)
        .count();
    let milestones = MilestoneStats {
        total: milestones.len(),
        completed: completed_milestones,
        completion_percent: percent(completed_milestones, milestones.len()),
    };

    Ok(ApiResponse::data(Dashboard {
        baby: BabySummary {
            age_in_months: baby.age_in_months_at(today),
            age_in_weeks: baby.age_in_weeks_at(today),
            age_in_days: baby.age_in_days_at(today),
            id: baby.id,
            name: baby.name,
        },
        feeding,
        sleep,
        vaccination,
        milestones,
    }))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Minutes slept across the logs; open sessions count up to `now`.
fn total_sleep_minutes(logs: &[SleepLog], now: DateTime<Utc>) -> i64 {
    logs.iter()
        .map(|l| {
            l.duration
                .unwrap_or_else(|| (now - l.start_time).num_minutes().max(0))
        })
        .sum()
}

/// Busiest hour of day in the logs, lowest hour winning ties.
fn peak_feeding_hour(logs: &[FeedingLog]) -> String {
    let mut histogram = [0usize; 24];
    for log in logs {
        histogram[log.time.hour() as usize] += 1;
    }
    let Some((hour, &count)) = histogram.iter().enumerate().max_by_key(|(h, &c)| (c, 24 - h))
    else {
        return "--".to_string();
    };
    if count == 0 {
        return "--".to_string();
    }
    format_hour(hour as u32)
}

fn format_hour(hour: u32) -> String {
    let (display, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{display}:00 {suffix}")
}

#[derive(Serialize)]
pub struct AutoGenerateResult {
    pub vaccinations_created: usize,
    pub milestones_created: usize,
}

/// Idempotently seed the month-offset vaccination schedule and the
/// milestone checklist for a baby.
pub async fn auto_generate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<AutoGenerateResult>>> {
    let baby: Baby = state
        .storage
        .get_baby_owned(&baby_id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let today = Utc::now().date_naive();
    let (vaccinations_created, milestones_created) =
        schedule::auto_generate(&state.storage, &baby, today)?;
    info!(
        "auto-generated {} vaccinations, {} milestones for baby {}",
        vaccinations_created, milestones_created, baby.id
    );

    Ok(ApiResponse::with_message(
        "Schedules generated successfully",
        AutoGenerateResult {
            vaccinations_created,
            milestones_created,
        },
    ))
}

pub async fn fertility(
    Extension(user): Extension<User>,
) -> ApiResult<Json<ApiResponse<FertilityOverview>>> {
    let last_period = user.last_period_date.ok_or_else(|| {
        ApiError::bad_request("Last period date is required. Update your mode settings first.")
    })?;

    let overview = fertility_overview(
        last_period,
        user.cycle_length,
        user.period_duration,
        Utc::now().date_naive(),
    );
    Ok(ApiResponse::data(overview))
}

pub async fn pregnancy(
    Extension(user): Extension<User>,
) -> ApiResult<Json<ApiResponse<PregnancyOverview>>> {
    let last_period = user.last_period_date.ok_or_else(|| {
        ApiError::bad_request("Last period date is required. Update your mode settings first.")
    })?;

    let overview = pregnancy_overview(
        last_period,
        user.expected_due_date,
        Utc::now().date_naive(),
    );
    Ok(ApiResponse::data(overview))
}
