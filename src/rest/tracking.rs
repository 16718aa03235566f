//! Feeding and sleep log endpoints, plus the today-summary used by the
//! dashboard. Date-range filters are widened to whole days.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{FeedingKind, FeedingLog, SleepLog, SleepQuality, User};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};

#[derive(Deserialize, Debug)]
pub struct RangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Widen a start/end date pair to 00:00:00 .. 23:59:59.999 UTC. `None`
/// unless both bounds are present, like the original API.
fn day_range(query: &RangeQuery) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let (start, end) = (query.start_date?, query.end_date?);
    Some((start_of_day(start), end_of_day(end)))
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

pub(crate) fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(
        &date
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("end of day is valid"),
    )
}

// --- Feeding logs ---

pub async fn list_feeding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ApiResponse<Vec<FeedingLog>>>> {
    let logs = state
        .storage
        .feeding_logs_in_range(&baby_id, &user.id, day_range(&query))?;
    Ok(ApiResponse::list(logs))
}

#[derive(Deserialize, Debug)]
pub struct CreateFeedingRequest {
    pub baby: String,
    pub kind: FeedingKind,
    pub time: Option<DateTime<Utc>>,
    pub quantity: Option<f64>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

pub async fn create_feeding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateFeedingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<FeedingLog>>)> {
    let now = Utc::now();
    let log = FeedingLog {
        id: Uuid::new_v4().to_string(),
        baby: req.baby,
        parent: user.id.clone(),
        kind: req.kind,
        time: req.time.unwrap_or(now),
        quantity: req.quantity,
        duration: req.duration,
        notes: req.notes,
        created_at: now,
        updated_at: now,
    };
    state.storage.put_feeding_log(&log)?;
    info!("feeding log created for baby {}", log.baby);

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Feeding log created successfully", log),
    ))
}

#[derive(Deserialize, Debug)]
pub struct UpdateFeedingRequest {
    pub kind: Option<FeedingKind>,
    pub time: Option<DateTime<Utc>>,
    pub quantity: Option<f64>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

pub async fn update_feeding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFeedingRequest>,
) -> ApiResult<Json<ApiResponse<FeedingLog>>> {
    let mut log = state
        .storage
        .get_feeding_log_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Feeding log not found"))?;

    if let Some(kind) = req.kind {
        log.kind = kind;
    }
    if let Some(time) = req.time {
        log.time = time;
    }
    if let Some(quantity) = req.quantity {
        log.quantity = Some(quantity);
    }
    if let Some(duration) = req.duration {
        log.duration = Some(duration);
    }
    if let Some(notes) = req.notes {
        log.notes = Some(notes);
    }
    log.updated_at = Utc::now();
    state.storage.put_feeding_log(&log)?;

    Ok(ApiResponse::with_message("Feeding log updated successfully", log))
}

pub async fn delete_feeding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    if !state.storage.delete_feeding_log(&id, &user.id)? {
        return Err(ApiError::not_found("Feeding log not found"));
    }
    Ok(ApiResponse::with_message("Feeding log deleted successfully", ()))
}

// --- Sleep logs ---

pub async fn list_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ApiResponse<Vec<SleepLog>>>> {
    let logs = state
        .storage
        .sleep_logs_in_range(&baby_id, &user.id, day_range(&query))?;
    Ok(ApiResponse::list(logs))
}

#[derive(Deserialize, Debug)]
pub struct CreateSleepRequest {
    pub baby: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
}

pub async fn create_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateSleepRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SleepLog>>)> {
    let now = Utc::now();
    let mut log = SleepLog {
        id: Uuid::new_v4().to_string(),
        baby: req.baby,
        parent: user.id.clone(),
        start_time: req.start_time,
        end_time: req.end_time,
        duration: None,
        quality: req.quality,
        notes: req.notes,
        created_at: now,
        updated_at: now,
    };
    log.derive_duration();
    state.storage.put_sleep_log(&log)?;
    info!("sleep log created for baby {}", log.baby);

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Sleep log created successfully", log),
    ))
}

#[derive(Deserialize, Debug)]
pub struct UpdateSleepRequest {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
}

pub async fn update_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSleepRequest>,
) -> ApiResult<Json<ApiResponse<SleepLog>>> {
    let mut log = state
        .storage
        .get_sleep_log_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Sleep log not found"))?;

    if let Some(start) = req.start_time {
        log.start_time = start;
    }
    if let Some(end) = req.end_time {
        log.end_time = Some(end);
    }
    if let Some(quality) = req.quality {
        log.quality = Some(quality);
    }
    if let Some(notes) = req.notes {
        log.notes = Some(notes);
    }
    log.derive_duration();
    log.updated_at = Utc::now();
    state.storage.put_sleep_log(&log)?;

    Ok(ApiResponse::with_message("Sleep log updated successfully", log))
}

pub async fn delete_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    if !state.storage.delete_sleep_log(&id, &user.id)? {
        return Err(ApiError::not_found("Sleep log not found"));
    }
    Ok(ApiResponse::with_message("Sleep log deleted successfully", ()))
}

// --- Today's summary ---

#[derive(Serialize)]
pub struct FeedingSummary {
    pub total: usize,
    pub logs: Vec<FeedingLog>,
}

#[derive(Serialize)]
pub struct SleepSummary {
    pub total_minutes: i64,
    pub total_hours: f64,
    pub logs: Vec<SleepLog>,
}

#[derive(Serialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub feeding: FeedingSummary,
    pub sleep: SleepSummary,
}

pub async fn today_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<TodaySummary>>> {
    let today = Utc::now().date_naive();
    let range = Some((start_of_day(today), end_of_day(today)));

    let feeding_logs = state.storage.feeding_logs_in_range(&baby_id, &user.id, range)?;
    let sleep_logs = state.storage.sleep_logs_in_range(&baby_id, &user.id, range)?;

    let total_minutes: i64 = sleep_logs.iter().filter_map(|l| l.duration).sum();
    let total_hours = (total_minutes as f64 / 60.0 * 10.0).round() / 10.0;

    Ok(ApiResponse::data(TodaySummary {
        date: today,
        feeding: FeedingSummary {
            total: feeding_logs.len(),
            logs: feeding_logs,
        },
        sleep: SleepSummary {
            total_minutes,
            total_hours,
            logs: sleep_logs,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn day_range_requires_both_bounds() {
        let none = RangeQuery { start_date: None, end_date: Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()) };
        assert!(day_range(&none).is_none());

        let both = RangeQuery {
            start_date: NaiveDate::from_ymd_opt(2026, 8, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 3),
        };
        let (start, end) = day_range(&both).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-08-01T00:00:00+00:00");
        assert!(end > start + Duration::days(2));
        assert!(end < start + Duration::days(3));
    }
}
