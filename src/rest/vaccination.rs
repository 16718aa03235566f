//! Vaccination card endpoints: the per-baby schedule, custom entries,
//! completion, and the upcoming-reminder window.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{User, Vaccination, VaccinationStatus};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};
use crate::schedule::seed_initial_vaccinations;

/// Days ahead that count as "upcoming" for reminder purposes.
const UPCOMING_WINDOW_DAYS: i64 = 3;

pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Vaccination>>>> {
    let mut vaccinations = state.storage.vaccinations_for_baby(&baby_id, &user.id)?;
    vaccinations.sort_by_key(|v| v.recommended_age);
    Ok(ApiResponse::list(vaccinations))
}

/// Seed the standard vaccination card for a baby.
pub async fn initialize(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<Vaccination>>>)> {
    let baby = state
        .storage
        .get_baby_owned(&baby_id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let created = seed_initial_vaccinations(&state.storage, &baby)?;
    info!("initialized vaccination card for baby {}", baby.id);

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Vaccination schedule initialized", created),
    ))
}

#[derive(Deserialize, Debug)]
pub struct CreateVaccinationRequest {
    pub baby: String,
    pub name: String,
    pub description: Option<String>,
    pub recommended_age: u32,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateVaccinationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vaccination>>)> {
    state
        .storage
        .get_baby_owned(&req.baby, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let now = Utc::now();
    let status = if req.scheduled_date.is_some() {
        VaccinationStatus::Scheduled
    } else {
        VaccinationStatus::Pending
    };
    let vaccination = Vaccination {
        id: Uuid::new_v4().to_string(),
        baby: req.baby,
        parent: user.id,
        name: req.name,
        description: req.description,
        recommended_age: req.recommended_age,
        scheduled_date: req.scheduled_date,
        completed_date: None,
        status,
        administered_by: None,
        batch_number: None,
        notes: req.notes,
        reminder_sent: false,
        created_at: now,
        updated_at: now,
    };
    state.storage.put_vaccination(&vaccination)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Vaccination created successfully", vaccination),
    ))
}

#[derive(Deserialize, Debug)]
pub struct UpdateVaccinationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub recommended_age: Option<u32>,
    pub scheduled_date: Option<NaiveDate>,
    pub status: Option<VaccinationStatus>,
    pub notes: Option<String>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVaccinationRequest>,
) -> ApiResult<Json<ApiResponse<Vaccination>>> {
    let mut vaccination = state
        .storage
        .get_vaccination_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Vaccination not found"))?;

    if let Some(name) = req.name {
        vaccination.name = name;
    }
    if let Some(description) = req.description {
        vaccination.description = Some(description);
    }
    if let Some(age) = req.recommended_age {
        vaccination.recommended_age = age;
    }
    if let Some(date) = req.scheduled_date {
        vaccination.scheduled_date = Some(date);
        if vaccination.status == VaccinationStatus::Pending {
            vaccination.status = VaccinationStatus::Scheduled;
        }
    }
    if let Some(status) = req.status {
        vaccination.status = status;
    }
    if let Some(notes) = req.notes {
        vaccination.notes = Some(notes);
    }
    vaccination.updated_at = Utc::now();
    state.storage.put_vaccination(&vaccination)?;

    Ok(ApiResponse::with_message("Vaccination updated successfully", vaccination))
}

#[derive(Deserialize, Debug, Default)]
pub struct CompleteVaccinationRequest {
    pub completed_date: Option<DateTime<Utc>>,
    pub administered_by: Option<String>,
    pub batch_number: Option<String>,
    pub notes: Option<String>,
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    body: Option<Json<CompleteVaccinationRequest>>,
) -> ApiResult<Json<ApiResponse<Vaccination>>> {
    // every field is optional, so a bodyless PUT is valid
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mut vaccination = state
        .storage
        .get_vaccination_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Vaccination not found"))?;

    vaccination.status = VaccinationStatus::Completed;
    vaccination.completed_date = Some(req.completed_date.unwrap_or_else(Utc::now));
    if let Some(by) = req.administered_by {
        vaccination.administered_by = Some(by);
    }
    if let Some(batch) = req.batch_number {
        vaccination.batch_number = Some(batch);
    }
    if let Some(notes) = req.notes {
        vaccination.notes = Some(notes);
    }
    vaccination.updated_at = Utc::now();
    state.storage.put_vaccination(&vaccination)?;
    info!("vaccination {} marked completed", vaccination.id);

    Ok(ApiResponse::with_message("Vaccination marked as completed", vaccination))
}

/// Pending or scheduled vaccinations whose scheduled date falls on or
/// before the reminder horizon; overdue entries stay in the list until
/// completed. Entries without a scheduled date are not reminders.
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Vaccination>>>> {
    let today = Utc::now().date_naive();
    let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut upcoming: Vec<Vaccination> = state
        .storage
        .vaccinations_for_baby(&baby_id, &user.id)?
        .into_iter()
        .filter(|v| {
            matches!(
                v.status,
                VaccinationStatus::Pending | VaccinationStatus::Scheduled
            ) && v.scheduled_date.map_or(false, |d| d <= horizon)
        })
        .collect();
    upcoming.sort_by_key(|v| v.scheduled_date);

    Ok(ApiResponse::list(upcoming))
}
