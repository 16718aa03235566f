//! Developmental milestone endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Milestone, MilestoneCategory, MilestoneStatus, User};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Milestone>>>> {
    let mut milestones = state.storage.milestones_for_baby(&baby_id, &user.id)?;
    milestones.sort_by_key(|m| m.age_in_months);
    Ok(ApiResponse::list(milestones))
}

#[derive(Deserialize, Debug)]
pub struct CreateMilestoneRequest {
    pub baby: String,
    pub name: String,
    pub category: MilestoneCategory,
    pub description: Option<String>,
    pub age_in_months: u32,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateMilestoneRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Milestone>>)> {
    state
        .storage
        .get_baby_owned(&req.baby, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let now = Utc::now();
    let milestone = Milestone {
        id: Uuid::new_v4().to_string(),
        baby: req.baby,
        parent: user.id,
        name: req.name,
        category: req.category,
        description: req.description,
        age_in_months: req.age_in_months,
        status: MilestoneStatus::Pending,
        completed_date: None,
        notes: req.notes,
        created_at: now,
        updated_at: now,
    };
    state.storage.put_milestone(&milestone)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Milestone created successfully", milestone),
    ))
}

#[derive(Deserialize, Debug, Default)]
pub struct CompleteMilestoneRequest {
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    body: Option<Json<CompleteMilestoneRequest>>,
) -> ApiResult<Json<ApiResponse<Milestone>>> {
    // every field is optional, so a bodyless PUT is valid
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let mut milestone = state
        .storage
        .get_milestone_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Milestone not found"))?;

    milestone.status = MilestoneStatus::Completed;
    milestone.completed_date = Some(req.completed_date.unwrap_or_else(Utc::now));
    if let Some(notes) = req.notes {
        milestone.notes = Some(notes);
    }
    milestone.updated_at = Utc::now();
    state.storage.put_milestone(&milestone)?;

    Ok(ApiResponse::with_message("Milestone marked as achieved", milestone))
}
