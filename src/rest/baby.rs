//! Baby profile CRUD. All queries are scoped to the authenticated parent;
//! deletes are soft (the profile is deactivated, its logs stay).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{Baby, Gender, User};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};

/// Baby document plus the ages derived from date_of_birth at read time.
#[derive(Serialize)]
pub struct BabyView {
    #[serde(flatten)]
    pub baby: Baby,
    pub age_in_months: i32,
    pub age_in_weeks: i64,
    pub age_in_days: i64,
}

impl From<Baby> for BabyView {
    fn from(baby: Baby) -> Self {
        let today = Utc::now().date_naive();
        Self {
            age_in_months: baby.age_in_months_at(today),
            age_in_weeks: baby.age_in_weeks_at(today),
            age_in_days: baby.age_in_days_at(today),
            baby,
        }
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<ApiResponse<Vec<BabyView>>>> {
    let babies = state.storage.babies_for_parent(&user.id)?;
    Ok(ApiResponse::list(babies.into_iter().map(BabyView::from).collect()))
}

#[derive(Deserialize, Debug)]
pub struct CreateBabyRequest {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    pub photo: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateBabyRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BabyView>>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Please provide baby name"));
    }

    let now = Utc::now();
    let baby = Baby {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        parent: user.id.clone(),
        date_of_birth: req.date_of_birth,
        gender: req.gender,
        weight: req.weight,
        height: req.height,
        blood_group: req.blood_group,
        allergies: req.allergies,
        medical_conditions: req.medical_conditions,
        photo: req.photo,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.storage.put_baby(&baby)?;
    info!("baby profile created: {} for parent {}", baby.id, user.id);

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Baby profile created successfully", BabyView::from(baby)),
    ))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<BabyView>>> {
    let baby = state
        .storage
        .get_baby_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;
    Ok(ApiResponse::data(BabyView::from(baby)))
}

#[derive(Deserialize, Debug)]
pub struct UpdateBabyRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_group: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medical_conditions: Option<Vec<String>>,
    pub photo: Option<String>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBabyRequest>,
) -> ApiResult<Json<ApiResponse<BabyView>>> {
    let mut baby = state
        .storage
        .get_baby_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    if let Some(name) = req.name.filter(|n| !n.trim().is_empty()) {
        baby.name = name.trim().to_string();
    }
    if let Some(dob) = req.date_of_birth {
        baby.date_of_birth = dob;
    }
    if let Some(gender) = req.gender {
        baby.gender = gender;
    }
    if let Some(weight) = req.weight {
        baby.weight = Some(weight);
    }
    if let Some(height) = req.height {
        baby.height = Some(height);
    }
    if let Some(blood_group) = req.blood_group {
        baby.blood_group = Some(blood_group);
    }
    if let Some(allergies) = req.allergies {
        baby.allergies = allergies;
    }
    if let Some(conditions) = req.medical_conditions {
        baby.medical_conditions = conditions;
    }
    if let Some(photo) = req.photo {
        baby.photo = Some(photo);
    }
    baby.updated_at = Utc::now();
    state.storage.put_baby(&baby)?;

    Ok(ApiResponse::with_message(
        "Baby profile updated successfully",
        BabyView::from(baby),
    ))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let mut baby = state
        .storage
        .get_baby_owned(&id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    baby.is_active = false;
    baby.updated_at = Utc::now();
    state.storage.put_baby(&baby)?;

    Ok(ApiResponse::with_message("Baby profile deleted successfully", ()))
}
