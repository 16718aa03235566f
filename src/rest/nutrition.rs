//! Nutrition guide endpoints. The guide itself is static content; the
//! recommendations endpoint resolves the right age bracket from a baby's
//! date of birth.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::models::User;
use crate::nutrition::{age_group_for_months, full_guide, guide_for, FullGuide, NutritionGuide};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};

pub async fn guide() -> Json<ApiResponse<FullGuide>> {
    ApiResponse::data(full_guide())
}

pub async fn guide_for_group(
    Path(age_group): Path<String>,
) -> ApiResult<Json<ApiResponse<&'static NutritionGuide>>> {
    let guide =
        guide_for(&age_group).ok_or_else(|| ApiError::not_found("Age group not found"))?;
    Ok(ApiResponse::data(guide))
}

#[derive(Serialize)]
pub struct Recommendations {
    pub baby_name: String,
    pub age_in_months: i32,
    pub age_group: &'static str,
    pub guide: &'static NutritionGuide,
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Recommendations>>> {
    let baby = state
        .storage
        .get_baby_owned(&baby_id, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let age_in_months = baby.age_in_months_at(Utc::now().date_naive());
    let age_group = age_group_for_months(age_in_months);
    let guide = guide_for(age_group)
        .ok_or_else(|| ApiError::internal("Nutrition guide missing for age group"))?;

    Ok(ApiResponse::data(Recommendations {
        baby_name: baby.name,
        age_in_months,
        age_group,
        guide,
    }))
}
