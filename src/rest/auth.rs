//! Account endpoints: signup, login, current-user, care mode, profile and
//! password changes.

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::auth::{create_jwt, hash_password, verify_password};
use crate::models::{CareMode, Role, User, UserProfile};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_mode: Option<CareMode>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Please provide a name"));
    }
    if !req.email.contains('@') {
        return Err(ApiError::bad_request("Please provide a valid email"));
    }
    if req.password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        password_hash: hash_password(&req.password)
            .map_err(|_| ApiError::internal("Error creating user"))?,
        phone: None,
        date_of_birth: None,
        address: None,
        city: None,
        role: Role::Parent,
        care_mode: None,
        expected_due_date: None,
        last_period_date: None,
        cycle_length: 28,
        period_duration: 5,
        created_at: now,
        updated_at: now,
    };

    state.storage.create_user(&user)?;
    info!("new account registered: {}", user.email);

    let token = create_jwt(&user.id).map_err(|_| ApiError::internal("Error creating user"))?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User created successfully".to_string(),
            token,
            user: UserSummary {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
                care_mode: None,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Please provide email and password"));
    }

    let user = state
        .storage
        .get_user_by_email(&req.email)?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash).unwrap_or(false) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = create_jwt(&user.id).map_err(|_| ApiError::internal("Error logging in"))?;
    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            care_mode: user.care_mode,
        },
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Json<ApiResponse<UserProfile>> {
    ApiResponse::data(user.profile())
}

#[derive(Deserialize, Debug)]
pub struct UpdateModeRequest {
    pub care_mode: Option<String>,
    /// Accepted under either name, like the original API.
    pub lmp_date: Option<NaiveDate>,
    pub last_period_date: Option<NaiveDate>,
    pub expected_due_date: Option<NaiveDate>,
    pub cycle_length: Option<u32>,
    pub period_duration: Option<u32>,
}

#[derive(Serialize)]
pub struct ModeData {
    pub care_mode: Option<CareMode>,
    pub expected_due_date: Option<NaiveDate>,
    pub last_period_date: Option<NaiveDate>,
    pub cycle_length: u32,
    pub period_duration: u32,
}

pub async fn update_mode(
    State(state): State<Arc<AppState>>,
    Extension(mut user): Extension<User>,
    Json(req): Json<UpdateModeRequest>,
) -> ApiResult<Json<ApiResponse<ModeData>>> {
    let mode = req
        .care_mode
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Care mode is required"))?;
    user.care_mode = Some(match mode {
        "planning" => CareMode::Planning,
        "pregnancy" => CareMode::Pregnancy,
        "baby-care" => CareMode::BabyCare,
        other => {
            return Err(ApiError::bad_request(format!(
                "Invalid care mode: \"{other}\". Must be one of: planning, pregnancy, baby-care"
            )))
        }
    });

    if let Some(lmp) = req.lmp_date.or(req.last_period_date) {
        user.last_period_date = Some(lmp);
    }
    if let Some(due) = req.expected_due_date {
        user.expected_due_date = Some(due);
    }
    if let Some(len) = req.cycle_length {
        user.cycle_length = len;
    }
    if let Some(dur) = req.period_duration {
        user.period_duration = dur;
    }
    user.updated_at = Utc::now();
    state.storage.update_user(&user)?;

    Ok(ApiResponse::with_message(
        "Care mode updated successfully",
        ModeData {
            care_mode: user.care_mode,
            expected_due_date: user.expected_due_date,
            last_period_date: user.last_period_date,
            cycle_length: user.cycle_length,
            period_duration: user.period_duration,
        },
    ))
}

#[derive(Deserialize, Debug)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(mut user): Extension<User>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    if let Some(name) = req.name.filter(|n| !n.trim().is_empty()) {
        user.name = name.trim().to_string();
    }
    if let Some(phone) = req.phone {
        user.phone = Some(phone);
    }
    if let Some(dob) = req.date_of_birth {
        user.date_of_birth = Some(dob);
    }
    if let Some(address) = req.address {
        user.address = Some(address);
    }
    if let Some(city) = req.city {
        user.city = Some(city);
    }
    user.updated_at = Utc::now();
    state.storage.update_user(&user)?;

    Ok(ApiResponse::with_message(
        "Profile updated successfully",
        user.profile(),
    ))
}

#[derive(Deserialize, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(mut user): Extension<User>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(ApiError::bad_request(
            "Current password and new password are required",
        ));
    }
    if !verify_password(&req.current_password, &user.password_hash).unwrap_or(false) {
        return Err(ApiError::bad_request("Current password is incorrect"));
    }
    if req.new_password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }

    user.password_hash = hash_password(&req.new_password)
        .map_err(|_| ApiError::internal("Error changing password"))?;
    user.updated_at = Utc::now();
    state.storage.update_user(&user)?;

    Ok(ApiResponse::with_message("Password changed successfully", ()))
}
