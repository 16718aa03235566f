//! AI assistant endpoints: thin proxies to the workflow webhooks with
//! canned fallbacks so the app keeps working when the workflow is down.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::models::{User, VaccinationStatus};
use crate::rest::tracking::{end_of_day, start_of_day};
use crate::rest::{ApiError, ApiResponse, ApiResult, AppState};
use crate::webhook::{fallback_summary, CHAT_FALLBACK};

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub conversation_history: Vec<Value>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Message is required"))?;

    let payload = json!({
        "user_id": user.id,
        "user_name": user.name,
        "message": message,
        "context": req.context,
        "conversation_history": req.conversation_history,
        "timestamp": Utc::now(),
    });

    match state.ai.post_chat(&payload).await {
        Ok(answer) => Ok(ApiResponse::data(answer)),
        Err(err) => {
            warn!("chat webhook unreachable: {err}");
            Ok(ApiResponse::data(json!({
                "response": CHAT_FALLBACK,
                "fallback": true,
            })))
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SummaryRequest {
    pub baby: String,
    pub date: Option<NaiveDate>,
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(req): Json<SummaryRequest>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let baby = state
        .storage
        .get_baby_owned(&req.baby, &user.id)?
        .ok_or_else(|| ApiError::not_found("Baby not found"))?;

    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let range = Some((start_of_day(date), end_of_day(date)));

    let mut feedings = state
        .storage
        .feeding_logs_in_range(&baby.id, &user.id, range)?;
    let mut sleeps = state.storage.sleep_logs_in_range(&baby.id, &user.id, range)?;
    // chronological order reads better in a narrative summary
    feedings.reverse();
    sleeps.reverse();

    let total_feedings = feedings.len();
    let total_sleep_minutes: i64 = sleeps.iter().filter_map(|l| l.duration).sum();
    let total_sleep_hours = (total_sleep_minutes as f64 / 60.0 * 10.0).round() / 10.0;

    let context = json!({
        "baby_name": baby.name,
        "date": date,
        "feedings": feedings,
        "sleep_sessions": sleeps,
        "total_feedings": total_feedings,
        "total_sleep_hours": total_sleep_hours,
    });

    let mut payload = json!({ "action": "summarize" });
    if let (Some(map), Value::Object(extra)) = (payload.as_object_mut(), context.clone()) {
        map.extend(extra);
    }

    match state.ai.post_summary(&payload).await {
        Ok(answer) => Ok(ApiResponse::data(answer)),
        Err(err) => {
            warn!("summary webhook unreachable: {err}");
            Ok(ApiResponse::data(json!({
                "summary": fallback_summary(total_feedings, total_sleep_hours),
                "fallback": true,
            })))
        }
    }
}

pub async fn next_vaccine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(baby_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let mut open: Vec<_> = state
        .storage
        .vaccinations_for_baby(&baby_id, &user.id)?
        .into_iter()
        .filter(|v| {
            matches!(
                v.status,
                VaccinationStatus::Pending | VaccinationStatus::Scheduled
            )
        })
        .collect();
    open.sort_by_key(|v| (v.recommended_age, v.scheduled_date));

    let Some(next) = open.into_iter().next() else {
        return Ok(ApiResponse::data(json!({
            "message": "All vaccinations are up to date! 🎉",
            "vaccine": null,
        })));
    };

    let message = match next.scheduled_date {
        Some(date) => format!("Next vaccine: {} scheduled on {}", next.name, date),
        None => format!("Next vaccine: {}", next.name),
    };
    Ok(ApiResponse::data(json!({
        "message": message,
        "vaccine": next,
    })))
}
