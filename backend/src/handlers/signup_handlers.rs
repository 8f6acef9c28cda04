use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::models::signup_models::{NewPilotApplication, NewWaitlistSignup};
use crate::utils::mailer::{PilotEmail, WaitlistEmail};
use crate::AppState;

#[derive(Deserialize)]
pub struct WaitlistRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub school: Option<String>,
    pub frustration: Option<String>,
    pub locale: Option<String>,
}

#[derive(Deserialize)]
pub struct PilotRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub institution: Option<String>,
    pub email: Option<String>,
    pub challenge: Option<String>,
    pub locale: Option<String>,
}

// Empty strings count as missing, matching the form's falsy-field check
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn missing_fields() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Missing required fields."})),
    )
}

fn duplicate() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::CONFLICT, Json(json!({"error": "duplicate"})))
}

fn server_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Something went wrong. Please try again."})),
    )
}

pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WaitlistRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let (Some(name), Some(email), Some(school), Some(locale)) = (
        required(&payload.name),
        required(&payload.email),
        required(&payload.school),
        required(&payload.locale),
    ) else {
        return Err(missing_fields());
    };

    let signup = NewWaitlistSignup {
        name: name.to_string(),
        email: email.to_string(),
        school: school.to_string(),
        frustration: payload.frustration.clone(),
        locale: locale.to_string(),
        created_at: Utc::now().timestamp() as i32,
    };

    match state.signup_repository.add_waitlist_signup(&signup) {
        Ok(()) => {}
        Err(e) if e.is_unique_violation() => return Err(duplicate()),
        Err(e) => {
            tracing::error!("waitlist insert failed: {}", e);
            return Err(server_error());
        }
    }

    // The row is saved at this point; email is best-effort only
    let emails = state.notifier.send_waitlist_emails(WaitlistEmail {
        name: signup.name,
        email: signup.email,
        school: signup.school,
        locale: signup.locale,
    });
    if let Err(e) = emails.await {
        tracing::error!("waitlist email send failed: {}", e);
    }

    Ok(Json(json!({"ok": true})))
}

pub async fn apply_for_pilot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PilotRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let (Some(name), Some(role), Some(institution), Some(email), Some(locale)) = (
        required(&payload.name),
        required(&payload.role),
        required(&payload.institution),
        required(&payload.email),
        required(&payload.locale),
    ) else {
        return Err(missing_fields());
    };

    let application = NewPilotApplication {
        name: name.to_string(),
        role: role.to_string(),
        institution: institution.to_string(),
        email: email.to_string(),
        challenge: payload.challenge.clone(),
        locale: locale.to_string(),
        created_at: Utc::now().timestamp() as i32,
    };

    match state.signup_repository.add_pilot_application(&application) {
        Ok(()) => {}
        Err(e) if e.is_unique_violation() => return Err(duplicate()),
        Err(e) => {
            tracing::error!("pilot insert failed: {}", e);
            return Err(server_error());
        }
    }

    let emails = state.notifier.send_pilot_emails(PilotEmail {
        name: application.name,
        email: application.email,
        role: application.role,
        institution: application.institution,
        locale: application.locale,
    });
    if let Err(e) = emails.await {
        tracing::error!("pilot email send failed: {}", e);
    }

    Ok(Json(json!({"ok": true})))
}
