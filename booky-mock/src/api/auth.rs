//! Auth API Handlers

use axum::{Json, extract::State};
use shared::client::{SignInRequest, SignInResponse};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "email and password are required",
        ));
    }

    let mut store = state.store.write().await;
    let user = match store.find_user_by_email(req.email.trim()) {
        Some(u) if u.password == req.password => u.profile.clone(),
        _ => {
            tracing::warn!(email = %req.email, "Login failed");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = store.issue_token(&user.id);
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(SignInResponse { token, user }))
}
