//! Mock REST API
//!
//! Mirrors the endpoints the exchange client consumes. Every route except
//! `/auth/login` requires `Authorization: Bearer <token>`.

mod auth;
mod exchanges;
mod library;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use shared::AppError;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Authenticated caller, inserted by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl CurrentUser {
    /// The acting user named in `?userId=` must be the caller
    pub fn ensure_is(&self, user_id: &str) -> Result<(), AppError> {
        if self.id != user_id {
            return Err(AppError::permission_denied(format!(
                "Token does not belong to user {}",
                user_id
            )));
        }
        Ok(())
    }
}

/// Bearer token check
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = token else {
        tracing::warn!(uri = %req.uri(), "Missing bearer token");
        return Err(AppError::not_authenticated());
    };

    let user_id = {
        let store = state.store.read().await;
        store.user_for_token(&token).map(str::to_string)
    };

    match user_id {
        Some(id) => {
            req.extensions_mut().insert(CurrentUser { id });
            Ok(next.run(req).await)
        }
        None => Err(AppError::new(shared::ErrorCode::TokenInvalid)),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    let protected = Router::new()
        .route("/exchanges", post(exchanges::create))
        .route("/exchanges/users/{user_id}", get(exchanges::list_for_user))
        .route("/exchanges/{id}/status", put(exchanges::update_status))
        .route("/exchanges/{id}/counter-offer", put(exchanges::counter_offer))
        .route("/user-books/users/{user_id}", get(library::list_for_user))
        .route("/user-books/owners", get(library::owners))
        .route("/user-books/{id}", put(library::update))
        .route("/books/search", get(library::search_books))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .fallback(|| async { AppError::not_found("Route") })
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}
