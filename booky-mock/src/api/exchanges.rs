//! Exchange API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use shared::models::{
    ActingUserQuery, CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeListQuery,
    ExchangeStatus, UpdateExchangeStatusRequest,
};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

use super::CurrentUser;
use crate::state::AppState;

/// POST /exchanges
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateExchangeRequest>,
) -> AppResult<Json<Exchange>> {
    payload.validate()?;
    user.ensure_is(&payload.requester_id)?;

    let mut store = state.store.write().await;
    if !store.users.contains_key(&payload.owner_id) {
        return Err(AppError::new(ErrorCode::UserNotFound).with_detail("user_id", payload.owner_id));
    }
    let exchange = store.insert_exchange(payload);
    tracing::info!(
        exchange_id = %exchange.id,
        requester = %exchange.requester_id,
        owner = %exchange.owner_id,
        "Exchange created"
    );
    Ok(Json(exchange))
}

/// GET /exchanges/users/{user_id}?status=
///
/// Newest first. Both roles are returned; the client partitions them.
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Query(query): Query<ExchangeListQuery>,
) -> AppResult<Json<Vec<Exchange>>> {
    user.ensure_is(&user_id)?;

    let store = state.store.read().await;
    let exchanges = store
        .exchanges
        .iter()
        .rev()
        .filter(|e| e.involves(&user_id))
        .filter(|e| query.status.is_none_or(|s| e.status == s))
        .cloned()
        .collect();
    Ok(Json(exchanges))
}

/// PUT /exchanges/{id}/status?userId=
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(acting): Query<ActingUserQuery>,
    Json(payload): Json<UpdateExchangeStatusRequest>,
) -> AppResult<Json<Exchange>> {
    user.ensure_is(&acting.user_id)?;

    let mut store = state.store.write().await;
    let exchange = participant_exchange(store.exchange_mut(&id), &id, &acting.user_id)?;
    check_transition(exchange, payload.status)?;

    let from = exchange.status;
    exchange.status = payload.status;
    exchange.updated_at = Some(Utc::now());
    tracing::info!(exchange_id = %id, %from, to = %payload.status, by = %acting.user_id, "Exchange status changed");
    Ok(Json(exchange.clone()))
}

/// PUT /exchanges/{id}/counter-offer?userId=
///
/// Replaces both book sets and moves the exchange to COUNTERED.
pub async fn counter_offer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(acting): Query<ActingUserQuery>,
    Json(payload): Json<CounterOfferRequest>,
) -> AppResult<Json<Exchange>> {
    payload.validate()?;
    user.ensure_is(&acting.user_id)?;

    let mut store = state.store.write().await;
    let exchange = participant_exchange(store.exchange_mut(&id), &id, &acting.user_id)?;
    check_transition(exchange, ExchangeStatus::Countered)?;

    exchange.owner_book_ids = payload.owner_book_ids;
    exchange.requester_book_ids = payload.requester_book_ids;
    exchange.status = ExchangeStatus::Countered;
    exchange.updated_at = Some(Utc::now());
    tracing::info!(exchange_id = %id, by = %acting.user_id, "Counter-offer recorded");
    Ok(Json(exchange.clone()))
}

fn participant_exchange<'a>(
    exchange: Option<&'a mut Exchange>,
    id: &str,
    user_id: &str,
) -> AppResult<&'a mut Exchange> {
    let exchange = exchange.ok_or_else(|| AppError::exchange_not_found(id))?;
    if !exchange.involves(user_id) {
        return Err(AppError::new(ErrorCode::NotExchangeParticipant)
            .with_detail("exchange_id", id)
            .with_detail("user_id", user_id));
    }
    Ok(exchange)
}

fn check_transition(exchange: &Exchange, next: ExchangeStatus) -> AppResult<()> {
    if exchange.status.is_terminal() {
        return Err(AppError::new(ErrorCode::ExchangeClosed)
            .with_detail("exchange_id", exchange.id.clone())
            .with_detail("status", exchange.status.as_str()));
    }
    if !exchange.status.can_transition_to(next) {
        return Err(AppError::invalid_transition(exchange.status.as_str(), next.as_str()));
    }
    Ok(())
}
