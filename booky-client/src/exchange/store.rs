//! Client-side projection of a user's exchanges
//!
//! Every mutation is a pass-through to the [`ExchangeApi`] followed by a full
//! refetch. Nothing is patched locally and nothing is applied optimistically,
//! so a failure leaves the previously loaded list exactly as it was.

use shared::models::{CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeStatus};

use super::actions::{ExchangeRole, role_of};
use super::service::ExchangeApi;
use crate::ClientResult;

/// Exchange list state for the signed-in user
pub struct ExchangeStore<A> {
    api: A,
    user_id: String,
    exchanges: Vec<Exchange>,
    loading: bool,
    error: Option<String>,
}

impl<A: ExchangeApi> ExchangeStore<A> {
    pub fn new(api: A, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            exchanges: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// All loaded exchanges, every status
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn get(&self, exchange_id: &str) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.id == exchange_id)
    }

    /// Offers made to the current user (current user is the owner)
    pub fn received_offers(&self) -> Vec<&Exchange> {
        self.by_role(ExchangeRole::Owner)
    }

    /// Offers made by the current user (current user is the requester)
    pub fn active_orders(&self) -> Vec<&Exchange> {
        self.by_role(ExchangeRole::Requester)
    }

    fn by_role(&self, role: ExchangeRole) -> Vec<&Exchange> {
        self.exchanges
            .iter()
            .filter(|e| role_of(e, &self.user_id) == Some(role))
            .collect()
    }

    /// Full refetch of the user's exchanges
    pub async fn load_exchanges(&mut self) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.get_user_exchanges(&self.user_id, None).await;
        self.loading = false;

        match result {
            Ok(exchanges) => {
                tracing::debug!(user_id = %self.user_id, count = exchanges.len(), "Exchanges loaded");
                self.exchanges = exchanges;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = %e, "Failed to load exchanges");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Create an exchange, then refetch
    pub async fn create_exchange(&mut self, request: &CreateExchangeRequest) -> ClientResult<Exchange> {
        let result = self.api.create_exchange(request).await;
        self.after_mutation("create_exchange", result).await
    }

    /// Change an exchange's status as the current user, then refetch
    pub async fn update_exchange_status(
        &mut self,
        exchange_id: &str,
        status: ExchangeStatus,
    ) -> ClientResult<Exchange> {
        let result = self
            .api
            .update_exchange_status(exchange_id, &self.user_id, status)
            .await;
        self.after_mutation("update_exchange_status", result).await
    }

    /// Propose new book sets as the current user, then refetch
    pub async fn create_counter_offer(
        &mut self,
        exchange_id: &str,
        owner_book_ids: Vec<String>,
        requester_book_ids: Vec<String>,
    ) -> ClientResult<Exchange> {
        let request = CounterOfferRequest {
            owner_book_ids,
            requester_book_ids,
        };
        let result = self
            .api
            .create_counter_offer(exchange_id, &self.user_id, &request)
            .await;
        self.after_mutation("create_counter_offer", result).await
    }

    async fn after_mutation(
        &mut self,
        operation: &'static str,
        result: ClientResult<Exchange>,
    ) -> ClientResult<Exchange> {
        match result {
            Ok(exchange) => {
                tracing::info!(operation, exchange_id = %exchange.id, status = %exchange.status, "Exchange updated");
                self.error = None;
                // The mutation itself succeeded; a failed refetch only leaves
                // the list stale and is reported through `error`.
                let _ = self.load_exchanges().await;
                Ok(exchange)
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "Exchange operation failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
