//! Exchange service
//!
//! Maps exchange lifecycle intents onto REST calls. No caching, no retries:
//! a failed call is reported to the caller as-is. Transition legality is the
//! server's business and is never checked here.

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    ActingUserQuery, CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeListQuery,
    ExchangeStatus, UpdateExchangeStatusRequest, parse_exchange_list,
};

use crate::ClientResult;
use crate::http::{HttpClient, api_path};

/// Exchange lifecycle operations
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// POST /exchanges
    async fn create_exchange(&self, request: &CreateExchangeRequest) -> ClientResult<Exchange>;

    /// GET /exchanges/users/{userId}?status=
    ///
    /// Malformed entries are dropped from the result.
    async fn get_user_exchanges(
        &self,
        user_id: &str,
        status: Option<ExchangeStatus>,
    ) -> ClientResult<Vec<Exchange>>;

    /// PUT /exchanges/{id}/status?userId=
    async fn update_exchange_status(
        &self,
        exchange_id: &str,
        acting_user_id: &str,
        status: ExchangeStatus,
    ) -> ClientResult<Exchange>;

    /// PUT /exchanges/{id}/counter-offer?userId=
    async fn create_counter_offer(
        &self,
        exchange_id: &str,
        acting_user_id: &str,
        request: &CounterOfferRequest,
    ) -> ClientResult<Exchange>;
}

/// [`ExchangeApi`] over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ExchangeService<H> {
    http: H,
}

impl<H: HttpClient> ExchangeService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }
}

#[async_trait]
impl<H: HttpClient> ExchangeApi for ExchangeService<H> {
    async fn create_exchange(&self, request: &CreateExchangeRequest) -> ClientResult<Exchange> {
        request.validate()?;
        let exchange: Exchange = self.http.post("/exchanges", request).await?;
        tracing::debug!(exchange_id = %exchange.id, status = %exchange.status, "Exchange created");
        Ok(exchange)
    }

    async fn get_user_exchanges(
        &self,
        user_id: &str,
        status: Option<ExchangeStatus>,
    ) -> ClientResult<Vec<Exchange>> {
        let path = api_path(&["exchanges", "users", user_id]);
        let query = ExchangeListQuery { status };
        let values: Vec<Value> = self.http.get_with_query(&path, &query).await?;
        Ok(parse_exchange_list(values))
    }

    async fn update_exchange_status(
        &self,
        exchange_id: &str,
        acting_user_id: &str,
        status: ExchangeStatus,
    ) -> ClientResult<Exchange> {
        let path = api_path(&["exchanges", exchange_id, "status"]);
        let query = ActingUserQuery {
            user_id: acting_user_id.to_string(),
        };
        let body = UpdateExchangeStatusRequest { status };
        self.http.put_with_query(&path, &query, &body).await
    }

    async fn create_counter_offer(
        &self,
        exchange_id: &str,
        acting_user_id: &str,
        request: &CounterOfferRequest,
    ) -> ClientResult<Exchange> {
        request.validate()?;
        let path = api_path(&["exchanges", exchange_id, "counter-offer"]);
        let query = ActingUserQuery {
            user_id: acting_user_id.to_string(),
        };
        self.http.put_with_query(&path, &query, request).await
    }
}
