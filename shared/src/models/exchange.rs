//! Exchange Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::user::UserPreview;
use crate::error::{AppError, ErrorCode};

/// Exchange status (交换状态)
///
/// The backend owns the lifecycle. `can_transition_to` is the backend's
/// transition table; clients never consult it before sending a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Rejected,
    Countered,
    Cancelled,
    Completed,
}

impl ExchangeStatus {
    pub const ALL: [ExchangeStatus; 6] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Countered,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Countered => "COUNTERED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// No further status change is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    /// Book sets may still be renegotiated
    pub fn is_negotiable(&self) -> bool {
        matches!(self, Self::Pending | Self::Countered)
    }

    /// Whether the backend accepts a change from `self` to `next`
    pub fn can_transition_to(&self, next: ExchangeStatus) -> bool {
        use ExchangeStatus::*;
        match self {
            Pending | Countered => matches!(next, Accepted | Rejected | Countered | Cancelled),
            Accepted => next == Completed,
            Rejected | Cancelled | Completed => false,
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exchange entity (图书交换)
///
/// `owner_book_ids` are the books the owner hands over, `requester_book_ids`
/// the books the requester offers in return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: String,
    pub requester_id: String,
    pub owner_id: String,
    pub status: ExchangeStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_book_ids: Vec<String>,
    #[serde(default)]
    pub requester_book_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<UserPreview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserPreview>,
}

impl Exchange {
    /// Identifiers needed for display and partitioning are all present
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.requester_id.is_empty() && !self.owner_id.is_empty()
    }

    /// Whether the user takes part in this exchange
    pub fn involves(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.requester_id == user_id
    }

    /// The other participant from `user_id`'s point of view
    pub fn counterpart_id(&self, user_id: &str) -> Option<&str> {
        if self.owner_id == user_id {
            Some(&self.requester_id)
        } else if self.requester_id == user_id {
            Some(&self.owner_id)
        } else {
            None
        }
    }
}

/// Parse an exchange list response, dropping malformed entries.
///
/// An entry is kept when it deserializes and carries non-empty identifiers.
pub fn parse_exchange_list(values: Vec<Value>) -> Vec<Exchange> {
    let total = values.len();
    let exchanges: Vec<Exchange> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Exchange>(value) {
            Ok(exchange) if exchange.is_well_formed() => Some(exchange),
            Ok(exchange) => {
                tracing::warn!(index, id = %exchange.id, "Dropping exchange with empty identifiers");
                None
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed exchange entry");
                None
            }
        })
        .collect();

    if exchanges.len() != total {
        tracing::debug!(total, kept = exchanges.len(), "Filtered exchange list");
    }
    exchanges
}

/// Create exchange payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExchangeRequest {
    pub owner_id: String,
    pub requester_id: String,
    pub owner_book_ids: Vec<String>,
    pub requester_book_ids: Vec<String>,
}

impl CreateExchangeRequest {
    /// Check creation invariants: distinct participants, both sides non-empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.owner_id.is_empty() || self.requester_id.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "owner_id and requester_id are required",
            ));
        }
        if self.owner_id == self.requester_id {
            return Err(AppError::new(ErrorCode::ExchangeSameUser)
                .with_detail("user_id", self.owner_id.clone()));
        }
        validate_book_sets(&self.owner_book_ids, &self.requester_book_ids)
    }
}

/// Status update payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateExchangeStatusRequest {
    pub status: ExchangeStatus,
}

/// Counter-offer payload: replaces both book sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterOfferRequest {
    pub owner_book_ids: Vec<String>,
    pub requester_book_ids: Vec<String>,
}

impl CounterOfferRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_book_sets(&self.owner_book_ids, &self.requester_book_ids)
    }
}

fn validate_book_sets(owner_book_ids: &[String], requester_book_ids: &[String]) -> Result<(), AppError> {
    if owner_book_ids.is_empty() {
        return Err(AppError::new(ErrorCode::ExchangeEmptyBooks).with_detail("field", "owner_book_ids"));
    }
    if requester_book_ids.is_empty() {
        return Err(
            AppError::new(ErrorCode::ExchangeEmptyBooks).with_detail("field", "requester_book_ids"),
        );
    }
    Ok(())
}

/// `?status=` filter on the user exchange list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExchangeStatus>,
}

/// `?userId=` acting user on mutating calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActingUserQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}
