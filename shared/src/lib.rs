//! Shared types for Booky
//!
//! Wire models, error codes and response envelopes used by both the
//! exchange client and the mock backend.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Exchange, ExchangeStatus};
