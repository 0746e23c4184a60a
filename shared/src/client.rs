//! Client-related types shared between server and client
//!
//! Auth DTOs used by the exchange client and the mock backend.

use serde::{Deserialize, Serialize};

use crate::models::UserPreview;

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign-in response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserPreview,
}
