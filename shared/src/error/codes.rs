//! Unified error codes for Booky
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Exchange errors
//! - 4xxx: Library errors
//! - 5xxx: User errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Acting user is not a participant of the exchange
    NotExchangeParticipant = 2002,

    // ==================== 3xxx: Exchange ====================
    /// Exchange not found
    ExchangeNotFound = 3001,
    /// Requested status change is not allowed from the current status
    ExchangeInvalidTransition = 3002,
    /// Requester and owner are the same user
    ExchangeSameUser = 3003,
    /// One of the book sets is empty
    ExchangeEmptyBooks = 3004,
    /// Exchange is in a terminal status
    ExchangeClosed = 3005,

    // ==================== 4xxx: Library ====================
    /// Library entry not found
    UserBookNotFound = 4002,

    // ==================== 5xxx: User ====================
    /// User not found
    UserNotFound = 5001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::NotExchangeParticipant => "User is not a participant of this exchange",

            // Exchange
            ErrorCode::ExchangeNotFound => "Exchange not found",
            ErrorCode::ExchangeInvalidTransition => "Status change is not allowed",
            ErrorCode::ExchangeSameUser => "Cannot exchange books with yourself",
            ErrorCode::ExchangeEmptyBooks => "Both sides must offer at least one book",
            ErrorCode::ExchangeClosed => "Exchange is already closed",

            // Library
            ErrorCode::UserBookNotFound => "Library entry not found",

            // User
            ErrorCode::UserNotFound => "User not found",        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::NotExchangeParticipant),

            // Exchange
            3001 => Ok(ErrorCode::ExchangeNotFound),
            3002 => Ok(ErrorCode::ExchangeInvalidTransition),
            3003 => Ok(ErrorCode::ExchangeSameUser),
            3004 => Ok(ErrorCode::ExchangeEmptyBooks),
            3005 => Ok(ErrorCode::ExchangeClosed),

            // Library
            4002 => Ok(ErrorCode::UserBookNotFound),

            // User
            5001 => Ok(ErrorCode::UserNotFound),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
