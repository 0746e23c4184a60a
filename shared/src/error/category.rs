//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Exchange errors
/// - 4xxx: Library errors
/// - 5xxx: User errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx and unassigned ranges)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Exchange errors (3xxx)
    Exchange,
    /// Library errors (4xxx)
    Library,
    /// User errors (5xxx)
    User,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Exchange,
            4000..5000 => Self::Library,
            5000..6000 => Self::User,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Exchange => "exchange",
            Self::Library => "library",
            Self::User => "user",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Exchange);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Library);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::General);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::RequiredField.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenInvalid.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::ExchangeInvalidTransition.category(),
            ErrorCategory::Exchange
        );
        assert_eq!(ErrorCode::UserBookNotFound.category(), ErrorCategory::Library);
        assert_eq!(ErrorCode::UserNotFound.category().name(), "user");
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Exchange).unwrap();
        assert_eq!(json, "\"exchange\"");

        let category: ErrorCategory = serde_json::from_str("\"library\"").unwrap();
        assert_eq!(category, ErrorCategory::Library);
    }
}
