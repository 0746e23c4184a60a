//! Library Model (书架)

use serde::{Deserialize, Serialize};

use super::user::UserPreview;

/// Reading status of a library entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    Wishlist,
    Reading,
    ToRead,
    Read,
}

/// Catalog book preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPreview {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

/// A book in a user's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBook {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub status: BookStatus,
    #[serde(default)]
    pub wants_to_exchange: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<BookPreview>,
}

/// Update library entry payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserBookRequest {
    pub wants_to_exchange: bool,
}

/// A user owning some of the requested books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOwner {
    pub user: UserPreview,
    /// Matching entries of this user's library
    #[serde(default)]
    pub books: Vec<UserBook>,
}

/// `GET /books/search?query=`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSearchQuery {
    pub query: String,
}

/// `GET /user-books/owners?bookIds=a,b&excludeUserId=`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnersQuery {
    /// Comma separated book ids
    pub book_ids: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_user_id: Option<String>,
}

impl OwnersQuery {
    pub fn new(book_ids: &[String], exclude_user_id: Option<&str>) -> Self {
        Self {
            book_ids: book_ids.join(","),
            exclude_user_id: exclude_user_id.map(str::to_string),
        }
    }

    /// Split the comma separated id list, ignoring blanks
    pub fn ids(&self) -> Vec<&str> {
        self.book_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_status_wire_format() {
        assert_eq!(serde_json::to_string(&BookStatus::ToRead).unwrap(), "\"TO_READ\"");
        let status: BookStatus = serde_json::from_str("\"WISHLIST\"").unwrap();
        assert_eq!(status, BookStatus::Wishlist);
    }

    #[test]
    fn test_user_book_defaults() {
        let entry: UserBook = serde_json::from_value(json!({
            "id": "ub-1", "user_id": "u1", "book_id": "b1", "status": "READ"
        }))
        .unwrap();
        assert!(!entry.wants_to_exchange);
        assert!(entry.book.is_none());
    }

    #[test]
    fn test_owners_query() {
        let query = OwnersQuery::new(&["b1".to_string(), "b2".to_string()], Some("me"));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"bookIds": "b1,b2", "excludeUserId": "me"})
        );

        let parsed = OwnersQuery {
            book_ids: "b1, ,b3,".into(),
            exclude_user_id: None,
        };
        assert_eq!(parsed.ids(), vec!["b1", "b3"]);
    }
}
