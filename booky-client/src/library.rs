//! Library and book search API
//!
//! Backs the search steps of the exchange wizard and the per-book
//! "wants to exchange" flag.

use shared::models::{
    BookOwner, BookPreview, BookSearchQuery, OwnersQuery, UpdateUserBookRequest, UserBook,
};

use crate::ClientResult;
use crate::http::{HttpClient, api_path};

#[derive(Debug, Clone)]
pub struct LibraryService<H> {
    http: H,
}

impl<H: HttpClient> LibraryService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// GET /user-books/users/{userId}
    pub async fn get_user_books(&self, user_id: &str) -> ClientResult<Vec<UserBook>> {
        self.http
            .get(&api_path(&["user-books", "users", user_id]))
            .await
    }

    /// PUT /user-books/{id}
    pub async fn set_wants_to_exchange(
        &self,
        user_book_id: &str,
        wants_to_exchange: bool,
    ) -> ClientResult<UserBook> {
        let body = UpdateUserBookRequest { wants_to_exchange };
        self.http
            .put(&api_path(&["user-books", user_book_id]), &body)
            .await
    }

    /// GET /books/search?query=
    ///
    /// Called on every keystroke by the wizard; blank queries short-circuit.
    pub async fn search_books(&self, query: &str) -> ClientResult<Vec<BookPreview>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let params = BookSearchQuery {
            query: query.to_string(),
        };
        self.http.get_with_query("/books/search", &params).await
    }

    /// GET /user-books/owners?bookIds=&excludeUserId=
    pub async fn find_owners(
        &self,
        book_ids: &[String],
        exclude_user_id: Option<&str>,
    ) -> ClientResult<Vec<BookOwner>> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = OwnersQuery::new(book_ids, exclude_user_id);
        self.http.get_with_query("/user-books/owners", &params).await
    }
}

/// Library entries the user has flagged for exchange
pub fn offerable(books: &[UserBook]) -> Vec<&UserBook> {
    books.iter().filter(|b| b.wants_to_exchange).collect()
}
