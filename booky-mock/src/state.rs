//! In-memory backend state

use chrono::Utc;
use shared::models::{
    BookPreview, BookStatus, CreateExchangeRequest, Exchange, ExchangeStatus, UserBook,
    UserPreview,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Registered account
#[derive(Debug, Clone)]
pub struct MockUser {
    pub profile: UserPreview,
    pub email: String,
    pub password: String,
}

/// Everything the mock backend knows
#[derive(Debug, Default)]
pub struct MockStore {
    pub users: HashMap<String, MockUser>,
    pub books: HashMap<String, BookPreview>,
    /// Library entries in insertion order
    pub user_books: Vec<UserBook>,
    /// Exchanges in creation order
    pub exchanges: Vec<Exchange>,
    /// Issued bearer tokens -> user id
    pub tokens: HashMap<String, String>,
}

impl MockStore {
    pub fn add_user(&mut self, id: &str, name: &str, email: &str, password: &str) {
        self.users.insert(
            id.to_string(),
            MockUser {
                profile: UserPreview {
                    id: id.to_string(),
                    name: name.to_string(),
                    avatar_url: None,
                },
                email: email.to_string(),
                password: password.to_string(),
            },
        );
    }

    pub fn add_book(&mut self, id: &str, title: &str, author: &str) {
        self.books.insert(
            id.to_string(),
            BookPreview {
                id: id.to_string(),
                title: title.to_string(),
                author: Some(author.to_string()),
                cover_url: None,
                isbn: None,
            },
        );
    }

    pub fn add_user_book(&mut self, user_id: &str, book_id: &str, wants_to_exchange: bool) -> String {
        let id = format!("ub-{}", self.user_books.len() + 1);
        self.user_books.push(UserBook {
            id: id.clone(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            status: BookStatus::Read,
            wants_to_exchange,
            book: self.books.get(book_id).cloned(),
        });
        id
    }

    /// Register a bearer token for a user
    pub fn issue_token(&mut self, user_id: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    pub fn user_for_token(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&MockUser> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn exchange_mut(&mut self, id: &str) -> Option<&mut Exchange> {
        self.exchanges.iter_mut().find(|e| e.id == id)
    }

    /// Insert a new PENDING exchange; the request must already be validated
    pub fn insert_exchange(&mut self, request: CreateExchangeRequest) -> Exchange {
        let now = Utc::now();
        let exchange = Exchange {
            id: uuid::Uuid::new_v4().to_string(),
            requester: self.users.get(&request.requester_id).map(|u| u.profile.clone()),
            owner: self.users.get(&request.owner_id).map(|u| u.profile.clone()),
            requester_id: request.requester_id,
            owner_id: request.owner_id,
            status: ExchangeStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
            owner_book_ids: request.owner_book_ids,
            requester_book_ids: request.requester_book_ids,
        };
        self.exchanges.push(exchange.clone());
        exchange
    }

    /// Demo data: three readers with small libraries
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.add_user("alice", "Alice", "alice@booky.test", "password");
        store.add_user("bob", "Bob", "bob@booky.test", "password");
        store.add_user("carol", "Carol", "carol@booky.test", "password");

        store.add_book("dune", "Dune", "Frank Herbert");
        store.add_book("emma", "Emma", "Jane Austen");
        store.add_book("ubik", "Ubik", "Philip K. Dick");
        store.add_book("kindred", "Kindred", "Octavia E. Butler");

        store.add_user_book("alice", "dune", true);
        store.add_user_book("alice", "emma", false);
        store.add_user_book("bob", "ubik", true);
        store.add_user_book("bob", "dune", true);
        store.add_user_book("carol", "kindred", true);
        store
    }
}

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    pub store: RwLock<MockStore>,
}

impl AppState {
    pub fn new(store: MockStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn seeded() -> Self {
        Self::new(MockStore::seeded())
    }
}
