//! Library and catalog API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::models::{
    BookOwner, BookPreview, BookSearchQuery, OwnersQuery, UpdateUserBookRequest, UserBook,
};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

use super::CurrentUser;
use crate::state::AppState;

const SEARCH_LIMIT: usize = 20;

/// GET /user-books/users/{user_id}
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<UserBook>>> {
    let store = state.store.read().await;
    if !store.users.contains_key(&user_id) {
        return Err(AppError::new(ErrorCode::UserNotFound).with_detail("user_id", user_id));
    }
    let books = store
        .user_books
        .iter()
        .filter(|b| b.user_id == user_id)
        .cloned()
        .collect();
    Ok(Json(books))
}

/// PUT /user-books/{id} - owner only
pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserBookRequest>,
) -> AppResult<Json<UserBook>> {
    let mut store = state.store.write().await;
    let entry = store
        .user_books
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::UserBookNotFound).with_detail("id", id.clone()))?;
    user.ensure_is(&entry.user_id)?;

    entry.wants_to_exchange = payload.wants_to_exchange;
    tracing::debug!(user_book_id = %id, wants_to_exchange = payload.wants_to_exchange, "Library entry updated");
    Ok(Json(entry.clone()))
}

/// GET /books/search?query=
///
/// Case-insensitive match on title or author, sorted by title.
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<Vec<BookPreview>>> {
    let needle = query.query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let store = state.store.read().await;
    let mut books: Vec<BookPreview> = store
        .books
        .values()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle)
                || b.author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    books.sort_by(|a, b| a.title.cmp(&b.title));
    books.truncate(SEARCH_LIMIT);
    Ok(Json(books))
}

/// GET /user-books/owners?bookIds=a,b&excludeUserId=
///
/// One entry per user holding at least one of the books, sorted by name.
pub async fn owners(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OwnersQuery>,
) -> AppResult<Json<Vec<BookOwner>>> {
    let ids = query.ids();
    if ids.is_empty() {
        return Err(AppError::validation("bookIds must name at least one book")
            .with_detail("field", "bookIds"));
    }
    let store = state.store.read().await;

    let mut owners: Vec<BookOwner> = Vec::new();
    for entry in &store.user_books {
        if !ids.contains(&entry.book_id.as_str()) {
            continue;
        }
        if query.exclude_user_id.as_deref() == Some(entry.user_id.as_str()) {
            continue;
        }
        match owners.iter_mut().find(|o| o.user.id == entry.user_id) {
            Some(owner) => owner.books.push(entry.clone()),
            None => {
                let Some(user) = store.users.get(&entry.user_id) else {
                    continue;
                };
                owners.push(BookOwner {
                    user: user.profile.clone(),
                    books: vec![entry.clone()],
                });
            }
        }
    }
    owners.sort_by(|a, b| a.user.name.cmp(&b.user.name));
    Ok(Json(owners))
}
