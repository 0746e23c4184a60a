//! Domain models
//!
//! Wire-level types for the Booky REST API.

pub mod exchange;
pub mod library;
pub mod user;

pub use exchange::{
    ActingUserQuery, CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeListQuery,
    ExchangeStatus, UpdateExchangeStatusRequest, parse_exchange_list,
};
pub use library::{
    BookOwner, BookPreview, BookSearchQuery, BookStatus, OwnersQuery, UpdateUserBookRequest,
    UserBook,
};
pub use user::UserPreview;
