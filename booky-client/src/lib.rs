//! Booky Client - HTTP client for the Booky exchange API
//!
//! Typed access to book exchanges: REST service, per-user exchange store,
//! creation wizard and role-gated actions. Authentication is an explicit
//! [`Session`] attached to a [`NetworkHttpClient`]; there is no global token.
//!
//! ```no_run
//! use booky_client::{ClientConfig, ExchangeService, ExchangeStore, NetworkHttpClient, Session};
//!
//! # async fn example(session: Session) -> Result<(), booky_client::ClientError> {
//! let http = session.authorize(NetworkHttpClient::new(&ClientConfig::from_env())?);
//! let mut store = ExchangeStore::new(ExchangeService::new(http), session.user_id());
//! store.load_exchanges().await?;
//! println!("{} offers received", store.received_offers().len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod exchange;
pub mod http;
pub mod library;
pub mod session;

pub use auth::AuthService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use exchange::{
    ExchangeAction, ExchangeApi, ExchangeRole, ExchangeService, ExchangeStore, ExchangeWizard,
    WizardError, WizardStep, available_actions,
};
pub use http::{HttpClient, NetworkHttpClient};
pub use library::LibraryService;
pub use session::{Session, SessionStorage};

// Re-export shared types for convenience
pub use shared::models::{
    BookOwner, BookPreview, BookStatus, CounterOfferRequest, CreateExchangeRequest, Exchange,
    ExchangeStatus, UserBook, UserPreview,
};
