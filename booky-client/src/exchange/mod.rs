//! Book exchange lifecycle
//!
//! - [`service`]: REST calls for creating and progressing exchanges
//! - [`store`]: the signed-in user's exchange list, refetched after every change
//! - [`wizard`]: the four-step creation flow
//! - [`actions`]: which actions a participant is offered per status

pub mod actions;
pub mod service;
pub mod store;
pub mod wizard;

pub use actions::{ExchangeAction, ExchangeRole, available_actions, role_of};
pub use service::{ExchangeApi, ExchangeService};
pub use store::ExchangeStore;
pub use wizard::{ExchangeWizard, WizardError, WizardStep};
