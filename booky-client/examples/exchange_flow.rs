//! Walk through an exchange against a running backend
//!
//! ```text
//! cargo run -p booky-mock &
//! BOOKY_API_URL=http://localhost:3000 cargo run -p booky-client --example exchange_flow
//! ```

use booky_client::{
    AuthService, ClientConfig, ExchangeService, ExchangeStatus, ExchangeStore, ExchangeWizard,
    LibraryService, NetworkHttpClient, SessionStorage, available_actions,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env();
    let storage_dir = std::env::temp_dir().join("booky-example");
    let http = NetworkHttpClient::new(&config)?;

    // Requester side
    let auth = AuthService::new(http.clone(), SessionStorage::new(storage_dir.join("alice")));
    let alice = auth.sign_in("alice@booky.test", "password").await?;
    let alice_http = alice.authorize(http.clone());
    let library = LibraryService::new(alice_http.clone());

    let mut wizard = ExchangeWizard::new(alice.user_id());
    wizard.open(None, None);
    for book in library.search_books("ubik").await? {
        wizard.toggle_desired_book(book);
    }
    wizard.next()?;

    let owners = library
        .find_owners(&wizard.desired_book_ids(), Some(alice.user_id()))
        .await?;
    let Some(owner) = owners.first() else {
        println!("Nobody owns the requested books");
        return Ok(());
    };
    wizard.select_owner(owner.user.clone())?;
    wizard.next()?;

    let mine = library.get_user_books(alice.user_id()).await?;
    for entry in booky_client::library::offerable(&mine) {
        wizard.toggle_offered_book(entry.clone())?;
    }
    wizard.next()?;

    let mut alice_store = ExchangeStore::new(ExchangeService::new(alice_http), alice.user_id());
    let created = alice_store.create_exchange(&wizard.build_request()?).await?;
    wizard.close();
    println!("Created exchange {} ({})", created.id, created.status);

    // Owner side
    let owner_auth = AuthService::new(http.clone(), SessionStorage::new(storage_dir.join("bob")));
    let bob = owner_auth.sign_in("bob@booky.test", "password").await?;
    let mut bob_store = ExchangeStore::new(
        ExchangeService::new(bob.authorize(http.clone())),
        bob.user_id(),
    );
    bob_store.load_exchanges().await?;
    for offer in bob_store.received_offers() {
        let actions: Vec<&str> = available_actions(offer, bob.user_id())
            .iter()
            .map(|a| a.label())
            .collect();
        println!("Offer {} from {}: {:?}", offer.id, offer.requester_id, actions);
    }

    bob_store
        .update_exchange_status(&created.id, ExchangeStatus::Accepted)
        .await?;
    bob_store
        .update_exchange_status(&created.id, ExchangeStatus::Completed)
        .await?;

    alice_store.load_exchanges().await?;
    for order in alice_store.active_orders() {
        println!("Order {} is {}", order.id, order.status);
    }
    Ok(())
}
