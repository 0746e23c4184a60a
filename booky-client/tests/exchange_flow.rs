// booky-client/tests/exchange_flow.rs
// End-to-end tests against an in-process booky-mock

use booky_client::{
    AuthService, ClientConfig, ClientError, CreateExchangeRequest, ExchangeAction, ExchangeApi,
    ExchangeService, ExchangeStatus, ExchangeStore, ExchangeWizard, LibraryService,
    NetworkHttpClient, Session, SessionStorage, WizardStep, available_actions,
};
use booky_mock::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

type Store = ExchangeStore<ExchangeService<NetworkHttpClient>>;

struct Harness {
    addr: SocketAddr,
    server: tokio::task::JoinHandle<anyhow::Result<()>>,
    dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        let (addr, server) = booky_mock::serve_ephemeral(Arc::new(AppState::seeded()))
            .await
            .unwrap();
        Self {
            addr,
            server,
            dir: TempDir::new().unwrap(),
        }
    }

    fn http(&self) -> NetworkHttpClient {
        NetworkHttpClient::new(&ClientConfig::new(format!("http://{}", self.addr))).unwrap()
    }

    fn auth(&self, name: &str) -> AuthService<NetworkHttpClient> {
        AuthService::new(self.http(), SessionStorage::new(self.dir.path().join(name)))
    }

    async fn sign_in(&self, name: &str) -> Session {
        self.auth(name)
            .sign_in(&format!("{name}@booky.test"), "password")
            .await
            .unwrap()
    }

    async fn store(&self, name: &str) -> Store {
        let session = self.sign_in(name).await;
        let http = session.authorize(self.http());
        ExchangeStore::new(ExchangeService::new(http), session.user_id())
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn ubik_for_dune() -> CreateExchangeRequest {
    CreateExchangeRequest {
        owner_id: "bob".into(),
        requester_id: "alice".into(),
        owner_book_ids: vec!["ubik".into()],
        requester_book_ids: vec!["dune".into()],
    }
}

#[tokio::test]
async fn test_sign_in_persists_session() {
    let harness = Harness::start().await;
    let auth = harness.auth("alice");

    let session = auth.sign_in("alice@booky.test", "password").await.unwrap();
    assert_eq!(session.user_id(), "alice");
    assert_eq!(auth.restore(), Some(session));

    auth.sign_out().unwrap();
    assert!(auth.restore().is_none());
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let harness = Harness::start().await;
    let auth = harness.auth("alice");

    let err = auth.sign_in("alice@booky.test", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(auth.restore().is_none());
}

#[tokio::test]
async fn test_unauthenticated_requests_rejected() {
    let harness = Harness::start().await;
    let service = ExchangeService::new(harness.http());

    let err = service.get_user_exchanges("alice", None).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_status_filter_on_user_exchanges() {
    let harness = Harness::start().await;
    let alice = harness.sign_in("alice").await;
    let alice_api = ExchangeService::new(alice.authorize(harness.http()));

    let created = alice_api.create_exchange(&ubik_for_dune()).await.unwrap();

    let pending = alice_api
        .get_user_exchanges("alice", Some(ExchangeStatus::Pending))
        .await
        .unwrap();
    let accepted = alice_api
        .get_user_exchanges("alice", Some(ExchangeStatus::Accepted))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, created.id);
    assert!(accepted.is_empty());

    let bob = harness.sign_in("bob").await;
    let bob_api = ExchangeService::new(bob.authorize(harness.http()));
    bob_api
        .update_exchange_status(&created.id, "bob", ExchangeStatus::Accepted)
        .await
        .unwrap();

    let pending = alice_api
        .get_user_exchanges("alice", Some(ExchangeStatus::Pending))
        .await
        .unwrap();
    let accepted = alice_api
        .get_user_exchanges("alice", Some(ExchangeStatus::Accepted))
        .await
        .unwrap();
    assert!(pending.is_empty());
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].status, ExchangeStatus::Accepted);
}

#[tokio::test]
async fn test_reserved_characters_in_ids_stay_in_one_segment() {
    let harness = Harness::start().await;
    let alice = harness.sign_in("alice").await;
    let api = ExchangeService::new(alice.authorize(harness.http()));

    // an unencoded "/" would hit an unknown route instead of the exchange lookup
    let err = api
        .update_exchange_status("ex/1?x#y", "alice", ExchangeStatus::Cancelled)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Api { code: Some(3001), .. }));
}

#[tokio::test]
async fn test_create_returns_pending_and_refetches() {
    let harness = Harness::start().await;
    let mut alice = harness.store("alice").await;

    alice.load_exchanges().await.unwrap();
    assert!(alice.exchanges().is_empty());

    let created = alice.create_exchange(&ubik_for_dune()).await.unwrap();
    assert_eq!(created.status, ExchangeStatus::Pending);
    assert_ne!(created.requester_id, created.owner_id);

    // the refetch already happened
    assert_eq!(alice.exchanges().len(), 1);
    assert_eq!(alice.active_orders().len(), 1);
    assert!(alice.received_offers().is_empty());
    assert!(alice.error().is_none());

    let mut bob = harness.store("bob").await;
    bob.load_exchanges().await.unwrap();
    assert_eq!(bob.received_offers().len(), 1);
    assert!(bob.active_orders().is_empty());
}

#[tokio::test]
async fn test_full_lifecycle() {
    let harness = Harness::start().await;
    let mut alice = harness.store("alice").await;
    let mut bob = harness.store("bob").await;

    let id = alice.create_exchange(&ubik_for_dune()).await.unwrap().id;
    bob.load_exchanges().await.unwrap();

    let offer = bob.get(&id).unwrap();
    assert!(available_actions(offer, "bob").contains(&ExchangeAction::CounterOffer));

    let countered = bob
        .create_counter_offer(&id, vec!["ubik".into(), "dune".into()], vec!["dune".into()])
        .await
        .unwrap();
    assert_eq!(countered.status, ExchangeStatus::Countered);
    assert_eq!(countered.owner_book_ids.len(), 2);

    alice.load_exchanges().await.unwrap();
    let actions = available_actions(alice.get(&id).unwrap(), "alice");
    assert!(actions.contains(&ExchangeAction::Accept));

    let accepted = alice
        .update_exchange_status(&id, ExchangeAction::Accept.target_status().unwrap())
        .await
        .unwrap();
    assert_eq!(accepted.status, ExchangeStatus::Accepted);
    assert_eq!(alice.get(&id).map(|e| e.status), Some(ExchangeStatus::Accepted));

    bob.update_exchange_status(&id, ExchangeStatus::Completed)
        .await
        .unwrap();
    assert_eq!(bob.get(&id).map(|e| e.status), Some(ExchangeStatus::Completed));
    assert!(available_actions(bob.get(&id).unwrap(), "bob").is_empty());
}

#[tokio::test]
async fn test_server_rejects_illegal_transition() {
    let harness = Harness::start().await;
    let mut alice = harness.store("alice").await;
    let mut bob = harness.store("bob").await;

    let id = alice.create_exchange(&ubik_for_dune()).await.unwrap().id;
    bob.load_exchanges().await.unwrap();

    // the client sends it anyway; the backend decides
    let err = bob
        .update_exchange_status(&id, ExchangeStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.body().and_then(|b| b["code"].as_u64()), Some(3002));
    assert!(bob.error().is_some());
    assert_eq!(bob.get(&id).map(|e| e.status), Some(ExchangeStatus::Pending));

    bob.update_exchange_status(&id, ExchangeStatus::Rejected)
        .await
        .unwrap();
    let err = bob
        .update_exchange_status(&id, ExchangeStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.body().and_then(|b| b["code"].as_u64()), Some(3005));
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let harness = Harness::start().await;
    let mut alice = harness.store("alice").await;
    alice.load_exchanges().await.unwrap();

    let mut request = ubik_for_dune();
    request.owner_id = "nobody".into();
    let err = alice.create_exchange(&request).await.unwrap_err();

    match &err {
        ClientError::Api { status, code, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(*code, Some(5001));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.body().is_some());
    assert!(alice.exchanges().is_empty());
    assert!(alice.error().is_some());
}

#[tokio::test]
async fn test_network_failure_leaves_store_unchanged() {
    let harness = Harness::start().await;
    let mut alice = harness.store("alice").await;
    alice.create_exchange(&ubik_for_dune()).await.unwrap();
    assert_eq!(alice.exchanges().len(), 1);

    // a port nothing listens on
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_addr = closed.local_addr().unwrap();
    drop(closed);

    let offline = NetworkHttpClient::new(&ClientConfig::new(format!("http://{closed_addr}")))
        .unwrap()
        .with_token("stale");
    let mut offline_store = ExchangeStore::new(ExchangeService::new(offline), "alice");

    let err = offline_store.create_exchange(&ubik_for_dune()).await.unwrap_err();
    assert!(err.is_network());
    assert!(offline_store.exchanges().is_empty());
    assert!(offline_store.error().is_some());

    let err = offline_store.load_exchanges().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_wizard_to_exchange() {
    let harness = Harness::start().await;
    let session = harness.sign_in("alice").await;
    let http = session.authorize(harness.http());
    let library = LibraryService::new(http.clone());
    let mut store = ExchangeStore::new(ExchangeService::new(http), session.user_id());

    let mut wizard = ExchangeWizard::new(session.user_id());
    wizard.open(None, None);
    assert_eq!(wizard.step(), WizardStep::SelectBooks);

    let found = library.search_books("ubik").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(wizard.toggle_desired_book(found[0].clone()));
    wizard.next().unwrap();

    let owners = library
        .find_owners(&wizard.desired_book_ids(), Some(session.user_id()))
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    wizard.select_owner(owners[0].user.clone()).unwrap();
    wizard.next().unwrap();

    let mine = library.get_user_books(session.user_id()).await.unwrap();
    let offer = booky_client::library::offerable(&mine);
    assert_eq!(offer.len(), 1);
    assert!(wizard.toggle_offered_book(offer[0].clone()).unwrap());
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Confirm);

    let request = wizard.build_request().unwrap();
    let created = store.create_exchange(&request).await.unwrap();
    assert_eq!(created.owner_id, "bob");
    assert_eq!(created.owner_book_ids, vec!["ubik".to_string()]);
    assert_eq!(created.requester_book_ids, vec!["dune".to_string()]);
    assert_eq!(created.status, ExchangeStatus::Pending);
}

#[tokio::test]
async fn test_wants_to_exchange_flag() {
    let harness = Harness::start().await;
    let session = harness.sign_in("alice").await;
    let library = LibraryService::new(session.authorize(harness.http()));

    let books = library.get_user_books("alice").await.unwrap();
    let emma = books.iter().find(|b| b.book_id == "emma").unwrap();
    assert!(!emma.wants_to_exchange);

    let updated = library.set_wants_to_exchange(&emma.id, true).await.unwrap();
    assert!(updated.wants_to_exchange);

    let books = library.get_user_books("alice").await.unwrap();
    assert_eq!(booky_client::library::offerable(&books).len(), 2);

    assert!(library.search_books("   ").await.unwrap().is_empty());
    assert!(library.find_owners(&[], None).await.unwrap().is_empty());
}
