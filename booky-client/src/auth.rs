//! Sign-in / sign-out

use shared::client::{SignInRequest, SignInResponse};

use crate::http::HttpClient;
use crate::session::{Session, SessionStorage};
use crate::{ClientError, ClientResult};

/// Authentication API
pub struct AuthService<H> {
    http: H,
    storage: SessionStorage,
}

impl<H: HttpClient> AuthService<H> {
    pub fn new(http: H, storage: SessionStorage) -> Self {
        Self { http, storage }
    }

    /// POST /auth/login, persisting the returned session
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Email and password are required".into(),
            ));
        }

        let req = SignInRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: SignInResponse = self.http.post("/auth/login", &req).await?;
        if resp.token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing token".into()));
        }

        let session = Session::new(resp.token, resp.user);
        self.storage.save(&session)?;
        tracing::info!(user_id = %session.user_id(), "Signed in");
        Ok(session)
    }

    /// Previously persisted session, if any
    pub fn restore(&self) -> Option<Session> {
        self.storage.load()
    }

    /// Forget the persisted session
    pub fn sign_out(&self) -> ClientResult<()> {
        self.storage.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
