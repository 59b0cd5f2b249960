//! Identity providers and the session's identity holder.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use storefront_commerce::ids::UserId;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::session::{AuthSession, SessionToken};
use crate::user::User;

/// Something that can sign users in and out.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with an email and password.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account and sign it in.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// End a session.
    async fn logout(&self, session: &AuthSession) -> Result<(), AuthError>;
}

/// Simulated round-trip times for [`MockIdentityProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub login: Duration,
    pub register: Duration,
}

impl MockLatency {
    /// No artificial delay.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(500),
            register: Duration::from_millis(800),
        }
    }
}

/// Provider that accepts any non-empty credentials.
///
/// Nothing is checked against stored accounts. Issued tokens are tracked so
/// that a session can only be ended once.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    latency: MockLatency,
    live: Mutex<HashSet<SessionToken>>,
}

impl MockIdentityProvider {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            live: Mutex::new(HashSet::new()),
        }
    }

    pub fn latency(&self) -> MockLatency {
        self.latency
    }

    /// Number of sessions issued and not yet ended.
    pub fn live_sessions(&self) -> usize {
        self.live_tokens().len()
    }

    fn live_tokens(&self) -> std::sync::MutexGuard<'_, HashSet<SessionToken>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn issue(&self, user: User) -> AuthSession {
        let session = AuthSession::issue(user);
        self.live_tokens().insert(session.token.clone());
        session
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            warn!(email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        tokio::time::sleep(self.latency.login).await;

        let user = User::new(UserId::new("user1"), User::name_from_email(email), email);
        info!(user_id = %user.id, email, "signed in");
        Ok(self.issue(user))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;
        tokio::time::sleep(self.latency.register).await;

        let n: u32 = rand::thread_rng().gen_range(0..1000);
        let user = User::new(UserId::new(format!("user{}", n)), name, email);
        info!(user_id = %user.id, email, "registered");
        Ok(self.issue(user))
    }

    async fn logout(&self, session: &AuthSession) -> Result<(), AuthError> {
        if !self.live_tokens().remove(&session.token) {
            return Err(AuthError::InvalidToken);
        }
        info!(user_id = %session.user.id, "signed out");
        Ok(())
    }
}

/// The session's current identity.
#[derive(Debug)]
pub struct Identity<P> {
    provider: P,
    session: Option<AuthSession>,
}

impl<P: IdentityProvider> Identity<P> {
    /// Start signed out.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            session: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sign in, replacing any current session.
    ///
    /// On failure the current session is left as it was.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let session = self.provider.login(email, password).await?;
        Ok(&self.replace(session).user)
    }

    /// Register a new account and sign it in.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&User, AuthError> {
        let session = self.provider.register(name, email, password).await?;
        Ok(&self.replace(session).user)
    }

    /// Sign out. Signing out while signed out is a no-op.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        match self.session.take() {
            Some(session) => self.provider.logout(&session).await,
            None => Ok(()),
        }
    }

    fn replace(&mut self, session: AuthSession) -> &AuthSession {
        self.session.insert(session)
    }
}
