//! In-memory identity gateway.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Duration;

use crate::application::ports::{
    AccessToken, Credentials, IdentityError, IdentityGatewayPort, IdentityHandle, Session,
};
use crate::domain::identity::EmailAddress;
use crate::domain::shared::{Timestamp, UserId};

const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct StoredIdentity {
    user_id: UserId,
    email: EmailAddress,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredSession {
    user_id: UserId,
    email: EmailAddress,
    expires_at: Timestamp,
}

#[derive(Debug, Default)]
struct IdentityState {
    /// Keyed by e-mail.
    identities: HashMap<String, StoredIdentity>,
    /// Keyed by access token.
    sessions: HashMap<String, StoredSession>,
}

/// In-memory implementation of `IdentityGatewayPort`.
///
/// Issues random UUID tokens that expire after `session_ttl`.
#[derive(Debug)]
pub struct InMemoryIdentityGateway {
    state: RwLock<IdentityState>,
    min_password_len: usize,
    session_ttl: Duration,
}

impl Default for InMemoryIdentityGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityGateway {
    /// Create a gateway with a 6-character password minimum and 1-hour sessions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(IdentityState::default()),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            session_ttl: Duration::hours(1),
        }
    }

    /// Set the minimum password length accepted at sign-up.
    #[must_use]
    pub const fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Set how long issued sessions stay valid.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, IdentityState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IdentityState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of registered identities.
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.read().identities.len()
    }

    /// Number of stored sessions, including expired ones not yet swept.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.read().sessions.len()
    }

    /// Forget all identities and sessions.
    pub fn clear(&self) {
        let mut state = self.write();
        state.identities.clear();
        state.sessions.clear();
    }

    fn issue_session(&self, state: &mut IdentityState, identity: &StoredIdentity) -> Session {
        let access_token = AccessToken::new(uuid::Uuid::new_v4().to_string());
        let expires_at = Timestamp::new(Timestamp::now().as_datetime() + self.session_ttl);

        state.sessions.retain(|_, stored| !stored.expires_at.is_past());
        state.sessions.insert(
            access_token.expose().to_string(),
            StoredSession {
                user_id: identity.user_id.clone(),
                email: identity.email.clone(),
                expires_at,
            },
        );

        Session {
            access_token,
            refresh_token: Some(AccessToken::new(uuid::Uuid::new_v4().to_string())),
            expires_at: Some(expires_at),
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
        }
    }
}

#[async_trait]
impl IdentityGatewayPort for InMemoryIdentityGateway {
    async fn create_identity(
        &self,
        credentials: &Credentials,
    ) -> Result<IdentityHandle, IdentityError> {
        if credentials.password().chars().count() < self.min_password_len {
            return Err(IdentityError::InvalidCredentialsFormat {
                message: format!(
                    "Password should be at least {} characters",
                    self.min_password_len
                ),
            });
        }

        let mut state = self.write();
        if state.identities.contains_key(credentials.email.as_str()) {
            return Err(IdentityError::AlreadyRegistered);
        }

        let identity = StoredIdentity {
            user_id: UserId::generate(),
            email: credentials.email.clone(),
            password: credentials.password().to_string(),
        };
        state
            .identities
            .insert(identity.email.as_str().to_string(), identity.clone());
        let session = self.issue_session(&mut state, &identity);

        Ok(IdentityHandle {
            user_id: identity.user_id,
            email: identity.email,
            session: Some(session),
        })
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let mut state = self.write();
        let identity = match state.identities.get(credentials.email.as_str()) {
            Some(identity) if identity.password == credentials.password() => identity.clone(),
            _ => return Err(IdentityError::InvalidCredentials),
        };
        Ok(self.issue_session(&mut state, &identity))
    }

    async fn current_session(&self, token: &AccessToken) -> Result<Option<Session>, IdentityError> {
        let mut state = self.write();
        let Some(stored) = state.sessions.get(token.expose()).cloned() else {
            return Ok(None);
        };
        if stored.expires_at.is_past() {
            state.sessions.remove(token.expose());
            return Ok(None);
        }
        Ok(Some(Session {
            access_token: token.clone(),
            refresh_token: None,
            expires_at: Some(stored.expires_at),
            user_id: stored.user_id,
            email: stored.email,
        }))
    }

    async fn end_session(&self, token: &AccessToken) -> Result<(), IdentityError> {
        self.write().sessions.remove(token.expose());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(EmailAddress::parse(email).unwrap(), password)
    }

    #[tokio::test]
    async fn sign_up_issues_a_session() {
        let gateway = InMemoryIdentityGateway::new();
        let handle = gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap();

        let session = handle.session.unwrap();
        let resolved = gateway
            .current_session(&session.access_token)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.user_id, handle.user_id);
        assert_eq!(resolved.email.as_str(), "jane@x.com");
        assert_eq!(gateway.identity_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_already_registered() {
        let gateway = InMemoryIdentityGateway::new();
        gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap();
        let err = gateway
            .create_identity(&creds("jane@x.com", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::AlreadyRegistered);
    }

    #[tokio::test]
    async fn short_password_is_rejected_with_provider_message() {
        let gateway = InMemoryIdentityGateway::new();
        let err = gateway
            .create_identity(&creds("jane@x.com", "p1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.provider_message(),
            Some("Password should be at least 6 characters")
        );
        assert_eq!(gateway.identity_count(), 0);

        let lenient = InMemoryIdentityGateway::new().with_min_password_len(1);
        assert!(lenient.create_identity(&creds("jane@x.com", "p1")).await.is_ok());
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let gateway = InMemoryIdentityGateway::new();
        gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap();

        assert!(gateway.authenticate(&creds("jane@x.com", "secret1")).await.is_ok());
        assert_eq!(
            gateway
                .authenticate(&creds("jane@x.com", "wrong!!"))
                .await
                .unwrap_err(),
            IdentityError::InvalidCredentials
        );
        assert_eq!(
            gateway
                .authenticate(&creds("ghost@x.com", "secret1"))
                .await
                .unwrap_err(),
            IdentityError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn end_session_forgets_token() {
        let gateway = InMemoryIdentityGateway::new();
        let session = gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap()
            .session
            .unwrap();

        gateway.end_session(&session.access_token).await.unwrap();

        assert!(
            gateway
                .current_session(&session.access_token)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(gateway.session_count(), 0);
        // Ending an unknown session is not an error
        gateway.end_session(&session.access_token).await.unwrap();
    }

    #[tokio::test]
    async fn expired_sessions_resolve_to_none() {
        let gateway = InMemoryIdentityGateway::new().with_session_ttl(Duration::seconds(-1));
        let session = gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap()
            .session
            .unwrap();

        assert!(
            gateway
                .current_session(&session.access_token)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn issuing_a_session_sweeps_expired_ones() {
        let gateway = InMemoryIdentityGateway::new().with_session_ttl(Duration::seconds(-1));
        gateway
            .create_identity(&creds("jane@x.com", "secret1"))
            .await
            .unwrap();

        for _ in 0..3 {
            gateway
                .authenticate(&creds("jane@x.com", "secret1"))
                .await
                .unwrap();
        }

        // Only the session issued last remains
        assert_eq!(gateway.session_count(), 1);
    }
}
