//! Dependency Injection Container
//!
//! Wires one identity gateway and one directory store into the use cases
//! and the HTTP router.

use std::sync::Arc;

use axum::Router;

use crate::application::ports::{DirectoryStorePort, IdentityGatewayPort};
use crate::application::use_cases::{
    CreateTradingAccountUseCase, LoadSessionUseCase, LoginUserUseCase, LogoutUserUseCase,
    RegisterUserUseCase,
};
use crate::config::{BackendConfig, BackendMode};
use crate::infrastructure::backend::{
    BackendError, HostedBackendConfig, HostedDirectoryStore, HostedIdentityGateway,
};
use crate::infrastructure::http::{AppState, create_router};
use crate::infrastructure::persistence::{InMemoryDirectoryStore, InMemoryIdentityGateway};

/// Dependency injection container.
pub struct Container<I, D>
where
    I: IdentityGatewayPort + 'static,
    D: DirectoryStorePort + 'static,
{
    identity: Arc<I>,
    directory: Arc<D>,
}

impl<I, D> Container<I, D>
where
    I: IdentityGatewayPort + 'static,
    D: DirectoryStorePort + 'static,
{
    /// Create a new container from a pair of adapters.
    pub const fn new(identity: Arc<I>, directory: Arc<D>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Get the identity gateway.
    pub fn identity(&self) -> Arc<I> {
        Arc::clone(&self.identity)
    }

    /// Get the directory store.
    pub fn directory(&self) -> Arc<D> {
        Arc::clone(&self.directory)
    }

    /// Create a `RegisterUserUseCase`.
    pub fn register_user_use_case(&self) -> RegisterUserUseCase<I, D> {
        RegisterUserUseCase::new(self.identity(), self.directory())
    }

    /// Create a `LoginUserUseCase`.
    pub fn login_user_use_case(&self) -> LoginUserUseCase<I, D> {
        LoginUserUseCase::new(self.identity(), self.directory())
    }

    /// Create a `LoadSessionUseCase`.
    pub fn load_session_use_case(&self) -> LoadSessionUseCase<I, D> {
        LoadSessionUseCase::new(self.identity(), self.directory())
    }

    /// Create a `CreateTradingAccountUseCase`.
    pub fn create_trading_account_use_case(&self) -> CreateTradingAccountUseCase<I, D> {
        CreateTradingAccountUseCase::new(self.identity(), self.directory())
    }

    /// Create a `LogoutUserUseCase`.
    pub fn logout_user_use_case(&self) -> LogoutUserUseCase<I> {
        LogoutUserUseCase::new(self.identity())
    }

    /// Build the HTTP application state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<I, D> {
        AppState {
            register_user: Arc::new(self.register_user_use_case()),
            login_user: Arc::new(self.login_user_use_case()),
            load_session: Arc::new(self.load_session_use_case()),
            create_trading_account: Arc::new(self.create_trading_account_use_case()),
            logout_user: Arc::new(self.logout_user_use_case()),
            version: version.into(),
        }
    }

    /// Build the HTTP router.
    pub fn router(&self, version: impl Into<String>) -> Router {
        create_router(self.app_state(version))
    }
}

impl Container<HostedIdentityGateway, HostedDirectoryStore> {
    /// Container backed by the hosted backend.
    pub fn hosted(config: &BackendConfig) -> Result<Self, BackendError> {
        let hosted = HostedBackendConfig::new(&config.url, &config.api_key)
            .with_timeout(std::time::Duration::from_secs(config.timeout_secs));
        Ok(Self::new(
            Arc::new(HostedIdentityGateway::new(&hosted)?),
            Arc::new(HostedDirectoryStore::new(&hosted)?),
        ))
    }
}

impl Container<InMemoryIdentityGateway, InMemoryDirectoryStore> {
    /// Container backed by process-local in-memory adapters.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryIdentityGateway::new()),
            Arc::new(InMemoryDirectoryStore::new()),
        )
    }
}

/// Build the router for the configured backend mode.
pub fn build_router(config: &BackendConfig, version: &str) -> Result<Router, BackendError> {
    match config.mode {
        BackendMode::Hosted => {
            tracing::info!(url = %config.url, "Using hosted backend");
            Ok(Container::hosted(config)?.router(version))
        }
        BackendMode::Memory => {
            tracing::warn!("Using in-memory backend; data is lost on restart");
            Ok(Container::in_memory().router(version))
        }
    }
}
