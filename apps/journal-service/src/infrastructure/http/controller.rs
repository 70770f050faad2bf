//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::application::dto::{
    CreateTradingAccountDto, LoginUserDto, RegisterUserDto, SessionView,
};
use crate::application::ports::{AccessToken, DirectoryStorePort, IdentityGatewayPort};
use crate::application::use_cases::{
    CreateTradingAccountUseCase, LoadSessionUseCase, LoginUserUseCase, LogoutUserUseCase,
    RegisterUserUseCase,
};
use crate::domain::trading_account::AccountList;
use crate::error::{ErrorCode, JournalError};

use super::request::{CreateAccountRequest, LoginRequest, RegisterRequest};
use super::response::{
    AccountResponse, HealthResponse, LoginResponse, ProfileResponse, RegisterResponse,
};

/// Application state shared across handlers.
pub struct AppState<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    /// Use case for registration.
    pub register_user: Arc<RegisterUserUseCase<I, D>>,
    /// Use case for username login.
    pub login_user: Arc<LoginUserUseCase<I, D>>,
    /// Use case for loading the caller's profile and accounts.
    pub load_session: Arc<LoadSessionUseCase<I, D>>,
    /// Use case for opening a trading account.
    pub create_trading_account: Arc<CreateTradingAccountUseCase<I, D>>,
    /// Use case for signing out.
    pub logout_user: Arc<LogoutUserUseCase<I>>,
    /// Application version.
    pub version: String,
}

impl<I, D> Clone for AppState<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    fn clone(&self) -> Self {
        Self {
            register_user: Arc::clone(&self.register_user),
            login_user: Arc::clone(&self.login_user),
            load_session: Arc::clone(&self.load_session),
            create_trading_account: Arc::clone(&self.create_trading_account),
            logout_user: Arc::clone(&self.logout_user),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<I, D>(state: AppState<I, D>) -> Router
where
    I: IdentityGatewayPort + 'static,
    D: DirectoryStorePort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/profile", get(profile))
        .route("/api/v1/accounts", post(create_account))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<AccessToken, JournalError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(JournalError::unauthenticated)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(JournalError::unauthenticated)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(JournalError::unauthenticated());
    }
    Ok(AccessToken::new(token))
}

/// A body that is not valid JSON for the form is reported like an empty form.
fn form_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, JournalError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        JournalError::new(ErrorCode::MissingField)
    })
}

/// Health check endpoint.
async fn health_check<I, D>(State(state): State<AppState<I, D>>) -> impl IntoResponse
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Registration endpoint.
async fn register<I, D>(
    State(state): State<AppState<I, D>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, JournalError>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    let dto: RegisterUserDto = form_body(body)?.into();
    let outcome = state.register_user.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(outcome))).into_response())
}

/// Login endpoint.
async fn login<I, D>(
    State(state): State<AppState<I, D>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, JournalError>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    let dto: LoginUserDto = form_body(body)?.into();
    let session = state.login_user.execute(&dto).await?;
    Ok(Json(LoginResponse {
        session: session.into(),
    }))
}

/// Logout endpoint.
async fn logout<I, D>(
    State(state): State<AppState<I, D>>,
    headers: HeaderMap,
) -> Result<StatusCode, JournalError>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    let token = bearer_token(&headers)?;
    state.logout_user.execute(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Profile endpoint: the caller's profile and trading accounts.
async fn profile<I, D>(
    State(state): State<AppState<I, D>>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, JournalError>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    let token = bearer_token(&headers)?;
    match state.load_session.execute(Some(&token)).await? {
        SessionView::Authenticated(view) => Ok(Json(view.into())),
        SessionView::Unauthenticated => Err(JournalError::unauthenticated()),
    }
}

/// Account creation endpoint.
async fn create_account<I, D>(
    State(state): State<AppState<I, D>>,
    headers: HeaderMap,
    body: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Response, JournalError>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    let token = bearer_token(&headers)?;
    if body.is_err() {
        state.create_trading_account.require_session(&token).await?;
    }
    let dto: CreateTradingAccountDto = form_body(body)?.into();
    // Each request starts from an empty view; clients refetch the list
    let mut view = AccountList::default();
    let account = state
        .create_trading_account
        .execute(&token, &mut view, &dto)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse { account })).into_response())
}
