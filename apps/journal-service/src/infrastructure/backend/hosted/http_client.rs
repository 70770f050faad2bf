//! HTTP client wrapper for the hosted backend.

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::BackendErrorResponse;
use super::config::HostedBackendConfig;
use super::error::BackendError;
use crate::application::ports::AccessToken;
use crate::observability::record_backend_call;

/// One request to the hosted backend.
pub struct BackendRequest<'a, B: Serialize + ?Sized = ()> {
    method: Method,
    path: &'a str,
    query: &'a [(&'a str, &'a str)],
    body: Option<&'a B>,
    token: Option<&'a AccessToken>,
    return_representation: bool,
}

impl<'a> BackendRequest<'a> {
    /// A `GET` request.
    pub fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: &[],
            body: None,
            token: None,
            return_representation: false,
        }
    }
}

impl<'a, B: Serialize + ?Sized> BackendRequest<'a, B> {
    /// A `POST` request with a JSON body.
    pub fn post(path: &'a str, body: &'a B) -> Self {
        Self {
            method: Method::POST,
            path,
            query: &[],
            body: Some(body),
            token: None,
            return_representation: false,
        }
    }

    /// Add query parameters.
    #[must_use]
    pub fn query(mut self, query: &'a [(&'a str, &'a str)]) -> Self {
        self.query = query;
        self
    }

    /// Authenticate as the user holding `token` instead of with the API key.
    #[must_use]
    pub fn bearer(mut self, token: &'a AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Ask the table API to return inserted rows.
    #[must_use]
    pub fn returning(mut self) -> Self {
        self.return_representation = true;
        self
    }
}

/// HTTP client for the hosted backend. Requests are not retried.
#[derive(Debug, Clone)]
pub struct BackendHttpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BackendHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &HostedBackendConfig) -> Result<Self, BackendError> {
        if config.api_key.is_empty() {
            return Err(BackendError::Configuration("API key is empty".to_string()));
        }
        if !(config.url.starts_with("http://") || config.url.starts_with("https://")) {
            return Err(BackendError::Configuration(format!(
                "backend URL must be http(s): {}",
                config.url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Send a request and decode the JSON response. An empty 2xx body decodes as `null`.
    #[allow(clippy::future_not_send)]
    pub async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        operation: &str,
        request: BackendRequest<'_, B>,
    ) -> Result<T, BackendError> {
        let target = if request.path.starts_with("/auth/") {
            "auth"
        } else {
            "rest"
        };
        let result = self.execute(request).await;

        let status = match &result {
            Ok(_) => "ok",
            Err(BackendError::Unavailable(_) | BackendError::Decode(_)) => "unavailable",
            Err(_) => "rejected",
        };
        record_backend_call(target, operation, status);

        if let Err(ref err) = result {
            tracing::debug!(target_api = target, operation, error = %err, "Backend call failed");
        }
        result
    }

    #[allow(clippy::future_not_send)]
    async fn execute<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        request: BackendRequest<'_, B>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, request.path);
        let bearer = request.token.map_or(self.api_key.as_str(), AccessToken::expose);

        let mut builder = self
            .client
            .request(request.method, &url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer);
        if !request.query.is_empty() {
            builder = builder.query(request.query);
        }
        if let Some(body) = request.body {
            builder = builder.json(body);
        }
        if request.return_representation {
            builder = builder.header("Prefer", "return=representation");
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        if status.is_success() {
            let text = if text.trim().is_empty() { "null" } else { &text };
            return serde_json::from_str(text).map_err(|e| BackendError::Decode(e.to_string()));
        }

        Err(classify_error(status, &text))
    }
}

/// Map a non-2xx response onto a `BackendError`.
pub fn classify_error(status: StatusCode, body: &str) -> BackendError {
    let parsed = serde_json::from_str::<BackendErrorResponse>(body).unwrap_or_default();
    let code = parsed
        .code()
        .unwrap_or_else(|| status.as_u16().to_string());
    let message = parsed.message().unwrap_or_else(|| {
        if body.is_empty() {
            status.to_string()
        } else {
            body.to_string()
        }
    });

    match status.as_u16() {
        401 | 403 => BackendError::Unauthorized { message },
        404 => BackendError::NotFound { message },
        409 => BackendError::Conflict {
            code,
            message,
            details: parsed.details,
        },
        408 | 429 | 500..=599 => BackendError::Unavailable(format!("{status}: {message}")),
        _ => BackendError::Rejected { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(401 ; "unauthorized")]
    #[test_case(403 ; "forbidden")]
    fn auth_statuses(status: u16) {
        let err = classify_error(StatusCode::from_u16(status).unwrap(), "");
        assert!(matches!(err, BackendError::Unauthorized { .. }));
    }

    #[test_case(408 ; "request timeout")]
    #[test_case(429 ; "rate limited")]
    #[test_case(500 ; "internal error")]
    #[test_case(503 ; "unavailable")]
    fn transient_statuses(status: u16) {
        let err = classify_error(StatusCode::from_u16(status).unwrap(), "oops");
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[test_case(400 ; "bad request")]
    #[test_case(422 ; "unprocessable")]
    fn rejected_statuses(status: u16) {
        let err = classify_error(
            StatusCode::from_u16(status).unwrap(),
            r#"{"error_code":"weak_password","msg":"Password should be at least 6 characters"}"#,
        );
        assert_eq!(
            err,
            BackendError::Rejected {
                code: "weak_password".to_string(),
                message: "Password should be at least 6 characters".to_string(),
            }
        );
    }

    #[test]
    fn conflict_keeps_details() {
        let err = classify_error(
            StatusCode::CONFLICT,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint \"profiles_email_key\"","details":"Key (email)=(a@b.c) already exists."}"#,
        );
        assert_eq!(err.constraint_name().as_deref(), Some("profiles_email_key"));
    }

    #[test]
    fn non_json_body_becomes_message() {
        let err = classify_error(StatusCode::BAD_REQUEST, "plain text");
        assert_eq!(
            err,
            BackendError::Rejected {
                code: "400".to_string(),
                message: "plain text".to_string(),
            }
        );
    }

    #[test]
    fn rejects_empty_api_key() {
        let config = HostedBackendConfig::new("https://backend.test", "");
        assert!(matches!(
            BackendHttpClient::new(&config),
            Err(BackendError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_non_http_url() {
        let config = HostedBackendConfig::new("ftp://backend.test", "key");
        assert!(matches!(
            BackendHttpClient::new(&config),
            Err(BackendError::Configuration(_))
        ));
    }
}
