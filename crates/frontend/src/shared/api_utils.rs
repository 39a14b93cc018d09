//! API utilities for frontend-backend communication
//!
//! One place that knows the API base URL, plus thin JSON helpers over
//! `gloo-net` that turn non-OK responses into [`ApiError`].

use contracts::shared::validation::FieldErrors;
use contracts::system::auth::ApiErrorBody;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Default API location when `MYFEEL_API_URL` is not set at build time
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Base URL for API requests
///
/// Taken from the `MYFEEL_API_URL` environment variable at compile time,
/// without a trailing slash.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/auth/login", api_base());
/// ```
pub fn api_base() -> String {
    option_env!("MYFEEL_API_URL")
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Build a full API URL from a path ("/auth/login")
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        field_errors: FieldErrors,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build from a non-OK status and its (possibly unparseable) body
    pub fn from_body(status: u16, body: Option<ApiErrorBody>, fallback: &str) -> Self {
        let body = body.unwrap_or_default();
        ApiError::Http {
            status,
            message: body.summary().unwrap_or(fallback).to_string(),
            field_errors: body.field_errors(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field errors from the API list, or the message on `fallback_field`
    pub fn into_field_errors(self, fallback_field: &str) -> FieldErrors {
        match self {
            ApiError::Http { field_errors, .. } if !field_errors.is_empty() => field_errors,
            other => {
                let mut errors = FieldErrors::new();
                errors.insert(fallback_field, other.to_string());
                errors
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.json::<ApiErrorBody>().await.ok();
        return Err(ApiError::from_body(status, body, fallback));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// POST a JSON body and decode the JSON answer
pub async fn post_json<B, T>(path: &str, body: &B, fallback: &str) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Network(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response, fallback).await
}

/// GET with a bearer token
pub async fn get_with_bearer<T: DeserializeOwned>(
    path: &str,
    token: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response, fallback).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::ApiFieldError;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:5000", "/auth/login"),
            "http://localhost:5000/auth/login"
        );
        assert_eq!(
            join_url("https://api.example.com/", "user/profile"),
            "https://api.example.com/user/profile"
        );
    }

    #[test]
    fn test_api_base_has_no_trailing_slash() {
        assert!(!api_base().ends_with('/'));
        assert!(api_url("/auth/login").ends_with("/auth/login"));
    }

    #[test]
    fn test_field_errors_prefer_api_list() {
        let body = ApiErrorBody {
            error: Some("Validation failed".into()),
            message: None,
            errors: vec![ApiFieldError {
                path: vec!["email".into()],
                message: "Invalid email".into(),
            }],
        };
        let err = ApiError::from_body(400, Some(body), "Login failed");
        assert_eq!(err.status(), Some(400));
        let fields = err.into_field_errors("password");
        assert_eq!(fields.get("email"), Some("Invalid email"));
        assert!(fields.get("password").is_none());
    }

    #[test]
    fn test_field_errors_fallback_field() {
        let err = ApiError::from_body(401, None, "Login failed");
        assert_eq!(err.to_string(), "Login failed");
        let fields = err.into_field_errors("password");
        assert_eq!(fields.get("password"), Some("Login failed"));

        let network = ApiError::Network("offline".into());
        assert_eq!(
            network.into_field_errors("email").get("email"),
            Some("Network error: offline")
        );
    }
}
