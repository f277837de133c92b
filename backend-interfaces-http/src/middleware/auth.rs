use axum::http::HeaderMap;

use backend_domain::RuntimeConfig;

use crate::error::HttpError;

/// Caller identity, set by the gateway in front of this service.
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

pub fn authenticated_user(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(USER_EMAIL_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Checks the bearer token and resolves the caller's e-mail in one go.
pub fn require_user(config: &RuntimeConfig, headers: &HeaderMap) -> Result<String, HttpError> {
    if !authorize(config, headers) {
        return Err(HttpError::Unauthorized);
    }
    authenticated_user(headers).ok_or(HttpError::Unauthorized)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
