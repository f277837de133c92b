use axum::extract::FromRequest;

use crate::error::HttpError;

/// JSON request body. Malformed or mistyped bodies answer with the API's
/// `{error}` shape instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct ApiJson<T>(pub T);
