//! Response-side error wrapper.
//!
//! External-service and storage failures are not retried or partially
//! cleaned up; they surface to the browser as a bare 500 while the detail
//! goes to the log.

use {
    axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    tracing::error,
};

/// Internal failure surfaced as a generic server error.
pub struct GatewayError(anyhow::Error);

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error!(error = ?self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

impl<E> From<E> for GatewayError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
