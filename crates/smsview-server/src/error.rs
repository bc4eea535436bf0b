use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use smsview_shared::ThreadError;
use smsview_twilio::TwilioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Message fetch failed: {0}")]
    Fetch(#[from] TwilioError),

    #[error("Message data error: {0}")]
    Thread(#[from] ThreadError),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let (status, message) = match &self {
            ServerError::Fetch(_) => (StatusCode::BAD_GATEWAY, "Upstream messaging API error"),
            ServerError::Thread(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid message data")
            }
            ServerError::Render(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
