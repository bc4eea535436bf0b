use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwilioError {
    /// Connection, TLS or body-read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Twilio API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}
