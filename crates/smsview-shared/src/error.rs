use thiserror::Error;

/// Errors produced while turning message records into threads.
#[derive(Error, Debug)]
pub enum ThreadError {
    /// A record's `date_sent` did not match the RFC 2822 date format.
    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
