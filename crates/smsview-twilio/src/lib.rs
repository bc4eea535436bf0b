//! # smsview-twilio
//!
//! Read-only client for Twilio's Programmable Messaging REST API.
//!
//! Only one call is supported: fetching the account's default page of recent
//! messages, converted into [`MessageRecord`]s for the thread builder.

pub mod client;
pub mod wire;

mod error;

use async_trait::async_trait;
use smsview_shared::MessageRecord;

pub use client::TwilioClient;
pub use error::TwilioError;

/// Anything that can produce a page of message records.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn fetch_messages(&self) -> Result<Vec<MessageRecord>, TwilioError>;
}
