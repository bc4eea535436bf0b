use async_trait::async_trait;
use reqwest::Client;
use smsview_shared::constants::{TWILIO_API_BASE, TWILIO_API_VERSION};
use smsview_shared::MessageRecord;
use tracing::{debug, info, warn};

use crate::error::TwilioError;
use crate::wire::{ApiErrorBody, MessagePage};
use crate::MessageSource;

/// Twilio REST client authenticated with an account SID and auth token.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    page_size: Option<u32>,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("base_url", &self.base_url)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl TwilioClient {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: TWILIO_API_BASE.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            page_size: None,
        }
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Request `page_size` messages instead of the API default.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Messages.json",
            self.base_url, TWILIO_API_VERSION, self.account_sid
        )
    }

    /// Fetch the account's first page of messages, newest first.
    pub async fn page_messages(&self) -> Result<MessagePage, TwilioError> {
        let url = self.messages_url();
        debug!(url = %url, page_size = ?self.page_size, "Fetching message page");

        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token));
        if let Some(size) = self.page_size {
            request = request.query(&[("PageSize", size)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| match (body.code, body.message) {
                    (Some(code), Some(msg)) => Some(format!("{msg} (code {code})")),
                    (None, Some(msg)) => Some(msg),
                    _ => None,
                })
                .unwrap_or(text);
            warn!(status = status.as_u16(), error = %message, "Twilio API request failed");
            return Err(TwilioError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let page: MessagePage = serde_json::from_str(&text)?;
        info!(
            count = page.messages.len(),
            has_more = page.next_page_uri.is_some(),
            "Fetched message page"
        );
        Ok(page)
    }
}

#[async_trait]
impl MessageSource for TwilioClient {
    async fn fetch_messages(&self) -> Result<Vec<MessageRecord>, TwilioError> {
        let page = self.page_messages().await?;
        Ok(page.messages.into_iter().map(MessageRecord::from).collect())
    }
}
