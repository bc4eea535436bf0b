//! JSON shapes returned by the `Messages.json` list resource.
//!
//! Twilio leaves most fields nullable (a queued message has no `date_sent`
//! yet), so everything the thread builder reads is optional here.

use serde::Deserialize;
use smsview_shared::MessageRecord;

/// One page of the message list.
#[derive(Debug, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    #[serde(default)]
    pub next_page_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<ApiMessage> for MessageRecord {
    /// Missing fields become empty strings; an empty `date_sent` is rejected
    /// later by the thread builder.
    fn from(m: ApiMessage) -> Self {
        Self {
            from: m.from.unwrap_or_default(),
            to: m.to.unwrap_or_default(),
            body: m.body.unwrap_or_default(),
            date_sent: m.date_sent.unwrap_or_default(),
        }
    }
}

/// Error document Twilio sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
}
