//! Message and thread models.
//!
//! [`MessageRecord`] is the flat shape handed over by the fetcher.  [`Message`]
//! and [`Thread`] are the display shapes the templates consume, so both derive
//! `Serialize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ThreadError;
use crate::timediff::time_diff;

// ---------------------------------------------------------------------------
// MessageRecord
// ---------------------------------------------------------------------------

/// A message as returned by the messaging API, before any interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    /// Sender phone number (E.164).
    pub from: String,
    /// Recipient phone number (E.164).
    pub to: String,
    /// Message text.
    pub body: String,
    /// Send time in RFC 2822 form, e.g. `Mon, 16 Aug 2010 03:45:01 +0000`.
    pub date_sent: String,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single message ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub from: String,
    pub to: String,
    pub date_sent: DateTime<Utc>,
    /// Relative label for `date_sent`, e.g. "3 hours ago".
    pub date_sent_diff: String,
    /// `true` when the home number sent this message.
    pub outgoing: bool,
}

impl Message {
    /// Interpret `record` from the perspective of `home_number`, labelling its
    /// send time relative to `now`.
    pub fn from_record(
        record: &MessageRecord,
        home_number: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ThreadError> {
        let date_sent = parse_date_sent(&record.date_sent)?;

        Ok(Self {
            body: record.body.clone(),
            from: record.from.clone(),
            to: record.to.clone(),
            date_sent,
            date_sent_diff: time_diff(date_sent, now),
            outgoing: record.from == home_number,
        })
    }
}

/// Parse an RFC 2822 timestamp into UTC.
pub fn parse_date_sent(value: &str) -> Result<DateTime<Utc>, ThreadError> {
    DateTime::parse_from_rfc2822(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| ThreadError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Thread
// ---------------------------------------------------------------------------

/// A conversation between the home number and one counterparty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Thread {
    /// Counterparty number formatted for display.
    pub phone_number: String,
    /// Counterparty number as it appears in the records.
    pub counterparty: String,
    pub last_date_sent: DateTime<Utc>,
    pub last_date_sent_diff: String,
    /// Messages in the order they were fetched.
    pub messages: Vec<Message>,
}
