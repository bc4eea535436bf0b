//! # smsview-shared
//!
//! Core data shaping for the smsview dashboard.
//!
//! Flat message records fetched from the messaging API are grouped into
//! per-counterparty [`Thread`]s, sorted by recency, and decorated with
//! display fields (formatted phone numbers, relative time labels).  Nothing
//! here performs I/O.

pub mod constants;
pub mod models;
pub mod phone;
pub mod threads;
pub mod timediff;

mod error;

pub use error::ThreadError;
pub use models::*;
pub use phone::format_number;
pub use threads::{build_threads, build_threads_at, LastSentPolicy};
pub use timediff::time_diff;
