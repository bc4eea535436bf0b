//! Grouping of flat message records into per-counterparty threads.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ThreadError;
use crate::models::{Message, MessageRecord, Thread};
use crate::phone::format_number;

/// Which message decides a thread's "last sent" timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastSentPolicy {
    /// The first record seen for the counterparty, in fetch order.
    #[default]
    FirstSeen,
    /// The newest record seen for the counterparty.
    Latest,
}

impl FromStr for LastSentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-seen" | "first" => Ok(Self::FirstSeen),
            "latest" => Ok(Self::Latest),
            other => Err(format!("unknown last-sent policy: {other}")),
        }
    }
}

/// Build threads as seen from `home_number`, labelled relative to the
/// current time, using [`LastSentPolicy::FirstSeen`].
pub fn build_threads(
    records: &[MessageRecord],
    home_number: &str,
) -> Result<Vec<Thread>, ThreadError> {
    build_threads_at(records, home_number, Utc::now(), LastSentPolicy::default())
}

/// Build threads as seen from `home_number`.
///
/// Records that involve neither side as `home_number` are dropped.  Any
/// record with an unparsable `date_sent` fails the whole call.  The result is
/// sorted by last-sent timestamp, newest first; ties keep first-seen order.
pub fn build_threads_at(
    records: &[MessageRecord],
    home_number: &str,
    now: DateTime<Utc>,
    policy: LastSentPolicy,
) -> Result<Vec<Thread>, ThreadError> {
    let mut threads: Vec<Thread> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0usize;

    for record in records {
        let counterparty = if record.from == home_number {
            record.to.as_str()
        } else if record.to == home_number {
            record.from.as_str()
        } else {
            ""
        };
        if counterparty.is_empty() {
            skipped += 1;
            continue;
        }

        let message = Message::from_record(record, home_number, now)?;

        match index.get(counterparty) {
            Some(&i) => {
                let thread = &mut threads[i];
                if policy == LastSentPolicy::Latest && message.date_sent > thread.last_date_sent
                {
                    thread.last_date_sent = message.date_sent;
                    thread.last_date_sent_diff = message.date_sent_diff.clone();
                }
                thread.messages.push(message);
            }
            None => {
                index.insert(counterparty, threads.len());
                threads.push(Thread {
                    phone_number: format_number(counterparty),
                    counterparty: counterparty.to_string(),
                    last_date_sent: message.date_sent,
                    last_date_sent_diff: message.date_sent_diff.clone(),
                    messages: vec![message],
                });
            }
        }
    }

    threads.sort_by(|a, b| b.last_date_sent.cmp(&a.last_date_sent));

    debug!(
        records = records.len(),
        threads = threads.len(),
        skipped,
        ?policy,
        "Built message threads"
    );

    Ok(threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const HOME: &str = "+15550000000";
    const ALICE: &str = "+12025551234";
    const BOB: &str = "+13105559876";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn record(from: &str, to: &str, body: &str, sent: DateTime<Utc>) -> MessageRecord {
        MessageRecord {
            from: from.to_string(),
            to: to.to_string(),
            body: body.to_string(),
            date_sent: sent.to_rfc2822(),
        }
    }

    fn build(records: &[MessageRecord]) -> Vec<Thread> {
        build_threads_at(records, HOME, now(), LastSentPolicy::FirstSeen).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let t1 = now() - Duration::hours(3);
        let t2 = now() - Duration::hours(2);
        let t3 = now() - Duration::hours(1);
        let records = vec![
            record(HOME, ALICE, "hi alice", t1),
            record(ALICE, HOME, "hi back", t2),
            record(HOME, BOB, "hi bob", t3),
        ];

        let threads = build(&records);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].phone_number, "(310) 555-9876");
        assert_eq!(threads[0].messages.len(), 1);
        assert_eq!(threads[1].phone_number, "(202) 555-1234");
        assert_eq!(threads[1].counterparty, ALICE);
        assert_eq!(threads[1].messages.len(), 2);
        assert_eq!(threads[1].last_date_sent, t1);
        assert_eq!(threads[1].last_date_sent_diff, "3 hours ago");
    }

    #[test]
    fn test_grouping_by_counterparty() {
        let t = now() - Duration::minutes(10);
        let records = vec![
            record(HOME, ALICE, "a1", t),
            record(BOB, HOME, "b1", t),
            record(ALICE, HOME, "a2", t),
            record(HOME, BOB, "b2", t),
        ];

        let threads = build(&records);
        assert_eq!(threads.len(), 2);

        for thread in &threads {
            for message in &thread.messages {
                let other = if message.outgoing { &message.to } else { &message.from };
                assert_eq!(other, &thread.counterparty);
            }
        }

        let alice = threads.iter().find(|t| t.counterparty == ALICE).unwrap();
        let bodies: Vec<&str> = alice.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["a1", "a2"]);
    }

    #[test]
    fn test_unrelated_records_dropped() {
        let t = now() - Duration::minutes(1);
        let records = vec![
            record(ALICE, BOB, "not ours", t),
            record(HOME, ALICE, "ours", t),
        ];

        let threads = build(&records);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].messages.len(), 1);
        assert_eq!(threads[0].messages[0].body, "ours");
    }

    #[test]
    fn test_unrelated_record_with_bad_timestamp_is_ignored() {
        let mut stray = record(ALICE, BOB, "not ours", now());
        stray.date_sent = "garbage".to_string();

        let threads = build(&[stray]);
        assert!(threads.is_empty());
    }

    #[test]
    fn test_empty_counterparty_skipped() {
        let records = vec![record(HOME, "", "nowhere", now())];
        assert!(build(&records).is_empty());
    }

    #[test]
    fn test_sorted_newest_first() {
        let records = vec![
            record(HOME, ALICE, "old", now() - Duration::days(2)),
            record(HOME, BOB, "new", now() - Duration::minutes(5)),
            record(HOME, "+14155550100", "middle", now() - Duration::hours(5)),
        ];

        let threads = build(&records);
        assert_eq!(threads.len(), 3);
        assert!(threads
            .windows(2)
            .all(|w| w[0].last_date_sent >= w[1].last_date_sent));
        assert_eq!(threads[0].counterparty, BOB);
        assert_eq!(threads[2].counterparty, ALICE);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let t = now() - Duration::minutes(5);
        let records = vec![record(HOME, ALICE, "a", t), record(HOME, BOB, "b", t)];

        let threads = build(&records);
        assert_eq!(threads[0].counterparty, ALICE);
        assert_eq!(threads[1].counterparty, BOB);
    }

    #[test]
    fn test_first_seen_policy_keeps_first_timestamp() {
        let older = now() - Duration::days(1);
        let newer = now() - Duration::minutes(1);
        let records = vec![record(ALICE, HOME, "first", older), record(HOME, ALICE, "second", newer)];

        let threads = build(&records);
        assert_eq!(threads[0].last_date_sent, older);
        assert_eq!(threads[0].last_date_sent_diff, "a day ago");
    }

    #[test]
    fn test_latest_policy_tracks_newest() {
        let older = now() - Duration::days(1);
        let newer = now() - Duration::minutes(2);
        let records = vec![
            record(ALICE, HOME, "first", older),
            record(HOME, ALICE, "second", newer),
            record(HOME, BOB, "bob", now() - Duration::hours(1)),
        ];

        let threads = build_threads_at(&records, HOME, now(), LastSentPolicy::Latest).unwrap();
        assert_eq!(threads[0].counterparty, ALICE);
        assert_eq!(threads[0].last_date_sent, newer);
        assert_eq!(threads[0].last_date_sent_diff, "2 minutes ago");
        assert_eq!(threads[1].counterparty, BOB);
    }

    #[test]
    fn test_bad_timestamp_fails_whole_build() {
        let mut bad = record(ALICE, HOME, "broken", now());
        bad.date_sent = "yesterday-ish".to_string();
        let records = vec![record(HOME, ALICE, "fine", now()), bad];

        let err = build_threads_at(&records, HOME, now(), LastSentPolicy::FirstSeen).unwrap_err();
        assert!(matches!(err, ThreadError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_build_threads_uses_wall_clock() {
        let records = vec![MessageRecord {
            from: ALICE.to_string(),
            to: HOME.to_string(),
            body: "old news".to_string(),
            date_sent: "Mon, 16 Aug 2010 03:45:01 +0000".to_string(),
        }];

        let threads = build_threads(&records, HOME).unwrap();
        assert_eq!(threads.len(), 1);
        assert!(threads[0].last_date_sent_diff.ends_with("years ago"));
        assert!(!threads[0].messages[0].outgoing);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("first-seen".parse::<LastSentPolicy>(), Ok(LastSentPolicy::FirstSeen));
        assert_eq!(" Latest ".parse::<LastSentPolicy>(), Ok(LastSentPolicy::Latest));
        assert!("newest".parse::<LastSentPolicy>().is_err());
    }

    #[test]
    fn test_thread_serializes_for_templates() {
        let threads = build(&[record(HOME, ALICE, "hi", now())]);
        let value = serde_json::to_value(&threads[0]).unwrap();
        assert_eq!(value["phone_number"], "(202) 555-1234");
        assert_eq!(value["messages"][0]["outgoing"], true);
        assert_eq!(value["messages"][0]["date_sent_diff"], "a few seconds ago");
    }
}
