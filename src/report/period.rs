//! The relative calendar window used by dashboard summaries.

use crate::model::Transaction;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A relative calendar window, evaluated against the current instant: today,
/// the current calendar month, or the current calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Month,
    Year,
}

serde_plain::derive_display_from_serialize!(Period);
serde_plain::derive_fromstr_from_deserialize!(Period);

impl Period {
    /// True when `ts` falls inside this window relative to `now`.
    pub(crate) fn contains(&self, ts: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            Period::Day => ts.date() == now.date(),
            Period::Month => ts.year() == now.year() && ts.month() == now.month(),
            Period::Year => ts.year() == now.year(),
        }
    }
}

/// Narrows `transactions` to those whose date falls inside `period`,
/// relative to `now`.
///
/// `None` means no filtering and returns the list unchanged, including
/// entries without a usable date. When a period is given, entries whose date
/// is absent or unparseable are dropped. The input order is preserved.
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Option<Period>,
    now: NaiveDateTime,
) -> Vec<Transaction> {
    let Some(period) = period else {
        return transactions.to_vec();
    };
    transactions
        .iter()
        .filter(|t| t.timestamp().is_some_and(|ts| period.contains(ts, now)))
        .cloned()
        .collect()
}
