//! Time-bucketed income/expense series for charting.

use crate::model::{Amount, ExpenseType, Transaction};
use crate::report::Period;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::HashMap;

/// One aggregation cell of a charted series: a time-unit label plus the
/// summed income and expense that landed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub income: Amount,
    pub expense: Amount,
}

/// Groups `transactions` into an ordered, sparse series of buckets.
///
/// The bucket key depends on the period the caller is summarizing:
///
/// - `day`: hour of day on a 12-hour clock, e.g. `"10 am"`, ordered by the
///   underlying 24-hour value rather than by label text.
/// - `month`: `"Day N"` for each calendar day-of-month, ordered by N.
/// - `year`: abbreviated month name `Jan`..`Dec`, in calendar order.
/// - no period: the full ISO calendar date, in input order. Callers who need
///   a chronological all-time series must sort their input first.
///
/// Buckets are created lazily on first contribution, so a span with no
/// transactions produces no bucket; anyone rendering a dense axis has to fill
/// the gaps themselves. Transactions without a usable date contribute
/// nothing. The input is expected to be period-scoped already (see
/// [`filter_by_period`](crate::report::filter_by_period)); this function only
/// derives keys from it.
pub fn bucketize(transactions: &[Transaction], period: Option<Period>) -> Vec<Bucket> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(u32, Bucket)> = Vec::new();

    for t in transactions {
        let Some(ts) = t.timestamp() else {
            continue;
        };
        let (rank, label) = bucket_key(period, ts, buckets.len() as u32);
        let slot = match index.get(&label) {
            Some(&i) => i,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((
                    rank,
                    Bucket {
                        label,
                        income: Amount::ZERO,
                        expense: Amount::ZERO,
                    },
                ));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[slot].1;
        match t.expense_type() {
            ExpenseType::Income => bucket.income += t.amount(),
            ExpenseType::Expense => bucket.expense += t.amount(),
        }
    }

    // Insertion ranks for the all-time case are already ascending, so one
    // stable sort covers every period.
    buckets.sort_by_key(|(rank, _)| *rank);
    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}

/// Derives the sort rank and display label for a transaction's bucket.
fn bucket_key(period: Option<Period>, ts: NaiveDateTime, next_slot: u32) -> (u32, String) {
    match period {
        Some(Period::Day) => {
            let (is_pm, hour) = ts.hour12();
            let marker = if is_pm { "pm" } else { "am" };
            (ts.hour(), format!("{hour} {marker}"))
        }
        Some(Period::Month) => (ts.day(), format!("Day {}", ts.day())),
        Some(Period::Year) => (ts.month(), ts.format("%b").to_string()),
        None => (next_slot, ts.format("%Y-%m-%d").to_string()),
    }
}
