//! The filtered, ordered view behind the full transaction listing.

use crate::model::{ExpenseType, Transaction};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A relative date window for the listing filter. Unlike the dashboard
/// [`Period`](crate::report::Period), this includes a week window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    AllTime,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

serde_plain::derive_display_from_serialize!(DateRange);
serde_plain::derive_fromstr_from_deserialize!(DateRange);

/// Restricts the listing to one transaction type, or passes everything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TypeFilter);
serde_plain::derive_fromstr_from_deserialize!(TypeFilter);

/// The listing sort key and direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

serde_plain::derive_display_from_serialize!(SortOrder);
serde_plain::derive_fromstr_from_deserialize!(SortOrder);

/// The four independent criteria of the full-listing view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search; empty or absent matches everything.
    pub search: Option<String>,
    pub range: DateRange,
    pub type_filter: TypeFilter,
    pub sort: SortOrder,
}

/// Applies search, date range, type filter and sort to a snapshot, in that
/// order, returning the resulting view.
///
/// - Search is a case-insensitive substring match against title, category
///   and description; matching any one field keeps the transaction.
/// - Every range other than `all_time` rejects transactions without a
///   parseable date. `this_week` spans Monday 00:00:00 of the week
///   containing `now` up to (but not including) the following Monday,
///   regardless of locale week-start conventions.
/// - Sorting is stable: transactions tied on the sort key keep their
///   relative input order. There is no secondary sort key. Transactions
///   without a parseable date sort as the smallest date value.
pub fn run_query(
    transactions: &[Transaction],
    query: &ListQuery,
    now: NaiveDateTime,
) -> Vec<Transaction> {
    let mut filtered: Vec<Transaction> = transactions.to_vec();

    if let Some(needle) = query.search.as_deref() {
        if !needle.is_empty() {
            let needle = needle.to_lowercase();
            filtered.retain(|t| matches_search(t, &needle));
        }
    }

    if query.range != DateRange::AllTime {
        filtered.retain(|t| {
            t.timestamp()
                .is_some_and(|ts| query.range.contains(ts, now))
        });
    }

    match query.type_filter {
        TypeFilter::All => {}
        TypeFilter::Income => filtered.retain(|t| t.expense_type() == ExpenseType::Income),
        TypeFilter::Expense => filtered.retain(|t| t.expense_type() == ExpenseType::Expense),
    }

    match query.sort {
        SortOrder::DateDesc => filtered.sort_by_cached_key(|t| Reverse(t.timestamp())),
        SortOrder::DateAsc => filtered.sort_by_cached_key(|t| t.timestamp()),
        SortOrder::AmountDesc => filtered.sort_by_cached_key(|t| Reverse(t.amount())),
        SortOrder::AmountAsc => filtered.sort_by_cached_key(|t| t.amount()),
    }

    filtered
}

fn matches_search(t: &Transaction, needle_lower: &str) -> bool {
    t.title().to_lowercase().contains(needle_lower)
        || t.category().to_lowercase().contains(needle_lower)
        || t.description()
            .is_some_and(|d| d.to_lowercase().contains(needle_lower))
}

impl DateRange {
    /// True when `ts` falls inside this window relative to `now`.
    fn contains(&self, ts: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            DateRange::AllTime => true,
            DateRange::Today => ts.date() == now.date(),
            DateRange::ThisWeek => {
                let monday = now.date()
                    - Duration::days(i64::from(now.date().weekday().num_days_from_monday()));
                let start = monday.and_time(NaiveTime::MIN);
                let end = (monday + Duration::days(7)).and_time(NaiveTime::MIN);
                ts >= start && ts < end
            }
            DateRange::ThisMonth => ts.year() == now.year() && ts.month() == now.month(),
            DateRange::ThisYear => ts.year() == now.year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{at, tx};

    fn query() -> ListQuery {
        ListQuery::default()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let list = vec![
            tx("a", ExpenseType::Expense, "Groceries", "50", "Food", Some("2025-01-10")),
            tx("b", ExpenseType::Expense, "Rent", "900", "Home", Some("2025-01-01")),
        ];
        let q = ListQuery {
            search: Some("GRO".to_string()),
            ..query()
        };
        let view = run_query(&list, &q, at("2025-01-15T12:00:00"));
        let titles: Vec<&str> = view.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Groceries"]);
    }

    #[test]
    fn test_search_covers_category_and_description() {
        let mut with_description =
            tx("a", ExpenseType::Expense, "Card", "5", "Misc", Some("2025-01-10"));
        with_description.description = Some("Birthday present".to_string());
        let list = vec![
            with_description,
            tx("b", ExpenseType::Expense, "Ticket", "20", "Travel", Some("2025-01-11")),
        ];

        let by_category = ListQuery {
            search: Some("travel".to_string()),
            ..query()
        };
        assert_eq!(run_query(&list, &by_category, at("2025-01-15T12:00:00")).len(), 1);

        let by_description = ListQuery {
            search: Some("birthday".to_string()),
            ..query()
        };
        assert_eq!(run_query(&list, &by_description, at("2025-01-15T12:00:00")).len(), 1);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let list = vec![
            tx("a", ExpenseType::Expense, "A", "1", "X", None),
            tx("b", ExpenseType::Income, "B", "2", "Y", Some("2025-01-10")),
        ];
        let q = ListQuery {
            search: Some(String::new()),
            sort: SortOrder::AmountAsc,
            ..query()
        };
        assert_eq!(run_query(&list, &q, at("2025-01-15T12:00:00")).len(), 2);
    }

    #[test]
    fn test_this_week_monday_start_boundary() {
        // 2025-01-15 is a Wednesday; its ISO week runs Mon 2025-01-13
        // through Sun 2025-01-19.
        let now = at("2025-01-15T12:00:00");
        let list = vec![
            tx("mon", ExpenseType::Expense, "Monday", "1", "X", Some("2025-01-13T00:00:00")),
            tx("sun-prev", ExpenseType::Expense, "Last Sunday", "1", "X", Some("2025-01-12T23:59:59")),
            tx("sun-end", ExpenseType::Expense, "Sunday night", "1", "X", Some("2025-01-19T23:59:59")),
            tx("next-mon", ExpenseType::Expense, "Next Monday", "1", "X", Some("2025-01-20T00:00:00")),
        ];
        let q = ListQuery {
            range: DateRange::ThisWeek,
            sort: SortOrder::DateAsc,
            ..query()
        };
        let view = run_query(&list, &q, now);
        let ids: Vec<&str> = view.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["mon", "sun-end"]);
    }

    #[test]
    fn test_ranges_reject_undated() {
        let list = vec![
            tx("a", ExpenseType::Expense, "A", "1", "X", None),
            tx("b", ExpenseType::Expense, "B", "1", "X", Some("not a date")),
        ];
        for range in [
            DateRange::Today,
            DateRange::ThisWeek,
            DateRange::ThisMonth,
            DateRange::ThisYear,
        ] {
            let q = ListQuery { range, ..query() };
            assert!(run_query(&list, &q, at("2025-01-15T12:00:00")).is_empty());
        }
        let all = ListQuery { range: DateRange::AllTime, ..query() };
        assert_eq!(run_query(&list, &all, at("2025-01-15T12:00:00")).len(), 2);
    }

    #[test]
    fn test_type_filter() {
        let list = vec![
            tx("a", ExpenseType::Income, "Salary", "100", "Job", Some("2025-01-10")),
            tx("b", ExpenseType::Expense, "Lunch", "10", "Food", Some("2025-01-10")),
        ];
        let q = ListQuery { type_filter: TypeFilter::Income, ..query() };
        let view = run_query(&list, &q, at("2025-01-15T12:00:00"));
        let ids: Vec<&str> = view.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_amount_asc_is_stable() {
        let list = vec![
            tx("fifty", ExpenseType::Expense, "A", "50", "X", None),
            tx("ten-1", ExpenseType::Expense, "B", "10", "X", None),
            tx("thirty", ExpenseType::Expense, "C", "30", "X", None),
            tx("ten-2", ExpenseType::Expense, "D", "10", "X", None),
        ];
        let q = ListQuery { sort: SortOrder::AmountAsc, ..query() };
        let view = run_query(&list, &q, at("2025-01-15T12:00:00"));
        let ids: Vec<&str> = view.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["ten-1", "ten-2", "thirty", "fifty"]);
    }

    #[test]
    fn test_date_sort_directions() {
        let list = vec![
            tx("mid", ExpenseType::Expense, "A", "1", "X", Some("2025-01-10")),
            tx("new", ExpenseType::Expense, "B", "1", "X", Some("2025-02-01")),
            tx("old", ExpenseType::Expense, "C", "1", "X", Some("2024-11-30")),
        ];
        let now = at("2025-02-02T00:00:00");

        let desc = run_query(&list, &ListQuery { sort: SortOrder::DateDesc, ..query() }, now);
        let ids: Vec<&str> = desc.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let asc = run_query(&list, &ListQuery { sort: SortOrder::DateAsc, ..query() }, now);
        let ids: Vec<&str> = asc.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_stage_composition() {
        let list = vec![
            tx("a", ExpenseType::Expense, "Groceries", "50", "Food", Some("2025-01-10")),
            tx("b", ExpenseType::Expense, "Groceries", "20", "Food", Some("2024-06-01")),
            tx("c", ExpenseType::Income, "Grocery refund", "5", "Food", Some("2025-01-12")),
        ];
        let q = ListQuery {
            search: Some("gro".to_string()),
            range: DateRange::ThisYear,
            type_filter: TypeFilter::Expense,
            sort: SortOrder::AmountAsc,
        };
        let view = run_query(&list, &q, at("2025-01-15T12:00:00"));
        let ids: Vec<&str> = view.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
