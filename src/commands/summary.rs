//! The `fintrack summary` command handler: the dashboard view.

use crate::api::{self, Mode};
use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::report::{self, Bucket, CategoryTotal, Period, Totals};
use crate::{render, Config, Result, Session, TransactionStore};
use chrono::Local;
use serde::Serialize;

/// Everything the dashboard shows for one period: the headline totals, the
/// income-vs-expense series, the expense distribution, and the most recent
/// transactions of the period.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub period: Option<Period>,
    pub totals: Totals,
    pub series: Vec<Bucket>,
    pub categories: Vec<CategoryTotal>,
    pub recent: Vec<Transaction>,
}

/// How many transactions the "recent" section shows.
const RECENT_COUNT: usize = 5;

/// Handles the `fintrack summary` command.
///
/// Fetches the snapshot, narrows it to the selected period, and derives all
/// the dashboard views from the narrowed list. With no `--period` the whole
/// history is summarized.
pub async fn summary(config: &Config, mode: Mode, args: &SummaryArgs) -> Result<Out<Summary>> {
    let session = Session::require(config).await?;
    let mut store = TransactionStore::new(api::client(config, Some(session.token()), mode));
    store.refresh().await?;

    let now = Local::now().naive_local();
    let scoped = report::filter_by_period(store.transactions(), args.period(), now);

    let summary = Summary {
        period: args.period(),
        totals: report::totals(&scoped),
        series: report::bucketize(&scoped, args.period()),
        categories: report::expenses_by_category(&scoped),
        recent: scoped.iter().take(RECENT_COUNT).cloned().collect(),
    };
    let message = render::summary_text(&summary, session.user());
    Ok(Out::new(message, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseType;
    use crate::test::{tx, TestEnv};
    use std::str::FromStr;

    fn today(time: &str) -> String {
        format!("{}T{time}", Local::now().date_naive().format("%Y-%m-%d"))
    }

    #[tokio::test]
    async fn test_summary_day_totals_and_series() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;
        env.seed_transactions(vec![
            tx("a", ExpenseType::Income, "Tips", "35", "Job", Some(&today("09:12:00"))),
            tx("b", ExpenseType::Expense, "Dinner", "20", "Food", Some(&today("14:00:00"))),
            tx("c", ExpenseType::Expense, "Old", "99", "Misc", Some("2001-01-01")),
        ]);

        let args = SummaryArgs::new(Some(Period::Day));
        let out = summary(&config, Mode::Test, &args).await.unwrap();
        let s = out.structure().unwrap();

        assert_eq!(s.totals.income, crate::model::Amount::from_str("35").unwrap());
        assert_eq!(s.totals.expenses, crate::model::Amount::from_str("20").unwrap());
        assert_eq!(s.totals.balance, crate::model::Amount::from_str("15").unwrap());

        let labels: Vec<&str> = s.series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["9 am", "2 pm"]);
        assert_eq!(s.recent.len(), 2);
        assert!(out.message().contains("Total income"));
    }

    #[tokio::test]
    async fn test_summary_all_time_includes_undated() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;
        env.seed_transactions(vec![
            tx("a", ExpenseType::Expense, "Undated", "10", "Misc", None),
            tx("b", ExpenseType::Expense, "Dated", "5", "Misc", Some("2001-01-01")),
        ]);

        let out = summary(&config, Mode::Test, &SummaryArgs::new(None)).await.unwrap();
        let s = out.structure().unwrap();

        // Undated entries count toward totals but produce no bucket.
        assert_eq!(s.totals.expenses, crate::model::Amount::from_str("15").unwrap());
        assert_eq!(s.series.len(), 1);
        assert_eq!(s.categories.len(), 1);
        assert_eq!(s.categories[0].total, crate::model::Amount::from_str("15").unwrap());
    }

    #[tokio::test]
    async fn test_summary_empty_period_message() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;
        env.seed_transactions(vec![tx(
            "a",
            ExpenseType::Expense,
            "Old",
            "99",
            "Misc",
            Some("2001-01-01"),
        )]);

        let out = summary(&config, Mode::Test, &SummaryArgs::new(Some(Period::Day)))
            .await
            .unwrap();
        assert!(out.message().contains("No transaction data available"));
    }
}
