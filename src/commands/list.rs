//! The `fintrack list` command handler: the full-listing view.

use crate::api::{self, Mode};
use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::report;
use crate::{render, Config, Result, Session, TransactionStore};
use chrono::Local;

/// Handles the `fintrack list` command.
///
/// Fetches the current snapshot and runs the query engine over it: search,
/// date range, type filter, then a stable sort.
pub async fn list(config: &Config, mode: Mode, args: &ListArgs) -> Result<Out<Vec<Transaction>>> {
    let session = Session::require(config).await?;
    let mut store = TransactionStore::new(api::client(config, Some(session.token()), mode));
    store.refresh().await?;

    let now = Local::now().naive_local();
    let view = report::run_query(store.transactions(), &args.query(), now);

    let message = if view.is_empty() {
        "No transactions found. Nothing here yet, or your filters cleared the list.".to_string()
    } else {
        render::transaction_table(&view)
    };
    Ok(Out::new(message, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseType;
    use crate::report::{DateRange, SortOrder, TypeFilter};
    use crate::test::{tx, TestEnv};

    fn seed(env: &TestEnv) {
        env.seed_transactions(vec![
            tx("a", ExpenseType::Expense, "Groceries", "50", "Food", Some("2025-01-10")),
            tx("b", ExpenseType::Expense, "Rent", "900", "Home", Some("2025-01-01")),
            tx("c", ExpenseType::Income, "Salary", "2500", "Job", Some("2025-01-05")),
        ]);
    }

    #[tokio::test]
    async fn test_list_search_filters_titles() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;
        seed(&env);

        let args = ListArgs::new(
            Some("gro".to_string()),
            DateRange::AllTime,
            TypeFilter::All,
            SortOrder::DateDesc,
        );
        let out = list(&config, Mode::Test, &args).await.unwrap();
        let view = out.structure().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title(), "Groceries");
        assert!(out.message().contains("Groceries"));
    }

    #[tokio::test]
    async fn test_list_sorts_by_amount() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;
        seed(&env);

        let args = ListArgs::new(None, DateRange::AllTime, TypeFilter::All, SortOrder::AmountAsc);
        let out = list(&config, Mode::Test, &args).await.unwrap();
        let amounts: Vec<String> = out
            .structure()
            .unwrap()
            .iter()
            .map(|t| t.amount().to_string())
            .collect();
        assert_eq!(amounts, vec!["50.00", "900.00", "2,500.00"]);
    }

    #[tokio::test]
    async fn test_list_empty_message() {
        let env = TestEnv::new().await;
        let config = env.config();
        env.login().await;

        let args = ListArgs::default();
        let out = list(&config, Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("No transactions found"));
    }
}
