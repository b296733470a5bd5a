//! Income, expense and balance totals over a transaction list.

use crate::model::{Amount, ExpenseType, Transaction};
use serde::Serialize;

/// The three headline numbers of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of amounts over income transactions.
    pub income: Amount,
    /// Sum of amounts over expense transactions.
    pub expenses: Amount,
    /// `income - expenses`, exactly. Can be negative.
    pub balance: Amount,
}

/// Sums `transactions` into income, expense and balance totals. An empty
/// list yields all zeros. No rounding is applied; two-decimal display is a
/// formatting concern.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Amount::ZERO;
    let mut expenses = Amount::ZERO;
    for t in transactions {
        match t.expense_type() {
            ExpenseType::Income => income += t.amount(),
            ExpenseType::Expense => expenses += t.amount(),
        }
    }
    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}
