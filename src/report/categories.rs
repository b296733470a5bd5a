//! Expense distribution by category label.

use crate::model::{Amount, ExpenseType, Transaction};
use serde::Serialize;
use std::collections::HashMap;

/// An expense category and the summed amount spent in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

/// Sums expense amounts per category label. Income transactions are ignored.
///
/// Categories appear in order of first appearance; callers wanting a sorted
/// distribution re-sort the result. The category label is free text, so an
/// empty string is a legitimate key and is kept, not dropped.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryTotal> = Vec::new();

    for t in transactions {
        if t.expense_type() != ExpenseType::Expense {
            continue;
        }
        match index.get(t.category()) {
            Some(&i) => groups[i].total += t.amount(),
            None => {
                index.insert(t.category().to_string(), groups.len());
                groups.push(CategoryTotal {
                    category: t.category().to_string(),
                    total: t.amount(),
                });
            }
        }
    }
    groups
}
