//! Plain-text rendering of listings and summaries.
//!
//! Rounding to two decimals happens here, at the presentation layer; the
//! `report` functions keep full precision.

use crate::commands::Summary;
use crate::model::Transaction;
use crate::report::Period;
use crate::User;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Renders transactions as an aligned table: id, date, type, title,
/// category and amount.
pub(crate) fn transaction_table(transactions: &[Transaction]) -> String {
    let mut rows: Vec<[String; 6]> = vec![[
        "ID".to_string(),
        "Date".to_string(),
        "Type".to_string(),
        "Title".to_string(),
        "Category".to_string(),
        "Amount".to_string(),
    ]];
    for t in transactions {
        rows.push([
            t.id().to_string(),
            date_cell(t),
            t.expense_type().to_string(),
            t.title().to_string(),
            t.category().to_string(),
            format!("${}", t.amount()),
        ]);
    }

    let mut widths = [0usize; 6];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i == row.len() - 1 {
                // The amount column is right-aligned.
                let _ = write!(line, "{cell:>width$}", width = widths[i]);
            } else {
                let _ = write!(line, "{cell:<width$}  ", width = widths[i]);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.pop();
    out
}

/// Renders one transaction as a field-per-line block.
pub(crate) fn transaction_details(t: &Transaction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transaction {}", t.id());
    let _ = writeln!(out, "  Type:           {}", t.expense_type());
    let _ = writeln!(out, "  Title:          {}", t.title());
    let _ = writeln!(out, "  Amount:         ${}", t.amount());
    let _ = writeln!(out, "  Category:       {}", t.category());
    let _ = writeln!(out, "  Date:           {}", t.date().unwrap_or("N/A"));
    if let Some(payment_method) = t.payment_method() {
        let _ = writeln!(out, "  Payment method: {payment_method}");
    }
    if let Some(description) = t.description() {
        let _ = writeln!(out, "  Description:    {description}");
    }
    out.pop();
    out
}

/// Renders the dashboard: totals, the income-vs-expense series, the expense
/// distribution with percentage shares, and the recent transactions.
pub(crate) fn summary_text(summary: &Summary, user: &User) -> String {
    let phrase = period_phrase(summary.period);
    if summary.recent.is_empty() {
        return format!(
            "No transaction data available for the selected period ({phrase}). \
            Try adding some transactions or adjusting the filter."
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "Financial overview for {} ({phrase})", user.display_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total income:   ${}", summary.totals.income);
    let _ = writeln!(out, "  Total expenses: ${}", summary.totals.expenses);
    let _ = writeln!(out, "  Net balance:    ${}", summary.totals.balance);

    if !summary.series.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Income vs expense:");
        let width = summary
            .series
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        for bucket in &summary.series {
            let _ = writeln!(
                out,
                "  {label:<width$}  income ${income}  expense ${expense}",
                label = bucket.label,
                income = bucket.income,
                expense = bucket.expense,
            );
        }
    }

    if !summary.categories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Expense categories:");
        let total = summary.totals.expenses.value();
        let width = summary
            .categories
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0);
        for group in &summary.categories {
            let _ = writeln!(
                out,
                "  {label:<width$}  ${amount}  ({share}%)",
                label = group.category,
                amount = group.total,
                share = percent(group.total.value(), total),
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recent transactions:");
    out.push_str(&transaction_table(&summary.recent));
    out
}

fn date_cell(t: &Transaction) -> String {
    match t.timestamp() {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => t.date().unwrap_or("N/A").to_string(),
    }
}

fn period_phrase(period: Option<Period>) -> &'static str {
    match period {
        Some(Period::Day) => "today",
        Some(Period::Month) => "this month",
        Some(Period::Year) => "this year",
        None => "all time",
    }
}

/// The whole-number percentage share of `part` in `total`, zero when the
/// total is zero.
fn percent(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / total).round()
}
