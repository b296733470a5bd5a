//! The `Transaction` type and its wire representation.

use crate::model::Amount;
use crate::Result;
use anyhow::bail;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Whether a transaction moves money in or out.
///
/// This is a closed enum: the remote API never omits it and no third value
/// exists. Every aggregate in the `report` module branches on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(ExpenseType);
serde_plain::derive_fromstr_from_deserialize!(ExpenseType);

/// A single recorded income or expense event, as stored by the remote API.
///
/// Field names follow the API's JSON (camelCase). The `date` is kept verbatim
/// as the string the server sent; use [`Transaction::timestamp`] to interpret
/// it. A missing or unparseable date excludes the transaction from every
/// period-scoped view while it remains visible in the unfiltered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier assigned by the remote store on creation. Some
    /// backends emit it as `_id`, so both spellings deserialize.
    #[serde(alias = "_id")]
    pub(crate) id: String,
    pub(crate) expense_type: ExpenseType,
    pub(crate) title: String,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl Transaction {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expense_type(&self) -> ExpenseType {
        self.expense_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The transaction's calendar date-time, if its `date` field is present
    /// and parseable. Returns `None` otherwise.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_timestamp)
    }

    /// Copies the editable fields into a [`TransactionData`], e.g. as the
    /// starting point for an update.
    pub fn data(&self) -> TransactionData {
        TransactionData {
            expense_type: self.expense_type,
            title: self.title.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date.clone(),
            payment_method: self.payment_method.clone(),
            description: self.description.clone(),
        }
    }

    /// Attaches an id to a [`TransactionData`], producing a full record. This
    /// is what the remote store does on creation.
    pub(crate) fn from_data(id: impl Into<String>, data: TransactionData) -> Self {
        Self {
            id: id.into(),
            expense_type: data.expense_type,
            title: data.title,
            amount: data.amount,
            category: data.category,
            date: data.date,
            payment_method: data.payment_method,
            description: data.description,
        }
    }
}

/// A transaction minus its id: the request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub expense_type: ExpenseType,
    pub title: String,
    pub amount: Amount,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionData {
    /// Client-side validation, run before any request is issued.
    ///
    /// # Errors
    /// - `title` or `category` is empty.
    /// - `amount` is negative (the sign belongs to `expense_type`).
    /// - `date` is present, non-empty, and not a recognized calendar form.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("A transaction title is required");
        }
        if self.category.trim().is_empty() {
            bail!("A transaction category is required");
        }
        if self.amount.is_negative() {
            bail!(
                "The amount must not be negative; use --type expense for money going out"
            );
        }
        if let Some(date) = self.date.as_deref() {
            if !date.trim().is_empty() && parse_timestamp(date).is_none() {
                bail!("Unrecognized date '{date}'; expected an ISO-8601 date such as 2025-06-30");
            }
        }
        Ok(())
    }
}

/// Parses a transaction date string into a local, naive date-time.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2025-06-30T14:05:00Z`), converted to local time
/// - `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds
/// - `YYYY-MM-DD HH:MM:SS` with optional fractional seconds
/// - `YYYY-MM-DD`, interpreted as local midnight
///
/// Returns `None` for anything else, including the empty string.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}
