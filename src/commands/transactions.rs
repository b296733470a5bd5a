//! Transaction mutation command handlers: add, update, delete, show.

use crate::api::{self, Mode};
use crate::args::{AddArgs, IdArgs, UpdateArgs};
use crate::commands::Out;
use crate::model::{Transaction, TransactionData};
use crate::{render, Config, Result, Session, TransactionStore};
use chrono::Local;

/// Handles the `fintrack add` command.
///
/// The transaction is validated before any request goes out; the id comes
/// back from the remote store. When no `--date` is given the transaction is
/// dated today.
pub async fn add(config: &Config, mode: Mode, args: &AddArgs) -> Result<Out<Transaction>> {
    let session = Session::require(config).await?;
    let data = TransactionData {
        expense_type: args.expense_type(),
        title: args.title().to_string(),
        amount: args.amount(),
        category: args.category().to_string(),
        date: Some(args.date().map(str::to_string).unwrap_or_else(today)),
        payment_method: args.payment_method().map(str::to_string),
        description: args.description().map(str::to_string),
    };
    data.validate()?;

    let mut store = store(config, &session, mode);
    let created = store.add(data).await?;
    Ok(Out::new(
        format!(
            "Added {} '{}' with id {}",
            created.expense_type(),
            created.title(),
            created.id()
        ),
        created,
    ))
}

/// Handles the `fintrack update` command.
///
/// The current record is fetched first and the given flags are laid over it,
/// so unspecified fields keep their values. The full record (minus the
/// immutable id) is then submitted.
pub async fn update(config: &Config, mode: Mode, args: &UpdateArgs) -> Result<Out<Transaction>> {
    let session = Session::require(config).await?;
    let mut store = store(config, &session, mode);

    let existing = store.get(args.id()).await?;
    let mut data = existing.data();
    if let Some(expense_type) = args.expense_type() {
        data.expense_type = expense_type;
    }
    if let Some(title) = args.title() {
        data.title = title.to_string();
    }
    if let Some(amount) = args.amount() {
        data.amount = amount;
    }
    if let Some(category) = args.category() {
        data.category = category.to_string();
    }
    if let Some(date) = args.date() {
        data.date = Some(date.to_string());
    }
    if let Some(payment_method) = args.payment_method() {
        data.payment_method = Some(payment_method.to_string());
    }
    if let Some(description) = args.description() {
        data.description = Some(description.to_string());
    }
    data.validate()?;

    let updated = store.update(args.id(), data).await?;
    Ok(Out::new(
        format!("Updated transaction {}", updated.id()),
        updated,
    ))
}

/// Handles the `fintrack delete` command.
pub async fn delete(config: &Config, mode: Mode, args: &IdArgs) -> Result<Out<()>> {
    let session = Session::require(config).await?;
    let mut store = store(config, &session, mode);
    store.delete(args.id()).await?;
    Ok(Out::new_message(format!(
        "Deleted transaction {}",
        args.id()
    )))
}

/// Handles the `fintrack show` command.
pub async fn show(config: &Config, mode: Mode, args: &IdArgs) -> Result<Out<Transaction>> {
    let session = Session::require(config).await?;
    let store = store(config, &session, mode);
    let transaction = store.get(args.id()).await?;
    Ok(Out::new(
        render::transaction_details(&transaction),
        transaction,
    ))
}

fn store(config: &Config, session: &Session, mode: Mode) -> TransactionStore {
    TransactionStore::new(api::client(config, Some(session.token()), mode))
}

/// Today's date in the form the API stores.
fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
