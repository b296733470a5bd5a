//! These structs provide the CLI interface for the fintrack CLI.

use crate::model::{Amount, ExpenseType};
use crate::report::{DateRange, ListQuery, Period, SortOrder, TypeFilter};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: a command-line personal finance tracker.
///
/// Record income and expense transactions against a remote fintrack API and
/// view summaries, charts and filtered listings of them. Run `fintrack init`
/// once to create the data directory, then `fintrack register` and
/// `fintrack login` to start a session.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. It creates the fintrack
    /// home directory (see --fintrack-home) and writes a config.json
    /// pointing at your transactions API.
    Init(InitArgs),
    /// Create a new account on the remote API.
    Register(RegisterArgs),
    /// Sign in and persist the session locally.
    Login(LoginArgs),
    /// Clear the persisted session.
    Logout,
    /// Print the identity of the signed-in user.
    Whoami,
    /// Record a new transaction.
    Add(AddArgs),
    /// Edit an existing transaction. Fields you do not pass keep their
    /// current values.
    Update(UpdateArgs),
    /// Delete a transaction by id.
    Delete(IdArgs),
    /// Fetch and print a single transaction by id.
    Show(IdArgs),
    /// List transactions with search, date-range and type filters, sorted.
    List(ListArgs),
    /// Show totals, a charted series and the expense distribution for a
    /// period.
    Summary(SummaryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// none, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fintrack configuration and session data is held.
    /// Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    fintrack_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fintrack_home: PathBuf) -> Self {
        Self {
            log_level,
            fintrack_home: fintrack_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fintrack_home(&self) -> &DisplayPath {
        &self.fintrack_home
    }
}

/// Args for the `fintrack init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the transactions API.
    #[arg(long, default_value = crate::api::DEFAULT_API_URL)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `fintrack register` command.
#[derive(Debug, Parser, Clone)]
pub struct RegisterArgs {
    /// Your display name.
    #[arg(long)]
    name: String,

    /// The email address to register with.
    #[arg(long)]
    email: String,

    /// The password for the new account.
    #[arg(long)]
    password: String,
}

impl RegisterArgs {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Args for the `fintrack login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// The email address of the account.
    #[arg(long)]
    email: String,

    /// The account password.
    #[arg(long)]
    password: String,
}

impl LoginArgs {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Args for the `fintrack add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Whether this is money in or money out.
    #[arg(long = "type", value_enum, default_value_t = ExpenseType::Expense)]
    expense_type: ExpenseType,

    /// A short label for the transaction.
    #[arg(long)]
    title: String,

    /// The amount, e.g. 12.50. A leading '$' and thousands commas are
    /// accepted.
    #[arg(long, allow_negative_numbers = true)]
    amount: Amount,

    /// A free-text category label used for the expense distribution.
    #[arg(long)]
    category: String,

    /// The transaction date (ISO-8601, e.g. 2025-06-30 or
    /// 2025-06-30T14:05:00). Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// How the transaction was paid, e.g. "card".
    #[arg(long)]
    payment_method: Option<String>,

    /// Free-text notes.
    #[arg(long)]
    description: Option<String>,
}

impl AddArgs {
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
}

/// Args for the `fintrack update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the transaction to edit.
    id: String,

    /// Change whether this is money in or money out.
    #[arg(long = "type", value_enum)]
    expense_type: Option<ExpenseType>,

    /// Change the title.
    #[arg(long)]
    title: Option<String>,

    /// Change the amount.
    #[arg(long, allow_negative_numbers = true)]
    amount: Option<Amount>,

    /// Change the category label.
    #[arg(long)]
    category: Option<String>,

    /// Change the transaction date (ISO-8601).
    #[arg(long)]
    date: Option<String>,

    /// Change the payment method.
    #[arg(long)]
    payment_method: Option<String>,

    /// Change the description.
    #[arg(long)]
    description: Option<String>,
}

impl UpdateArgs {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expense_type(&self) -> Option<ExpenseType> {
        self.expense_type
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
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
}

/// Args for commands that take a single transaction id.
#[derive(Debug, Parser, Clone)]
pub struct IdArgs {
    /// The transaction id.
    id: String,
}

impl IdArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `fintrack list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Keep only transactions whose title, category or description contains
    /// this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Keep only transactions inside this date window.
    #[arg(long, value_enum, default_value_t)]
    range: DateRange,

    /// Keep only transactions of this type.
    #[arg(long = "type", value_enum, default_value_t)]
    type_filter: TypeFilter,

    /// The order of the listing.
    #[arg(long, value_enum, default_value_t)]
    sort: SortOrder,
}

impl ListArgs {
    pub fn new(
        search: Option<String>,
        range: DateRange,
        type_filter: TypeFilter,
        sort: SortOrder,
    ) -> Self {
        Self {
            search,
            range,
            type_filter,
            sort,
        }
    }

    /// The query these args describe.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            range: self.range,
            type_filter: self.type_filter,
            sort: self.sort,
        }
    }
}

/// Args for the `fintrack summary` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    /// The calendar window to summarize: day, month or year. Omit for
    /// all-time.
    #[arg(long, value_enum)]
    period: Option<Period>,
}

impl SummaryArgs {
    pub fn new(period: Option<Period>) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Option<Period> {
        self.period
    }
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fintrack-home or FINTRACK_HOME instead of relying on the \
                default fintrack home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("fintrack")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
