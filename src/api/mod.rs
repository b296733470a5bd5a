//! The client seam to the remote transactions/auth API.
//!
//! Commands talk to the API through the [`TransactionApi`] trait. The real
//! implementation speaks HTTP; a second, in-memory implementation backs the
//! test mode so the whole binary can run top-to-bottom without a server.

mod http_client;
mod test_client;

use crate::model::{Transaction, TransactionData};
use crate::session::User;
use crate::{Config, Result};
use serde::{Deserialize, Serialize};

#[cfg(test)]
pub(crate) use test_client::with_state;

/// The API URL written by `fintrack init` when none is given.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Selects which `TransactionApi` implementation backs the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Remote,
    Test,
}

impl Mode {
    /// This allows for exercising the program without a running server. When
    /// FINTRACK_IN_TEST_MODE is set and non-zero in length, then the mode
    /// will be `Mode::Test`, otherwise it will be `Mode::Remote`.
    pub fn from_env() -> Mode {
        match std::env::var("FINTRACK_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Remote,
        }
    }
}

/// A successful login: the bearer token, plus the user record when the
/// server includes one. Some deployments send only the token, in which case
/// the caller synthesizes a minimal identity from the submitted email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// The operations of the remote transactions/auth API.
///
/// Every transaction operation is a single request/response round trip; no
/// retries happen at this layer, and a failure leaves nothing half-applied
/// on the client.
#[async_trait::async_trait]
pub trait TransactionApi: Send + Sync {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()>;
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
    async fn get_transaction(&self, id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, data: &TransactionData) -> Result<Transaction>;
    async fn update_transaction(&self, id: &str, data: &TransactionData) -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<()>;
}

/// Creates an API client for `mode` against the configured base URL. The
/// token, when present, is sent as a bearer credential on transaction calls.
pub fn client(config: &Config, token: Option<&str>, mode: Mode) -> Box<dyn TransactionApi> {
    match mode {
        Mode::Remote => Box::new(http_client::HttpApi::new(config.api_url(), token)),
        Mode::Test => Box::new(test_client::TestApi::new(config.api_url(), token)),
    }
}
