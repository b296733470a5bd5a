//! Implements the `TransactionApi` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so
//! that we can run the whole app, top-to-bottom, without a server. State is
//! held in a process-wide map keyed by API URL, so the separate client
//! instances created over the course of one invocation all see the same
//! data, and tests isolate themselves by using distinct URLs.

use crate::api::{LoginResponse, TransactionApi};
use crate::model::{Transaction, TransactionData};
use crate::session::User;
use crate::Result;
use anyhow::{anyhow, bail};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

/// An implementation of the `TransactionApi` trait that does not use a
/// server. It enforces token authentication and produces the same error
/// messages a server would, so the command layer cannot tell it apart from
/// the real thing.
pub(crate) struct TestApi {
    api_url: String,
    token: Option<String>,
}

impl TestApi {
    pub(crate) fn new(api_url: impl Into<String>, token: Option<&str>) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.map(str::to_string),
        }
    }

    /// Fails the way a server would when the bearer token is missing or not
    /// one it issued.
    fn authorize(&self, state: &TestState) -> Result<()> {
        let token = self.token.as_deref().ok_or_else(|| anyhow!("Not authorized"))?;
        if !state.tokens.contains_key(token) {
            bail!("Not authorized");
        }
        Ok(())
    }
}

/// The in-memory data behind one API URL.
#[derive(Debug, Default, Clone)]
pub(crate) struct TestState {
    /// Registered users, keyed by email.
    pub(crate) users: HashMap<String, TestUser>,
    /// Issued bearer tokens, mapped to the owning email.
    pub(crate) tokens: HashMap<String, String>,
    /// The transaction collection.
    pub(crate) transactions: Vec<Transaction>,
}

#[derive(Debug, Clone)]
pub(crate) struct TestUser {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

/// Runs `f` with exclusive access to the state behind `api_url`, creating
/// empty state on first use.
pub(crate) fn with_state<T>(api_url: &str, f: impl FnOnce(&mut TestState) -> T) -> T {
    let mut map = lock();
    let state = map.entry(api_url.to_string()).or_default();
    f(state)
}

fn lock() -> MutexGuard<'static, HashMap<String, TestState>> {
    static STATE: OnceLock<Mutex<HashMap<String, TestState>>> = OnceLock::new();
    let mutex = STATE.get_or_init(Mutex::default);
    // A poisoned lock only means another test panicked; the data is still
    // usable.
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait::async_trait]
impl TransactionApi for TestApi {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        with_state(&self.api_url, |state| {
            if state.users.contains_key(email) {
                bail!("A user with this email already exists");
            }
            state.users.insert(
                email.to_string(),
                TestUser {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                },
            );
            Ok(())
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        with_state(&self.api_url, |state| {
            let user = state
                .users
                .get(email)
                .filter(|u| u.password == password)
                .ok_or_else(|| anyhow!("Invalid credentials"))?
                .clone();
            let token = Uuid::new_v4().simple().to_string();
            state.tokens.insert(token.clone(), email.to_string());
            // A user registered with an empty name gets a token-only
            // response, which exercises the caller's identity fallback.
            let identity = (!user.name.is_empty())
                .then(|| User::new(Some(user.name.clone()), &user.email));
            Ok(LoginResponse {
                token,
                user: identity,
            })
        })
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        with_state(&self.api_url, |state| {
            self.authorize(state)?;
            Ok(state.transactions.clone())
        })
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction> {
        with_state(&self.api_url, |state| {
            self.authorize(state)?;
            state
                .transactions
                .iter()
                .find(|t| t.id() == id)
                .cloned()
                .ok_or_else(|| anyhow!("Transaction not found"))
        })
    }

    async fn create_transaction(&self, data: &TransactionData) -> Result<Transaction> {
        with_state(&self.api_url, |state| {
            self.authorize(state)?;
            let id = format!("tx{}", Uuid::new_v4().simple());
            let created = Transaction::from_data(id, data.clone());
            state.transactions.push(created.clone());
            Ok(created)
        })
    }

    async fn update_transaction(&self, id: &str, data: &TransactionData) -> Result<Transaction> {
        with_state(&self.api_url, |state| {
            self.authorize(state)?;
            let slot = state
                .transactions
                .iter_mut()
                .find(|t| t.id() == id)
                .ok_or_else(|| anyhow!("Transaction not found"))?;
            *slot = Transaction::from_data(id, data.clone());
            Ok(slot.clone())
        })
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        with_state(&self.api_url, |state| {
            self.authorize(state)?;
            let before = state.transactions.len();
            state.transactions.retain(|t| t.id() != id);
            if state.transactions.len() == before {
                bail!("Transaction not found");
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, ExpenseType};
    use std::str::FromStr;

    fn unique_url() -> String {
        format!("http://localhost:5000/{}/api", Uuid::new_v4().simple())
    }

    fn data(title: &str) -> TransactionData {
        TransactionData {
            expense_type: ExpenseType::Expense,
            title: title.to_string(),
            amount: Amount::from_str("10").unwrap(),
            category: "Misc".to_string(),
            date: Some("2025-01-15".to_string()),
            payment_method: None,
            description: None,
        }
    }

    async fn logged_in(url: &str) -> TestApi {
        let anon = TestApi::new(url, None);
        anon.register("Pat", "pat@example.com", "hunter2").await.unwrap();
        let response = anon.login("pat@example.com", "hunter2").await.unwrap();
        TestApi::new(url, Some(&response.token))
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let url = unique_url();
        let api = TestApi::new(&url, None);
        api.register("Pat", "pat@example.com", "hunter2").await.unwrap();
        let err = api.register("Pat", "pat@example.com", "hunter2").await;
        assert!(err.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let url = unique_url();
        let api = TestApi::new(&url, None);
        api.register("Pat", "pat@example.com", "hunter2").await.unwrap();
        let err = api.login("pat@example.com", "wrong").await;
        assert_eq!(err.unwrap_err().to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_with_empty_name_omits_user() {
        let url = unique_url();
        let api = TestApi::new(&url, None);
        api.register("", "ghost@example.com", "pw").await.unwrap();
        let response = api.login("ghost@example.com", "pw").await.unwrap();
        assert!(response.user.is_none());
    }

    #[tokio::test]
    async fn test_transactions_require_token() {
        let url = unique_url();
        let api = TestApi::new(&url, None);
        assert!(api.list_transactions().await.is_err());
        let api = TestApi::new(&url, Some("made-up-token"));
        assert!(api.list_transactions().await.is_err());
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let url = unique_url();
        let api = logged_in(&url).await;

        let created = api.create_transaction(&data("Lunch")).await.unwrap();
        assert!(!created.id().is_empty());
        assert_eq!(api.list_transactions().await.unwrap().len(), 1);

        let mut change = data("Dinner");
        change.amount = Amount::from_str("25").unwrap();
        let updated = api.update_transaction(created.id(), &change).await.unwrap();
        assert_eq!(updated.title(), "Dinner");
        assert_eq!(updated.id(), created.id());

        let fetched = api.get_transaction(created.id()).await.unwrap();
        assert_eq!(fetched, updated);

        api.delete_transaction(created.id()).await.unwrap();
        assert!(api.list_transactions().await.unwrap().is_empty());
        assert!(api.get_transaction(created.id()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_id_errors() {
        let url = unique_url();
        let api = logged_in(&url).await;
        assert!(api.get_transaction("nope").await.is_err());
        assert!(api.update_transaction("nope", &data("X")).await.is_err());
        assert!(api.delete_transaction("nope").await.is_err());
    }
}
