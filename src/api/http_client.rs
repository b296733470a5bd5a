//! Implements the `TransactionApi` trait over HTTP with `reqwest`.

use crate::api::{LoginResponse, TransactionApi};
use crate::model::{Transaction, TransactionData};
use crate::Result;
use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

/// The HTTP client for a fintrack transactions/auth API.
pub(super) struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub(super) fn new(base_url: impl Into<String>, token: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attaches the bearer credential when a session token is held.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response> {
        debug!("request to {url}");
        let response = request
            .send()
            .await
            .with_context(|| format!("Unable to reach the API at {url}"))?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response)
    }

    async fn send_and_parse<T>(&self, request: reqwest::RequestBuilder, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, url).await?;
        response
            .json()
            .await
            .with_context(|| format!("Unable to parse the response from {url}"))
    }
}

#[async_trait::async_trait]
impl TransactionApi for HttpApi {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let url = self.url("/auth/register");
        let body = json!({ "name": name, "email": email, "password": password });
        let _ = self.send(self.client.post(&url).json(&body), &url).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url("/auth/login");
        let body = json!({ "email": email, "password": password });
        self.send_and_parse(self.client.post(&url).json(&body), &url)
            .await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let url = self.url("/transactions");
        self.send_and_parse(self.authorized(self.client.get(&url)), &url)
            .await
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction> {
        let url = self.url(&format!("/transactions/{id}"));
        self.send_and_parse(self.authorized(self.client.get(&url)), &url)
            .await
    }

    async fn create_transaction(&self, data: &TransactionData) -> Result<Transaction> {
        let url = self.url("/transactions");
        self.send_and_parse(self.authorized(self.client.post(&url).json(data)), &url)
            .await
    }

    async fn update_transaction(&self, id: &str, data: &TransactionData) -> Result<Transaction> {
        let url = self.url(&format!("/transactions/{id}"));
        self.send_and_parse(self.authorized(self.client.put(&url).json(data)), &url)
            .await
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/transactions/{id}"));
        let _ = self
            .send(self.authorized(self.client.delete(&url)), &url)
            .await?;
        Ok(())
    }
}

/// Builds the user-facing error for a non-2xx response: the `message` field
/// of a JSON error payload when there is one, otherwise the raw body,
/// otherwise the status line.
async fn error_from_response(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|payload| {
            payload
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        });
    anyhow!(message)
}
