//! The persisted authenticated session.
//!
//! A successful login produces a bearer token and a user identity; both are
//! written together to a single JSON file at a fixed path inside the
//! fintrack home directory, read back on every invocation that needs
//! authentication, and deleted together on logout.

use crate::{utils, Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The identity of the signed-in user.
///
/// When the login response carries no user record, a minimal identity holding
/// only the submitted email is synthesized, so `name` is optional.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
}

impl User {
    pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            name,
            email: email.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The name when one is known, the email otherwise. This is what greeting
    /// and `whoami` output show.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A bearer token and the identity it belongs to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Loads the persisted session, or returns `None` when no session file
    /// exists (i.e. nobody is logged in).
    pub async fn load(config: &Config) -> Result<Option<Session>> {
        let path = config.session_path();
        if !path.is_file() {
            return Ok(None);
        }
        let session = utils::deserialize(&path)
            .await
            .context("The session file is unreadable, try 'fintrack login' again")?;
        Ok(Some(session))
    }

    /// Loads the persisted session, failing when nobody is logged in.
    pub async fn require(config: &Config) -> Result<Session> {
        Session::load(config)
            .await?
            .context("You are not logged in, run 'fintrack login' first")
    }

    /// Persists this session to its fixed path.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let data =
            serde_json::to_string_pretty(self).context("Unable to serialize the session")?;
        utils::write(config.session_path(), data)
            .await
            .context("Unable to write the session file")
    }

    /// Removes any persisted session. Token and identity go together; there
    /// is no partial logout.
    pub async fn clear(config: &Config) -> Result<()> {
        utils::remove_file_if_exists(&config.session_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home"), "http://localhost:5000/api")
            .await
            .unwrap();
        (dir, config)
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let (_dir, config) = config().await;
        let session = Session::new(
            "token-123",
            User::new(Some("Maria".to_string()), "maria@example.com"),
        );
        session.save(&config).await.unwrap();

        let loaded = Session::load(&config).await.unwrap().unwrap();
        assert_eq!(session, loaded);
        assert_eq!(loaded.user().display_name(), "Maria");
    }

    #[tokio::test]
    async fn test_load_when_not_logged_in() {
        let (_dir, config) = config().await;
        assert!(Session::load(&config).await.unwrap().is_none());
        assert!(Session::require(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_clear_removes_token_and_identity_together() {
        let (_dir, config) = config().await;
        let session = Session::new("token-123", User::new(None, "maria@example.com"));
        session.save(&config).await.unwrap();

        Session::clear(&config).await.unwrap();
        assert!(Session::load(&config).await.unwrap().is_none());

        // Clearing again is not an error.
        Session::clear(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_synthesized_identity_displays_email() {
        let user = User::new(None, "solo@example.com");
        assert_eq!(user.display_name(), "solo@example.com");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("name"));
    }
}
