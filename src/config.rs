//! Configuration file handling for fintrack.
//!
//! The configuration file is stored at `$FINTRACK_HOME/config.json` and
//! contains the base URL of the transactions API. The same home directory
//! also holds the persisted session (see the `session` module).

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fintrack";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$FINTRACK_HOME` and from there it
/// loads `$FINTRACK_HOME/config.json`. It provides the paths to the other
/// items expected in certain locations within the fintrack home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and its subdirectory, and writes an
    /// initial `config.json` pointing at `api_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory,
    ///   e.g. `$HOME/fintrack`
    /// - `api_url` - The base URL of the transactions API, e.g.
    ///   `http://localhost:5000/api`
    ///
    /// # Errors
    /// - Returns an error if `api_url` is not a valid URL.
    /// - Returns an error if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, api_url: &str) -> Result<Self> {
        let _ = url::Url::parse(api_url)
            .with_context(|| format!("'{api_url}' is not a valid API URL"))?;

        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fintrack home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;

        // Create the subdirectory that holds the session file
        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        // Create and save an initial ConfigFile in the data directory
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.trim_end_matches('/').to_string(),
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the `fintrack_home` exists and that the config file
    ///   exists
    /// - load the config file
    /// - validate that the secrets directory exists
    /// - return the loaded configuration object
    pub async fn load(fintrack_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fintrack_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Fintrack home is missing, run 'fintrack init' first")?;

        // Validate that the home directory exists.
        let _ = utils::read_dir(&root)
            .await
            .context("Fintrack home is missing, run 'fintrack init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'fintrack init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            root: root.clone(),
            secrets: root.join(SECRETS),
            config_path,
            config_file,
        };
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn api_url(&self) -> &str {
        &self.config_file.api_url
    }

    /// The fixed path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.secrets.join(SESSION_JSON)
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fintrack",
///   "config_version": 1,
///   "api_url": "http://localhost:5000/api"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fintrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the transactions API
    api_url: String,
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("fintrack_home");
        let api_url = "http://localhost:5000/api";

        let config = Config::create(&home_dir, api_url).await.unwrap();

        assert_eq!(api_url, config.api_url());
        assert!(config.secrets().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(config.session_path(), config.secrets().join("session.json"));
    }

    #[tokio::test]
    async fn test_config_create_strips_trailing_slash() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home"), "http://example.com/api/")
            .await
            .unwrap();
        assert_eq!("http://example.com/api", config.api_url());
    }

    #[tokio::test]
    async fn test_config_create_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let result = Config::create(dir.path().join("home"), "not a url").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("home");
        let created = Config::create(&home_dir, "http://localhost:5000/api")
            .await
            .unwrap();

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(created.api_url(), loaded.api_url());
        assert_eq!(created.root(), loaded.root());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nothing-here")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("home");
        Config::create(&home_dir, "http://localhost:5000/api")
            .await
            .unwrap();

        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "api_url": "http://localhost:5000/api"
        }"#;
        std::fs::write(home_dir.join("config.json"), json).unwrap();

        let result = Config::load(&home_dir).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }
}
