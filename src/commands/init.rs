//! The `fintrack init` command handler.

use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the fintrack home directory at `home` and writes the initial
/// configuration pointing at `api_url`.
///
/// # Errors
/// Returns an error if `api_url` is invalid or a file operation fails.
pub async fn init(home: &Path, api_url: &str) -> Result<Out<()>> {
    let config = Config::create(home, api_url).await?;
    Ok(Out::new_message(format!(
        "Initialized fintrack home at '{}' using the API at {}",
        config.root().display(),
        config.api_url()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_home() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home, "http://localhost:5000/api").await.unwrap();
        assert!(out.message().contains("Initialized fintrack home"));
        assert!(Config::load(&home).await.is_ok());
    }
}
