//! Authentication command handlers.
//!
//! This module implements the CLI commands for:
//! - `fintrack register` - create an account on the remote API
//! - `fintrack login` - sign in and persist the session
//! - `fintrack logout` - clear the persisted session
//! - `fintrack whoami` - show the signed-in identity

use crate::api::{self, Mode};
use crate::args::{LoginArgs, RegisterArgs};
use crate::commands::Out;
use crate::{Config, Result, Session, User};
use anyhow::bail;

/// Handles the `fintrack register` command.
///
/// Validation happens before any request is issued; a failure from the API
/// (such as an already-registered email) is surfaced verbatim.
pub async fn register(config: &Config, mode: Mode, args: &RegisterArgs) -> Result<Out<()>> {
    if args.email().trim().is_empty() || !args.email().contains('@') {
        bail!("A valid email address is required");
    }
    if args.password().is_empty() {
        bail!("A password is required");
    }
    let client = api::client(config, None, mode);
    client
        .register(args.name(), args.email(), args.password())
        .await?;
    Ok(Out::new_message(
        "Registration successful. You can now log in.",
    ))
}

/// Handles the `fintrack login` command.
///
/// On success the bearer token and user identity are persisted together.
/// When the server's response carries no user record, a minimal identity
/// containing only the submitted email is synthesized and persisted instead.
pub async fn login(config: &Config, mode: Mode, args: &LoginArgs) -> Result<Out<User>> {
    let client = api::client(config, None, mode);
    let response = client.login(args.email(), args.password()).await?;
    let user = response
        .user
        .unwrap_or_else(|| User::new(None, args.email()));
    let session = Session::new(response.token, user.clone());
    session.save(config).await?;
    Ok(Out::new(
        format!("Logged in as {}. Welcome back!", user.display_name()),
        user,
    ))
}

/// Handles the `fintrack logout` command. The token and identity are cleared
/// together; logging out twice is not an error.
pub async fn logout(config: &Config) -> Result<Out<()>> {
    Session::clear(config).await?;
    Ok(Out::new_message("You have been logged out."))
}

/// Handles the `fintrack whoami` command.
pub async fn whoami(config: &Config) -> Result<Out<User>> {
    let session = Session::require(config).await?;
    let user = session.user().clone();
    let message = match user.name() {
        Some(name) => format!("{} <{}>", name, user.email()),
        None => user.email().to_string(),
    };
    Ok(Out::new(message, user))
}
