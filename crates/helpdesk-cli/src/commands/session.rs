use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use helpdesk_core::LOGIN_ROUTE;
use serde_json::json;
use tracing::warn;

use crate::app::App;
use crate::router::HOME_ROUTE;

pub async fn login(app: &mut App, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_email(app.config.last_email.as_deref())?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    // A 401 here is a bad password, not an expired session
    app.router.navigate(LOGIN_ROUTE);
    let user = app.auth.login(&email, &password).await.map_err(|e| {
        if e.is_unauthorized() {
            anyhow!("Invalid email or password")
        } else {
            anyhow::Error::from(e)
        }
    })?;
    app.router.navigate(HOME_ROUTE);

    app.config.last_email = Some(email);
    if let Err(e) = app.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    app.output
        .message(&format!("Logged in as {} <{}>", user.name, user.email));
    Ok(())
}

fn prompt_email(last_email: Option<&str>) -> Result<String> {
    match last_email {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let entered = line.trim();

    match (entered.is_empty(), last_email) {
        (false, _) => Ok(entered.to_string()),
        (true, Some(last)) => Ok(last.to_string()),
        (true, None) => bail!("Email is required"),
    }
}

pub fn logout(app: &App) -> Result<()> {
    app.auth.logout()?;
    app.router.navigate(LOGIN_ROUTE);
    app.output.message("Logged out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let user = app.auth.current_user().await?;
    app.output.item(&user)
}

/// Local view of the session; makes no backend call
pub fn status(app: &App) -> Result<()> {
    let state = app.api.session_state();
    let user = app.auth.cached_user();

    if app.output.is_json() {
        let status = json!({
            "session": state.to_string(),
            "apiBaseUrl": app.api.base_url(),
            "sessionBackend": app.config.session_backend().to_string(),
            "user": user,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Backend:  {}", app.api.base_url());
    println!("Storage:  {}", app.config.session_backend());
    println!("Session:  {}", state);
    if let Some(user) = user {
        println!("User:     {} <{}>", user.name, user.email);
    }
    Ok(())
}

pub async fn change_password(app: &App) -> Result<()> {
    let current = rpassword::prompt_password("Current password: ")?;
    let new = rpassword::prompt_password("New password: ")?;
    if new.is_empty() {
        bail!("New password must not be empty");
    }
    let confirm = rpassword::prompt_password("Repeat new password: ")?;
    if new != confirm {
        bail!("Passwords do not match");
    }

    app.auth.change_password(&current, &new).await?;
    app.output.message("Password changed");
    Ok(())
}
