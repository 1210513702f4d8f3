//! Session gate: establish a login session before the workflow starts.
//!
//! The session credential itself is a cookie held by the transport; this
//! module only cares that "a session is established".

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use crate::api::{ApiClient, SessionUser};
use crate::error::ApiError;
use crate::ui::style::success;

use super::view::{print_bullet, print_error};

/// Prompt for login or signup until a session is established.
pub async fn ensure_session(api: &ApiClient) -> Result<SessionUser> {
    print_bullet("Sign in to your salonpost account.");
    println!();

    loop {
        let choice = Select::new()
            .with_prompt("  Log in or create an account?")
            .items(&["Log in", "Sign up"])
            .default(0)
            .interact()?;

        match attempt(api, choice == 1).await {
            Ok(user) => {
                println!(
                    "  {} signed in as {}",
                    success("✓"),
                    success(&user.email)
                );
                return Ok(user);
            }
            Err(e) => print_error(&e.to_string()),
        }
    }
}

async fn attempt(api: &ApiClient, signup: bool) -> Result<SessionUser, anyhow::Error> {
    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password = Password::new().with_prompt("  Password").interact()?;

    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::AuthRequired {
            message: Some("email and password are required".into()),
        }
        .into());
    }

    let user = if signup {
        api.signup(email.trim(), &password).await?
    } else {
        api.login(email.trim(), &password).await?
    };
    Ok(user)
}

/// One-shot variants (no retry loop) used by the `login` / `signup`
/// subcommands.
pub async fn login_once(api: &ApiClient) -> Result<SessionUser> {
    attempt(api, false).await
}

pub async fn signup_once(api: &ApiClient) -> Result<SessionUser> {
    attempt(api, true).await
}
