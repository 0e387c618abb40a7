//! Session CLI commands
//!
//! Implements sign-up, sign-in, sign-out, and whoami.

use crate::config::Settings;
use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::Currency;
use crate::services::SessionService;
use crate::storage::Storage;

/// Handle the signup command
pub fn handle_signup(
    storage: &Storage,
    settings: &Settings,
    email: &str,
    currency: Option<String>,
    password: Option<String>,
) -> MoneyplanResult<()> {
    let currency = match currency {
        Some(code) => code
            .parse::<Currency>()
            .map_err(MoneyplanError::Validation)?,
        None => settings.default_currency,
    };

    let password = match password {
        Some(password) => password,
        None => prompt_new_password()?,
    };

    let service = SessionService::new(storage);
    let user = service.sign_up(email, &password, currency)?;

    println!("Account created: {}", user.email);
    println!(
        "  Currency: {} ({})",
        user.currency.code(),
        user.currency.symbol()
    );
    println!("You are now signed in.");

    Ok(())
}

/// Handle the signin command
pub fn handle_signin(
    storage: &Storage,
    email: &str,
    password: Option<String>,
) -> MoneyplanResult<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let service = SessionService::new(storage);
    let user = service.sign_in(email, &password)?;

    println!("Signed in as {}", user.email);

    Ok(())
}

/// Handle the signout command
pub fn handle_signout(storage: &Storage) -> MoneyplanResult<()> {
    let service = SessionService::new(storage);

    match service.sign_out()? {
        Some(email) => println!("Signed out {}", email),
        None => println!("No active session."),
    }

    Ok(())
}

/// Handle the whoami command
pub fn handle_whoami(storage: &Storage) -> MoneyplanResult<()> {
    let service = SessionService::new(storage);

    match service.current()? {
        Some(user) => {
            println!("Signed in as {}", user.email);
            println!(
                "  Currency: {} ({})",
                user.currency.code(),
                user.currency.symbol()
            );
        }
        None => println!("Not signed in."),
    }

    Ok(())
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> MoneyplanResult<String> {
    loop {
        let pass1 = prompt_password("Password: ")?;

        if pass1.is_empty() {
            println!("Password cannot be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_password("Confirm password: ")?;

        if pass1 != pass2 {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> MoneyplanResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| MoneyplanError::Io(format!("Failed to read password: {}", e)))
}
