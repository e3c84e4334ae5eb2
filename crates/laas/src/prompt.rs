//! Interactive input: hidden password entry and yes/no confirmation.

use std::io::{BufRead, IsTerminal};

use secrecy::SecretString;

use crate::error::AppError;

/// Read a password from the terminal without echo.
///
/// # Errors
///
/// Returns [`AppError::Prompt`] if stdin is not a terminal or reading fails.
pub fn read_password(label: &str) -> Result<SecretString, AppError> {
    if !std::io::stdin().is_terminal() {
        return Err(AppError::Prompt(
            "no terminal for password entry; pass --password or --generate".into(),
        ));
    }
    eprint!("{label}: ");
    let password = rpassword::read_password()
        .map_err(|e| AppError::Prompt(format!("failed to read password: {e}")))?;
    Ok(SecretString::from(password))
}

/// Ask a yes/no question on stderr and read the answer from `input`.
///
/// Only `y` or `yes` (any case) count as consent.
///
/// # Errors
///
/// Returns [`AppError::Prompt`] if reading the answer fails.
pub fn confirm(question: &str, input: &mut impl BufRead) -> Result<bool, AppError> {
    eprint!("{question} [y/N] ");
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| AppError::Prompt(format!("failed to read answer: {e}")))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
