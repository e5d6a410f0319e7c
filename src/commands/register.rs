//! Register user command

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;
use task_manager::error::Error;

/// Prompt until a new, confirmed username/password pair is registered
pub fn execute<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<()> {
    loop {
        let username = console.ask("Please enter a new username: ")?;
        if session.credentials.contains(&username) {
            console.say("This username already exists. Please choose another one.\n")?;
            continue;
        }

        let password = console.ask("Please enter a new password: ")?;
        let confirmation = console.ask("Please confirm the password: ")?;

        match session
            .credentials
            .register(&username, &password, &confirmation)
        {
            Ok(()) => {
                console.say(format!("{}\n", "New user was registered successfully!".green()))?;
                return Ok(());
            }
            Err(Error::PasswordMismatch) => {
                console.say("Passwords do not match. Please try again.\n")?;
            }
            Err(Error::InvalidCredential(_)) => {
                console.say(
                    "Usernames cannot be empty or contain \", \"; passwords cannot span lines.\n",
                )?;
            }
            Err(Error::UsernameTaken(_)) => {
                console.say("This username already exists. Please choose another one.\n")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
