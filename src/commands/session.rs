//! Interactive session: login loop and menu dispatcher

use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::{add, delete, register, reports, view};
use task_manager::config::DataPaths;
use task_manager::store::{AuthFailure, CredentialStore, TaskStore};

/// Username that is granted admin rights
///
/// Any account with exactly this name is elevated; the credential file
/// carries no role of its own.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn for_username(username: &str) -> Self {
        if username == ADMIN_USERNAME {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// One menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Register,
    AddTask,
    ViewAll,
    ViewMine,
    ViewCompleted,
    Delete,
    DisplayStatistics,
    GenerateReports,
    Exit,
}

impl MenuCommand {
    /// Parse a command token, ignoring case and surrounding whitespace
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "r" => Some(Self::Register),
            "a" => Some(Self::AddTask),
            "va" => Some(Self::ViewAll),
            "vm" => Some(Self::ViewMine),
            "vc" => Some(Self::ViewCompleted),
            "del" => Some(Self::Delete),
            "ds" => Some(Self::DisplayStatistics),
            "gr" => Some(Self::GenerateReports),
            "e" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Message shown when a non-admin tries an admin-only command
    fn admin_rejection(self) -> Option<&'static str> {
        match self {
            Self::Register => Some("Only admin is allowed to register new users."),
            Self::DisplayStatistics => Some("Only admin is allowed to view statistics."),
            Self::GenerateReports => Some("Only admin can generate reports."),
            _ => None,
        }
    }
}

const ADMIN_MENU: &str = "Please select one of the following options:
    r - register a user
    a - add task
    va - view all tasks
    vm - view my tasks
    vc - view completed tasks
    del - delete tasks
    ds - display statistics
    gr - generate reports
    e - exit
    : ";

const USER_MENU: &str = "Please select one of the following options:
    a - add task
    va - view all tasks
    vm - view my tasks
    e - exit
    : ";

/// State carried between menu iterations
pub struct Session {
    pub paths: DataPaths,
    pub credentials: CredentialStore,
    pub username: String,
    pub role: Role,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Session {
    pub fn new(paths: DataPaths, credentials: CredentialStore, username: String) -> Self {
        let role = Role::for_username(&username);
        Self {
            paths,
            credentials,
            username,
            role,
            clock: local_today,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn tasks(&self) -> TaskStore {
        TaskStore::new(self.paths.tasks_file())
    }
}

/// Whether the menu loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Load credentials, log in, and run the menu until the user exits
pub fn execute<R: BufRead, W: Write>(console: &mut Console<R, W>, paths: DataPaths) -> Result<()> {
    let credentials = CredentialStore::load(paths.users_file())?;
    if !credentials.found() {
        console.say(format!(
            "{} {} could not be found.\n",
            "Error.".red(),
            paths.users_file().display()
        ))?;
    }

    let username = login(console, &credentials)?;
    tracing::debug!(%username, "logged in");

    let mut session = Session::new(paths, credentials, username);
    run_menu(console, &mut session)
}

/// Prompt for credentials until they match a known user
pub fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    credentials: &CredentialStore,
) -> Result<String> {
    loop {
        let username = console.ask("Enter your username: ")?;
        let password = console.ask("Enter your password: ")?;

        match credentials.authenticate(&username, &password) {
            Ok(()) => {
                console.say(format!("{}\n", "Login was successful!".green()))?;
                return Ok(username);
            }
            Err(AuthFailure::UnknownUser) => {
                console.say("Username not found. Please try again.\n")?;
            }
            Err(AuthFailure::WrongPassword) => {
                console.say("Incorrect password. Please try again.\n")?;
            }
        }
    }
}

/// Menu loop for an authenticated session
pub fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<()> {
    loop {
        let menu = match session.role {
            Role::Admin => ADMIN_MENU,
            Role::User => USER_MENU,
        };
        let token = console.ask(menu)?;

        let flow = match MenuCommand::parse(&token) {
            Some(command) => dispatch(console, session, command)?,
            None => {
                console.say("Invalid input. Please try again.\n")?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            return Ok(());
        }
    }
}

/// Run one command on behalf of the session
pub fn dispatch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
    command: MenuCommand,
) -> Result<Flow> {
    if session.role != Role::Admin {
        if let Some(message) = command.admin_rejection() {
            console.say(format!("{}\n", message.red()))?;
            return Ok(Flow::Continue);
        }
    }

    tracing::debug!(?command, user = %session.username, "dispatching");

    match command {
        MenuCommand::Register => register::execute(console, session)?,
        MenuCommand::AddTask => add::execute(console, session)?,
        MenuCommand::ViewAll => view::view_all(console, session)?,
        MenuCommand::ViewMine => view::view_mine(console, session)?,
        MenuCommand::ViewCompleted => view::view_completed(console, session)?,
        MenuCommand::Delete => delete::execute(console, session)?,
        MenuCommand::DisplayStatistics => reports::display(console, session)?,
        MenuCommand::GenerateReports => reports::generate(console, session)?,
        MenuCommand::Exit => {
            console.say("Thank you for using task manager. Goodbye!")?;
            return Ok(Flow::Exit);
        }
    }

    Ok(Flow::Continue)
}
