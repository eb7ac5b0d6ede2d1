//! Interactive menu loop.
//!
//! Reads choices line by line and drives a [`Session`]. Every core error is
//! reported on the output and control returns to the menu; nothing here is
//! fatal except a failure of the terminal itself. End of input behaves like
//! choosing Exit.

use std::io::{self, BufRead, Write};

use ledgerbank_core::{Error, Session, parse_amount};
use rust_decimal::Decimal;
use tracing::debug;

/// Top-level menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    /// Register a new account.
    CreateAccount,
    /// Log in to an existing account.
    Login,
    /// Leave the program.
    Exit,
}

impl MainChoice {
    /// Parse a menu selection.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateAccount),
            "2" => Some(Self::Login),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Menu choices while logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChoice {
    /// Add money.
    Deposit,
    /// Take money out.
    Withdraw,
    /// Show the balance.
    CheckBalance,
    /// End the session.
    Logout,
}

impl AccountChoice {
    /// Parse a menu selection.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Deposit),
            "2" => Some(Self::Withdraw),
            "3" => Some(Self::CheckBalance),
            "4" => Some(Self::Logout),
            _ => None,
        }
    }
}

/// Whether the outer loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented terminal.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `prompt` and read one line without its terminator.
    /// Returns `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Log out if a session is active. Leaving an already closed session is a
/// no-op.
fn close_session(session: &mut Session<'_>) {
    if let Err(e) = session.logout() {
        debug!("Nothing to log out: {e}");
    }
}

/// Format an amount the way the menu prints money.
pub fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Run the menu until the user exits or input ends.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: R,
    output: W,
) -> io::Result<()> {
    let mut console = Console { input, output };

    loop {
        console.say("\nWelcome to the Banking Application!")?;
        console.say("1. Create Account")?;
        console.say("2. Login")?;
        console.say("3. Exit")?;

        let Some(line) = console.ask("Choose an option: ")? else {
            break;
        };

        let flow = match MainChoice::parse(&line) {
            Some(MainChoice::CreateAccount) => create_account(session, &mut console)?,
            Some(MainChoice::Login) => login(session, &mut console)?,
            Some(MainChoice::Exit) => Flow::Quit,
            None => {
                console.say("Invalid option. Please try again.")?;
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }
    }

    console.say("Thank you for using the Banking Application!")?;
    console.output.flush()
}

fn create_account<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let Some(username) = console.ask("Enter username: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(password) = console.ask("Enter password: ")? else {
        return Ok(Flow::Quit);
    };

    match session.create_account(&username, &password) {
        Ok(()) => console.say("Account created successfully!")?,
        Err(Error::AlreadyExists(_)) => console.say("Account already exists!")?,
        Err(e) => console.say(&format!("Error: {e}"))?,
    }
    Ok(Flow::Continue)
}

fn login<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    let Some(username) = console.ask("Enter username: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(password) = console.ask("Enter password: ")? else {
        return Ok(Flow::Quit);
    };

    match session.login(&username, &password) {
        Ok(()) => {
            console.say("Login successful.")?;
            account_menu(session, console)
        }
        Err(Error::InvalidCredentials) => {
            console.say("Invalid username or password.")?;
            Ok(Flow::Continue)
        }
        Err(e) => {
            console.say(&format!("Error: {e}"))?;
            Ok(Flow::Continue)
        }
    }
}

fn account_menu<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    loop {
        console.say("\n1. Deposit")?;
        console.say("2. Withdraw")?;
        console.say("3. Check Balance")?;
        console.say("4. Logout")?;

        let Some(line) = console.ask("Choose an option: ")? else {
            // Input ended mid-session; close it before quitting.
            close_session(session);
            return Ok(Flow::Quit);
        };

        match AccountChoice::parse(&line) {
            Some(AccountChoice::Deposit) => {
                let Some(text) = console.ask("Enter amount to deposit: ")? else {
                    close_session(session);
                    return Ok(Flow::Quit);
                };
                match parse_amount(&text).and_then(|amount| {
                    session.deposit(amount)?;
                    Ok(amount)
                }) {
                    Ok(amount) => console.say(&format!("Deposited: {}", format_money(amount)))?,
                    Err(_) => console.say("Invalid deposit amount.")?,
                }
            }
            Some(AccountChoice::Withdraw) => {
                let Some(text) = console.ask("Enter amount to withdraw: ")? else {
                    close_session(session);
                    return Ok(Flow::Quit);
                };
                match parse_amount(&text).and_then(|amount| {
                    session.withdraw(amount)?;
                    Ok(amount)
                }) {
                    Ok(amount) => console.say(&format!("Withdrawn: {}", format_money(amount)))?,
                    Err(_) => {
                        console.say("Invalid withdraw amount or insufficient balance.")?;
                    }
                }
            }
            Some(AccountChoice::CheckBalance) => match session.balance() {
                Ok(balance) => {
                    console.say(&format!("Your balance is: {}", format_money(balance)))?;
                }
                Err(e) => console.say(&format!("Error: {e}"))?,
            },
            Some(AccountChoice::Logout) => {
                close_session(session);
                console.say("Logged out.")?;
                return Ok(Flow::Continue);
            }
            None => console.say("Invalid option. Please try again.")?,
        }
    }
}
