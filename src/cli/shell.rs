//! Interactive vault shell
//!
//! Keeps one controller alive across commands: prompt for the master
//! password, then read commands until `logout` (back to the prompt) or
//! `quit`.

use std::io::{self, BufRead, Write};

use super::{flush_notifications, prompt_password};
use crate::client::{LinkApi, VaultController};
use crate::display::{format_link_details, format_link_list};
use crate::error::{VaultError, VaultResult};
use crate::models::LinkId;

const HELP: &str = "\
Commands:
  list                List links
  add <title> <url>   Add a link (URL is the last word)
  show <id>           Reveal or hide a link's URL
  hide                Hide the revealed URL
  delete <id>         Delete a link
  refresh             Fetch links again
  logout              Lock the vault and ask for a password
  quit                Leave the shell";

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add { title: String, url: String },
    Show(LinkId),
    Hide,
    Delete(LinkId),
    Refresh,
    Logout,
    Quit,
    Help,
    Empty,
}

impl ShellCommand {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "list" | "ls" => Ok(Self::List),
            "add" => {
                let (title, url) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| "usage: add <title> <url>".to_string())?;
                Ok(Self::Add {
                    title: title.trim().to_string(),
                    url: url.trim().to_string(),
                })
            }
            "show" => parse_id(rest).map(Self::Show),
            "hide" => Ok(Self::Hide),
            "delete" | "rm" => parse_id(rest).map(Self::Delete),
            "refresh" => Ok(Self::Refresh),
            "logout" | "lock" => Ok(Self::Logout),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

fn parse_id(s: &str) -> Result<LinkId, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a link ID", s))
}

/// Run the interactive shell until `quit` or end of input
pub async fn run_shell<A: LinkApi>(api: A) -> VaultResult<()> {
    let mut vault = VaultController::new(api);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Link Vault shell. Type 'help' for commands.");

    loop {
        if vault.needs_password() {
            let password = prompt_password("Master password: ")?;
            if let Err(e) = vault.set_password(password).await {
                eprintln!("{}", e);
                continue;
            }
            flush_notifications(&mut vault);
            println!("{}", format_link_list(vault.links(), vault.visible_link()));
        }

        print!("vault> ");
        io::stdout()
            .flush()
            .map_err(|e| VaultError::Io(e.to_string()))?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| VaultError::Io(format!("Failed to read input: {}", e)))?;

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::List => {
                println!("{}", format_link_list(vault.links(), vault.visible_link()));
            }
            ShellCommand::Add { title, url } => {
                if let Err(e) = vault.add_link(&title, &url).await {
                    if e.is_validation() {
                        eprintln!("{}", e);
                    }
                }
            }
            ShellCommand::Show(id) => {
                vault.toggle_visibility(id);
                match vault.link(id) {
                    Some(link) if vault.is_visible(id) => print!("{}", format_link_details(link)),
                    Some(_) => println!("Link {} hidden.", id),
                    None => eprintln!("No link with ID {}", id),
                }
            }
            ShellCommand::Hide => {
                if let Some(id) = vault.visible_link() {
                    vault.toggle_visibility(id);
                }
            }
            ShellCommand::Delete(id) => {
                if vault.link(id).is_none() {
                    eprintln!("No link with ID {}", id);
                } else {
                    // Failures are reported through notifications
                    let _ = vault.delete_link(id).await;
                }
            }
            ShellCommand::Refresh => {
                if vault.fetch_links().await.is_ok() {
                    println!("{}", format_link_list(vault.links(), vault.visible_link()));
                }
            }
            ShellCommand::Logout => {
                vault.logout();
                println!("Vault locked.");
            }
            ShellCommand::Quit => break,
        }

        flush_notifications(&mut vault);
    }

    vault.logout();
    Ok(())
}
