//! Link CLI commands
//!
//! One-shot commands: each unlocks the vault, performs a single operation
//! and exits.

use clap::Subcommand;

use super::flush_notifications;
use crate::client::{LinkApi, VaultController};
use crate::crypto::MasterPassword;
use crate::display::{format_link_details, format_link_list};
use crate::error::{VaultError, VaultResult};
use crate::models::LinkId;

/// Link subcommands
#[derive(Subcommand)]
pub enum LinkCommands {
    /// List your links (URLs hidden)
    #[command(alias = "ls")]
    List,
    /// Encrypt and store a new link
    Add {
        /// Link title
        title: String,
        /// Link URL
        url: String,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID
        id: LinkId,
    },
    /// Reveal one link
    Show {
        /// Link ID
        id: LinkId,
    },
}

/// Handle a link command
pub async fn handle_link_command<A: LinkApi>(
    api: A,
    password: MasterPassword,
    cmd: LinkCommands,
) -> VaultResult<()> {
    let mut vault = VaultController::new(api);
    vault.set_password(password).await?;

    // Every command starts from a fresh fetch; bail out if it failed
    if let Some(message) = flush_notifications(&mut vault) {
        return Err(VaultError::Transport(message));
    }

    match cmd {
        LinkCommands::List => {
            println!("{}", format_link_list(vault.links(), None));
            let failed = vault.links().iter().filter(|l| l.failed).count();
            if failed > 0 {
                println!();
                println!("{} link(s) could not be decrypted with this password.", failed);
            }
        }
        LinkCommands::Add { title, url } => {
            let id = vault.add_link(&title, &url).await?;
            flush_notifications(&mut vault);
            println!("Link ID: {}", id);
        }
        LinkCommands::Delete { id } => {
            if vault.link(id).is_none() {
                return Err(VaultError::Validation(format!("No link with ID {}", id)));
            }
            vault.delete_link(id).await?;
            flush_notifications(&mut vault);
        }
        LinkCommands::Show { id } => {
            let link = vault
                .link(id)
                .ok_or_else(|| VaultError::Validation(format!("No link with ID {}", id)))?;
            print!("{}", format_link_details(link));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LocalLinkApi;
    use crate::config::paths::VaultPaths;
    use crate::storage::Storage;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn api(dir: &TempDir) -> LocalLinkApi {
        let storage = Storage::new(VaultPaths::with_base_dir(dir.path().to_path_buf())).unwrap();
        storage.load_all().unwrap();
        LocalLinkApi::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_add_list_delete() {
        let dir = TempDir::new().unwrap();
        let add = LinkCommands::Add {
            title: "Bank".into(),
            url: "https://bank.example".into(),
        };
        handle_link_command(api(&dir), MasterPassword::new("abc123"), add)
            .await
            .unwrap();

        handle_link_command(api(&dir), MasterPassword::new("abc123"), LinkCommands::List)
            .await
            .unwrap();

        let delete = LinkCommands::Delete { id: LinkId::new(1) };
        handle_link_command(api(&dir), MasterPassword::new("abc123"), delete)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_show_unknown_id() {
        let dir = TempDir::new().unwrap();
        let err = handle_link_command(
            api(&dir),
            MasterPassword::new("abc123"),
            LinkCommands::Show { id: LinkId::new(42) },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_other_user_cannot_delete() {
        let dir = TempDir::new().unwrap();
        let add = LinkCommands::Add {
            title: "Bank".into(),
            url: "https://bank.example".into(),
        };
        handle_link_command(api(&dir), MasterPassword::new("abc123"), add)
            .await
            .unwrap();

        let delete = LinkCommands::Delete { id: LinkId::new(1) };
        assert!(handle_link_command(api(&dir), MasterPassword::new("other"), delete)
            .await
            .is_err());

        let store = api(&dir);
        let rows = store
            .list(&crate::crypto::derive_user_id(&MasterPassword::new("abc123")))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
