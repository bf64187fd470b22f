use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use link_vault::cli::{handle_link_command, read_password, run_shell, LinkCommands, Target};
use link_vault::config::{paths::VaultPaths, settings::Settings};
use link_vault::display::format_audit_log;
use link_vault::server::{self, AppState};
use link_vault::storage::Storage;

#[derive(Parser)]
#[command(
    name = "linkvault",
    version,
    about = "Client-side encrypted link vault",
    long_about = "Link Vault keeps titles and URLs encrypted with a key derived from \
                  your master password. The server only ever stores ciphertext, \
                  scoped by an identifier derived from the same password."
)]
struct Cli {
    /// Link store server URL (defaults to the configured server_url)
    #[arg(long, global = true, env = "LINK_VAULT_SERVER")]
    server: Option<String>,

    /// Use the local data directory instead of a server (overrides --server)
    #[arg(long, global = true)]
    local: bool,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the link store HTTP server
    Serve {
        /// Address to bind (defaults to the configured bind_address)
        #[arg(short, long)]
        bind: Option<String>,
    },

    #[command(flatten)]
    Link(LinkCommands),

    /// Start an interactive vault session
    Shell,

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("link_vault=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => VaultPaths::with_base_dir(dir),
        None => VaultPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let target = Target::resolve(cli.local, cli.server, &settings);

    match cli.command {
        Some(Commands::Serve { bind }) => {
            let bind = bind.unwrap_or_else(|| settings.bind_address.clone());

            let storage = Storage::with_audit(paths.clone(), settings.audit_enabled)?;
            storage.load_all()?;

            let app = server::router(AppState::new(storage), settings.max_body_bytes);
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            server::serve(listener, app).await?;
        }
        Some(Commands::Link(cmd)) => {
            let api = target.connect(&paths, &settings)?;
            let password = read_password()?;
            handle_link_command(api, password, cmd).await?;
        }
        Some(Commands::Shell) => {
            let api = target.connect(&paths, &settings)?;
            run_shell(api).await?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Link Vault Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Links file:      {}", paths.links_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Bind address:   {}", settings.bind_address);
            println!("  Server URL:     {}", settings.server_url);
            println!("  Max body bytes: {}", settings.max_body_bytes);
            println!("  Audit enabled:  {}", settings.audit_enabled);
            println!();
            match &target {
                Target::Local => println!("Client target:   local data directory"),
                Target::Remote(url) => println!("Client target:   {}", url),
            }
        }
        Some(Commands::Audit { limit }) => {
            let storage = Storage::with_audit(paths.clone(), true)?;
            let entries = storage
                .audit()
                .map(|logger| logger.read_recent(limit))
                .transpose()?
                .unwrap_or_default();
            println!("{}", format_audit_log(&entries));
        }
        None => {
            println!("Link Vault - client-side encrypted links");
            println!();
            println!("Run 'linkvault --help' for usage information.");
            println!("Run 'linkvault shell' to start an interactive session.");
        }
    }

    Ok(())
}
