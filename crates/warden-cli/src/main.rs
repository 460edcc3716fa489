//! Warden CLI - Keypad and admin surface for the warden lock
//!
//! This binary is the external collaborator: it renders lock state and
//! enforces the interactive gates (weak-credential confirmation,
//! factory-reset double confirmation). Every decision lives in the
//! service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warden_service::{paths, LockService};

mod commands;

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Simulated access-control lock with lockout and audit trail", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory holding settings, log and backup files
    /// (defaults to `WARDEN_DATA_DIR`, then the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive keypad session
    Unlock,

    /// Show lock status and settings summary
    Status,

    /// Access log commands
    #[command(subcommand)]
    Log(LogCommands),

    /// Credential management commands
    #[command(subcommand)]
    Password(PasswordCommands),

    /// Settings commands
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Write a backup snapshot of the current settings
    Backup,

    /// Restore settings from the backup snapshot
    Restore,

    /// Reset the transient session state (failures, buffer, lockout)
    Reset,

    /// Restore factory defaults and wipe the audit log
    FactoryReset,
}

#[derive(Subcommand)]
enum LogCommands {
    /// Print the access log
    Show,

    /// Clear the access log
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Export the access log
    Export {
        /// Destination path (defaults to a timestamped file)
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PasswordCommands {
    /// Change the credential (prompts for any value not given)
    Change {
        /// Current credential
        #[arg(long)]
        old: Option<String>,

        /// New credential
        #[arg(long)]
        new: Option<String>,

        /// Confirmation of the new credential
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Generate a random credential (printed, not applied)
    Generate,

    /// Rate a candidate credential
    Strength {
        /// Candidate credential
        candidate: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the current settings
    Show,

    /// Update one or more settings
    Set {
        /// Consecutive failures before lockout
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Lockout duration in seconds
        #[arg(long)]
        lockout_secs: Option<u64>,

        /// Audible feedback
        #[arg(long)]
        audio: Option<bool>,

        /// Haptic feedback
        #[arg(long)]
        haptic: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(paths::default_data_dir);
    let service = LockService::open(&data_dir)?;

    match cli.command {
        Commands::Unlock => commands::unlock(&service).await,
        Commands::Status => commands::status(&service).await,
        Commands::Log(LogCommands::Show) => commands::log_show(&service).await,
        Commands::Log(LogCommands::Clear { yes }) => commands::log_clear(&service, yes).await,
        Commands::Log(LogCommands::Export { dest }) => commands::log_export(&service, dest).await,
        Commands::Password(PasswordCommands::Change { old, new, confirm }) => {
            commands::password_change(&service, old, new, confirm).await
        }
        Commands::Password(PasswordCommands::Generate) => commands::password_generate(),
        Commands::Password(PasswordCommands::Strength { candidate }) => {
            commands::password_strength(&candidate)
        }
        Commands::Settings(SettingsCommands::Show) => commands::settings_show(&service).await,
        Commands::Settings(SettingsCommands::Set {
            max_attempts,
            lockout_secs,
            audio,
            haptic,
        }) => commands::settings_set(&service, max_attempts, lockout_secs, audio, haptic).await,
        Commands::Backup => commands::backup(&service).await,
        Commands::Restore => commands::restore(&service).await,
        Commands::Reset => commands::reset(&service).await,
        Commands::FactoryReset => commands::factory_reset(&service).await,
    }
}
