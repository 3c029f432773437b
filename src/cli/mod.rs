// CLI module for administrative operations

pub mod migrate;
pub mod roles;
pub mod settings;
pub mod sppg;
pub mod token;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// SPPG monitoring backend
#[derive(Parser)]
#[command(name = "sppg-monitor")]
#[command(about = "SPPG monitoring dashboard backend and administration CLI", long_about = None)]
pub struct Cli {
    /// Runs the HTTP server when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Role table management
    #[command(subcommand)]
    Role(RoleCommands),

    /// System settings (page switches)
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// SPPG records
    #[command(subcommand)]
    Sppg(SppgCommands),

    /// Issue a bearer token for local testing
    Token {
        /// Subject id carried in the token
        user_id: String,

        #[arg(long)]
        email: Option<String>,

        /// Lifetime in minutes
        #[arg(long, default_value_t = 60)]
        ttl_minutes: i64,
    },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// Assign SUPER_USER or USER_GRANTED to an identity
    Assign { user_id: String, role: String },

    /// Remove the role row of an identity (it becomes read-only)
    Revoke { user_id: String },

    /// List all role rows
    List,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// List all settings
    List,

    /// Switch a setting on or off
    Set {
        key: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[derive(Subcommand)]
pub enum SppgCommands {
    /// Import records from a CSV file
    Import { file: PathBuf },

    /// Export all records as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Change a record's status through the record update endpoint
    SetStatus { id_sppg: String, status: String },

    /// Tag a record with the reference marker through the record update endpoint
    MarkReference { id_sppg: String },
}

impl Cli {
    /// True when the process should run the HTTP server
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
/// `serve` is handled by main.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(command: Commands, app_data: Arc<AppData>) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Migrate => migrate::run_migrations(&app_data).await?,
        Commands::Role(role_cmd) => match role_cmd {
            RoleCommands::Assign { user_id, role } => roles::assign(&app_data, &user_id, &role).await?,
            RoleCommands::Revoke { user_id } => roles::revoke(&app_data, &user_id).await?,
            RoleCommands::List => roles::list(&app_data).await?,
        },
        Commands::Settings(settings_cmd) => match settings_cmd {
            SettingsCommands::List => settings::list(&app_data).await?,
            SettingsCommands::Set { key, value } => settings::set(&app_data, &key, value).await?,
        },
        Commands::Sppg(sppg_cmd) => match sppg_cmd {
            SppgCommands::Import { file } => sppg::import(&app_data, &file).await?,
            SppgCommands::Export { output } => sppg::export(&app_data, output.as_deref()).await?,
            SppgCommands::SetStatus { id_sppg, status } => sppg::set_status(&app_data, &id_sppg, &status).await?,
            SppgCommands::MarkReference { id_sppg } => sppg::mark_reference(&app_data, &id_sppg).await?,
        },
        Commands::Token {
            user_id,
            email,
            ttl_minutes,
        } => token::issue(&app_data, &user_id, email.as_deref(), ttl_minutes)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["sppg-monitor"]);
        assert!(cli.is_serve());
    }

    #[test]
    fn test_settings_set_parses_bool() {
        let cli = Cli::parse_from(["sppg-monitor", "settings", "set", "sppg_page_enabled", "false"]);
        match cli.command {
            Some(Commands::Settings(SettingsCommands::Set { key, value })) => {
                assert_eq!(key, "sppg_page_enabled");
                assert!(!value);
            }
            _ => panic!("expected settings set"),
        }
    }

    #[test]
    fn test_sppg_set_status_accepts_spaced_status() {
        let cli = Cli::parse_from(["sppg-monitor", "sppg", "set-status", "ABCDEFGH", "APPROVED KUOTA"]);
        assert!(!cli.is_serve());
        match cli.command {
            Some(Commands::Sppg(SppgCommands::SetStatus { id_sppg, status })) => {
                assert_eq!(id_sppg, "ABCDEFGH");
                assert_eq!(status, "APPROVED KUOTA");
            }
            _ => panic!("expected sppg set-status"),
        }
    }
}
