// CLI module for administrative operations requiring server access

pub mod expired_token;
pub mod migrate;
pub mod promote;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Boardplay CLI
#[derive(Parser)]
#[command(name = "boardplay")]
#[command(about = "Board-game play log backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Grant the power role to an existing account
    Promote {
        /// Email of the account to promote
        #[arg(long)]
        email: String,
    },

    /// Print a signed token that has already expired, for exercising the 401 path
    ExpiredToken {
        /// Subject of the token
        #[arg(long)]
        user_id: i64,
    },
}

/// Execute an administrative CLI command
///
/// `Serve` and `Migrate` are handled by main before AppData exists.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Promote { email } => {
            promote::promote_user(&app_data.credential_store, &email).await?;
        }
        Commands::ExpiredToken { user_id } => {
            let token = expired_token::mint_expired_token(&app_data.token_provider, user_id)?;
            println!("{}", token);
        }
        Commands::Serve | Commands::Migrate => {
            tracing::debug!("Command handled before CLI dispatch");
        }
    }

    Ok(())
}
