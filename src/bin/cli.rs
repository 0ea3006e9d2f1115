//! WebClass portal CLI
//!
//! Log in, check a session, and print the timetable or notification list.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use webclass::{
    PortalClient,
    error::Result,
    models::{Config, Credentials, SessionToken},
};

/// WebClass - learning portal client
#[derive(Parser, Debug)]
#[command(name = "webclass", version, about = "WebClass learning portal client")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "webclass.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate with WP_USERNAME/WP_PASSWORD and print the session token
    Login,

    /// Check whether a session token is still accepted
    Check {
        #[arg(long)]
        token: String,
    },

    /// Print the raw markup of a portal page
    Fetch {
        #[arg(long)]
        token: Option<String>,

        /// Path relative to the portal base URL
        path: String,
    },

    /// Print the weekly timetable
    Timetable {
        #[arg(long)]
        token: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the notification list
    Notifications {
        #[arg(long)]
        token: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Use the given token, or log in with credentials from the environment.
async fn session(client: &PortalClient, token: Option<String>) -> Result<SessionToken> {
    match token {
        Some(token) => Ok(SessionToken::from(token)),
        None => {
            let credentials = Credentials::from_env()?;
            client
                .authenticate(&credentials.username, &credentials.password)
                .await
        }
    }
}

fn print<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{value}");
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    init_logging(cli.verbose, &config.logging.level);
    config.validate()?;

    log::debug!("Portal base URL: {}", config.portal.base_url);
    let client = PortalClient::new(config.portal)?;

    match cli.command {
        Command::Login => {
            let token = session(&client, None).await?;
            println!("{token}");
        }

        Command::Check { token } => {
            if client.is_valid(&SessionToken::from(token)).await {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }

        Command::Fetch { token, path } => {
            let token = session(&client, token).await?;
            print!("{}", client.fetch(&token, &path).await?);
        }

        Command::Timetable { token, json } => {
            let token = session(&client, token).await?;
            let grid = client.extract_timetable(&token).await?;
            log::info!("Timetable: {} courses", grid.populated());
            print(&grid, json)?;
        }

        Command::Notifications { token, json } => {
            let token = session(&client, token).await?;
            let feed = client.extract_notifications(&token).await?;
            log::info!(
                "Notifications: {} of {} items read",
                feed.entries().count(),
                feed.len()
            );
            print(&feed, json)?;
        }
    }

    Ok(())
}
