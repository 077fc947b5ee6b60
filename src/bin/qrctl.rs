//! Command-line companion for qr-share.
//!
//! Runs the same URL validation and QR rendering as the web service, and inspects
//! session records stored in Redis.
//!
//! # Usage
//!
//! ```bash
//! # Check whether a URL would be accepted
//! cargo run --bin qrctl -- check "https://example.org/page"
//!
//! # Render a QR code to a PNG file (prompts for the URL if omitted)
//! cargo run --bin qrctl -- render "https://example.org/page" -o page.png
//!
//! # Show the record stored for a session id
//! cargo run --bin qrctl -- session show <SESSION_ID>
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` / `REDIS_HOST` (for `session`): Redis connection, same as the server

use qr_share::config;
use qr_share::domain::repositories::SessionStore;
use qr_share::domain::{SessionId, ValidatedUrl};
use qr_share::infrastructure::session::RedisSessionStore;
use qr_share::utils::qr_encoder::{DEFAULT_MODULE_SIZE, QrEncoder};
use qr_share::utils::url_validator::is_valid_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// CLI tool for qr-share.
#[derive(Parser)]
#[command(name = "qrctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Check whether a URL passes validation
    Check {
        /// URL to check
        url: String,
    },

    /// Render a URL as a PNG QR code
    Render {
        /// URL to encode (prompted for if omitted)
        url: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "qrcode.png")]
        output: PathBuf,

        /// Pixels per QR module
        #[arg(long, default_value_t = DEFAULT_MODULE_SIZE)]
        module_size: u32,

        /// Overwrite an existing file without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Inspect stored sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

/// Session inspection subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Show the record stored for a session id
    Show {
        /// Session id (64 hex characters, the value of the session cookie)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { url } => check_url(&url),
        Commands::Render {
            url,
            output,
            module_size,
            yes,
        } => render(url, output, module_size, yes),
        Commands::Session { action } => handle_session_action(action).await,
    }
}

/// Prints the validation verdict; fails when the URL is rejected.
fn check_url(url: &str) -> Result<()> {
    if is_valid_url(url) {
        println!("{} {}", "✔ Valid URL:".green().bold(), url.cyan());
        Ok(())
    } else {
        println!("{} {}", "✘ Invalid URL:".red().bold(), url.yellow());
        anyhow::bail!("URL rejected by validator")
    }
}

/// Renders a QR code to a file.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Validate it with the service's rules
/// 3. Confirm overwriting an existing file (unless `--yes`)
/// 4. Encode and write the PNG
fn render(
    url: Option<String>,
    output: PathBuf,
    module_size: u32,
    skip_confirm: bool,
) -> Result<()> {
    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to encode")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let Some(url) = ValidatedUrl::parse(&url) else {
        println!("{} {}", "✘ Invalid URL:".red().bold(), url.yellow());
        anyhow::bail!("URL rejected by validator");
    };

    if output.exists() && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let png = QrEncoder::new(module_size)
        .encode(&url)
        .context("Failed to render QR code")?;

    std::fs::write(&output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", "✔ QR code written".green().bold());
    println!("  URL:  {}", url.as_str().cyan());
    println!("  File: {}", output.display().to_string().bright_white());
    println!("  Size: {} bytes", png.len());

    Ok(())
}

/// Dispatches session inspection commands.
async fn handle_session_action(action: SessionAction) -> Result<()> {
    match action {
        SessionAction::Show { id } => show_session(&id).await,
    }
}

/// Loads one session record from Redis and prints it.
async fn show_session(id: &str) -> Result<()> {
    let id: SessionId = id
        .parse()
        .context("Session id must be 64 lowercase hex characters")?;

    let config = config::load_from_env()?;
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL or REDIS_HOST must be set to inspect sessions")?;

    let store = RedisSessionStore::connect(redis_url, config.session_ttl_seconds)
        .await
        .context("Failed to connect to Redis")?;

    match store.load(&id).await? {
        Some(record) => {
            println!("{}", "Session record".bright_white().bold());
            println!("  Id:    {}", id.short().cyan());
            println!("  URL:   {}", record.url.as_str().bright_yellow());
            println!("  Image: {} bytes PNG", record.png.len());
        }
        None => {
            println!("{}", "No record stored for this session".yellow());
        }
    }

    Ok(())
}
