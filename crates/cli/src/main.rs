//! Aachar CLI - console for the pickle product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Interactive console (default)
//! aachar
//!
//! # Scripted walkthrough: sign in, create, edit, delete
//! aachar demo
//!
//! # Print the sample catalog
//! aachar samples --json
//! ```
//!
//! # Commands
//!
//! - `console` - Line-oriented admin console
//! - `demo` - Run the catalog walkthrough against the mock sign-in
//! - `samples` - Show the products an admin session starts with

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use aachar_admin::AdminConfig;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "aachar")]
#[command(author, version, about = "Aachar pickle catalog admin")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive admin console
    Console,
    /// Scripted walkthrough of the admin flow
    Demo,
    /// Print the sample catalog
    Samples {
        /// Output raw JSON drafts
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_json);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aachar_admin=info,aachar_cli=info".into());

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: AdminConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            let provider = config.identity_provider();
            commands::console::run(aachar_admin::AdminSession::new(config, provider)).await?;
        }
        Commands::Demo => {
            let provider = config.identity_provider();
            let session = aachar_admin::AdminSession::new(config, provider);
            commands::demo::run(session, &mut std::io::stdout()).await?;
        }
        Commands::Samples { json } => {
            commands::samples::print(&mut std::io::stdout(), config.currency, json)?;
        }
    }
    Ok(())
}
