use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use lumina_core::{Catalog, GatewayConfig};
use lumina_interaction::AssistantGateway;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

mod command;
mod helper;
mod render;
mod session;

use helper::ShellHelper;
use session::{Outcome, StoreSession};

#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "Lumina Living - browse, shop, and ask the design assistant", long_about = None)]
struct Cli {
    /// Load products from a TOML catalog instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Override the assistant model
    #[arg(long)]
    model: Option<String>,

    /// Log filter, e.g. "debug" or "lumina_core=debug" (defaults to RUST_LOG, then "warn")
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Entry point for the Lumina storefront REPL.
///
/// Builds one session (catalog, cart, chat, assistant gateway) and feeds it
/// lines from a rustyline editor until `quit` or EOF.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().clone(),
    };

    let mut config = GatewayConfig::resolve();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    let gateway = AssistantGateway::from_config(&config);
    tracing::debug!(products = catalog.len(), assistant = gateway.is_enabled(), "Storefront ready");
    let mut session = StoreSession::new(catalog, gateway);

    let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ShellHelper));

    println!("{}", "=== Lumina Living ===".bright_magenta().bold());
    println!(
        "{}",
        "Type /home to start, /help for commands, or just ask the assistant. 'quit' to exit."
            .bright_black()
    );
    if let Some(greeting) = session.chat().messages().first() {
        println!("{}", render::chat_message(greeting));
    }
    println!();

    loop {
        let readline = rl.readline(&session.prompt());

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match command::parse(trimmed) {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{}", err.to_string().yellow());
                        continue;
                    }
                };

                if command.awaits_assistant() {
                    println!("{}", "Thinking...".bright_black());
                }

                match session.execute(command).await {
                    Outcome::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Outcome::Output(text) => {
                        if !text.is_empty() {
                            println!("{text}");
                        }
                    }
                }

                if let Some(drawer) = session.take_cart_update() {
                    println!("{drawer}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
