//! bookbot-cli: checkpoint store setup and an interactive agent chat.
//!
//! `setup` initializes the checkpoint schema once per deployment. `chat` runs
//! the agent from the terminal, including the standalone sales-demo variant
//! (store catalog + order creation) that has no Telegram counterpart.

use std::io::{self, Write};
use std::sync::Arc;

use agent::{AgentConfig, AgentFacade, AgentVariant};
use anyhow::Result;
use checkpoint::CheckpointStore;
use clap::{Parser, Subcommand};
use llm_client::OpenAILlmClient;

#[derive(Parser)]
#[command(name = "bookbot-cli")]
#[command(about = "Book-finder agent CLI: setup, chat", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the checkpoint store schema (DATABASE_URL or --database-url).
    Setup {
        #[arg(short, long)]
        database_url: Option<String>,
    },
    /// Chat with the agent from the terminal.
    Chat {
        /// Optional first message; then reads lines until /exit.
        #[arg(short, long)]
        message: Option<String>,
        /// Agent variant: default, library, or sales.
        #[arg(long, default_value = "default")]
        variant: String,
        /// Conversation thread to continue; generated when omitted.
        #[arg(short, long)]
        thread_id: Option<String>,
    },
}

fn parse_variant(name: &str) -> Result<AgentVariant> {
    match name {
        "default" => Ok(AgentVariant::Default),
        "library" => Ok(AgentVariant::Library),
        "sales" => Ok(AgentVariant::Sales),
        other => anyhow::bail!("Unknown variant {:?} (expected default, library, or sales)", other),
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /help    - Show this help message");
    println!("  /exit    - Exit the chat");
    println!("  /quit    - Exit the chat");
    println!("  Any other text is sent to the agent.");
}

async fn run_one_turn(facade: &AgentFacade, thread_id: &str, variant: AgentVariant, text: &str) {
    match facade.invoke(text, thread_id, variant).await {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("(You can continue chatting or type /exit to quit)");
        }
    }
}

/// Interactive loop: optional first message, then read lines from stdin until
/// EOF or /exit.
async fn run_chat(message: Option<String>, variant: AgentVariant, thread_id: Option<String>) -> Result<()> {
    let config = AgentConfig::from_env()?;
    let llm = Arc::new(OpenAILlmClient::new(
        config.llm.api_key.clone(),
        config.llm.base_url.clone(),
        config.llm.model.clone(),
    ));
    let facade = AgentFacade::new(llm, config.database_url, config.endpoints);

    let thread_id = thread_id
        .unwrap_or_else(|| format!("cli_{}", chrono::Utc::now().timestamp_millis()));
    println!("Agent chat on thread {} (type /help for commands, /exit to quit)", thread_id);
    println!();

    if let Some(m) = message {
        println!("> {}", m);
        run_one_turn(&facade, &thread_id, variant, &m).await;
        println!();
    }

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        if n == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/help" => {
                print_help();
                continue;
            }
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }

        run_one_turn(&facade, &thread_id, variant, line).await;
        println!();
    }
    Ok(())
}

async fn run_setup(database_url: Option<String>) -> Result<()> {
    let database_url = match database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./bookbot.db".to_string()),
    };
    let store = CheckpointStore::connect(&database_url).await?;
    store.setup().await?;
    store.close().await;
    println!("Checkpoint store ready at {}", database_url);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // Logs go to stderr so the chat transcript on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup { database_url } => run_setup(database_url).await,
        Commands::Chat {
            message,
            variant,
            thread_id,
        } => run_chat(message, parse_variant(&variant)?, thread_id).await,
    }
}
