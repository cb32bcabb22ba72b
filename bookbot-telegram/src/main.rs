//! bookbot: Telegram book-finder bot entry point.

use anyhow::Result;
use bookbot_telegram::{run_bot, BotConfig};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookbot")]
#[command(about = "Telegram book-finder bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
    }
}
