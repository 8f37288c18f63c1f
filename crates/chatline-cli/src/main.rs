use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chatline")]
#[command(about = "Chatline - terminal client for the enterprise assistant chat", long_about = None)]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Request settings overrides; unset flags fall back to settings.json and env.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Assistant service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key sent as x-api-key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat(commands::chat::ChatArgs),
    /// Show an agent's public profile
    Agent {
        /// Agent id
        identifier: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat(args) => commands::chat::run(&cli.connection, args).await?,
        Commands::Agent { identifier } => commands::agent::show(&cli.connection, &identifier).await?,
    }

    Ok(())
}
