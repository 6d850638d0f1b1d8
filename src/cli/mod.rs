//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and dispatching into
//! the chat loop.

use std::error::Error;
use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "palaver")]
#[command(version)]
#[command(about = "A terminal-based chat interface for hosted chat-completion deployments")]
#[command(
    long_about = "Palaver is a full-screen terminal chat interface that connects to a hosted \
chat-completion deployment. Each message submits the whole conversation and \
waits for the complete reply.\n\n\
Environment Variables:\n\
  AZURE_OPENAI_API_KEY      API credential (missing key shows as \"not connected\")\n\
  AZURE_OPENAI_ENDPOINT     Resource endpoint, e.g. https://myresource.openai.azure.com\n\
  AZURE_OPENAI_DEPLOYMENT   Deployment name, e.g. gpt-4o-mini\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field\n\n\
Commands:\n\
  /log <filename>   Enable logging to specified file\n\
  /log              Toggle logging pause/resume"
)]
pub struct Args {
    /// Deployment to chat with (overrides AZURE_OPENAI_DEPLOYMENT)
    #[arg(short = 'd', long, value_name = "DEPLOYMENT")]
    pub deployment: Option<String>,

    /// Enable logging to specified file
    #[arg(short = 'l', long)]
    pub log: Option<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let args = Args::parse();
    run_chat(args.deployment, args.log).await
}

// Diagnostics go to stderr and stay silent unless RUST_LOG is set
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_deployment_and_log() {
        let args = Args::parse_from(["palaver", "-d", "gpt-4o-mini", "--log", "chat.log"]);
        assert_eq!(args.deployment.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(args.log.as_deref(), Some("chat.log"));
    }

    #[test]
    fn args_default_to_environment_configuration() {
        let args = Args::parse_from(["palaver"]);
        assert!(args.deployment.is_none());
        assert!(args.log.is_none());
    }
}
