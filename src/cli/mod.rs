use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod serve;

use crate::core::logging::init_tracing;

#[derive(Subcommand)]
enum Command {
    /// Run the web chat server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Start a chat session in the terminal
    Chat {
        /// Use OPENAI_API_KEY directly instead of the secrets endpoint
        #[arg(long, action, default_value = "false")]
        env_key: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            // axum logs rejections from built-in extractors with the `axum::rejection`
            // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
            init_tracing(&format!(
                "{}=debug,tower_http=debug,axum::rejection=trace",
                env!("CARGO_CRATE_NAME")
            ));
            serve::run(host, port).await?;
        }
        Some(Command::Chat { env_key }) => {
            // Keep the prompt readable, only failures are logged
            init_tracing(&format!("{}=warn", env!("CARGO_CRATE_NAME")));
            chat::run(env_key).await?;
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["tripchat", "serve"]).unwrap();
        match cli.command {
            Some(Command::Serve { host, port }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, "2222");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_chat_env_key() {
        let cli = Cli::try_parse_from(["tripchat", "chat", "--env-key"]).unwrap();
        match cli.command {
            Some(Command::Chat { env_key }) => assert!(env_key),
            _ => panic!("Expected Chat command"),
        }
    }
}
