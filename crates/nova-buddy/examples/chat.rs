//! Talk to Nova from the terminal.
//!
//! Run with: cargo run -p nova-buddy --example chat
//! Or with a single message: cargo run -p nova-buddy --example chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   NOVA_API_KEY - Gemini API key for authentication

use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use nova_buddy::{BuddyChat, ConversationSession, GeminiTransport, RetryEvent, Role, StressMonitor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Initializing GeminiTransport...");
    let transport = GeminiTransport::from_env()?;
    let config = transport.config().clone();

    println!("API URL: {}", config.api_url);
    println!("Model: {}", config.model);
    println!("Tone: {}", config.settings.tone);
    println!("Stress interval: {:?}", config.stress_interval);
    println!();

    let session = ConversationSession::new(Arc::new(transport), config.settings.clone())
        .with_retry_observer(Arc::new(|event: &RetryEvent| {
            println!(
                "(rate limited, retrying in {:?}, attempt {}/{})",
                event.wait, event.attempt, event.max_attempts
            );
        }));

    let mut chat = BuddyChat::new(session);
    chat.open().await;
    chat.watch_stress(StressMonitor::new().with_interval(config.stress_interval));

    for turn in chat.transcript().snapshot().await {
        println!("Nova: {}", turn.text());
    }

    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        let message = args[1..].join(" ");
        if let Some(reply) = chat.submit(&message).await {
            println!("Nova: {}", reply.text());
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(Duration::from_secs(1));
    let mut seen = chat.transcript().len().await;

    print!("> ");
    io::stdout().flush()?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                chat.submit(&line).await;
            }
            _ = refresh.tick() => {}
        }

        // Print everything new, including check-ins that landed meanwhile.
        let turns = chat.transcript().snapshot().await;
        if turns.len() > seen {
            for turn in turns.iter().skip(seen) {
                let speaker = match turn.role() {
                    Role::User => "You",
                    Role::Model => "Nova",
                };
                println!("{}: {}", speaker, turn.text());
            }
            seen = turns.len();
            print!("> ");
            io::stdout().flush()?;
        }
    }

    chat.close();
    Ok(())
}
