//! Terminal chat client.
//!
//! Joins a room on the chat server and sends each line typed on stdin to it.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-client -- --room general --username alice
//! cargo run --bin huddle-client -- -r general
//! ```

use clap::Parser;

use huddle_client::{run_client, session::SessionConfig};
use huddle_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "huddle-client")]
#[command(about = "Terminal client for the Huddle room chat server", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name; omit to get a guest name
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "HUDDLE_URL", default_value = "ws://127.0.0.1:5000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("huddle_client", env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = SessionConfig {
        url: args.url,
        room: args.room,
        username: args.username,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
