//! Realtime event server.
//!
//! Accepts authenticated WebSocket connections and pushes activity, webinar
//! and goal events to them.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin verdant-server -- --users users.json
//! ```

use clap::Parser;
use verdant_server::{ServerArgs, ServerConfig};
use verdant_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Run the server
    if let Err(e) = verdant_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
