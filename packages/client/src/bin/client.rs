//! Terminal client for the realtime event server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin verdant-client -- --token <token>
//! ```

use clap::Parser;
use verdant_client::ClientArgs;
use verdant_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = verdant_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}
