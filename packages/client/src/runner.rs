//! Connection and prompt loop.

use std::thread;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Message, client::IntoClientRequest, http::HeaderValue},
};
use verdant_server::infrastructure::dto::websocket::OutboundMessage;

use crate::{
    command::{Command, HELP, parse_command},
    display::format_event,
    error::ClientError,
};

/// Command-line arguments of `verdant-client`
#[derive(Debug, Clone, Parser)]
#[command(name = "verdant-client", version, about = "Terminal client for Verdant realtime events")]
pub struct ClientArgs {
    /// WebSocket endpoint of the server
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    pub url: String,

    /// Bearer token identifying the user
    #[arg(short, long)]
    pub token: String,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Connect, then relay prompt commands and print pushed events until the
/// user quits or the server closes the connection.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let mut request = args
        .url
        .as_str()
        .into_client_request()
        .map_err(|e| ClientError::Request(e.to_string()))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", args.token))
        .map_err(|e| ClientError::Request(e.to_string()))?;
    request.headers_mut().insert("Authorization", bearer);

    let (ws, _) = connect_async(request)
        .await
        .map_err(|source| ClientError::Connect {
            url: args.url.clone(),
            source: Box::new(source),
        })?;
    tracing::info!("Connected to {}", args.url);
    println!("Connected to {}. Type /help for commands.", args.url);

    let (mut sink, mut stream) = ws.split();

    // Print every event pushed by the server
    let mut printer = tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<OutboundMessage>(text.as_str()) {
                    Ok(event) => println!("{}", format_event(&event)),
                    Err(e) => tracing::warn!("Unreadable event: {}", e),
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    let mut lines = spawn_prompt()?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Send(message))) => {
                        let text = serde_json::to_string(&message)?;
                        if let Err(e) = sink.send(Message::text(text)).await {
                            tracing::warn!("Failed to send: {}", e);
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            _ = &mut printer => {
                println!("Connection closed by server");
                return Ok(());
            }
        }
    }

    if let Err(e) = sink.close().await {
        tracing::debug!("Close handshake failed: {}", e);
    }
    printer.abort();
    Ok(())
}

/// Run the line editor on its own thread, forwarding each line.
///
/// The channel closes on Ctrl-C, Ctrl-D or a terminal error.
fn spawn_prompt() -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let mut editor = DefaultEditor::new()?;
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Terminal error: {}", e);
                    break;
                }
            }
        }
    });

    Ok(rx)
}
