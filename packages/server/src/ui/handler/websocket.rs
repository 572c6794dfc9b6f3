//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{
        ActivityReport, AuthError, ConnectionId, ConnectionIdFactory, Credential, Event, Timestamp,
        UserIdentity, ValidationError,
    },
    infrastructure::dto::websocket::InboundMessage,
    ui::state::{AppState, ConnectQuery},
    usecase::{
        InboundError, IngestActivityUseCase, JoinWebinarUseCase, LeaveWebinarUseCase,
        PublishEventUseCase, RegisterSessionUseCase, SendWebinarMessageUseCase, SessionError,
        UnregisterSessionUseCase, UpdateGoalUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let credential = match extract_credential(&headers, query.token) {
        Ok(credential) => credential,
        Err(e) => {
            tracing::warn!("Refusing websocket connection: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // Create a channel for this connection to receive events
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    let register_usecase =
        RegisterSessionUseCase::new(state.repository.clone(), state.authenticator.clone());

    match register_usecase.execute(connection_id, credential, tx).await {
        Ok(identity) => {
            let failed_state = state.clone();
            Ok(ws
                .on_failed_upgrade(move |e| {
                    tracing::warn!("Websocket upgrade for '{}' failed: {}", connection_id, e);
                    tokio::spawn(async move {
                        UnregisterSessionUseCase::new(failed_state.repository.clone())
                            .execute(&connection_id)
                            .await;
                    });
                })
                .on_upgrade(move |socket| handle_socket(socket, state, connection_id, identity, rx)))
        }
        Err(SessionError::Auth(e)) => {
            tracing::warn!("Refusing websocket connection: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(SessionError::Repository(e)) => {
            tracing::error!("Failed to register connection '{}': {}", connection_id, e);
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Take the credential from `Authorization: Bearer`, falling back to `?token=`.
fn extract_credential(
    headers: &HeaderMap,
    query_token: Option<String>,
) -> Result<Option<Credential>, AuthError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::MalformedCredential)?;
        return Credential::from_bearer_header(value).map(Some);
    }
    query_token.map(Credential::new).transpose()
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    identity: UserIdentity,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    tracing::info!(
        "Connection '{}' open for user '{}' ({})",
        connection_id,
        identity.id,
        identity.display_name
    );
    let (mut sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_inbound(&state_clone, &connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to forward published events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let unregister_usecase = UnregisterSessionUseCase::new(state.repository.clone());
    unregister_usecase.execute(&connection_id).await;
    tracing::info!(
        "{} connection(s) remaining",
        unregister_usecase.count_remaining_connections().await
    );
}

/// Parse one inbound text frame and run the matching use case.
///
/// Failures go back to the originating connection as an `error` event.
async fn dispatch_inbound(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<InboundMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Malformed frame from '{}': {}", connection_id, e);
            let error = InboundError::from(ValidationError::MalformedPayload(e.to_string()));
            reply_error(state, connection_id, &error).await;
            return;
        }
    };
    let type_name = message.type_name();
    tracing::debug!("Received {} from '{}'", type_name, connection_id);

    let repository = state.repository.clone();
    let result = match message {
        InboundMessage::LogActivity {
            category,
            quantity,
            unit,
            description,
        } => {
            let report = ActivityReport {
                category,
                quantity,
                unit,
                description,
            };
            IngestActivityUseCase::new(repository, state.emission_factors.clone())
                .execute(connection_id, report)
                .await
                .map(|_| ())
        }
        InboundMessage::JoinWebinar { webinar_id } => JoinWebinarUseCase::new(repository)
            .execute(connection_id, webinar_id.into_string())
            .await
            .map(|_| ()),
        InboundMessage::LeaveWebinar { webinar_id } => LeaveWebinarUseCase::new(repository)
            .execute(connection_id, webinar_id.into_string())
            .await
            .map(|_| ()),
        InboundMessage::WebinarMessage {
            webinar_id,
            message_text,
        } => SendWebinarMessageUseCase::new(repository)
            .execute(connection_id, webinar_id.into_string(), message_text)
            .await
            .map(|_| ()),
        InboundMessage::UpdateGoal {
            category,
            target,
            timeframe,
        } => UpdateGoalUseCase::new(repository)
            .execute(connection_id, category, target, timeframe)
            .await
            .map(|_| ()),
    };

    if let Err(e) = result {
        tracing::warn!("Rejected {} from '{}': {}", type_name, connection_id, e);
        reply_error(state, connection_id, &e).await;
    }
}

async fn reply_error(state: &AppState, connection_id: &ConnectionId, error: &InboundError) {
    let event = Event::error(error.to_string(), Timestamp::now());
    PublishEventUseCase::new(state.repository.clone())
        .reply(connection_id, &event)
        .await;
}
