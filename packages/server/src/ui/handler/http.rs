//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use verdant_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{Credential, EmissionFactorTable, Event, EventKind, RoomId, Scope, Timestamp},
    infrastructure::dto::http::{
        MemberDetailDto, PublishRequestDto, PublishResponseDto, RoomDetailDto, RoomSummaryDto,
    },
    ui::state::AppState,
    usecase::PublishEventUseCase,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms that currently have members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.repository.rooms().await;

    Json(
        rooms
            .into_iter()
            .map(|room| RoomSummaryDto {
                id: room.id.into_string(),
                member_count: room.members.len(),
            })
            .collect(),
    )
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    let room = state
        .repository
        .room(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let mut members = Vec::with_capacity(room.members.len());
    for connection_id in &room.members {
        // may have disconnected since the snapshot
        if let Some(connection) = state.repository.connection(connection_id).await {
            members.push(connection);
        }
    }
    members.sort_by(|a, b| a.connected_at.cmp(&b.connected_at).then(a.id.cmp(&b.id)));

    let room_detail = RoomDetailDto {
        id: room.id.into_string(),
        members: members
            .into_iter()
            .map(|c| MemberDetailDto {
                connection_id: c.id.to_string(),
                user_id: c.identity.id.into_string(),
                display_name: c.identity.display_name.as_str().to_string(),
                connected_at: timestamp_to_rfc3339(c.connected_at.value()),
            })
            .collect(),
    };

    Ok(Json(room_detail))
}

/// Get the active emission-factor table
pub async fn get_emission_factors(
    State(state): State<Arc<AppState>>,
) -> Json<EmissionFactorTable> {
    Json(state.emission_factors.as_ref().clone())
}

/// Publish an event on behalf of a CRUD handler
pub async fn publish_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<PublishRequestDto>,
) -> Result<(StatusCode, Json<PublishResponseDto>), StatusCode> {
    if let Some(expected) = &state.publish_token {
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Credential::from_bearer_header(value).ok());
        if !presented.is_some_and(|credential| credential.matches(expected)) {
            tracing::warn!("Rejected publish request with missing or wrong token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    // errors are private to the connection that caused them
    if request.r#type == EventKind::Error {
        tracing::warn!("Rejected publish request for an error event");
        return Err(StatusCode::BAD_REQUEST);
    }

    let scope = Scope::try_from(request.scope).map_err(|e| {
        tracing::warn!("Invalid publish scope: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let event = Event::new(request.r#type, request.data, Timestamp::now());

    let publisher = PublishEventUseCase::new(state.repository.clone());
    let report = publisher.execute(&event, &scope).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponseDto {
            recipients: report.recipients,
            delivered: report.delivered,
        }),
    ))
}
