//! Card routes.

use axum::{
    debug_handler,
    extract::{Path, State},
};

use http::StatusCode;

use cardstore_model::{
    Status,
    card::Card,
    request::card::CardFields,
    response::{CardResponse, StatusResponse},
};

use crate::app::{AppError, AppErrorKind, AppJson, AppState};

/// Lists all cards in insertion order.
#[debug_handler]
pub async fn list(State(state): State<AppState>) -> AppJson<Vec<Card>> {
    AppJson(state.store.list().await)
}

/// Creates a card.
#[debug_handler]
pub async fn create(
    State(state): State<AppState>,
    AppJson(fields): AppJson<CardFields>,
) -> Result<(StatusCode, AppJson<CardResponse>), AppError> {
    if state.validation.is_strict() && !fields.is_complete() {
        let missing = fields.missing();
        tracing::debug!(?missing, "rejecting incomplete card");
        return Err(AppErrorKind::MissingFields(missing).into());
    }

    let card = state.store.create(fields).await?;
    tracing::info!(id = %card.id, "created card");

    Ok((
        StatusCode::CREATED,
        AppJson(CardResponse {
            status: Status::Created,
            card,
        }),
    ))
}

/// Gets a card by its ID.
#[debug_handler]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AppJson<CardResponse>, AppError> {
    match state.store.get(&id).await {
        Some(card) => Ok(AppJson(CardResponse {
            status: Status::Ok,
            card,
        })),
        None => Err(AppErrorKind::NotFound.into()),
    }
}

/// Updates a card's truthy fields.
#[debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(fields): AppJson<CardFields>,
) -> Result<AppJson<CardResponse>, AppError> {
    match state.store.update(&id, fields).await? {
        Some(card) => {
            tracing::info!(%id, "updated card");
            Ok(AppJson(CardResponse {
                status: Status::Ok,
                card,
            }))
        }
        None => Err(AppErrorKind::NotFound.into()),
    }
}

/// Deletes every card with the ID.
#[debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AppJson<StatusResponse>, AppError> {
    let removed = state.store.delete(&id).await?;

    if removed == 0 && state.validation.is_strict() {
        return Err(AppErrorKind::NotFound.into());
    }

    tracing::info!(%id, removed, "deleted card");

    Ok(AppJson(StatusResponse {
        status: Status::Deleted,
    }))
}
