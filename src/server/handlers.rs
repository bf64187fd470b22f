//! HTTP handlers for the link store API

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Serialize;

use super::error::ApiError;
use super::AppState;
use crate::models::{
    AddLinkRequest, AddLinkResponse, DeleteLinkQuery, EncryptedLink, LinkId, ListLinksQuery,
    MessageResponse, UserId,
};
use crate::services::with_store;

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("{} is required", field))),
    }
}

/// Health probe body
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `GET /links?userId=`
pub async fn list_links(
    State(state): State<AppState>,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<Vec<EncryptedLink>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let user_id = UserId::new(required(query.user_id, "userId")?);

    let links = with_store(state.storage, move |store| store.list(&user_id))
        .await
        .map_err(|e| ApiError::new(e, "Failed to fetch links"))?;

    Ok(Json(links))
}

/// `POST /links` with `{userId, encryptedTitle, encryptedUrl}`
pub async fn add_link(
    State(state): State<AppState>,
    body: Result<Json<AddLinkRequest>, JsonRejection>,
) -> Result<Json<AddLinkResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let user_id = UserId::new(required(body.user_id, "userId")?);
    let encrypted_title = required(body.encrypted_title, "encryptedTitle")?;
    let encrypted_url = required(body.encrypted_url, "encryptedUrl")?;

    let link = with_store(state.storage, move |store| {
        store.add(user_id, encrypted_title, encrypted_url)
    })
    .await
    .map_err(|e| ApiError::new(e, "Failed to add link"))?;

    Ok(Json(AddLinkResponse {
        id: link.id,
        message: "Link added successfully".to_string(),
    }))
}

/// `DELETE /links?id=&userId=`
pub async fn delete_link(
    State(state): State<AppState>,
    query: Result<Query<DeleteLinkQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let id: LinkId = required(query.id, "id")?
        .parse()
        .map_err(|_| ApiError::bad_request("id must be an integer"))?;
    let user_id = UserId::new(required(query.user_id, "userId")?);

    with_store(state.storage, move |store| store.delete(id, &user_id))
        .await
        .map_err(|e| ApiError::new(e, "Failed to delete link"))?;

    Ok(Json(MessageResponse::new("Link deleted successfully")))
}

/// `GET /links/all`
pub async fn list_all_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<EncryptedLink>>, ApiError> {
    let links = with_store(state.storage, |store| store.list_all())
        .await
        .map_err(|e| ApiError::new(e, "Failed to fetch links"))?;

    Ok(Json(links))
}

/// `PUT /links/all` with the complete collection
pub async fn replace_links(
    State(state): State<AppState>,
    body: Result<Json<Vec<EncryptedLink>>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(links) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    with_store(state.storage, move |store| store.replace_all(links))
        .await
        .map_err(|e| ApiError::new(e, "Failed to save links"))?;

    Ok(Json(MessageResponse::new("Links saved successfully")))
}
