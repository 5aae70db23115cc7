use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use std::sync::Arc;

use super::payload::{Payload, deserialize_scalar};
use super::{ApiError, ApiResponse, AppState};
use crate::constants::messages;
use crate::domain::TreasureId;
use crate::domain::validation::{
    validate_prize_value, validate_search_query, validate_treasure_create,
};
use crate::models::{SearchResult, Treasure, TreasureWithBoxes};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub distance: Option<String>,
    pub prize_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTreasureRequest {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBoxRequest {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub prize_value: Option<String>,
}

pub async fn search_treasures(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<SearchResult>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let query = validate_search_query(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.distance.as_deref(),
        params.prize_value.as_deref(),
    )?;

    let result = state.treasure_service().search(query).await?;
    Ok(Json(ApiResponse::success(
        result,
        messages::TREASURES_RETRIEVED,
    )))
}

pub async fn create_treasure(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<CreateTreasureRequest>,
) -> Result<Json<ApiResponse<Treasure>>, ApiError> {
    let treasure = validate_treasure_create(
        payload.id.as_deref(),
        payload.latitude.as_deref(),
        payload.longitude.as_deref(),
        payload.name.as_deref(),
    )?;

    let created = state.treasure_service().create_treasure(treasure).await?;
    Ok(Json(ApiResponse::success(created, messages::TREASURE_CREATED)))
}

pub async fn create_treasure_box(
    State(state): State<Arc<AppState>>,
    treasure_id: Result<Path<String>, PathRejection>,
    Payload(payload): Payload<CreateBoxRequest>,
) -> Result<Json<ApiResponse<TreasureWithBoxes>>, ApiError> {
    let amt = validate_prize_value(payload.prize_value.as_deref())?;

    // An id that cannot name a stored treasure is reported like a missing one.
    let treasure_id = treasure_id
        .ok()
        .and_then(|Path(raw)| raw.trim().parse::<i32>().ok())
        .map(TreasureId::new)
        .ok_or_else(|| ApiError::not_found(messages::TREASURE_NOT_FOUND))?;

    let created = state
        .treasure_service()
        .create_prize_box(treasure_id, amt)
        .await?;

    Ok(Json(ApiResponse::success(
        created,
        messages::TREASURE_BOX_CREATED,
    )))
}
