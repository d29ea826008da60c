//! Deploy history handler

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use deployer_core::HistoryEntry;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    success: bool,
    items: Vec<HistoryEntry>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let items = state.ledger.list().await.map_err(|e| {
        error!("Failed to read deploy history: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(HistoryResponse {
        success: true,
        items,
    }))
}
