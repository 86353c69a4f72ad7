use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AdminState;
use crate::level::Level;
use crate::source::{parse_properties, Snapshot};

#[derive(Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub config_ids: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideStatus {
    pub logger: String,
    pub level: Option<Level>,
}

#[derive(Serialize, Deserialize)]
pub struct PushResult {
    pub config_id: String,
    pub listeners: usize,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        config_ids: state.source.config_ids(),
    })
}

pub async fn get_overrides(State(state): State<AdminState>) -> Json<Vec<OverrideStatus>> {
    let overrides = state
        .overrides
        .overrides()
        .into_iter()
        .map(|(name, level)| OverrideStatus {
            logger: name.into(),
            level,
        })
        .collect();
    Json(overrides)
}

/// Accepts properties text, or a flat JSON object when sent as JSON.
pub async fn put_config(
    State(state): State<AdminState>,
    Path(config_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<PushResult>, (StatusCode, String)> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let snapshot: Snapshot = if is_json {
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(config_id = %config_id, error = %e, "Rejected malformed snapshot");
            (StatusCode::BAD_REQUEST, format!("invalid snapshot: {}", e))
        })?
    } else {
        parse_properties(&body).map_err(|e| {
            tracing::warn!(config_id = %config_id, error = %e, "Rejected malformed snapshot");
            (StatusCode::BAD_REQUEST, format!("invalid snapshot: {}", e))
        })?
    };

    let listeners = state.source.push(&config_id, &snapshot);
    if listeners == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            format!("no listener registered for {}", config_id),
        ));
    }

    tracing::info!(config_id = %config_id, entries = snapshot.len(), "Snapshot pushed via admin API");
    Ok(Json(PushResult {
        config_id,
        listeners,
    }))
}
