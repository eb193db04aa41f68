//! Sync management endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use creatorpulse_core::errors::Error;
use creatorpulse_core::sync::{
    DataFreshness, SchedulerStatus, SyncConfiguration, SyncConfigurationUpdate, SyncRecord,
    SyncStatus, SyncStatusReport, SyncTriggerOutcome,
};

use crate::error::ApiResult;
use crate::main_lib::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelQuery {
    channel_id: Option<String>,
}

/// Resolve the channel from the query or the configured default.
fn resolve_channel(state: &AppState, channel_id: Option<String>) -> ApiResult<String> {
    channel_id
        .or_else(|| state.default_channel_id.clone())
        .ok_or_else(|| {
            Error::Validation("channelId is required (no default channel configured)".to_string())
                .into()
        })
}

async fn get_sync_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
) -> ApiResult<Json<SyncStatusReport>> {
    let channel_id = resolve_channel(&state, query.channel_id)?;
    let report = state.sync_service.get_sync_status(&channel_id).await?;
    Ok(Json(report))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest {
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    force: bool,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerResponse {
    sync_id: Option<String>,
    sync_status: SyncStatus,
    message: String,
}

async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TriggerRequest>,
) -> ApiResult<Json<TriggerResponse>> {
    let channel_id = resolve_channel(&state, request.channel_id)?;
    let reason = request.reason.unwrap_or_else(|| "Manual trigger".to_string());

    let outcome = state
        .sync_service
        .trigger_sync(&channel_id, request.force, &reason)
        .await?;

    let response = match outcome {
        SyncTriggerOutcome::Started { sync_id } => TriggerResponse {
            sync_id: Some(sync_id),
            sync_status: SyncStatus::Running,
            message: "Sync started successfully".to_string(),
        },
        SyncTriggerOutcome::NotNeeded => TriggerResponse {
            sync_id: None,
            sync_status: SyncStatus::Cancelled,
            message: "Sync not needed - data is still fresh".to_string(),
        },
    };

    Ok(Json(response))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    channel_id: Option<String>,
    limit: Option<i64>,
    status: Option<SyncStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    syncs: Vec<SyncRecord>,
    total_count: usize,
}

async fn get_sync_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let channel_id = resolve_channel(&state, query.channel_id)?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let syncs = state
        .sync_service
        .get_sync_history(&channel_id, query.status, limit)?;

    Ok(Json(HistoryResponse {
        total_count: syncs.len(),
        syncs,
    }))
}

async fn get_configuration(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
) -> ApiResult<Json<SyncConfiguration>> {
    let channel_id = resolve_channel(&state, query.channel_id)?;
    let config = state.sync_service.get_configuration(&channel_id).await?;
    Ok(Json(config))
}

async fn update_configuration(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
    Json(update): Json<SyncConfigurationUpdate>,
) -> ApiResult<Json<SyncConfiguration>> {
    let channel_id = resolve_channel(&state, query.channel_id)?;
    let config = state
        .sync_service
        .update_configuration(&channel_id, update)
        .await?;
    Ok(Json(config))
}

async fn get_data_freshness(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
) -> ApiResult<Json<DataFreshness>> {
    let channel_id = resolve_channel(&state, query.channel_id)?;
    let freshness = state.sync_service.get_data_freshness(&channel_id).await?;
    Ok(Json(freshness))
}

async fn get_scheduler_status(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SchedulerStatus>> {
    Ok(Json(state.scheduler.status()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync/status", get(get_sync_status))
        .route("/sync/trigger", post(trigger_sync))
        .route("/sync/history", get(get_sync_history))
        .route(
            "/sync/configuration",
            get(get_configuration).put(update_configuration),
        )
        .route("/sync/data-freshness", get(get_data_freshness))
        .route("/sync/scheduler", get(get_scheduler_status))
}
