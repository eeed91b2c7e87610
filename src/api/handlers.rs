use std::collections::BTreeMap;

use axum::{extract::State, Json};
use sqlx::PgPool;
use utoipa::OpenApi;

use super::{
    dto::{
        HistoryResponse, LatestResponse, MessageResponse, ReadingDto, StatusResponse,
        SubmitReadingRequest,
    },
    errors::AppError,
};
use crate::{
    db::{
        models::Channel,
        readings::{self, HISTORY_LIMIT},
    },
    maintenance::{
        MaintenanceOutcome, MaintenanceReport, MaintenanceService, Operation, OutcomeStatus,
    },
};

// ---------------------------------------------------------------------------
// Per-channel handlers
//
// Each of these is mounted once per `Channel` by `api::router`, which binds
// the channel into the route closure.
// ---------------------------------------------------------------------------

/// Store one reading pushed by the ESP32.
#[utoipa::path(
    post,
    path = "/enviar_sensor_{channel}",
    params(("channel" = Channel, Path, description = "Sensor channel")),
    request_body = SubmitReadingRequest,
    responses(
        (status = 200, description = "Reading stored", body = StatusResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn submit_reading(
    State(pool): State<PgPool>,
    channel: Channel,
    Json(body): Json<SubmitReadingRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    readings::insert(&pool, channel, body.leitura_sensor).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Fetch the most recent reading of a channel.
#[utoipa::path(
    get,
    path = "/ultimo_sensor_{channel}",
    params(("channel" = Channel, Path, description = "Sensor channel")),
    responses(
        (status = 200, description = "Latest reading, or a no-data message when the table is empty", body = LatestResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn latest_reading(
    State(pool): State<PgPool>,
    channel: Channel,
) -> Result<Json<LatestResponse>, AppError> {
    let row = readings::latest(&pool, channel).await?;
    Ok(Json(row.into()))
}

/// Fetch the last 50 readings of a channel, most recent first.
#[utoipa::path(
    get,
    path = "/historico_sensor_{channel}",
    params(("channel" = Channel, Path, description = "Sensor channel")),
    responses(
        (status = 200, description = "Up to 50 readings, or a no-data message when the table is empty", body = HistoryResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn reading_history(
    State(pool): State<PgPool>,
    channel: Channel,
) -> Result<Json<HistoryResponse>, AppError> {
    let rows = readings::history(&pool, channel, HISTORY_LIMIT).await?;
    Ok(Json(rows.into()))
}

/// Delete every reading of a channel and restart its ids at 1.
#[utoipa::path(
    delete,
    path = "/limpar_sensor_{channel}",
    params(("channel" = Channel, Path, description = "Sensor channel")),
    responses(
        (status = 200, description = "Table cleared", body = MaintenanceOutcome),
        (status = 500, description = "Internal server error"),
    ),
    tag = "maintenance"
)]
pub async fn clear_channel(
    State(pool): State<PgPool>,
    channel: Channel,
) -> Result<Json<MaintenanceOutcome>, AppError> {
    let outcome = MaintenanceService::new(pool).run(Operation::Clear, channel).await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// Bulk maintenance
// ---------------------------------------------------------------------------

/// Clear every channel table. Failures are reported per channel.
///
/// The result map is keyed by channel slug (`vibracao`, `corrente_1`, ...),
/// not by table name.
#[utoipa::path(
    delete,
    path = "/limpar_todas_tabelas",
    responses(
        (status = 200, description = "Outcome per channel, keyed by channel slug (e.g. `vibracao`)", body = BTreeMap<String, MaintenanceOutcome>),
    ),
    tag = "maintenance"
)]
pub async fn clear_all_tables(State(pool): State<PgPool>) -> Json<MaintenanceReport> {
    Json(MaintenanceService::new(pool).run_all(Operation::Clear).await)
}

/// Drop every channel table. Writes fail until the tables are created again.
#[utoipa::path(
    delete,
    path = "/excluir_todas_tabelas",
    responses(
        (status = 200, description = "Outcome per channel, keyed by channel slug (e.g. `vibracao`)", body = BTreeMap<String, MaintenanceOutcome>),
    ),
    tag = "maintenance"
)]
pub async fn drop_all_tables(State(pool): State<PgPool>) -> Json<MaintenanceReport> {
    Json(MaintenanceService::new(pool).run_all(Operation::Drop).await)
}

/// Create any missing channel table.
#[utoipa::path(
    post,
    path = "/criar_tabelas",
    responses(
        (status = 200, description = "Outcome per channel, keyed by channel slug (e.g. `vibracao`)", body = BTreeMap<String, MaintenanceOutcome>),
    ),
    tag = "maintenance"
)]
pub async fn provision_all_tables(State(pool): State<PgPool>) -> Json<MaintenanceReport> {
    Json(MaintenanceService::new(pool).run_all(Operation::Provision).await)
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = MessageResponse),
    ),
    tag = "system"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        mensagem: "API do ESP32 está online".to_owned(),
    })
}

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = StatusResponse),
    ),
    tag = "system"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        submit_reading,
        latest_reading,
        reading_history,
        clear_channel,
        clear_all_tables,
        drop_all_tables,
        provision_all_tables,
        root,
        health,
    ),
    components(schemas(
        Channel,
        SubmitReadingRequest,
        StatusResponse,
        MessageResponse,
        ReadingDto,
        LatestResponse,
        HistoryResponse,
        MaintenanceOutcome,
        OutcomeStatus,
    )),
    tags(
        (name = "readings",    description = "Sensor reading ingestion and queries"),
        (name = "maintenance", description = "Table maintenance"),
        (name = "system",      description = "System endpoints"),
    ),
    info(
        title = "API ESP32",
        version = "0.1.0",
        description = "Ingestion and query API for ESP32 vibration and current sensors"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
