pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::db::models::Channel;
use dto::SubmitReadingRequest;
use handlers::ApiDoc;

pub fn router(pool: PgPool) -> Router {
    let api = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/", get(handlers::root))
        .route("/limpar_todas_tabelas", delete(handlers::clear_all_tables))
        .route("/excluir_todas_tabelas", delete(handlers::drop_all_tables))
        .route("/criar_tabelas", post(handlers::provision_all_tables));

    let (router, api) = Channel::ALL
        .into_iter()
        .fold(api, channel_routes)
        .with_state(pool)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { Json(api) }),
        )
}

/// Mounts the per-channel routes, e.g. `/enviar_sensor_vibracao`.
fn channel_routes(router: OpenApiRouter<PgPool>, channel: Channel) -> OpenApiRouter<PgPool> {
    router
        .route(
            &format!("/enviar_sensor_{channel}"),
            post(
                move |state: State<PgPool>, body: Json<SubmitReadingRequest>| {
                    handlers::submit_reading(state, channel, body)
                },
            ),
        )
        .route(
            &format!("/ultimo_sensor_{channel}"),
            get(move |state: State<PgPool>| handlers::latest_reading(state, channel)),
        )
        .route(
            &format!("/historico_sensor_{channel}"),
            get(move |state: State<PgPool>| handlers::reading_history(state, channel)),
        )
        .route(
            &format!("/limpar_sensor_{channel}"),
            delete(move |state: State<PgPool>| handlers::clear_channel(state, channel)),
        )
}
