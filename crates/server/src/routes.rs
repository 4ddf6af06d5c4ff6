pub mod accounts;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::types::{Health, ServiceInfo};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Service name, version and collection path"))
)]
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo::new(env!("CARGO_PKG_VERSION")))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> JsonApiError {
    JsonApiError::not_found("the requested URL was not found on the server")
}

/// axum answers unknown methods on known paths with an empty 405; give it
/// the same JSON body as every other error while keeping `Allow`.
async fn json_method_not_allowed(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }
    let allow = res.headers().get(header::ALLOW).cloned();
    let mut out = JsonApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed for the requested URL")
        .into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(header::ALLOW, allow);
    }
    out
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/:id",
            get(accounts::read).put(accounts::update).delete(accounts::delete),
        );

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::map_response(json_method_not_allowed))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
