use crate::config::Config;
use crate::error::ApiError;
use crate::pipeline::run_pipeline;
use crate::request::{validate_request_body, ResponseBody};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

/// Shared by every request; holds nothing request-specific.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", post(generate))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(cors)
        // The CORS layer only answers these on preflight; every response
        // carries them.
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "OK" }))
}

async fn generate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResponseBody>, ApiError> {
    let body = body.map_err(ApiError::from_body_rejection)?;
    let request = validate_request_body(&body)?;
    log::info!("Processing image {}", request.image_url);

    let response = run_pipeline(&state.client, &state.config, &request).await?;
    Ok(Json(response))
}

pub async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.build_client()?;
    let addr = config.bind_addr();
    let state = AppState {
        client,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
