//! # ルーター構築
//!
//! 固定ルートを各エンドポイントに割り当て、CORSとリクエストログのレイヤーを付与する。

use std::sync::Arc;

use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::GatewayState;
use crate::endpoints::{
    handle_get_image, handle_health, handle_list_images, handle_root, handle_upload_page,
    handle_upload_url,
};

/// Gatewayのルーターを構築する。
pub fn build_router(state: Arc<GatewayState>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/upload", get(handle_upload_page))
        .route("/generate-upload-url", get(handle_upload_url))
        .route("/api/list-images", get(handle_list_images))
        .route("/api/get-image/{image_id}", get(handle_get_image))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
