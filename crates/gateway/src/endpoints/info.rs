//! # GET /health, GET /, GET /upload
//!
//! 稼働確認・ルート情報・アップロードページ。

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use snapstore_types::{HealthResponse, RootResponse};

use crate::config::GatewayState;

const UPLOAD_PAGE: &str = include_str!("../../static/upload.html");

/// GET /health — ロードバランサ向け稼働確認。
pub async fn handle_health(State(state): State<Arc<GatewayState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        instance: state.instance.clone(),
    })
}

/// GET /
pub async fn handle_root(State(state): State<Arc<GatewayState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Snapstore Gateway is running".to_string(),
        instance: state.instance.clone(),
    })
}

/// GET /upload — 署名付きURLを取得してファイルを直接PUTする簡易ページ。
pub async fn handle_upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}
