//! # GET /api/list-images, GET /api/get-image/{image_id}
//!
//! 読み取りバックエンドへの中継。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::relay;

/// GET /api/list-images — 保存済み画像の一覧。
pub async fn handle_list_images(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Value>, GatewayError> {
    tracing::info!("画像一覧リクエスト");
    relay::list_objects(&state).await.map(Json)
}

/// GET /api/get-image/{image_id} — 画像1件の取得。
pub async fn handle_get_image(
    State(state): State<Arc<GatewayState>>,
    Path(image_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    tracing::info!(image_id = %image_id, "画像取得リクエスト");
    relay::get_object(&state, &image_id).await.map(Json)
}
