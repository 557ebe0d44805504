//! # Snapstore Gateway
//!
//! 画像ストレージの前段に置く薄いHTTPファサード。
//!
//! ## 役割
//! - オブジェクトストレージへの署名付きアップロードURL発行
//! - 読み取り用バックエンド関数（一覧・単一取得）への中継と応答の分類
//!
//! ## API エンドポイント
//! - `GET /generate-upload-url` — 署名付きURL発行
//! - `GET /api/list-images` — 画像一覧
//! - `GET /api/get-image/{image_id}` — 画像1件の取得
//! - `GET /health` — 稼働確認
//! - `GET /` — ルート情報
//! - `GET /upload` — アップロードページ

mod app;
mod backend;
mod classify;
mod config;
mod endpoints;
mod error;
mod relay;
mod storage;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        list_function = %config.list_function,
        get_function = %config.get_function,
        presign_expiry_secs = config.presign_expiry_secs,
        "設定を読み込みました"
    );

    let state = Arc::new(build_state(&config).await?);
    let app = app::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// プロバイダのクライアントを構築して共有状態にまとめる。
#[cfg(feature = "vendor-aws")]
async fn build_state(config: &GatewayConfig) -> anyhow::Result<GatewayState> {
    let storage = storage::S3ObjectStorage::from_config(&config.storage)?;
    let invoker = backend::LambdaInvoker::from_region(&config.storage.region).await;

    Ok(GatewayState::new(config, Box::new(storage), Box::new(invoker)))
}

#[cfg(not(feature = "vendor-aws"))]
async fn build_state(_config: &GatewayConfig) -> anyhow::Result<GatewayState> {
    anyhow::bail!("ストレージ実装が有効化されていません（feature `vendor-aws` が必要です）")
}
