//! # GET /generate-upload-url
//!
//! ストレージへの署名付きアップロードURL発行。

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use snapstore_types::{UploadUrlQuery, UploadUrlResponse};

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::issue_upload_url;

/// GET /generate-upload-url — 署名付きURL発行。
///
/// `file_name` と `file_type` が揃っていない場合はストレージを呼ばずに422を返す。
pub async fn handle_upload_url(
    State(state): State<Arc<GatewayState>>,
    query: Result<Query<UploadUrlQuery>, QueryRejection>,
) -> Result<Json<UploadUrlResponse>, GatewayError> {
    let Query(query) = query.map_err(|e| GatewayError::UnprocessableQuery(e.body_text()))?;

    let file_name = required(query.file_name, "file_name")?;
    let file_type = required(query.file_type, "file_type")?;

    tracing::info!(file_name = %file_name, file_type = %file_type, "アップロードURL発行リクエスト");

    let issued = issue_upload_url(
        state.storage.as_ref(),
        &file_name,
        &file_type,
        state.presign_expiry_secs,
    )
    .await?;

    Ok(Json(UploadUrlResponse {
        upload_url: issued.url,
        expires_in: issued.expires_in_secs,
        instance: state.instance.clone(),
    }))
}

fn required(value: Option<String>, name: &str) -> Result<String, GatewayError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GatewayError::UnprocessableQuery(name.to_string()))
}
