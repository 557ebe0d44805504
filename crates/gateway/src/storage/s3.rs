//! # S3互換オブジェクトストレージ実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用するストレージ実装。

use std::collections::HashMap;

use http::{header, HeaderMap, HeaderValue};

use super::ObjectStorage;
use crate::config::StorageConfig;
use crate::error::GatewayError;

/// 発行ごとに付与する一意なクエリパラメータ名。
/// 同一秒内の発行でも署名付きURLが重複しないようにする。
const NONCE_QUERY: &str = "x-upload-nonce";

/// S3互換ストレージによる実装。
pub struct S3ObjectStorage {
    bucket: s3::Bucket,
}

impl S3ObjectStorage {
    pub fn new(bucket: s3::Bucket) -> Self {
        Self { bucket }
    }

    /// 設定からバケットを初期化する。
    ///
    /// カスタムエンドポイント指定時はパススタイルでアクセスする（MinIO等）。
    /// アクセスキー未指定の場合は環境変数・プロファイル・インスタンスロールから取得する。
    pub fn from_config(config: &StorageConfig) -> anyhow::Result<Self> {
        let region = match &config.endpoint {
            Some(endpoint) => s3::Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse::<s3::Region>()?,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => s3::creds::Credentials::new(
                Some(access_key),
                Some(secret_key),
                None,
                None,
                None,
            )?,
            _ => s3::creds::Credentials::default()?,
        };

        let bucket = s3::Bucket::new(&config.bucket, region, credentials)?;
        let bucket = if config.endpoint.is_some() {
            tracing::info!(s3_endpoint = ?config.endpoint, "カスタムS3エンドポイントを使用");
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(Self::new(*bucket))
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(content_type)
            .map_err(|e| GatewayError::Storage(format!("Content-Typeが不正です: {e}")))?;
        headers.insert(header::CONTENT_TYPE, value);

        let queries = HashMap::from([(
            NONCE_QUERY.to_string(),
            uuid::Uuid::new_v4().simple().to_string(),
        )]);

        self.bucket
            .presign_put(object_key, expiry_secs, Some(headers), Some(queries))
            .await
            .map_err(|e| GatewayError::Storage(format!("署名付きアップロードURL生成失敗: {e}")))
    }
}
