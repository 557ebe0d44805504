//! # オブジェクトストレージ
//!
//! 署名付きアップロードURLを発行するストレージの抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

#[cfg(feature = "vendor-aws")]
pub mod s3;

#[cfg(feature = "vendor-aws")]
pub use s3::S3ObjectStorage;

use snapstore_types::PresignedUrl;

use crate::error::GatewayError;

/// アップロード先キーの名前空間。
pub const UPLOAD_PREFIX: &str = "images/";

/// 署名付きURLのデフォルト有効期限（秒）。
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u32 = 60;

/// オブジェクトストレージの抽象インターフェース。
///
/// 署名はプロバイダのクライアントライブラリ内で完結するローカル処理であり、
/// ストレージへのネットワーク通信はクライアントが実際にPUTするまで発生しない。
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// `object_key` への1回のPUTを許可する署名付きURLを生成する。
    ///
    /// `content_type` は署名対象に含まれ、異なるContent-TypeでのPUTは拒否される。
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError>;
}

/// アップロード用の署名付きURLを発行する。
///
/// `object_name` は `images/` 配下のキーにそのまま連結される。
/// パストラバーサルや衝突の検査は行わない（呼び出し元を信頼する）。
pub async fn issue_upload_url(
    storage: &dyn ObjectStorage,
    object_name: &str,
    content_type: &str,
    expiry_secs: u32,
) -> Result<PresignedUrl, GatewayError> {
    let object_key = format!("{UPLOAD_PREFIX}{object_name}");

    let url = storage
        .presign_put(&object_key, content_type, expiry_secs)
        .await
        .inspect_err(|e| {
            tracing::error!(object_key = %object_key, error = %e, "署名付きURLの生成に失敗");
        })?;

    tracing::debug!(object_key = %object_key, expiry_secs, "署名付きURLを発行");

    Ok(PresignedUrl {
        url,
        expires_in_secs: expiry_secs,
    })
}
