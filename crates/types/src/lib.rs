//! # Snapstore 共有型定義
//!
//! Gateway の HTTP リクエスト／レスポンスと、バックエンド関数呼び出しの
//! エンベロープを Rust 構造体として提供する。
//!
//! ## エンコーディング規則
//! - HTTP ボディはすべて JSON
//! - オブジェクトレコードはバックエンドが返す形のまま `serde_json::Value` で扱う

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// アップロードURL発行 (GET /generate-upload-url)
// ---------------------------------------------------------------------------

/// `/generate-upload-url` のクエリパラメータ。
///
/// どちらも必須だが、欠落時に 422 を返すため `Option` で受けてハンドラ側で検証する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadUrlQuery {
    /// アップロード対象のファイル名（`images/` 配下のキーになる）
    pub file_name: Option<String>,
    /// 宣言されたContent-Type（署名対象に含まれる）
    pub file_type: Option<String>,
}

/// ストレージが発行した署名付きURL。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    /// PUT用の署名付きURL
    pub url: String,
    /// 有効期限（秒）
    pub expires_in_secs: u32,
}

/// `/generate-upload-url` のレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    /// クライアントがPUTに使用するURL
    pub upload_url: String,
    /// URLの有効期限（秒）
    pub expires_in: u32,
    /// 応答したインスタンス名
    pub instance: String,
}

// ---------------------------------------------------------------------------
// 稼働確認
// ---------------------------------------------------------------------------

/// `/health` のレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub instance: String,
}

/// `/` のレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub instance: String,
}

// ---------------------------------------------------------------------------
// エラー
// ---------------------------------------------------------------------------

/// すべての失敗レスポンスで共通のJSONボディ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 分類コード（`not_found`, `gateway_unavailable` 等）
    pub error: String,
    /// 利用者向けの短いメッセージ
    pub detail: String,
}

// ---------------------------------------------------------------------------
// バックエンド関数呼び出し
// ---------------------------------------------------------------------------

/// 単一画像取得関数へのリクエストボディ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetImageRequest {
    #[serde(rename = "imageId")]
    pub image_id: String,
}

/// リモート関数呼び出しの応答エンベロープ。
///
/// トランスポート層のステータスと、関数自身が返したペイロードを分けて保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationEnvelope {
    /// 呼び出しのHTTPステータス（関数の戻り値とは無関係）
    pub status_code: i32,
    /// 関数実行中にエラーが起きた場合のマーカー（`Unhandled` 等）
    pub function_error: Option<String>,
    /// 関数が返したペイロード（UTF-8 JSONを想定）
    pub payload: Vec<u8>,
    /// プロバイダが付与したリクエストID
    pub request_id: Option<String>,
}

impl InvocationEnvelope {
    /// 正常終了したエンベロープを構築する。
    pub fn ok(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code: 200,
            function_error: None,
            payload: payload.into(),
            request_id: None,
        }
    }
}
