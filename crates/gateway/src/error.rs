//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。境界で必ず具体的なHTTPステータスに解決される。

use axum::http::StatusCode;
use axum::Json;
use snapstore_types::ErrorBody;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 必須クエリパラメータの欠落・空文字
    #[error("必須パラメータが不足しています: {0}")]
    UnprocessableQuery(String),
    /// 不正なリクエスト（空の画像ID等）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// 署名付きURLの生成に失敗（設定不備）
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// バックエンド関数へ呼び出しを送信できなかった
    #[error("バックエンドに到達できません: {0}")]
    Unavailable(String),
    /// バックエンド関数の実行が失敗した
    #[error("バックエンドの実行に失敗: {0}")]
    ExecutionFailure(String),
    /// バックエンドの応答がJSONとして解釈できない
    #[error("バックエンドの応答が不正です: {0}")]
    Malformed(String),
    /// バックエンドがドメインエラーを返した（メッセージはそのまま利用者に返す）
    #[error("{0}")]
    DomainError(String),
    /// 指定されたオブジェクトが存在しない
    #[error("見つかりません: {0}")]
    NotFound(String),
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl GatewayError {
    /// レスポンスボディの `error` フィールドに入る分類コード。
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::UnprocessableQuery(_) => "missing_parameter",
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::Storage(_) => "storage_error",
            GatewayError::Unavailable(_) => "gateway_unavailable",
            GatewayError::ExecutionFailure(_) => "backend_execution_failure",
            GatewayError::Malformed(_) => "malformed_backend_response",
            GatewayError::DomainError(_) => "backend_domain_error",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::Internal(_) => "internal_error",
        }
    }

    /// 利用者に返す短いメッセージ。
    ///
    /// プロバイダやバックエンド由来の詳細（エラーチェーン、パース位置等）は含めず、
    /// ログにのみ出力する。ドメインエラーはバックエンドのメッセージをそのまま返す。
    pub fn public_detail(&self) -> String {
        match self {
            GatewayError::Storage(_) => "アップロードURLを発行できませんでした".to_string(),
            GatewayError::Unavailable(_) => "バックエンドに到達できません".to_string(),
            GatewayError::ExecutionFailure(_) => "バックエンドの実行に失敗しました".to_string(),
            GatewayError::Malformed(_) => "バックエンドの応答が不正です".to_string(),
            GatewayError::Internal(_) => "内部エラーが発生しました".to_string(),
            GatewayError::UnprocessableQuery(_)
            | GatewayError::BadRequest(_)
            | GatewayError::DomainError(_)
            | GatewayError::NotFound(_) => self.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnprocessableQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Storage(_)
            | GatewayError::ExecutionFailure(_)
            | GatewayError::Malformed(_)
            | GatewayError::DomainError(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        if let GatewayError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "未分類の内部エラー");
        }
        let body = ErrorBody {
            error: self.kind().to_string(),
            detail: self.public_detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GatewayError::UnprocessableQuery("file_name".into()), 422),
            (GatewayError::BadRequest("id".into()), 400),
            (GatewayError::Storage("sign".into()), 500),
            (GatewayError::Unavailable("fn".into()), 502),
            (GatewayError::ExecutionFailure("fn".into()), 500),
            (GatewayError::Malformed("fn".into()), 500),
            (GatewayError::DomainError("Y".into()), 500),
            (GatewayError::NotFound("abc".into()), 404),
            (GatewayError::Internal("x".into()), 500),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status().as_u16(), expected, "{err:?}");
        }
    }

    #[test]
    fn test_domain_error_detail_is_backend_message() {
        let err = GatewayError::DomainError("Y".to_string());
        assert_eq!(err.to_string(), "Y");
        assert_eq!(err.kind(), "backend_domain_error");
    }

    async fn response_body(err: GatewayError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_into_response_uses_status() {
        let (status, body) = response_body(GatewayError::Unavailable("list-images".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error, "gateway_unavailable");
    }

    /// プロバイダ・バックエンド由来の詳細はレスポンスに含めない
    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let cases = [
            GatewayError::Unavailable(
                "関数呼び出しの送信に失敗: dispatch failure: io error: connection refused (os error 111)".into(),
            ),
            GatewayError::ExecutionFailure("list-images (Unhandled)".into()),
            GatewayError::Malformed("get-image: JSONとして解釈できません: expected value at line 1 column 1".into()),
            GatewayError::Storage("署名付きアップロードURL生成失敗: credentials".into()),
            GatewayError::Internal("serde failure".into()),
        ];
        for err in cases {
            let (_, body) = response_body(err).await;
            for leaked in ["os error", "Unhandled", "line 1 column", "credentials", "serde", "list-images", "get-image"] {
                assert!(!body.detail.contains(leaked), "{}: {}", body.error, body.detail);
            }
        }
    }

    #[tokio::test]
    async fn test_domain_error_detail_in_response() {
        let (status, body) = response_body(GatewayError::DomainError("Y".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Y");
    }
}
