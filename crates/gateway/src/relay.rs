//! # バックエンドへの読み取り中継
//!
//! 一覧取得・単一取得をリモート関数に中継し、応答を分類してHTTP境界の結果に変換する。

use serde_json::Value;
use snapstore_types::{GetImageRequest, InvocationEnvelope};

use crate::backend::InvokeError;
use crate::classify::{classify_invocation, Outcome};
use crate::config::GatewayState;
use crate::error::GatewayError;

/// 保存済みオブジェクトの一覧を取得する。
pub async fn list_objects(state: &GatewayState) -> Result<Value, GatewayError> {
    invoke_and_classify(state, &state.list_function, None, false).await
}

/// IDを指定してオブジェクトを1件取得する。
///
/// IDは前後の空白を除去して検査し、空ならリモート呼び出し前に拒否する。
pub async fn get_object(state: &GatewayState, id: &str) -> Result<Value, GatewayError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::BadRequest(
            "image_idを指定してください".to_string(),
        ));
    }

    let body = serde_json::to_vec(&GetImageRequest {
        image_id: id.to_string(),
    })
    .map_err(|e| GatewayError::Internal(format!("リクエストのシリアライズに失敗: {e}")))?;

    invoke_and_classify(state, &state.get_function, Some(body), true).await
}

/// 関数を1回呼び出し、結果を分類して返す。再試行はしない。
async fn invoke_and_classify(
    state: &GatewayState,
    function_name: &str,
    payload: Option<Vec<u8>>,
    detect_not_found: bool,
) -> Result<Value, GatewayError> {
    tracing::debug!(function = function_name, "バックエンド関数を呼び出し");

    let result = state.invoker.invoke(function_name, payload).await;
    let context = InvocationContext::from_result(&result);

    let outcome = classify_invocation(result, detect_not_found);
    log_outcome(function_name, &context, &outcome);

    outcome.into_result(function_name)
}

/// ログに添える呼び出しの識別情報。送信に失敗した場合はどちらも `None`。
#[derive(Debug, Default, PartialEq, Eq)]
struct InvocationContext {
    request_id: Option<String>,
    status_code: Option<i32>,
}

impl InvocationContext {
    fn from_result(result: &Result<InvocationEnvelope, InvokeError>) -> Self {
        match result {
            Ok(envelope) => Self {
                request_id: envelope.request_id.clone(),
                status_code: Some(envelope.status_code),
            },
            Err(_) => Self::default(),
        }
    }
}

fn log_outcome(function_name: &str, context: &InvocationContext, outcome: &Outcome) {
    let label = outcome.label();
    let request_id = context.request_id.as_deref();
    let status_code = context.status_code;
    match outcome {
        Outcome::Success(_) => {
            tracing::debug!(
                function = function_name,
                request_id,
                status_code,
                outcome = label,
                "呼び出し成功"
            );
        }
        Outcome::NotFound => {
            tracing::info!(
                function = function_name,
                request_id,
                status_code,
                outcome = label,
                "対象が存在しません"
            );
        }
        Outcome::DomainError(detail) => {
            tracing::warn!(
                function = function_name,
                request_id,
                status_code,
                outcome = label,
                detail = %detail,
                "バックエンドがエラーを返しました"
            );
        }
        Outcome::Unavailable(detail)
        | Outcome::ExecutionFailure(detail)
        | Outcome::Malformed(detail) => {
            tracing::error!(
                function = function_name,
                request_id,
                status_code,
                outcome = label,
                detail = %detail,
                "バックエンド呼び出しに失敗"
            );
        }
    }
}
