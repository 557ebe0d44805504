//! # 応答の分類
//!
//! リモート関数呼び出しの結果を6種類の終端結果のいずれかに分類する。
//! 一覧取得・単一取得の両方がこの関数を共有する。

use serde_json::Value;
use snapstore_types::InvocationEnvelope;

use crate::backend::InvokeError;
use crate::error::GatewayError;

/// ドメインエラーに `errorMessage` が無い場合の利用者向けメッセージ。
const GENERIC_DOMAIN_ERROR: &str = "バックエンドがエラーを返しました";

/// バックエンドが「見つからない」を表すメッセージ。
const NOT_FOUND_MESSAGE: &str = "Item not found";

/// 呼び出し1回の分類結果。互いに排他。
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 成功。ペイロードをそのまま返す
    Success(Value),
    /// 呼び出しを送信できなかった
    Unavailable(String),
    /// 関数は実行されたが失敗した（`function_error` の内容）
    ExecutionFailure(String),
    /// ペイロードがUTF-8 JSONとして解釈できない
    Malformed(String),
    /// `errorType` を含むエラーレコード
    DomainError(String),
    /// 見つからない
    NotFound,
}

impl Outcome {
    /// ログ出力用の分類名。
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Unavailable(_) => "unavailable",
            Outcome::ExecutionFailure(_) => "execution_failure",
            Outcome::Malformed(_) => "malformed",
            Outcome::DomainError(_) => "domain_error",
            Outcome::NotFound => "not_found",
        }
    }

    /// HTTP境界での結果に変換する。`function_name` はエラーメッセージに使う。
    pub fn into_result(self, function_name: &str) -> Result<Value, GatewayError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Unavailable(reason) => Err(GatewayError::Unavailable(reason)),
            Outcome::ExecutionFailure(marker) => Err(GatewayError::ExecutionFailure(format!(
                "{function_name} ({marker})"
            ))),
            Outcome::Malformed(reason) => Err(GatewayError::Malformed(format!(
                "{function_name}: {reason}"
            ))),
            Outcome::DomainError(message) => Err(GatewayError::DomainError(message)),
            Outcome::NotFound => Err(GatewayError::NotFound(
                "指定された画像は存在しません".to_string(),
            )),
        }
    }
}

/// 呼び出し結果を分類する。
///
/// 判定順: 送信失敗 → 実行失敗 → デコード失敗 → ドメインエラー → (not found) → 成功。
/// `detect_not_found` が真の場合のみ `statusCode: 404` / `message: "Item not found"` を
/// NotFound として扱う。
pub fn classify_invocation(
    result: Result<InvocationEnvelope, InvokeError>,
    detect_not_found: bool,
) -> Outcome {
    let envelope = match result {
        Ok(envelope) => envelope,
        Err(e) => return Outcome::Unavailable(e.to_string()),
    };

    if let Some(marker) = envelope.function_error {
        return Outcome::ExecutionFailure(marker);
    }

    let text = match std::str::from_utf8(&envelope.payload) {
        Ok(text) => text,
        Err(e) => return Outcome::Malformed(format!("UTF-8として解釈できません: {e}")),
    };

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return Outcome::Malformed(format!("JSONとして解釈できません: {e}")),
    };

    if let Some(record) = value.as_object() {
        if record.contains_key("errorType") {
            let message = record
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_DOMAIN_ERROR);
            return Outcome::DomainError(message.to_string());
        }

        if detect_not_found {
            let status_404 = record.get("statusCode").and_then(Value::as_i64) == Some(404);
            let not_found_message =
                record.get("message").and_then(Value::as_str) == Some(NOT_FOUND_MESSAGE);
            if status_404 || not_found_message {
                return Outcome::NotFound;
            }
        }
    }

    Outcome::Success(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(payload: &str) -> Result<InvocationEnvelope, InvokeError> {
        Ok(InvocationEnvelope::ok(payload))
    }

    #[test]
    fn test_dispatch_failure_is_unavailable() {
        let outcome = classify_invocation(
            Err(InvokeError::FunctionNotFound("list-images".into())),
            false,
        );
        assert!(matches!(outcome, Outcome::Unavailable(_)));
    }

    #[test]
    fn test_function_error_wins_over_payload() {
        let envelope = InvocationEnvelope {
            function_error: Some("Unhandled".to_string()),
            ..InvocationEnvelope::ok(r#"{"id":"a"}"#)
        };
        let outcome = classify_invocation(Ok(envelope), true);
        assert_eq!(outcome, Outcome::ExecutionFailure("Unhandled".to_string()));
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            classify_invocation(ok("<html>oops</html>"), false),
            Outcome::Malformed(_)
        ));
        assert!(matches!(
            classify_invocation(ok(""), false),
            Outcome::Malformed(_)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let envelope = InvocationEnvelope::ok(vec![0xff, 0xfe, 0x00]);
        assert!(matches!(
            classify_invocation(Ok(envelope), false),
            Outcome::Malformed(_)
        ));
    }

    #[test]
    fn test_error_type_record_is_domain_error() {
        let outcome = classify_invocation(ok(r#"{"errorType":"X","errorMessage":"Y"}"#), false);
        assert_eq!(outcome, Outcome::DomainError("Y".to_string()));

        let outcome = classify_invocation(ok(r#"{"errorType":"X"}"#), false);
        assert_eq!(outcome, Outcome::DomainError(GENERIC_DOMAIN_ERROR.to_string()));
    }

    #[test]
    fn test_not_found_markers() {
        assert_eq!(
            classify_invocation(ok(r#"{"statusCode":404}"#), true),
            Outcome::NotFound
        );
        assert_eq!(
            classify_invocation(ok(r#"{"message":"Item not found"}"#), true),
            Outcome::NotFound
        );
    }

    #[test]
    fn test_not_found_markers_ignored_without_detection() {
        let outcome = classify_invocation(ok(r#"{"statusCode":404}"#), false);
        assert_eq!(outcome, Outcome::Success(json!({ "statusCode": 404 })));
    }

    #[test]
    fn test_domain_error_takes_precedence_over_not_found() {
        let outcome = classify_invocation(
            ok(r#"{"errorType":"X","errorMessage":"Y","statusCode":404}"#),
            true,
        );
        assert_eq!(outcome, Outcome::DomainError("Y".to_string()));
    }

    #[test]
    fn test_success_is_verbatim() {
        let outcome = classify_invocation(ok(r#"[{"id":"a"},{"id":"b"}]"#), false);
        assert_eq!(outcome, Outcome::Success(json!([{ "id": "a" }, { "id": "b" }])));
    }

    #[test]
    fn test_into_result_status() {
        let err = Outcome::NotFound.into_result("get-image").unwrap_err();
        assert_eq!(err.status().as_u16(), 404);

        let err = Outcome::Unavailable("down".into())
            .into_result("get-image")
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 502);

        let value = Outcome::Success(json!({"id": "abc"}))
            .into_result("get-image")
            .unwrap();
        assert_eq!(value, json!({"id": "abc"}));
    }
}
