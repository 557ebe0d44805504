//! # AWS Lambda 呼び出し実装

use aws_sdk_lambda::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_lambda::operation::invoke::InvokeError as SdkInvokeError;
use aws_sdk_lambda::operation::RequestId;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use snapstore_types::InvocationEnvelope;

use super::{FunctionInvoker, InvokeError};

/// `RequestResponse` 方式でLambda関数を呼び出す実装。
pub struct LambdaInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaInvoker {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        Self { client }
    }

    /// リージョンを指定して標準の認証情報チェーンからクライアントを構築する。
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_lambda::Client::new(&config))
    }
}

#[async_trait::async_trait]
impl FunctionInvoker for LambdaInvoker {
    async fn invoke(
        &self,
        function_name: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<InvocationEnvelope, InvokeError> {
        let output = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .set_payload(payload.map(Blob::new))
            .send()
            .await
            .map_err(|e| map_invoke_error(function_name, &e.into_service_error()))?;

        Ok(InvocationEnvelope {
            status_code: output.status_code(),
            function_error: output.function_error().map(str::to_string),
            payload: output
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
            request_id: output.request_id().map(str::to_string),
        })
    }
}

/// SDKのエラーを送信失敗の分類に変換する。
///
/// タイムアウトや接続失敗はコードを持たない未分類エラーとして届くため `Dispatch` になる。
fn map_invoke_error(function_name: &str, error: &SdkInvokeError) -> InvokeError {
    if error.is_resource_not_found_exception() {
        InvokeError::FunctionNotFound(function_name.to_string())
    } else if error.code() == Some("AccessDeniedException") {
        InvokeError::AccessDenied(function_name.to_string())
    } else {
        InvokeError::Dispatch(DisplayErrorContext(error).to_string())
    }
}
