//! # バックエンド関数呼び出し
//!
//! 名前で指定したリモート関数を同期的に呼び出すための抽象インターフェース。
//! AWS Lambda 実装は `lambda` サブモジュールを参照。

#[cfg(feature = "vendor-aws")]
pub mod lambda;

#[cfg(feature = "vendor-aws")]
pub use lambda::LambdaInvoker;

use snapstore_types::InvocationEnvelope;

/// 呼び出しを送信できなかった場合のエラー。
/// 関数の実行結果ではなく、トランスポート層の失敗を表す。
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// 指定名の関数が存在しない
    #[error("関数が見つかりません: {0}")]
    FunctionNotFound(String),
    /// 呼び出し権限がない
    #[error("関数の呼び出し権限がありません: {0}")]
    AccessDenied(String),
    /// その他の送信失敗（ネットワーク、スロットリング等）
    #[error("関数呼び出しの送信に失敗: {0}")]
    Dispatch(String),
}

/// リモート関数呼び出しの抽象インターフェース。
///
/// 実装は内部のコネクションプールを含めてスレッドセーフであること。
#[async_trait::async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// `function_name` を同期呼び出しし、応答エンベロープを返す。
    ///
    /// `payload` が `None` の場合はボディなしで呼び出す。
    async fn invoke(
        &self,
        function_name: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<InvocationEnvelope, InvokeError>;
}
