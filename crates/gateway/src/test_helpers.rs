//! # テスト用共通ヘルパー
//!
//! プロバイダへ接続せずに呼び出し回数と引数を記録するモック群。

use std::sync::{Arc, Mutex};

use snapstore_types::InvocationEnvelope;

use crate::backend::{FunctionInvoker, InvokeError};
use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::ObjectStorage;

type StorageCall = (String, String, u32);

/// テスト用のモックストレージ。署名のたびに異なるダミーURLを返す。
#[derive(Clone, Default)]
pub struct MockStorage {
    fail: bool,
    calls: Arc<Mutex<Vec<StorageCall>>>,
}

impl MockStorage {
    /// 常に署名に失敗するモック。
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ObjectStorage for MockStorage {
    async fn presign_put(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<String, GatewayError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((object_key.to_string(), content_type.to_string(), expiry_secs));
        if self.fail {
            return Err(GatewayError::Storage("mock signing failure".to_string()));
        }
        Ok(format!(
            "http://mock-storage/{object_key}?content-type={content_type}&expires={expiry_secs}&sig={}",
            calls.len()
        ))
    }
}

type CannedFailure = fn(&str) -> InvokeError;
type InvokerCall = (String, Option<Vec<u8>>);

#[derive(Clone)]
enum CannedResponse {
    Envelope(InvocationEnvelope),
    Failure(CannedFailure),
}

/// テスト用のモック関数呼び出し口。固定の応答を返し、呼び出しを記録する。
#[derive(Clone)]
pub struct MockInvoker {
    response: CannedResponse,
    calls: Arc<Mutex<Vec<InvokerCall>>>,
}

impl MockInvoker {
    /// 指定ペイロードで正常終了するモック。
    pub fn responding(payload: &str) -> Self {
        Self::with_envelope(InvocationEnvelope::ok(payload))
    }

    pub fn with_envelope(envelope: InvocationEnvelope) -> Self {
        Self {
            response: CannedResponse::Envelope(envelope),
            calls: Arc::default(),
        }
    }

    /// 呼び出しの送信に失敗するモック。
    pub fn failing(failure: CannedFailure) -> Self {
        Self {
            response: CannedResponse::Failure(failure),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<InvokerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl FunctionInvoker for MockInvoker {
    async fn invoke(
        &self,
        function_name: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<InvocationEnvelope, InvokeError> {
        self.calls
            .lock()
            .unwrap()
            .push((function_name.to_string(), payload));
        match &self.response {
            CannedResponse::Envelope(envelope) => Ok(envelope.clone()),
            CannedResponse::Failure(failure) => Err(failure(function_name)),
        }
    }
}

/// モック呼び出し口とデフォルトのモックストレージでGatewayStateを構築する。
pub fn test_state(invoker: MockInvoker) -> GatewayState {
    test_state_with(MockStorage::default(), invoker)
}

pub fn test_state_with(storage: MockStorage, invoker: MockInvoker) -> GatewayState {
    GatewayState {
        storage: Box::new(storage),
        invoker: Box::new(invoker),
        presign_expiry_secs: 60,
        list_function: "list-images".to_string(),
        get_function: "get-image".to_string(),
        instance: "test-instance".to_string(),
    }
}
