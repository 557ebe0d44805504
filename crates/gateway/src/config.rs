//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 設定は起動時に一度だけ読み込まれ、以後変更されない。

use anyhow::Context;

use crate::backend::FunctionInvoker;
use crate::storage::{ObjectStorage, DEFAULT_PRESIGN_EXPIRY_SECS};

/// オブジェクトストレージの接続設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// S3互換ストレージのエンドポイント（未指定ならAWS S3）
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Gatewayの起動設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub storage: StorageConfig,
    /// 待ち受けポート
    pub port: u16,
    /// 署名付きURLの有効期限（秒）
    pub presign_expiry_secs: u32,
    /// 一覧取得関数の名前
    pub list_function: String,
    /// 単一取得関数の名前
    pub get_function: String,
    /// レスポンスに含めるインスタンス名
    pub instance: String,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から構築する。空文字は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_sources(lookup, system_hostname)
    }

    /// キー参照関数とホスト名の取得関数から構築する。
    ///
    /// インスタンス名は `INSTANCE_NAME` → ホスト名 → `unknown` の順に決定する。
    fn from_sources<F, H>(lookup: F, hostname: H) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        H: FnOnce() -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket = get("BUCKET_NAME").context("BUCKET_NAMEが設定されていません")?;
        let region = get("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let port = match get("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORTが不正です: {raw}"))?,
            None => 8000,
        };

        let presign_expiry_secs = match get("PRESIGN_EXPIRY_SECS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("PRESIGN_EXPIRY_SECSが不正です: {raw}"))?,
            None => DEFAULT_PRESIGN_EXPIRY_SECS,
        };
        anyhow::ensure!(
            presign_expiry_secs > 0,
            "PRESIGN_EXPIRY_SECSは1以上である必要があります"
        );

        let instance = get("INSTANCE_NAME")
            .or_else(hostname)
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            storage: StorageConfig {
                bucket,
                region,
                endpoint: get("S3_ENDPOINT"),
                access_key: get("S3_ACCESS_KEY"),
                secret_key: get("S3_SECRET_KEY"),
            },
            port,
            presign_expiry_secs,
            list_function: get("LIST_IMAGES_FUNCTION").unwrap_or_else(|| "list-images".to_string()),
            get_function: get("GET_IMAGE_FUNCTION").unwrap_or_else(|| "get-image".to_string()),
            instance,
        })
    }
}

/// OSのホスト名。取得できない・UTF-8でない場合は `None`。
fn system_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
}

/// Gatewayの共有状態。
///
/// プロバイダのクライアントはトレイトで抽象化して注入する（テストではモックに差し替える）。
pub struct GatewayState {
    /// 署名付きURLを発行するストレージ
    pub storage: Box<dyn ObjectStorage>,
    /// 読み取り用バックエンド関数の呼び出し口
    pub invoker: Box<dyn FunctionInvoker>,
    /// 署名付きURLの有効期限（秒）
    pub presign_expiry_secs: u32,
    /// 一覧取得関数の名前
    pub list_function: String,
    /// 単一取得関数の名前
    pub get_function: String,
    /// レスポンスに含めるインスタンス名
    pub instance: String,
}

impl GatewayState {
    pub fn new(
        config: &GatewayConfig,
        storage: Box<dyn ObjectStorage>,
        invoker: Box<dyn FunctionInvoker>,
    ) -> Self {
        Self {
            storage,
            invoker,
            presign_expiry_secs: config.presign_expiry_secs,
            list_function: config.list_function.clone(),
            get_function: config.get_function.clone(),
            instance: config.instance.clone(),
        }
    }
}
