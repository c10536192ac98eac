//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `EMOTION_API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `EMOTION_API_PORT` | No | `5000` | ポート番号 |
//! | `WATSON_NLP_URL` | No | `https://sn-watson-emotion.labs.skills.network` | 感情分類器のベース URL |
//! | `WATSON_NLP_MODEL_ID` | No | `emotion_aggregated-workflow_lang_en_stock` | モデル ID |
//! | `WATSON_NLP_TIMEOUT_SECS` | No | なし（無制限） | 分類器呼び出しのタイムアウト秒数（1 以上） |
//!
//! 値が設定されているのに解釈できない場合は、デフォルトに戻さず起動を失敗させる。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use emotion_detector_api::config::AppConfig;
//!
//! // .env ファイルから読み込み（開発環境）
//! dotenvy::dotenv().ok();
//!
//! let config = AppConfig::from_env()?;
//! println!("サーバー: {}:{}", config.server.host, config.server.port);
//! ```

use std::{env, num::NonZeroU64, time::Duration};

use emotion_detector_infra::watson::DEFAULT_MODEL_ID;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_WATSON_NLP_URL: &str = "https://sn-watson-emotion.labs.skills.network";

/// 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 値を解釈できない
   #[error("{name} は{expected}である必要があります（値: {value:?}）")]
   Invalid {
      name:     &'static str,
      value:    String,
      expected: &'static str,
   },
}

/// HTTP サーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host: String,
   /// ポート番号
   pub port: u16,
}

/// 感情分類器（Watson NLP）への接続設定
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
   /// ベース URL
   pub base_url: String,
   /// `grpc-metadata-mm-model-id` ヘッダーの値
   pub model_id: String,
   /// リクエストのタイムアウト（`None` なら無制限）
   pub timeout:  Option<Duration>,
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、以降は変更しない。
#[derive(Debug, Clone)]
pub struct AppConfig {
   pub server:     ServerConfig,
   pub classifier: ClassifierConfig,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// テストでプロセス全体の環境変数を書き換えずに済むよう、参照元を差し替え可能にしている。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let port = match lookup("EMOTION_API_PORT") {
         Some(value) => parse(value, "EMOTION_API_PORT", "有効なポート番号")?,
         None => DEFAULT_PORT,
      };
      // タイムアウトは 1 秒以上
      let timeout = lookup("WATSON_NLP_TIMEOUT_SECS")
         .map(|value| parse::<NonZeroU64>(value, "WATSON_NLP_TIMEOUT_SECS", "1 以上の整数の秒数"))
         .transpose()?
         .map(|secs| Duration::from_secs(secs.get()));

      Ok(Self {
         server:     ServerConfig {
            host: lookup("EMOTION_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
         },
         classifier: ClassifierConfig {
            base_url: lookup("WATSON_NLP_URL")
               .unwrap_or_else(|| DEFAULT_WATSON_NLP_URL.to_string()),
            model_id: lookup("WATSON_NLP_MODEL_ID")
               .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            timeout,
         },
      })
   }
}

fn parse<T: std::str::FromStr>(
   value: String,
   name: &'static str,
   expected: &'static str,
) -> Result<T, ConfigError> {
   value.trim().parse().map_err(|_| ConfigError::Invalid {
      name,
      value,
      expected,
   })
}
