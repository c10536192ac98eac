//! # Observability 基盤
//!
//! トレーシング初期化、ログ出力形式の切り替え、リクエストスパンの生成を提供する。
//!
//! ## レイヤー構成
//!
//! ```text
//! SetRequestIdLayer → TraceLayer(make_request_span) → PropagateRequestIdLayer → handler
//! ```
//!
//! `SetRequestIdLayer` が `X-Request-Id` を確定させた後に [`make_request_span`] が
//! 呼ばれるため、スパン内のすべてのログに `request_id` が含まれる。
//!
//! ## Request ID の伝播
//!
//! 外部の分類器への呼び出しにも同じ Request ID を付与するため、
//! [`scope_request_id`] で task-local に保存し、クライアント側は
//! [`current_request_id`] で取り出す。引数で引き回さないのは、分類器トレイトの
//! シグネチャを横断的関心事で汚さないため。

use std::future::Future;

use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
   static REQUEST_ID: String;
}

/// `RUST_LOG` 未設定時のフィルタ
const DEFAULT_ENV_FILTER: &str = "info,emotion_detector=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// JSON 形式（本番環境向け）
   Json,
   /// 人間が読みやすい形式（開発環境向け）
   #[default]
   Pretty,
}

impl LogFormat {
   /// `LOG_FORMAT` の値からログ形式を決定する
   ///
   /// 未設定なら [`Pretty`](LogFormat::Pretty)。認識できない値も `Pretty` に
   /// フォールバックし、subscriber 初期化前なので stderr に警告を出す。
   pub fn from_value(value: Option<&str>) -> Self {
      match value {
         None | Some("pretty") => Self::Pretty,
         Some("json") => Self::Json,
         Some(other) => {
            eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
            Self::Pretty
         }
      }
   }

   /// 環境変数 `LOG_FORMAT` から読み取る
   pub fn from_env() -> Self {
      Self::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// サービス名（ルートスパン `app` の `service` フィールド）
   pub service_name: String,
   /// ログ出力形式
   pub log_format:   LogFormat,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
      }
   }

   /// `LOG_FORMAT` 環境変数から出力形式を決めて設定を作る
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::new(service_name, LogFormat::from_env())
   }
}

/// グローバル subscriber を初期化する
///
/// `RUST_LOG` でレベルを制御する。未設定の場合は `info,emotion_detector=debug`。
/// プロセス内で一度だけ呼び出すこと。
pub fn init_tracing(config: &TracingConfig) {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| DEFAULT_ENV_FILTER.into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .init();
}

/// UUID v7 の Request ID を生成する [`MakeRequestId`] 実装
///
/// クライアントが `X-Request-Id` を送ってきた場合は `SetRequestIdLayer` がそれを優先するため、
/// ここが呼ばれるのはヘッダーが無いときだけ。
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
      HeaderValue::from_str(&Uuid::now_v7().to_string())
         .ok()
         .map(RequestId::new)
   }
}

/// リクエストごとのスパンを作成する（`TraceLayer::make_span_with` 用）
pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}

/// `future` の実行中、Request ID を task-local に保存する
pub async fn scope_request_id<F: Future>(request_id: String, future: F) -> F::Output {
   REQUEST_ID.scope(request_id, future).await
}

/// 現在のタスクの Request ID
///
/// [`scope_request_id`] の外（テスト、起動処理など）では `None`。
pub fn current_request_id() -> Option<String> {
   REQUEST_ID.try_with(Clone::clone).ok()
}
