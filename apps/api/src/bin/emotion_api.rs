//! # Emotion Detector API サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p emotion-detector-api --bin emotion-api
//!
//! # ローカルの分類器を使う場合
//! WATSON_NLP_URL=http://localhost:8080 cargo run -p emotion-detector-api --bin emotion-api
//! ```
//!
//! 環境変数の一覧は [`emotion_detector_api::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use emotion_detector_api::{build_app, config::AppConfig};
use emotion_detector_infra::{EmotionClassifier, WatsonEmotionClassifier};
use emotion_detector_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let tracing_config = TracingConfig::from_env("emotion-api");
   init_tracing(&tracing_config);
   let _tracing_guard =
      tracing::info_span!("app", service = %tracing_config.service_name).entered();

   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

   let classifier: Arc<dyn EmotionClassifier> = Arc::new(
      WatsonEmotionClassifier::new(
         &config.classifier.base_url,
         config.classifier.model_id.clone(),
         config.classifier.timeout,
      )
      .context("分類器クライアントの初期化に失敗しました")?,
   );
   tracing::info!(
      classifier.url = %config.classifier.base_url,
      classifier.model_id = %config.classifier.model_id,
      "感情分類器を設定しました"
   );

   let app = build_app(classifier);

   let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
      .parse()
      .with_context(|| format!("アドレスのパースに失敗しました: {}", config.server.host))?;
   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} にバインドできませんでした"))?;
   tracing::info!("Emotion Detector API サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("サーバーを停止しました");
   Ok(())
}

/// Ctrl+C を受け取るまで待つ
async fn shutdown_signal() {
   if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("シグナルハンドラの登録に失敗しました: {}", e);
      std::future::pending::<()>().await;
   }
}
