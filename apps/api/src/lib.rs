//! # Emotion Detector API サーバー
//!
//! テキストを受け取り、外部の感情分類器（Watson NLP）で分析した結果を
//! 1 文のテキストとして返す HTTP サービス。
//!
//! ```text
//! ┌──────────┐  POST /emotionDetector  ┌──────────────┐  EmotionPredict  ┌────────────┐
//! │  Client  │────────────────────────▶│ emotion-api  │─────────────────▶│ Watson NLP │
//! └──────────┘                         └──────────────┘                  └────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーターとミドルウェアの組み立て
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - Request ID の保存、Canonical Log Line
//! - [`usecase`] - 感情検出ユースケース

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

pub use app::build_app;
