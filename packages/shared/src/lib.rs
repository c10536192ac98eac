//! # Emotion Detector 共有ユーティリティ
//!
//! ワークスペース内のすべてのクレートから利用される共通部品を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジック（感情分類やレスポンス文面）は含めない
//! - axum には依存しない（`IntoResponse` 変換は各アプリの責務）
//!
//! ## モジュール構成
//!
//! - [`error_response`] - `{"error": "..."}` 形式のエラーボディ
//! - [`health`] - ヘルスチェックレスポンス
//! - [`observability`] - トレーシング初期化とリクエストスパン

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
