//! # Emotion Detector インフラ層
//!
//! 外部の感情分類サービスとの通信を担当する。
//!
//! ## 設計方針
//!
//! 分類器は [`EmotionClassifier`] トレイトの背後に隠す。
//! アプリ層はトレイトオブジェクトだけを扱い、Watson NLP などの具体的な
//! 通信方式やレスポンス形式を知らない。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!          ↘
//!            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`classifier`] - 分類器トレイト
//! - [`error`] - 分類エラー
//! - [`watson`] - Watson NLP EmotionPredict クライアント
//! - `mock` - テスト用スタブ（`test-utils` feature 有効時のみ）

pub mod classifier;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod watson;

pub use classifier::EmotionClassifier;
pub use error::ClassificationError;
pub use watson::WatsonEmotionClassifier;
