//! # Emotion Detector ドメイン層
//!
//! 感情分類の結果を表現する型を提供する。
//!
//! ## 設計方針
//!
//! - 分類器が返す「欠損あり」の値（[`EmotionScores`]）と、
//!   検証済みの値（[`AnalyzedEmotions`]）を型で区別する
//! - 感情は 5 種類の固定集合（[`Emotion`]）であり、順序も固定
//! - インフラ層・HTTP 層には依存しない
//!
//! ## モジュール構成
//!
//! - [`emotion`] - 感情・スコア・分析結果

pub mod emotion;

pub use emotion::{AnalyzedEmotions, Emotion, EmotionScores, Score};
