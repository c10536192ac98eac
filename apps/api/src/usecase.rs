//! # 感情検出ユースケース
//!
//! 分類器を呼び出し、結果を「処理失敗」「解析不能」「成功」の 3 つに振り分ける。
//!
//! | 分類器の結果 | ユースケースの結果 |
//! |-------------|-------------------|
//! | `Value` / `Key` / `Type` エラー | [`DetectionError::ProcessingFailed`] |
//! | その他のエラー | [`DetectionError::Unhandled`] |
//! | スコアのいずれかが欠けている | [`DetectionError::InvalidText`] |
//! | 5 つのスコアが揃っている | [`AnalyzedEmotions`] |

use std::sync::Arc;

use emotion_detector_domain::AnalyzedEmotions;
use emotion_detector_infra::{ClassificationError, EmotionClassifier};
use thiserror::Error;

/// 感情検出の失敗
#[derive(Debug, Error)]
pub enum DetectionError {
   /// 入力または分類結果を処理できなかった
   #[error("分類結果を処理できませんでした")]
   ProcessingFailed(#[source] ClassificationError),

   /// 分類器がテキストを解析できなかった
   #[error("テキストを解析できませんでした")]
   InvalidText,

   /// 想定外の失敗（分類器に到達できない等）
   #[error("分類器の呼び出しに失敗しました")]
   Unhandled(#[source] ClassificationError),
}

impl From<ClassificationError> for DetectionError {
   fn from(error: ClassificationError) -> Self {
      if error.is_processing_failure() {
         Self::ProcessingFailed(error)
      } else {
         Self::Unhandled(error)
      }
   }
}

/// 感情検出ユースケース
pub struct EmotionDetectionUseCase {
   classifier: Arc<dyn EmotionClassifier>,
}

impl EmotionDetectionUseCase {
   pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
      Self { classifier }
   }

   /// テキストの感情を検出する
   ///
   /// 分類器の呼び出しはリクエストごとにちょうど 1 回。リトライはしない。
   pub async fn detect(&self, text: &str) -> Result<AnalyzedEmotions, DetectionError> {
      let scores = self.classifier.classify(text).await?;

      scores.analyze().ok_or(DetectionError::InvalidText)
   }
}
