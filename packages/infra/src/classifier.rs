//! # 感情分類器トレイト

use async_trait::async_trait;
use emotion_detector_domain::EmotionScores;

use crate::ClassificationError;

/// テキストを感情スコアに分類する外部コラボレーター
///
/// テスト時にスタブへ差し替えられるようトレイトで定義する。
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
   /// テキストを分類する
   ///
   /// 解析できないテキスト（空文字など）はエラーではなく、
   /// 全フィールド `None` の [`EmotionScores`] で表す。
   ///
   /// # Errors
   ///
   /// - 分類結果を解釈できない場合は value / key / type 系統のエラー
   /// - 分類器に到達できない場合は [`ClassificationError::Unavailable`]
   async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError>;
}
