//! # テスト用スタブ分類器
//!
//! 固定の結果を返すインメモリ分類器。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! emotion-detector-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use emotion_detector_domain::EmotionScores;

use crate::{ClassificationError, EmotionClassifier};

/// 固定の結果を返す分類器
///
/// 受け取ったテキストを記録するため、呼び出し有無の検証にも使える。
#[derive(Clone)]
pub struct StubEmotionClassifier {
   result:   Result<EmotionScores, ClassificationError>,
   received: Arc<Mutex<Vec<String>>>,
}

impl StubEmotionClassifier {
   /// 常に `scores` を返す
   pub fn returning(scores: EmotionScores) -> Self {
      Self {
         result:   Ok(scores),
         received: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// 常に `error` で失敗する
   pub fn failing(error: ClassificationError) -> Self {
      Self {
         result:   Err(error),
         received: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// これまでに分類を依頼されたテキスト
   pub fn received_texts(&self) -> Vec<String> {
      self.received.lock().unwrap().clone()
   }
}

#[async_trait]
impl EmotionClassifier for StubEmotionClassifier {
   async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError> {
      self.received.lock().unwrap().push(text.to_string());
      self.result.clone()
   }
}
