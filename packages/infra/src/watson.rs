//! # Watson NLP 感情分類クライアント
//!
//! Watson NLP ランタイムの `EmotionPredict` エンドポイントを呼び出し、
//! レスポンスを [`EmotionScores`] に変換する。
//!
//! ## エンドポイント
//!
//! ```text
//! POST {base_url}/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict
//! grpc-metadata-mm-model-id: emotion_aggregated-workflow_lang_en_stock
//!
//! { "raw_document": { "text": "I love this!" } }
//! ```
//!
//! ## レスポンスの解釈
//!
//! | 状況 | 結果 |
//! |------|------|
//! | 400 Bad Request | 全フィールド `None`（解析不能なテキスト） |
//! | ボディが JSON でない | `ClassificationError::Value` |
//! | `emotionPredictions[0].emotion.<感情>` が無い | `ClassificationError::Key` |
//! | 値の型が想定外 | `ClassificationError::Type` |
//! | 接続失敗・タイムアウト | `ClassificationError::Unavailable` |
//!
//! 400 以外のエラーステータスでもボディの解釈は同じ手順で行う。
//! エラーボディには `emotionPredictions` が無いため、通常は `Key` か `Value` になる。

use std::time::Duration;

use async_trait::async_trait;
use emotion_detector_domain::{Emotion, EmotionScores, Score};
use emotion_detector_shared::observability::{REQUEST_ID_HEADER, current_request_id};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::{ClassificationError, EmotionClassifier};

/// EmotionPredict のパス
const EMOTION_PREDICT_PATH: &str = "/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

/// 使用するモデルを指定するヘッダー
const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";

/// 既定のモデル ID
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

// --- リクエスト型 ---

#[derive(Debug, Serialize)]
struct EmotionPredictRequest<'a> {
   raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize)]
struct RawDocument<'a> {
   text: &'a str,
}

/// Watson NLP クライアント
pub struct WatsonEmotionClassifier {
   endpoint: String,
   model_id: String,
   client:   reqwest::Client,
}

impl WatsonEmotionClassifier {
   /// 新しいクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: Watson NLP ランタイムのベース URL（末尾の `/` は無視する）
   /// - `model_id`: `grpc-metadata-mm-model-id` ヘッダーに載せるモデル ID
   /// - `timeout`: リクエスト全体のタイムアウト。`None` なら無制限
   ///
   /// # Errors
   ///
   /// HTTP クライアント（TLS バックエンド）の初期化に失敗した場合
   pub fn new(
      base_url: &str,
      model_id: impl Into<String>,
      timeout: Option<Duration>,
   ) -> Result<Self, reqwest::Error> {
      let mut builder = reqwest::Client::builder();
      if let Some(timeout) = timeout {
         builder = builder.timeout(timeout);
      }

      Ok(Self {
         endpoint: format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            EMOTION_PREDICT_PATH
         ),
         model_id: model_id.into(),
         client:   builder.build()?,
      })
   }

   pub fn endpoint(&self) -> &str {
      &self.endpoint
   }
}

#[async_trait]
impl EmotionClassifier for WatsonEmotionClassifier {
   async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError> {
      let mut request = self
         .client
         .post(&self.endpoint)
         .header(MODEL_ID_HEADER, &self.model_id)
         .json(&EmotionPredictRequest {
            raw_document: RawDocument { text },
         });
      if let Some(request_id) = current_request_id() {
         request = request.header(REQUEST_ID_HEADER, request_id);
      }

      let response = request.send().await?;
      let status = response.status();

      if status == StatusCode::BAD_REQUEST {
         tracing::debug!("分類器が入力を解析できませんでした");
         return Ok(EmotionScores::unanalyzable());
      }
      if !status.is_success() {
         tracing::warn!(http.status_code = status.as_u16(), "分類器がエラーステータスを返しました");
      }

      let body = response.text().await?;
      parse_emotion_prediction(&body)
   }
}

/// EmotionPredict のレスポンスボディを感情スコアに変換する
///
/// 最初の予測（`emotionPredictions[0]`）だけを使う。
pub fn parse_emotion_prediction(body: &str) -> Result<EmotionScores, ClassificationError> {
   let root: Value = serde_json::from_str(body)
      .map_err(|e| ClassificationError::Value(format!("レスポンスが JSON ではありません: {e}")))?;

   let predictions = field(&root, "emotionPredictions")?;
   let first = predictions
      .as_array()
      .ok_or_else(|| ClassificationError::Type("emotionPredictions が配列ではありません".into()))?
      .first()
      .ok_or_else(|| ClassificationError::Key("emotionPredictions[0]".into()))?;
   let emotion = field(first, "emotion")?;

   Ok(EmotionScores::from_scores(
      score(emotion, Emotion::Anger)?,
      score(emotion, Emotion::Disgust)?,
      score(emotion, Emotion::Fear)?,
      score(emotion, Emotion::Joy)?,
      score(emotion, Emotion::Sadness)?,
   ))
}

fn field<'a>(value: &'a Value, key: &str) -> Result<&'a Value, ClassificationError> {
   value
      .as_object()
      .ok_or_else(|| ClassificationError::Type(format!("{key} の親がオブジェクトではありません")))?
      .get(key)
      .ok_or_else(|| ClassificationError::Key(key.to_string()))
}

fn score(emotion_object: &Value, emotion: Emotion) -> Result<Score, ClassificationError> {
   let name: &'static str = emotion.into();
   field(emotion_object, name)?
      .as_f64()
      .map(Score::new)
      .ok_or_else(|| ClassificationError::Type(format!("{name} のスコアが数値ではありません")))
}
