//! # 感情検出ハンドラ
//!
//! ```text
//! POST /emotionDetector
//! Content-Type: application/json
//!
//! { "text": "I love this new technology." }
//! ```
//!
//! ## 処理の流れ
//!
//! 1. ボディが JSON であることを確認する（Content-Type と構文の両方）
//! 2. `text` キーの存在を確認する
//! 3. `text` を分類器に渡す
//! 4. 結果を 1 文のテキストに整形して返す
//!
//! 各段階で失敗した時点でエラーを返し、後続の段階は実行しない。
//! 特に 1〜2 で失敗した場合、分類器は呼び出されない。

use std::sync::Arc;

use axum::{
   body::Bytes,
   extract::State,
   http::{HeaderMap, header::CONTENT_TYPE},
};
use emotion_detector_domain::{AnalyzedEmotions, Emotion};
use serde_json::Value;

use crate::{error::ApiError, usecase::EmotionDetectionUseCase};

/// 感情検出ハンドラの State
pub struct EmotionState {
   pub usecase: EmotionDetectionUseCase,
}

/// 検証済みの検出リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectRequest {
   pub text: String,
}

impl DetectRequest {
   /// ヘッダーとボディから検出リクエストを組み立てる
   ///
   /// `text` が文字列以外（数値、配列など）の場合は、分類器に渡せない値として
   /// [`ApiError::ProcessingFailed`] を返す。空文字列はそのまま通す。
   pub fn parse(headers: &HeaderMap, body: &[u8]) -> Result<Self, ApiError> {
      if !is_json_content_type(headers) {
         return Err(ApiError::NotJson);
      }
      let json: Value = serde_json::from_slice(body).map_err(|_| ApiError::NotJson)?;

      let text = json
         .as_object()
         .and_then(|object| object.get("text"))
         .ok_or(ApiError::MissingText)?;
      let text = text.as_str().ok_or(ApiError::ProcessingFailed)?;

      Ok(Self {
         text: text.to_string(),
      })
   }
}

/// `application/json` または `application/*+json` か
fn is_json_content_type(headers: &HeaderMap) -> bool {
   let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
      return false;
   };
   let mime = content_type
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase();

   mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// 検出結果をレスポンスの文に整形する
pub fn summary_sentence(analyzed: &AnalyzedEmotions) -> String {
   format!(
      "For the given statement, the system response is 'anger': {}, 'disgust': {}, 'fear': {}, \
       'joy': {} and 'sadness': {}. The dominant emotion is {}",
      analyzed.score(Emotion::Anger),
      analyzed.score(Emotion::Disgust),
      analyzed.score(Emotion::Fear),
      analyzed.score(Emotion::Joy),
      analyzed.score(Emotion::Sadness),
      analyzed.dominant_emotion(),
   )
}

/// 感情検出エンドポイント
///
/// 成功時は 200 OK と `text/plain` の 1 文を返す。
pub async fn detect_emotion(
   State(state): State<Arc<EmotionState>>,
   headers: HeaderMap,
   body: Bytes,
) -> Result<String, ApiError> {
   let request = DetectRequest::parse(&headers, &body)?;

   let analyzed = state.usecase.detect(&request.text).await?;

   Ok(summary_sentence(&analyzed))
}

#[cfg(test)]
mod tests {
   use axum::http::HeaderValue;
   use emotion_detector_domain::EmotionScores;
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn headers(content_type: Option<&'static str>) -> HeaderMap {
      let mut headers = HeaderMap::new();
      if let Some(content_type) = content_type {
         headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
      }
      headers
   }

   #[rstest]
   #[case::json("application/json")]
   #[case::charset付き("application/json; charset=utf-8")]
   #[case::大文字("Application/JSON")]
   #[case::plus_json("application/vnd.api+json")]
   fn test_json系のcontent_typeは受け付ける(#[case] content_type: &'static str) {
      let request = DetectRequest::parse(&headers(Some(content_type)), br#"{"text": "hi"}"#);

      assert_eq!(
         request.unwrap(),
         DetectRequest {
            text: "hi".to_string(),
         }
      );
   }

   #[rstest]
   #[case::なし(None)]
   #[case::テキスト(Some("text/plain"))]
   #[case::フォーム(Some("application/x-www-form-urlencoded"))]
   #[case::json以外のapplication(Some("application/xml"))]
   fn test_json以外のcontent_typeはnot_json(#[case] content_type: Option<&'static str>) {
      let result = DetectRequest::parse(&headers(content_type), br#"{"text": "hi"}"#);

      assert!(matches!(result, Err(ApiError::NotJson)));
   }

   #[test]
   fn test_構文が壊れたjsonはnot_json() {
      let result = DetectRequest::parse(&headers(Some("application/json")), b"{\"text\": ");

      assert!(matches!(result, Err(ApiError::NotJson)));
   }

   #[rstest]
   #[case::空オブジェクト("{}")]
   #[case::別のキー(r#"{"message": "hello"}"#)]
   #[case::配列(r#"["text"]"#)]
   #[case::文字列(r#""text""#)]
   #[case::null("null")]
   fn test_textが無ければmissing_text(#[case] body: &str) {
      let result = DetectRequest::parse(&headers(Some("application/json")), body.as_bytes());

      assert!(matches!(result, Err(ApiError::MissingText)));
   }

   #[rstest]
   #[case::数値(r#"{"text": 42}"#)]
   #[case::null(r#"{"text": null}"#)]
   #[case::配列(r#"{"text": ["a"]}"#)]
   fn test_textが文字列でなければprocessing_failed(#[case] body: &str) {
      let result = DetectRequest::parse(&headers(Some("application/json")), body.as_bytes());

      assert!(matches!(result, Err(ApiError::ProcessingFailed)));
   }

   #[test]
   fn test_空文字列のtextはそのまま通す() {
      let request =
         DetectRequest::parse(&headers(Some("application/json")), br#"{"text": ""}"#).unwrap();

      assert_eq!(request.text, "");
   }

   #[test]
   fn test_検出結果を1文に整形する() {
      let analyzed = EmotionScores::from_scores(0.01, 0.01, 0.01, 0.95, 0.02)
         .analyze()
         .unwrap();

      assert_eq!(
         summary_sentence(&analyzed),
         "For the given statement, the system response is 'anger': 0.01, 'disgust': 0.01, \
          'fear': 0.01, 'joy': 0.95 and 'sadness': 0.02. The dominant emotion is joy"
      );
   }

   #[test]
   fn test_小さいスコアは指数表記で整形する() {
      let analyzed = EmotionScores::from_scores(0.000_12, 0.000_04, 0.000_012, 0.998, 1e-7)
         .analyze()
         .unwrap();

      assert_eq!(
         summary_sentence(&analyzed),
         "For the given statement, the system response is 'anger': 0.00012, 'disgust': 4e-05, \
          'fear': 1.2e-05, 'joy': 0.998 and 'sadness': 1e-07. The dominant emotion is joy"
      );
   }
}
