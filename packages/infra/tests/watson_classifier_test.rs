//! # Watson NLP クライアントの統合テスト
//!
//! ローカルに立てた偽の EmotionPredict サーバーに対して
//! `WatsonEmotionClassifier` を実行し、HTTP レベルの振る舞いを検証する。

use std::{
   sync::{Arc, Mutex},
   time::Duration,
};

use axum::{
   Json,
   Router,
   http::{HeaderMap, StatusCode},
   response::IntoResponse,
   routing::post,
};
use emotion_detector_domain::{Emotion, EmotionScores, Score};
use emotion_detector_infra::{
   ClassificationError,
   EmotionClassifier,
   WatsonEmotionClassifier,
   watson::DEFAULT_MODEL_ID,
};
use emotion_detector_shared::observability::scope_request_id;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const PREDICT_PATH: &str = "/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

/// 偽サーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
struct Received {
   headers: HeaderMap,
   body:    Value,
}

/// ルーターを 127.0.0.1 の空きポートで起動し、ベース URL を返す
async fn spawn_server(router: Router) -> String {
   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
   let addr = listener.local_addr().unwrap();
   tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
   });
   format!("http://{addr}")
}

/// 固定のステータスとボディを返し、受け取ったリクエストを記録する偽サーバー
async fn spawn_fake_watson(
   status: StatusCode,
   body: &'static str,
) -> (String, Arc<Mutex<Vec<Received>>>) {
   let received = Arc::new(Mutex::new(Vec::new()));
   let log = received.clone();

   let router = Router::new().route(
      PREDICT_PATH,
      post(move |headers: HeaderMap, Json(request): Json<Value>| {
         let log = log.clone();
         async move {
            log.lock().unwrap().push(Received {
               headers,
               body: request,
            });
            (status, [("content-type", "application/json")], body).into_response()
         }
      }),
   );

   (spawn_server(router).await, received)
}

fn classifier(base_url: &str) -> WatsonEmotionClassifier {
   WatsonEmotionClassifier::new(base_url, DEFAULT_MODEL_ID, None).unwrap()
}

const PREDICTION: &str = r#"{
   "emotionPredictions": [
      { "emotion": { "anger": 0.01, "disgust": 0.01, "fear": 0.01, "joy": 0.95, "sadness": 0.02 } }
   ]
}"#;

#[tokio::test]
async fn test_予測結果が感情スコアに変換される() {
   // Given
   let (base_url, _) = spawn_fake_watson(StatusCode::OK, PREDICTION).await;
   let sut = classifier(&base_url);

   // When
   let scores = sut.classify("I love this!").await.unwrap();

   // Then
   assert_eq!(scores, EmotionScores::from_scores(0.01, 0.01, 0.01, 0.95, 0.02));
   assert_eq!(scores.dominant_emotion, Some(Emotion::Joy));
   assert_eq!(scores.joy, Some(Score::new(0.95)));
}

#[tokio::test]
async fn test_リクエストにモデルidヘッダーとraw_documentが含まれる() {
   // Given
   let (base_url, received) = spawn_fake_watson(StatusCode::OK, PREDICTION).await;
   let sut = classifier(&base_url);

   // When
   sut.classify("I love this!").await.unwrap();

   // Then
   let received = received.lock().unwrap();
   assert_eq!(received.len(), 1);
   assert_eq!(
      received[0].headers.get("grpc-metadata-mm-model-id").unwrap(),
      DEFAULT_MODEL_ID
   );
   assert_eq!(
      received[0].body,
      json!({ "raw_document": { "text": "I love this!" } })
   );
}

#[tokio::test]
async fn test_400は解析不能として全フィールドnoneを返す() {
   // Given
   let (base_url, _) = spawn_fake_watson(
      StatusCode::BAD_REQUEST,
      r#"{"code": 3, "details": "Invalid input"}"#,
   )
   .await;
   let sut = classifier(&base_url);

   // When
   let scores = sut.classify("").await.unwrap();

   // Then
   assert_eq!(scores, EmotionScores::unanalyzable());
}

#[tokio::test]
async fn test_jsonでないエラーボディはvalueエラー() {
   let (base_url, _) = spawn_fake_watson(StatusCode::BAD_GATEWAY, "Bad Gateway").await;
   let sut = classifier(&base_url);

   let result = sut.classify("xyz").await;

   assert!(
      matches!(result, Err(ClassificationError::Value(_))),
      "Value エラーであること: {result:?}"
   );
}

#[tokio::test]
async fn test_予測を含まないエラーボディはkeyエラー() {
   let (base_url, _) = spawn_fake_watson(
      StatusCode::INTERNAL_SERVER_ERROR,
      r#"{"code": 13, "details": "internal"}"#,
   )
   .await;
   let sut = classifier(&base_url);

   let result = sut.classify("xyz").await;

   assert!(
      matches!(result, Err(ClassificationError::Key(_))),
      "Key エラーであること: {result:?}"
   );
}

#[tokio::test]
async fn test_接続できない場合はunavailable() {
   // Given: ポートを確保してすぐに閉じる
   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
   let addr = listener.local_addr().unwrap();
   drop(listener);
   let sut = classifier(&format!("http://{addr}"));

   // When
   let result = sut.classify("I love this!").await;

   // Then
   assert!(
      matches!(result, Err(ClassificationError::Unavailable(_))),
      "Unavailable であること: {result:?}"
   );
}

#[tokio::test]
async fn test_タイムアウトはunavailable() {
   // Given
   let router = Router::new().route(
      PREDICT_PATH,
      post(|| async {
         tokio::time::sleep(Duration::from_secs(5)).await;
         PREDICTION
      }),
   );
   let base_url = spawn_server(router).await;
   let sut = WatsonEmotionClassifier::new(
      &base_url,
      DEFAULT_MODEL_ID,
      Some(Duration::from_millis(100)),
   )
   .unwrap();

   // When
   let result = sut.classify("I love this!").await;

   // Then
   assert!(
      matches!(result, Err(ClassificationError::Unavailable(_))),
      "Unavailable であること: {result:?}"
   );
}

#[tokio::test]
async fn test_スコープ内のrequest_idが転送される() {
   // Given
   let (base_url, received) = spawn_fake_watson(StatusCode::OK, PREDICTION).await;
   let sut = classifier(&base_url);

   // When
   scope_request_id("req-abc".to_string(), sut.classify("I love this!"))
      .await
      .unwrap();

   // Then
   let received = received.lock().unwrap();
   assert_eq!(received[0].headers.get("x-request-id").unwrap(), "req-abc");
}
