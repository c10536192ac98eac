//! # ルーター構築
//!
//! ## レイヤー構成（外側から）
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → PropagateRequestIdLayer
//!    → canonical_log_line → store_request_id → handler
//! ```
//!
//! すべてのレスポンスに `X-Request-Id` が付与される。クライアントが送ってきた値はそのまま使い、
//! 無ければ UUID v7 を採番する。

use std::sync::Arc;

use axum::{
   Router,
   middleware::from_fn,
   routing::{get, post},
};
use emotion_detector_infra::EmotionClassifier;
use emotion_detector_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   handler::{EmotionState, detect_emotion, health_check},
   middleware::{canonical_log_line, store_request_id},
   usecase::EmotionDetectionUseCase,
};

/// アプリケーションのルーターを構築する
pub fn build_app(classifier: Arc<dyn EmotionClassifier>) -> Router {
   let emotion_state = Arc::new(EmotionState {
      usecase: EmotionDetectionUseCase::new(classifier),
   });

   Router::new()
      .route("/health", get(health_check))
      .route("/emotionDetector", post(detect_emotion))
      .with_state(emotion_state)
      .layer(from_fn(store_request_id))
      .layer(from_fn(canonical_log_line))
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
