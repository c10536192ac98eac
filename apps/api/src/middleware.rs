//! # ミドルウェア
//!
//! - [`store_request_id`]: `SetRequestIdLayer` が確定させた Request ID を task-local に保存する。
//!   分類器クライアントはここから Request ID を取り出して転送する
//! - [`canonical_log_line`]: リクエスト完了時に status と latency を 1 行のサマリログとして出力する
//!
//! どちらも `TraceLayer` の内側に置き、リクエストスパンのフィールド（`request_id` 等）を引き継ぐ。

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use emotion_detector_shared::observability::scope_request_id;
use tower_http::request_id::RequestId;

/// Request ID を task-local に保存するミドルウェア
pub async fn store_request_id(request: Request<Body>, next: Next) -> Response {
   let request_id = request
      .extensions()
      .get::<RequestId>()
      .and_then(|id| id.header_value().to_str().ok())
      .unwrap_or("-")
      .to_string();

   scope_request_id(request_id, next.run(request)).await
}

/// ヘルスチェックはサマリログの対象外
fn is_health_check_path(path: &str) -> bool {
   path.starts_with("/health")
}

/// Canonical Log Line を出力するミドルウェア
///
/// `log.type = "canonical"` マーカー付きで出力する。5xx は WARN、それ以外は INFO。
pub async fn canonical_log_line(request: Request<Body>, next: Next) -> Response {
   if is_health_check_path(request.uri().path()) {
      return next.run(request).await;
   }

   let start = Instant::now();
   let response = next.run(request).await;
   let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
   let status = response.status();

   if status.is_server_error() {
      tracing::warn!(
         log.r#type = "canonical",
         http.status_code = status.as_u16(),
         http.latency_ms = latency_ms,
         "リクエスト完了"
      );
   } else {
      tracing::info!(
         log.r#type = "canonical",
         http.status_code = status.as_u16(),
         http.latency_ms = latency_ms,
         "リクエスト完了"
      );
   }

   response
}
