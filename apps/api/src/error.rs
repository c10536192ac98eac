//! # API エラーハンドリング
//!
//! ハンドラが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | ボディ |
//! |----------|-------------|--------|
//! | `NotJson` | 400 | `{"error": "Input has to be JSON."}` |
//! | `MissingText` | 400 | `{"error": "Missing 'text' in JSON."}` |
//! | `InvalidText` | 400 | `{"error": "Invalid text! Please try again!"}` |
//! | `ProcessingFailed` | 500 | `{"error": "Failed to process the result."}` |
//! | `Internal` | 500 | `Internal Server Error`（text/plain） |
//!
//! `Internal` は回復を試みないエラーであり、詳細はログにのみ出力する。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use emotion_detector_shared::ErrorResponse;
use thiserror::Error;

use crate::usecase::DetectionError;

/// API 層で発生するエラー
///
/// `Display` の文言がそのままクライアント向けのメッセージになる（`Internal` を除く）。
#[derive(Debug, Error)]
pub enum ApiError {
   /// リクエストボディが JSON ではない（400）
   #[error("Input has to be JSON.")]
   NotJson,

   /// JSON に `text` が含まれていない（400）
   #[error("Missing 'text' in JSON.")]
   MissingText,

   /// 分類器がテキストを解析できなかった（400）
   #[error("Invalid text! Please try again!")]
   InvalidText,

   /// 入力または分類結果を処理できなかった（500）
   #[error("Failed to process the result.")]
   ProcessingFailed,

   /// 想定外のエラー（500）
   #[error("Internal Server Error")]
   Internal(#[from] anyhow::Error),
}

impl ApiError {
   pub fn status_code(&self) -> StatusCode {
      match self {
         Self::NotJson | Self::MissingText | Self::InvalidText => StatusCode::BAD_REQUEST,
         Self::ProcessingFailed | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DetectionError> for ApiError {
   fn from(error: DetectionError) -> Self {
      match error {
         DetectionError::InvalidText => Self::InvalidText,
         DetectionError::ProcessingFailed(source) => {
            tracing::debug!(error = %source, "分類結果を処理できませんでした");
            Self::ProcessingFailed
         }
         DetectionError::Unhandled(source) => Self::Internal(anyhow::Error::new(source)),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let status = self.status_code();
      match self {
         Self::Internal(err) => {
            // 詳細はログにのみ出力し、クライアントには汎用メッセージだけを返す
            tracing::error!("内部エラー: {:?}", err);
            (status, "Internal Server Error").into_response()
         }
         other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
      }
   }
}
