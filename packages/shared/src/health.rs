//! # ヘルスチェック共通型
//!
//! ロードバランサーやコンテナオーケストレーターの死活監視に応答する
//! `GET /health` のレスポンス型。

use serde::Serialize;

/// ヘルスチェックレスポンス
///
/// ## 使用例
///
/// ```
/// use emotion_detector_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` 固定）
   pub status:  String,
   /// アプリケーションバージョン（Cargo.toml から取得）
   pub version: String,
}

impl HealthResponse {
   /// 稼働中を表すレスポンスを作成する
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  "healthy".to_string(),
         version: version.into(),
      }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_health_responseのserializeで正しいjson形状にする() {
      let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "status": "healthy",
            "version": "0.1.0"
         })
      );
   }
}
