//! # エラーレスポンス
//!
//! API が失敗時に返す JSON ボディ。
//!
//! ```json
//! { "error": "Input has to be JSON." }
//! ```
//!
//! メッセージはクライアントにそのまま表示される前提の文言であり、
//! 内部エラーの詳細を含めてはならない。

use serde::{Deserialize, Serialize};

/// 失敗時のレスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   /// クライアント向けのエラーメッセージ
   pub error: String,
}

impl ErrorResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         error: message.into(),
      }
   }
}
