//! # 分類エラー定義
//!
//! 感情分類器の呼び出しで発生するエラー。
//!
//! ## エラーの系統
//!
//! | バリアント | 系統 | 意味 |
//! |-----------|------|------|
//! | `Value` | 処理失敗 | 値として解釈できない（JSON でない等） |
//! | `Key` | 処理失敗 | 期待したキー・要素が存在しない |
//! | `Type` | 処理失敗 | 値の型が想定と異なる |
//! | `Unavailable` | その他 | 分類器に到達できない（接続失敗、タイムアウト等） |
//!
//! 呼び出し側は「処理失敗」系統だけを回復可能なエラーとして扱い、
//! それ以外はそのまま上位へ伝播させる。

use thiserror::Error;

/// 感情分類器のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
   /// 値として解釈できない
   #[error("不正な値: {0}")]
   Value(String),

   /// 期待したキーが存在しない
   #[error("キーが見つかりません: {0}")]
   Key(String),

   /// 型が想定と異なる
   #[error("型が不正です: {0}")]
   Type(String),

   /// 分類器に到達できない
   #[error("分類器が利用できません: {0}")]
   Unavailable(String),
}

impl ClassificationError {
   /// 入力または分類結果を処理できなかったことを表すか（value / key / type 系統）
   pub fn is_processing_failure(&self) -> bool {
      matches!(self, Self::Value(_) | Self::Key(_) | Self::Type(_))
   }
}

impl From<reqwest::Error> for ClassificationError {
   fn from(err: reqwest::Error) -> Self {
      if err.is_decode() {
         Self::Value(err.to_string())
      } else {
         Self::Unavailable(err.to_string())
      }
   }
}
