//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── emotion.rs  # POST /emotionDetector
//!     └── health.rs   # GET /health
//! ```

pub mod emotion;
pub mod health;

pub use emotion::{EmotionState, detect_emotion};
pub use health::health_check;
