//! # 感情スコア
//!
//! 外部の感情分類器が返す 5 感情のスコアと、支配的感情（dominant emotion）を扱う。
//!
//! ## 2 つの表現
//!
//! | 型 | 欠損 | 用途 |
//! |----|------|------|
//! | [`EmotionScores`] | あり（`None`） | 分類器の生の出力 |
//! | [`AnalyzedEmotions`] | なし | 5 感情すべてが揃った分析結果 |
//!
//! 分類器は解析できない入力（空文字など）に対して全フィールド `None` を返す。
//! [`EmotionScores::analyze`] が唯一の変換経路であり、1 つでも欠けていれば `None` を返す。
//!
//! ## 使用例
//!
//! ```rust
//! use emotion_detector_domain::{Emotion, EmotionScores};
//!
//! let scores = EmotionScores::from_scores(0.01, 0.01, 0.01, 0.95, 0.02);
//! let analyzed = scores.analyze().unwrap();
//!
//! assert_eq!(analyzed.dominant_emotion(), Emotion::Joy);
//! assert_eq!(analyzed.score(Emotion::Joy).to_string(), "0.95");
//!
//! assert!(EmotionScores::unanalyzable().analyze().is_none());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// 分類対象の感情
///
/// 宣言順（anger, disgust, fear, joy, sadness）がそのまま表示順・同点時の優先順になる。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Emotion {
   Anger,
   Disgust,
   Fear,
   Joy,
   Sadness,
}

impl Emotion {
   /// 固定順の全感情
   pub const ALL: [Emotion; 5] = [
      Emotion::Anger,
      Emotion::Disgust,
      Emotion::Fear,
      Emotion::Joy,
      Emotion::Sadness,
   ];

   /// 最もスコアの高い感情を返す
   ///
   /// 同点の場合は先に現れた感情を採用する。空の場合は `None`。
   pub fn dominant_of(scores: impl IntoIterator<Item = (Emotion, Score)>) -> Option<Emotion> {
      let mut best: Option<(Emotion, Score)> = None;
      for (emotion, score) in scores {
         match best {
            Some((_, top)) if score.value() <= top.value() => {}
            _ => best = Some((emotion, score)),
         }
      }
      best.map(|(emotion, _)| emotion)
   }
}

/// 感情スコア
///
/// 分類器が返す数値をそのまま保持する。
///
/// 表示は往復可能な最短の桁で行う。10 進指数が -4 以上 16 未満なら固定小数点で
/// `1.0` のように小数点を残し、それ以外は `4e-05` や `1e+16` のように
/// 符号付き 2 桁以上の指数で表す。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
   pub fn new(value: f64) -> Self {
      Self(value)
   }

   pub fn value(&self) -> f64 {
      self.0
   }
}

impl From<f64> for Score {
   fn from(value: f64) -> Self {
      Self(value)
   }
}

impl fmt::Display for Score {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let value = self.0;
      if value.is_nan() {
         return f.write_str("nan");
      }
      if value.is_infinite() {
         return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
      }

      // `{:e}` は最短桁の仮数部と指数部を返す（例: `1.2e-5`）
      let scientific = format!("{value:e}");
      let Some((mantissa, exponent)) = scientific.split_once('e') else {
         return f.write_str(&scientific);
      };
      let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

      if (-4..16).contains(&exponent) {
         let fixed = value.to_string();
         if fixed.contains('.') {
            f.write_str(&fixed)
         } else {
            write!(f, "{fixed}.0")
         }
      } else {
         let sign = if exponent < 0 { '-' } else { '+' };
         write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
      }
   }
}

/// 分類器の出力
///
/// 各フィールドは `None` になり得る。全フィールド `None` は
/// 「入力テキストを解析できなかった」ことを表す分類器からのシグナル。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
   pub anger:            Option<Score>,
   pub disgust:          Option<Score>,
   pub fear:             Option<Score>,
   pub joy:              Option<Score>,
   pub sadness:          Option<Score>,
   pub dominant_emotion: Option<Emotion>,
}

impl EmotionScores {
   /// 解析不能を表す全フィールド `None` の値
   pub fn unanalyzable() -> Self {
      Self::default()
   }

   /// 5 感情のスコアから作成し、支配的感情を算出する
   pub fn from_scores(
      anger: impl Into<Score>,
      disgust: impl Into<Score>,
      fear: impl Into<Score>,
      joy: impl Into<Score>,
      sadness: impl Into<Score>,
   ) -> Self {
      let mut scores = Self {
         anger: Some(anger.into()),
         disgust: Some(disgust.into()),
         fear: Some(fear.into()),
         joy: Some(joy.into()),
         sadness: Some(sadness.into()),
         dominant_emotion: None,
      };
      scores.dominant_emotion = scores.analyze().map(|analyzed| analyzed.dominant_emotion());
      scores
   }

   /// 5 感情すべてが揃っていれば分析結果に変換する
   ///
   /// 支配的感情が欠けている場合はスコアから算出する。
   /// 分類器が返した支配的感情がある場合はそれを尊重する。
   pub fn analyze(&self) -> Option<AnalyzedEmotions> {
      let scores = [
         self.anger?,
         self.disgust?,
         self.fear?,
         self.joy?,
         self.sadness?,
      ];
      let dominant_emotion = match self.dominant_emotion {
         Some(emotion) => emotion,
         None => Emotion::dominant_of(Emotion::ALL.into_iter().zip(scores))?,
      };

      Some(AnalyzedEmotions {
         scores,
         dominant_emotion,
      })
   }
}

/// 5 感情すべてのスコアが揃った分析結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzedEmotions {
   /// [`Emotion::ALL`] と同じ順序
   scores:           [Score; 5],
   dominant_emotion: Emotion,
}

impl AnalyzedEmotions {
   pub fn score(&self, emotion: Emotion) -> Score {
      self.scores[emotion as usize]
   }

   pub fn dominant_emotion(&self) -> Emotion {
      self.dominant_emotion
   }
}
