use serde::{Deserialize, Serialize};

use crate::config::CurlConfig;
use crate::hand::geometry::bend_angle;
use crate::hand::{Finger, HandLandmarks};

/// 指の曲がり具合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

/// 関節の曲げ角合計から曲がり具合を判定する
#[derive(Debug, Clone)]
pub struct CurlClassifier {
    half_curl_start: f32,
    full_curl_start: f32,
    thumb_half_curl_start: f32,
    thumb_full_curl_start: f32,
}

impl Default for CurlClassifier {
    fn default() -> Self {
        Self::from_config(&CurlConfig::default())
    }
}

impl CurlClassifier {
    pub fn from_config(config: &CurlConfig) -> Self {
        Self {
            half_curl_start: config.half_curl_start,
            full_curl_start: config.full_curl_start,
            thumb_half_curl_start: config.thumb_half_curl_start,
            thumb_full_curl_start: config.thumb_full_curl_start,
        }
    }

    /// 指の内側関節での曲げ角の合計 (度)
    ///
    /// 親指は CMC から先だけを見る (手首-CMC 間は指の曲げに含めない)。
    pub fn total_bend(&self, hand: &HandLandmarks, finger: Finger) -> f32 {
        let chain = finger.chain();
        let chain = if finger == Finger::Thumb { &chain[1..] } else { chain };
        chain
            .windows(3)
            .map(|w| bend_angle(hand.at(w[0]), hand.at(w[1]), hand.at(w[2])))
            .sum::<f32>()
            .to_degrees()
    }

    pub fn classify(&self, hand: &HandLandmarks, finger: Finger) -> FingerCurl {
        let (half, full) = if finger == Finger::Thumb {
            (self.thumb_half_curl_start, self.thumb_full_curl_start)
        } else {
            (self.half_curl_start, self.full_curl_start)
        };
        let total = self.total_bend(hand, finger);
        if total < half {
            FingerCurl::NoCurl
        } else if total < full {
            FingerCurl::HalfCurl
        } else {
            FingerCurl::FullCurl
        }
    }
}
