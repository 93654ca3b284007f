use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;

use tracing::warn;

use crate::config::DirectionConfig;
use crate::hand::{Finger, HandLandmarks};

/// 8方向の内積最大で垂直が選ばれる範囲 (垂直軸からの角度)。これより広い帯は意味を持たない。
pub const MAX_VERTICAL_BAND: f32 = 22.5;

/// 指の向き (画像座標系、y は下向き)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerDirection {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpLeft,
    DiagonalUpRight,
    DiagonalDownLeft,
    DiagonalDownRight,
}

impl FingerDirection {
    pub const ALL: [FingerDirection; 8] = [
        Self::VerticalUp,
        Self::VerticalDown,
        Self::HorizontalLeft,
        Self::HorizontalRight,
        Self::DiagonalUpLeft,
        Self::DiagonalUpRight,
        Self::DiagonalDownLeft,
        Self::DiagonalDownRight,
    ];

    /// 画像平面上の単位ベクトル
    pub fn unit(self) -> [f32; 2] {
        const D: f32 = FRAC_1_SQRT_2;
        match self {
            Self::VerticalUp => [0.0, -1.0],
            Self::VerticalDown => [0.0, 1.0],
            Self::HorizontalLeft => [-1.0, 0.0],
            Self::HorizontalRight => [1.0, 0.0],
            Self::DiagonalUpLeft => [-D, -D],
            Self::DiagonalUpRight => [D, -D],
            Self::DiagonalDownLeft => [-D, D],
            Self::DiagonalDownRight => [D, D],
        }
    }
}

/// 指の付け根から指先へのベクトルで向きを判定する
#[derive(Debug, Clone)]
pub struct DirectionClassifier {
    vertical_band: f32,
    thumb_vertical_band: f32,
}

impl Default for DirectionClassifier {
    fn default() -> Self {
        Self::from_config(&DirectionConfig::default())
    }
}

impl DirectionClassifier {
    pub fn from_config(config: &DirectionConfig) -> Self {
        Self {
            vertical_band: clamp_band("vertical_band", config.vertical_band),
            thumb_vertical_band: clamp_band("thumb_vertical_band", config.thumb_vertical_band),
        }
    }

    pub fn vertical_band(&self) -> f32 {
        self.vertical_band
    }

    pub fn thumb_vertical_band(&self) -> f32 {
        self.thumb_vertical_band
    }

    pub fn classify(&self, hand: &HandLandmarks, finger: Finger) -> FingerDirection {
        let chain = finger.chain();
        let base = hand.at(chain[1]);
        let tip = hand.at(finger.tip());
        let band = if finger == Finger::Thumb {
            self.thumb_vertical_band
        } else {
            self.vertical_band
        };
        classify_vector(tip.x - base.x, tip.y - base.y, band)
    }
}

fn clamp_band(key: &str, band: f32) -> f32 {
    let clamped = band.clamp(0.0, MAX_VERTICAL_BAND);
    if clamped != band {
        warn!(key, band, clamped, "direction band out of range, clamped");
    }
    clamped
}

/// 画像平面ベクトル (dx, dy) を8方向に分類
///
/// 内積最大の方向を選び、垂直方向は垂直軸から `vertical_band` 度以内のときだけ採用する。
/// 範囲外なら水平成分の側の斜め方向になる。長さ0なら VerticalUp。
pub fn classify_vector(dx: f32, dy: f32, vertical_band: f32) -> FingerDirection {
    let len = dx.hypot(dy);
    if len < 1e-6 {
        return FingerDirection::VerticalUp;
    }
    let (nx, ny) = (dx / len, dy / len);

    let mut best = FingerDirection::VerticalUp;
    let mut best_dot = f32::NEG_INFINITY;
    for direction in FingerDirection::ALL {
        let [ux, uy] = direction.unit();
        let dot = nx * ux + ny * uy;
        if dot > best_dot {
            best_dot = dot;
            best = direction;
        }
    }

    match best {
        FingerDirection::VerticalUp | FingerDirection::VerticalDown => {
            let off_vertical = nx.abs().atan2(ny.abs()).to_degrees();
            if off_vertical <= vertical_band {
                best
            } else {
                diagonal(nx, ny)
            }
        }
        other => other,
    }
}

fn diagonal(nx: f32, ny: f32) -> FingerDirection {
    match (nx < 0.0, ny < 0.0) {
        (true, true) => FingerDirection::DiagonalUpLeft,
        (false, true) => FingerDirection::DiagonalUpRight,
        (true, false) => FingerDirection::DiagonalDownLeft,
        (false, false) => FingerDirection::DiagonalDownRight,
    }
}
