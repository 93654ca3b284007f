use serde::Serialize;

use super::curl::{CurlClassifier, FingerCurl};
use super::direction::{DirectionClassifier, FingerDirection};
use crate::hand::{Finger, HandLandmarks};

/// 1本の指の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FingerPose {
    pub curl: FingerCurl,
    pub direction: FingerDirection,
}

/// 5本の指の判定結果 (Finger::index() 順)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandFeatures {
    pub fingers: [FingerPose; Finger::COUNT],
}

impl HandFeatures {
    pub fn new(fingers: [FingerPose; Finger::COUNT]) -> Self {
        Self { fingers }
    }

    /// スナップショットの現在値だけから計算する (フレーム間の状態なし)
    pub fn extract(
        hand: &HandLandmarks,
        curl: &CurlClassifier,
        direction: &DirectionClassifier,
    ) -> Self {
        let fingers = Finger::ALL.map(|finger| FingerPose {
            curl: curl.classify(hand, finger),
            direction: direction.classify(hand, finger),
        });
        Self { fingers }
    }

    pub fn get(&self, finger: Finger) -> &FingerPose {
        &self.fingers[finger.index()]
    }
}
