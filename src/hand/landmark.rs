use serde::{Deserialize, Serialize};

/// MediaPipe Hands の 21 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl LandmarkIndex {
    pub const COUNT: usize = 21;
}

/// 単一ランドマーク (画像/モデル座標系、x: 右、y: 下)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// ピクセル座標に変換 (x, y はピクセル単位を想定)
    pub fn to_pixel(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// origin から self へのベクトル
    pub fn offset_from(&self, origin: &Landmark) -> [f32; 3] {
        [self.x - origin.x, self.y - origin.y, self.z - origin.z]
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f32; 3] {
    fn from(lm: Landmark) -> Self {
        [lm.x, lm.y, lm.z]
    }
}

/// 検証済みの 21 点ランドマークスナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub points: [Landmark; LandmarkIndex::COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self { points }
    }

    /// 点数が 21 でない、または非有限値を含む場合は None
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LandmarkIndex::COUNT] = points.try_into().ok()?;
        if points.iter().all(Landmark::is_finite) {
            Some(Self { points })
        } else {
            None
        }
    }

    pub fn at(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_count() {
        assert_eq!(LandmarkIndex::COUNT, 21);
        assert_eq!(LandmarkIndex::PinkyTip as usize, 20);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert!(HandLandmarks::from_slice(&[]).is_none());
        assert!(HandLandmarks::from_slice(&[Landmark::default(); 20]).is_none());
        assert!(HandLandmarks::from_slice(&[Landmark::default(); 22]).is_none());
        assert!(HandLandmarks::from_slice(&[Landmark::default(); 21]).is_some());
    }

    #[test]
    fn test_from_slice_rejects_nan() {
        let mut points = [Landmark::default(); 21];
        points[7] = Landmark::new(f32::NAN, 0.0, 0.0);
        assert!(HandLandmarks::from_slice(&points).is_none());
    }

    #[test]
    fn test_at() {
        let mut points = [Landmark::default(); 21];
        points[LandmarkIndex::ThumbTip as usize] = Landmark::new(1.0, 2.0, 3.0);
        let hand = HandLandmarks::new(points);
        assert_eq!(hand.at(LandmarkIndex::ThumbTip as usize).y, 2.0);
    }

    #[test]
    fn test_landmark_deserializes_from_triple() {
        let lm: Landmark = serde_json::from_str("[1.5, -2.0, 0.25]").unwrap();
        assert_eq!(lm, Landmark::new(1.5, -2.0, 0.25));
    }

    #[test]
    fn test_to_pixel() {
        assert_eq!(Landmark::new(320.4, 119.6, 0.0).to_pixel(), (320, 120));
    }
}
