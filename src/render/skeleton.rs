use crate::hand::{Finger, LandmarkIndex, PALM_BASE_COLOR};

/// 骨格線 (開始ランドマーク, 終了ランドマーク, 色)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
    pub start: usize,
    pub end: usize,
    pub color: u32,
}

/// 指ごとの関節列をつないだ骨格線
pub fn hand_bones() -> impl Iterator<Item = Bone> {
    Finger::ALL.into_iter().flat_map(|finger| {
        finger.chain().windows(2).map(move |w| Bone {
            start: w[0],
            end: w[1],
            color: finger.color(),
        })
    })
}

/// ランドマーク点の色 (手首は白、他は所属する指の色)
pub fn landmark_color(index: usize) -> u32 {
    if index == LandmarkIndex::Wrist as usize {
        return PALM_BASE_COLOR;
    }
    Finger::ALL
        .into_iter()
        .find(|f| f.chain()[1..].contains(&index))
        .map_or(PALM_BASE_COLOR, Finger::color)
}

/// ランドマーク点の半径 (ピクセル)
pub const LANDMARK_RADIUS: i32 = 3;

/// ジェスチャー採用時の枠線の色 (RGB)
pub const GESTURE_BORDER_COLOR: u32 = 0x00FF00; // 緑
