use serde::{Deserialize, Serialize};

/// 5本の指
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

/// 指ごとの関節インデックス列 (手首 -> 指先)
pub const FINGER_CHAINS: [[usize; 5]; Finger::COUNT] = [
    [0, 1, 2, 3, 4],
    [0, 5, 6, 7, 8],
    [0, 9, 10, 11, 12],
    [0, 13, 14, 15, 16],
    [0, 17, 18, 19, 20],
];

/// 指ごとの描画色 (RGB)
pub const FINGER_COLORS: [u32; Finger::COUNT] = [
    0xFF0000, // 赤
    0x0000FF, // 青
    0xFFFF00, // 黄
    0x008000, // 緑
    0xFFC0CB, // ピンク
];

/// 手のひら付け根 (手首) の描画色
pub const PALM_BASE_COLOR: u32 = 0xFFFFFF;

impl Finger {
    pub const COUNT: usize = 5;

    pub const ALL: [Finger; Finger::COUNT] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn chain(self) -> &'static [usize] {
        &FINGER_CHAINS[self as usize]
    }

    pub fn color(self) -> u32 {
        FINGER_COLORS[self as usize]
    }

    pub fn tip(self) -> usize {
        let chain = self.chain();
        chain[chain.len() - 1]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
