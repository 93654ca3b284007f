#[cfg(feature = "desktop")]
pub mod detector;
pub mod finger;
pub mod geometry;
pub mod landmark;
#[cfg(feature = "desktop")]
pub mod preprocess;

#[cfg(feature = "desktop")]
pub use detector::OnnxHandDetector;
pub use finger::{Finger, FINGER_CHAINS, FINGER_COLORS, PALM_BASE_COLOR};
pub use landmark::{HandLandmarks, Landmark, LandmarkIndex};
#[cfg(feature = "desktop")]
pub use preprocess::preprocess_for_hand_landmark;

#[cfg(test)]
pub(crate) mod fixtures {
    //! 曲げ角から合成した手のランドマーク

    use super::{Finger, Landmark, LandmarkIndex};

    const WRIST: [f32; 3] = [0.0, 0.0, 0.0];
    const PALM_LENGTH: f32 = 0.9;
    const THUMB_BASE_LENGTH: f32 = 0.3;
    const SEGMENT_LENGTHS: [f32; 3] = [0.45, 0.3, 0.25];

    /// 1本の指の形
    ///
    /// `heading_deg`: 画像上の向き (0 = 上、90 = 右、180 = 下、-90 = 左)
    /// `bends_deg`: chain[1], chain[2], chain[3] での曲げ角。曲げは手のひら側 (+z) へ。
    #[derive(Debug, Clone, Copy)]
    pub struct FingerShape {
        pub heading_deg: f32,
        pub bends_deg: [f32; 3],
    }

    pub const fn shape(heading_deg: f32, bends_deg: [f32; 3]) -> FingerShape {
        FingerShape {
            heading_deg,
            bends_deg,
        }
    }

    pub const STRAIGHT: [f32; 3] = [0.0, 0.0, 0.0];
    pub const HALF: [f32; 3] = [20.0, 60.0, 30.0];
    pub const FIST: [f32; 3] = [80.0, 100.0, 60.0];
    pub const THUMB_HALF: [f32; 3] = [10.0, 30.0, 30.0];
    pub const THUMB_FOLDED: [f32; 3] = [10.0, 60.0, 70.0];

    fn place(points: &mut [Landmark; LandmarkIndex::COUNT], finger: Finger, shape: FingerShape) {
        let heading = shape.heading_deg.to_radians();
        let u = [heading.sin(), -heading.cos(), 0.0];
        let base_len = if finger == Finger::Thumb {
            THUMB_BASE_LENGTH
        } else {
            PALM_LENGTH
        };
        let chain = finger.chain();
        let mut pos = [
            WRIST[0] + u[0] * base_len,
            WRIST[1] + u[1] * base_len,
            WRIST[2] + u[2] * base_len,
        ];
        points[chain[1]] = Landmark::from(pos);

        let mut cumulative = 0.0f32;
        for (k, &len) in SEGMENT_LENGTHS.iter().enumerate() {
            cumulative += shape.bends_deg[k].to_radians();
            let (s, c) = cumulative.sin_cos();
            let dir = [u[0] * c, u[1] * c, s];
            pos = [pos[0] + dir[0] * len, pos[1] + dir[1] * len, pos[2] + dir[2] * len];
            points[chain[k + 2]] = Landmark::from(pos);
        }
    }

    /// 親指〜小指の順に形を指定して 21 点を生成
    pub fn hand(shapes: [FingerShape; Finger::COUNT]) -> [Landmark; LandmarkIndex::COUNT] {
        let mut points = [Landmark::from(WRIST); LandmarkIndex::COUNT];
        for finger in Finger::ALL {
            place(&mut points, finger, shapes[finger.index()]);
        }
        points
    }

    /// 指を全て握った拳 (親指は右上に折り込む)
    pub fn fist() -> [Landmark; LandmarkIndex::COUNT] {
        hand([
            shape(60.0, THUMB_FOLDED),
            shape(-10.0, FIST),
            shape(0.0, FIST),
            shape(10.0, FIST),
            shape(20.0, FIST),
        ])
    }

    /// 親指を真下に伸ばし、他の指を握った形
    pub fn thumbs_down() -> [Landmark; LandmarkIndex::COUNT] {
        hand([
            shape(180.0, STRAIGHT),
            shape(90.0, FIST),
            shape(95.0, FIST),
            shape(100.0, FIST),
            shape(105.0, FIST),
        ])
    }

    /// 人差し指と中指を立て、薬指と小指を握った V サイン
    ///
    /// 握った2本は指先が左上に戻ってくる向きに曲げる。
    pub fn victory() -> [Landmark; LandmarkIndex::COUNT] {
        hand([
            shape(-45.0, STRAIGHT),
            shape(-45.0, STRAIGHT),
            shape(0.0, STRAIGHT),
            shape(135.0, FIST),
            shape(135.0, FIST),
        ])
    }

    /// 全ての指を伸ばして上に向けた手
    pub fn open_palm() -> [Landmark; LandmarkIndex::COUNT] {
        hand([
            shape(-60.0, STRAIGHT),
            shape(-8.0, STRAIGHT),
            shape(0.0, STRAIGHT),
            shape(8.0, STRAIGHT),
            shape(16.0, STRAIGHT),
        ])
    }
}
