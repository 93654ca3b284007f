use super::curl::FingerCurl;
use super::direction::FingerDirection;
use super::error::GestureError;
use super::features::HandFeatures;
use crate::hand::Finger;

/// 宣言的なジェスチャー定義
///
/// 指ごとに「期待する曲がり具合」と「期待する向き」を重み付きで持つ。
/// スコアは一致した期待値の重み (x 指の重み) の単純な合計で、不一致による減点はない。
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTemplate {
    name: String,
    curls: [Vec<(FingerCurl, f32)>; Finger::COUNT],
    directions: [Vec<(FingerDirection, f32)>; Finger::COUNT],
    finger_weights: [f32; Finger::COUNT],
}

impl GestureTemplate {
    pub fn builder(name: impl Into<String>) -> GestureTemplateBuilder {
        GestureTemplateBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curls(&self, finger: Finger) -> &[(FingerCurl, f32)] {
        &self.curls[finger.index()]
    }

    pub fn directions(&self, finger: Finger) -> &[(FingerDirection, f32)] {
        &self.directions[finger.index()]
    }

    pub fn finger_weight(&self, finger: Finger) -> f32 {
        self.finger_weights[finger.index()]
    }

    pub fn score(&self, features: &HandFeatures) -> f32 {
        Finger::ALL
            .iter()
            .map(|&finger| {
                let observed = features.get(finger);
                let curl = lookup(self.curls(finger), &observed.curl);
                let direction = lookup(self.directions(finger), &observed.direction);
                (curl + direction) * self.finger_weight(finger)
            })
            .sum()
    }

    /// 到達可能な最大スコア (指ごとに最も重い曲がり具合と向きが一致した場合)
    pub fn max_score(&self) -> f32 {
        Finger::ALL
            .iter()
            .map(|&finger| {
                let curl = heaviest(self.curls(finger));
                let direction = heaviest(self.directions(finger));
                (curl + direction) * self.finger_weight(finger)
            })
            .sum()
    }

    /// 宣言された全ての重みの合計
    ///
    /// 各指の重みを掛けた値なので、指の重みが 1 を超えるテンプレートでは
    /// 宣言値の素の合計より大きくなる。スコアの上限はこちら。
    pub fn total_weight(&self) -> f32 {
        Finger::ALL
            .iter()
            .map(|&finger| {
                let curl: f32 = self.curls(finger).iter().map(|(_, w)| w).sum();
                let direction: f32 = self.directions(finger).iter().map(|(_, w)| w).sum();
                (curl + direction) * self.finger_weight(finger)
            })
            .sum()
    }
}

fn lookup<T: PartialEq>(entries: &[(T, f32)], observed: &T) -> f32 {
    entries
        .iter()
        .find(|(expected, _)| expected == observed)
        .map_or(0.0, |(_, weight)| *weight)
}

fn heaviest<T>(entries: &[(T, f32)]) -> f32 {
    entries.iter().map(|(_, w)| *w).fold(0.0, f32::max)
}

/// [`GestureTemplate`] の組み立て
///
/// 不正な値は最初のものを記録しておき、`build()` でエラーとして返す。
#[derive(Debug, Clone)]
pub struct GestureTemplateBuilder {
    template: GestureTemplate,
    error: Option<GestureError>,
}

impl GestureTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let error = if name.trim().is_empty() {
            Some(GestureError::EmptyName)
        } else {
            None
        };
        Self {
            template: GestureTemplate {
                name,
                curls: Default::default(),
                directions: Default::default(),
                finger_weights: [1.0; Finger::COUNT],
            },
            error,
        }
    }

    fn check_weight(&mut self, finger: Finger, weight: f32) -> bool {
        if (0.0..=1.0).contains(&weight) {
            return true;
        }
        if self.error.is_none() {
            self.error = Some(GestureError::InvalidWeight {
                gesture: self.template.name.clone(),
                finger,
                weight,
            });
        }
        false
    }

    /// 同じ (指, 曲がり具合) を再指定した場合は重みを上書きする
    pub fn add_curl(mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Self {
        if self.check_weight(finger, weight) {
            upsert(&mut self.template.curls[finger.index()], curl, weight);
        }
        self
    }

    pub fn add_direction(mut self, finger: Finger, direction: FingerDirection, weight: f32) -> Self {
        if self.check_weight(finger, weight) {
            upsert(&mut self.template.directions[finger.index()], direction, weight);
        }
        self
    }

    /// 指全体の重み (既定 1.0)
    pub fn set_weight(mut self, finger: Finger, weight: f32) -> Self {
        if weight.is_finite() && weight >= 0.0 {
            self.template.finger_weights[finger.index()] = weight;
        } else if self.error.is_none() {
            self.error = Some(GestureError::InvalidFingerWeight {
                gesture: self.template.name.clone(),
                finger,
                weight,
            });
        }
        self
    }

    pub fn build(self) -> Result<GestureTemplate, GestureError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.template),
        }
    }
}

fn upsert<T: PartialEq>(entries: &mut Vec<(T, f32)>, key: T, weight: f32) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = weight,
        None => entries.push((key, weight)),
    }
}

const FOLDED_FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

/// ✌ 人差し指と中指を立て、薬指と小指を握る
pub fn victory() -> GestureTemplate {
    use FingerCurl::*;
    use FingerDirection::*;

    GestureTemplate::builder("victory")
        .add_curl(Finger::Thumb, HalfCurl, 0.5)
        .add_curl(Finger::Thumb, NoCurl, 0.5)
        .add_direction(Finger::Thumb, VerticalUp, 1.0)
        .add_direction(Finger::Thumb, DiagonalUpLeft, 1.0)
        .add_curl(Finger::Index, NoCurl, 1.0)
        .add_direction(Finger::Index, VerticalUp, 0.75)
        .add_direction(Finger::Index, DiagonalUpLeft, 1.0)
        .add_curl(Finger::Middle, NoCurl, 1.0)
        .add_direction(Finger::Middle, VerticalUp, 1.0)
        .add_direction(Finger::Middle, DiagonalUpLeft, 0.75)
        .add_curl(Finger::Ring, FullCurl, 1.0)
        .add_direction(Finger::Ring, VerticalUp, 0.2)
        .add_direction(Finger::Ring, DiagonalUpLeft, 1.0)
        .add_direction(Finger::Ring, HorizontalLeft, 0.2)
        .add_curl(Finger::Pinky, FullCurl, 1.0)
        .add_direction(Finger::Pinky, VerticalUp, 0.2)
        .add_direction(Finger::Pinky, DiagonalUpLeft, 1.0)
        .add_direction(Finger::Pinky, HorizontalLeft, 0.2)
        .set_weight(Finger::Index, 2.0)
        .set_weight(Finger::Middle, 2.0)
        .build()
        .unwrap_or_else(|e| unreachable!("built-in template: {e}"))
}

/// 👍 親指を立て、他の指を横向きに握る
pub fn thumbs_up() -> GestureTemplate {
    use FingerCurl::*;
    use FingerDirection::*;

    let mut builder = GestureTemplate::builder("thumbs_up")
        .add_curl(Finger::Thumb, NoCurl, 1.0)
        .add_direction(Finger::Thumb, VerticalUp, 1.0)
        .add_direction(Finger::Thumb, DiagonalUpLeft, 0.25)
        .add_direction(Finger::Thumb, DiagonalUpRight, 0.25);
    for finger in FOLDED_FINGERS {
        builder = builder
            .add_curl(finger, FullCurl, 1.0)
            .add_direction(finger, HorizontalLeft, 1.0)
            .add_direction(finger, HorizontalRight, 1.0);
    }
    builder
        .set_weight(Finger::Thumb, 2.0)
        .build()
        .unwrap_or_else(|e| unreachable!("built-in template: {e}"))
}

/// 👎 親指を下に伸ばし、他の指を握る
pub fn thumbs_down() -> GestureTemplate {
    use FingerCurl::*;
    use FingerDirection::*;

    let mut builder = GestureTemplate::builder("thumbs_down")
        .add_curl(Finger::Thumb, NoCurl, 1.0)
        .add_direction(Finger::Thumb, VerticalDown, 1.0)
        .add_direction(Finger::Thumb, DiagonalDownLeft, 0.9)
        .add_direction(Finger::Thumb, DiagonalDownRight, 0.9);
    for finger in FOLDED_FINGERS {
        builder = builder
            .add_curl(finger, FullCurl, 0.9)
            .add_curl(finger, HalfCurl, 0.9);
    }
    builder
        .build()
        .unwrap_or_else(|e| unreachable!("built-in template: {e}"))
}

/// 起動時に登録する既定のジェスチャー
pub fn builtin_templates() -> Vec<GestureTemplate> {
    vec![victory(), thumbs_up(), thumbs_down()]
}
