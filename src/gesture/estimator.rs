use serde::Serialize;
use tracing::{debug, trace};

use super::curl::CurlClassifier;
use super::direction::DirectionClassifier;
use super::error::GestureError;
use super::features::HandFeatures;
use super::template::{builtin_templates, GestureTemplate};
use crate::config::Config;
use crate::hand::{HandLandmarks, Landmark};

/// 1テンプレートに対する照合結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureMatch {
    pub name: String,
    pub score: f32,
    pub max_score: f32,
}

impl GestureMatch {
    /// score / max_score を `scale` 満点に換算した値
    pub fn confidence(&self, scale: f32) -> f32 {
        if self.max_score > 0.0 {
            self.score / self.max_score * scale
        } else {
            0.0
        }
    }
}

/// 1フレーム分の推定結果
///
/// `matches` は正規化スコアの降順 (同点は登録順)。スナップショットが不正なら空。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Estimation {
    pub features: Option<HandFeatures>,
    pub matches: Vec<GestureMatch>,
    pub confidence_scale: f32,
}

impl Estimation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// 正規化スコアが `threshold` を超えるもののうち最上位
    pub fn best(&self, threshold: f32) -> Option<&GestureMatch> {
        self.matches
            .first()
            .filter(|m| m.confidence(self.confidence_scale) > threshold)
    }
}

/// 登録済みテンプレート全てに対してスナップショットを採点する
///
/// フレーム間の状態は持たない。
#[derive(Debug, Clone)]
pub struct GestureEstimator {
    templates: Vec<GestureTemplate>,
    curl: CurlClassifier,
    direction: DirectionClassifier,
    confidence_scale: f32,
}

impl GestureEstimator {
    pub fn new(templates: Vec<GestureTemplate>) -> Result<Self, GestureError> {
        let mut estimator = Self {
            templates: Vec::with_capacity(templates.len()),
            curl: CurlClassifier::default(),
            direction: DirectionClassifier::default(),
            confidence_scale: 10.0,
        };
        for template in templates {
            estimator.register(template)?;
        }
        Ok(estimator)
    }

    /// 既定ジェスチャー (victory, thumbs_up, thumbs_down) と設定値で初期化
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates: builtin_templates(),
            curl: CurlClassifier::from_config(&config.curl),
            direction: DirectionClassifier::from_config(&config.direction),
            confidence_scale: config.estimator.confidence_scale,
        }
    }

    pub fn register(&mut self, template: GestureTemplate) -> Result<(), GestureError> {
        if self.templates.iter().any(|t| t.name() == template.name()) {
            return Err(GestureError::DuplicateName(template.name().to_string()));
        }
        debug!(gesture = template.name(), "registered gesture template");
        self.templates.push(template);
        Ok(())
    }

    pub fn templates(&self) -> &[GestureTemplate] {
        &self.templates
    }

    pub fn confidence_scale(&self) -> f32 {
        self.confidence_scale
    }

    pub fn features(&self, hand: &HandLandmarks) -> HandFeatures {
        HandFeatures::extract(hand, &self.curl, &self.direction)
    }

    pub fn estimate(&self, landmarks: &[Landmark]) -> Estimation {
        match HandLandmarks::from_slice(landmarks) {
            Some(hand) => self.estimate_hand(&hand),
            None => {
                if !landmarks.is_empty() {
                    debug!(count = landmarks.len(), "rejected malformed landmark snapshot");
                }
                Estimation::empty()
            }
        }
    }

    pub fn estimate_hand(&self, hand: &HandLandmarks) -> Estimation {
        let features = self.features(hand);
        let mut matches = self.score_features(&features);
        // 安定ソートなので同点は登録順のまま
        matches.sort_by(|a, b| b.confidence(1.0).total_cmp(&a.confidence(1.0)));
        trace!(?features, ?matches, "estimated gestures");
        Estimation {
            features: Some(features),
            matches,
            confidence_scale: self.confidence_scale,
        }
    }

    /// 登録順にテンプレートごとのスコアを返す
    pub fn score_features(&self, features: &HandFeatures) -> Vec<GestureMatch> {
        self.templates
            .iter()
            .map(|template| GestureMatch {
                name: template.name().to_string(),
                score: template.score(features),
                max_score: template.max_score(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::curl::FingerCurl;
    use crate::gesture::direction::FingerDirection;
    use crate::gesture::template::thumbs_down;
    use crate::hand::{fixtures, Finger};

    fn estimator() -> GestureEstimator {
        GestureEstimator::from_config(&Config::default())
    }

    #[test]
    fn test_one_match_per_template_within_bounds() {
        let estimator = estimator();
        for points in [fixtures::fist(), fixtures::thumbs_down(), fixtures::open_palm()] {
            let estimation = estimator.estimate(&points);
            assert_eq!(estimation.matches.len(), estimator.templates().len());
            for m in &estimation.matches {
                let template = estimator
                    .templates()
                    .iter()
                    .find(|t| t.name() == m.name)
                    .unwrap();
                assert!(m.score >= 0.0);
                assert!(m.score <= template.max_score() + 1e-5);
                assert!(m.score <= template.total_weight() + 1e-5);
            }
        }
    }

    #[test]
    fn test_matches_are_ranked() {
        let estimation = estimator().estimate(&fixtures::thumbs_down());
        assert!(estimation
            .matches
            .windows(2)
            .all(|w| w[0].confidence(1.0) >= w[1].confidence(1.0)));
    }

    #[test]
    fn test_empty_snapshot_yields_empty_result() {
        let estimation = estimator().estimate(&[]);
        assert!(estimation.is_empty());
        assert!(estimation.features.is_none());
        assert!(estimation.best(0.0).is_none());
    }

    #[test]
    fn test_wrong_length_snapshot_yields_empty_result() {
        let points = fixtures::open_palm();
        let estimation = estimator().estimate(&points[..15]);
        assert!(estimation.is_empty());
    }

    #[test]
    fn test_thumbs_down_wins() {
        let estimator = estimator();
        let estimation = estimator.estimate(&fixtures::thumbs_down());
        let best = estimation.best(9.9).expect("thumbs down should be accepted");
        assert_eq!(best.name, "thumbs_down");
        assert!((best.score - 5.6).abs() < 1e-4);
        assert!((best.confidence(10.0) - 10.0).abs() < 1e-4);

        let features = estimation.features.unwrap();
        assert_eq!(features.get(Finger::Thumb).direction, FingerDirection::VerticalDown);
    }

    #[test]
    fn test_victory_snapshot_scores_max() {
        let estimation = estimator().estimate(&fixtures::victory());
        let best = estimation.best(9.9).expect("victory should be accepted");
        assert_eq!(best.name, "victory");
        assert!((best.score - best.max_score).abs() < 1e-4);
        assert!((best.score - 13.5).abs() < 1e-4);

        let features = estimation.features.unwrap();
        assert_eq!(features.get(Finger::Middle).direction, FingerDirection::VerticalUp);
        assert_eq!(features.get(Finger::Ring).curl, FingerCurl::FullCurl);
    }

    #[test]
    fn test_fist_scores_low_on_victory() {
        let estimation = estimator().estimate(&fixtures::fist());
        let victory = estimation.matches.iter().find(|m| m.name == "victory").unwrap();
        assert!(victory.confidence(10.0) < 2.0, "victory confidence {}", victory.confidence(10.0));
        assert!(estimation.best(9.9).map_or(true, |m| m.name != "victory"));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let estimator = estimator();
        let points = fixtures::fist();
        let first = estimator.estimate(&points);
        assert_eq!(estimator.estimate(&points), first);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let estimation = estimator().estimate(&fixtures::fist());
        // 拳は thumbs_down に部分一致する (曲げた4本の指)
        assert!(estimation.best(9.9).is_none());
        assert!(estimation.best(0.0).is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut estimator = GestureEstimator::new(vec![thumbs_down()]).unwrap();
        assert_eq!(
            estimator.register(thumbs_down()),
            Err(GestureError::DuplicateName("thumbs_down".to_string()))
        );
        assert!(GestureEstimator::new(vec![thumbs_down(), thumbs_down()]).is_err());
    }

    #[test]
    fn test_custom_template_registration() {
        let point = GestureTemplate::builder("point")
            .add_curl(Finger::Index, FingerCurl::NoCurl, 1.0)
            .add_direction(Finger::Index, FingerDirection::VerticalUp, 1.0)
            .add_curl(Finger::Middle, FingerCurl::FullCurl, 1.0)
            .build()
            .unwrap();
        let mut estimator = estimator();
        estimator.register(point).unwrap();
        let estimation = estimator.estimate(&fixtures::open_palm());
        assert_eq!(estimation.matches.len(), 4);
        let point = estimation.matches.iter().find(|m| m.name == "point").unwrap();
        assert!((point.score - 2.0).abs() < 1e-6);
    }
}
