pub mod curl;
pub mod direction;
pub mod error;
pub mod estimator;
pub mod features;
pub mod template;

pub use curl::{CurlClassifier, FingerCurl};
pub use direction::{DirectionClassifier, FingerDirection};
pub use error::GestureError;
pub use estimator::{Estimation, GestureEstimator, GestureMatch};
pub use features::{FingerPose, HandFeatures};
pub use template::{builtin_templates, GestureTemplate, GestureTemplateBuilder};

/// ジェスチャー名に対応する表示用シンボル
pub fn gesture_symbol(name: &str) -> Option<&'static str> {
    match name {
        "thumbs_up" => Some("👍"),
        "victory" => Some("✌🏻"),
        "thumbs_down" => Some("👎"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_has_symbol() {
        for template in builtin_templates() {
            assert!(gesture_symbol(template.name()).is_some(), "{}", template.name());
        }
        assert_eq!(gesture_symbol("wave"), None);
    }
}
