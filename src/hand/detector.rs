use anyhow::{Context, Result};
use opencv::{core::Mat, prelude::*};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tracing::{info, trace};

use super::landmark::{Landmark, LandmarkIndex};
use super::preprocess::preprocess_for_hand_landmark;
use crate::config::DetectorConfig;
use crate::pipeline::{HandPrediction, LandmarkDetector};

/// ONNX の手ランドマークモデルを使った検出器
///
/// 出力はモデル入力座標 (0〜input_size) の 21 x (x, y, z)。フレームのピクセル座標に戻して返す。
pub struct OnnxHandDetector {
    session: Session,
    input_size: i32,
    input_name: String,
    landmarks_output: String,
    presence_output: String,
    presence_threshold: f32,
}

impl OnnxHandDetector {
    /// ONNXモデルを読み込んで初期化
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&config.model_path)
            .with_context(|| format!("Failed to load hand landmark model {}", config.model_path))?;
        info!(model = %config.model_path, "hand landmark model loaded");

        Ok(Self {
            session,
            input_size: config.input_size,
            input_name: config.input_name.clone(),
            landmarks_output: config.landmarks_output.clone(),
            presence_output: config.presence_output.clone(),
            presence_threshold: config.presence_threshold,
        })
    }
}

impl LandmarkDetector<Mat> for OnnxHandDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Vec<HandPrediction>> {
        let scale_x = frame.cols() as f32 / self.input_size as f32;
        let scale_y = frame.rows() as f32 / self.input_size as f32;

        let input = preprocess_for_hand_landmark(frame, self.input_size)?;
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .context("Inference failed")?;

        let presence: ndarray::ArrayViewD<f32> = outputs[self.presence_output.as_str()]
            .try_extract_array()
            .context("Failed to extract presence tensor")?;
        let confidence = presence.iter().next().copied().unwrap_or(0.0);
        if confidence < self.presence_threshold {
            trace!(confidence, "no hand in frame");
            return Ok(Vec::new());
        }

        let raw: ndarray::ArrayViewD<f32> = outputs[self.landmarks_output.as_str()]
            .try_extract_array()
            .context("Failed to extract landmark tensor")?;
        let values: Vec<f32> = raw.iter().copied().collect();
        if values.len() < LandmarkIndex::COUNT * 3 {
            anyhow::bail!(
                "Landmark output has {} values, expected {}",
                values.len(),
                LandmarkIndex::COUNT * 3
            );
        }

        let landmarks = values
            .chunks_exact(3)
            .take(LandmarkIndex::COUNT)
            .map(|v| Landmark::new(v[0] * scale_x, v[1] * scale_y, v[2] * scale_x))
            .collect();

        Ok(vec![HandPrediction {
            landmarks,
            confidence,
        }])
    }
}
