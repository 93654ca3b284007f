use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub curl: CurlConfig,
    #[serde(default)]
    pub direction: DirectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    /// カメラ番号
    #[serde(default)]
    pub camera_index: i32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// 最大フレームレート (推論ループの上限にも使う)
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// 自撮り表示のため左右反転して描画する
    #[serde(default = "default_true")]
    pub mirror: bool,
}

fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_fps() -> u32 { 30 }
fn default_true() -> bool { true }

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            mirror: default_true(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// 手ランドマーク ONNX モデルのパス
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// モデル入力の一辺 (ピクセル)
    #[serde(default = "default_input_size")]
    pub input_size: i32,
    /// 入力テンソル名
    #[serde(default = "default_input_name")]
    pub input_name: String,
    /// ランドマーク出力 (63 = 21 x 3) のテンソル名
    #[serde(default = "default_landmarks_output")]
    pub landmarks_output: String,
    /// 手の存在スコア出力のテンソル名
    #[serde(default = "default_presence_output")]
    pub presence_output: String,
    /// この存在スコア未満なら手なしとみなす
    #[serde(default = "default_presence_threshold")]
    pub presence_threshold: f32,
}

fn default_model_path() -> String { "models/hand_landmark.onnx".to_string() }
fn default_input_size() -> i32 { 224 }
fn default_input_name() -> String { "input_1".to_string() }
fn default_landmarks_output() -> String { "Identity".to_string() }
fn default_presence_output() -> String { "Identity_1".to_string() }
fn default_presence_threshold() -> f32 { 0.5 }

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            input_size: default_input_size(),
            input_name: default_input_name(),
            landmarks_output: default_landmarks_output(),
            presence_output: default_presence_output(),
            presence_threshold: default_presence_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EstimatorConfig {
    /// 正規化スコアの満点
    #[serde(default = "default_confidence_scale")]
    pub confidence_scale: f32,
    /// 採用する最小の正規化スコア (これを超えたものだけ採用)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

fn default_confidence_scale() -> f32 { 10.0 }
fn default_min_confidence() -> f32 { 9.9 }

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            confidence_scale: default_confidence_scale(),
            min_confidence: default_min_confidence(),
        }
    }
}

/// 曲げ角合計 (度) のしきい値。経験的に調整した値。
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CurlConfig {
    #[serde(default = "default_half_curl_start")]
    pub half_curl_start: f32,
    #[serde(default = "default_full_curl_start")]
    pub full_curl_start: f32,
    #[serde(default = "default_thumb_half_curl_start")]
    pub thumb_half_curl_start: f32,
    #[serde(default = "default_thumb_full_curl_start")]
    pub thumb_full_curl_start: f32,
}

fn default_half_curl_start() -> f32 { 60.0 }
fn default_full_curl_start() -> f32 { 170.0 }
fn default_thumb_half_curl_start() -> f32 { 40.0 }
fn default_thumb_full_curl_start() -> f32 { 90.0 }

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            half_curl_start: default_half_curl_start(),
            full_curl_start: default_full_curl_start(),
            thumb_half_curl_start: default_thumb_half_curl_start(),
            thumb_full_curl_start: default_thumb_full_curl_start(),
        }
    }
}

/// 垂直方向と判定する角度幅 (度、垂直軸からのずれ)
///
/// 狭める方向にしか効かない。8方向の内積最大で垂直が選ばれるのは 22.5 度以内なので、
/// それより大きい値は 22.5 に丸められる。
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DirectionConfig {
    #[serde(default = "default_vertical_band")]
    pub vertical_band: f32,
    #[serde(default = "default_thumb_vertical_band")]
    pub thumb_vertical_band: f32,
}

fn default_vertical_band() -> f32 { 22.5 }
fn default_thumb_vertical_band() -> f32 { 15.0 }

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            vertical_band: default_vertical_band(),
            thumb_vertical_band: default_thumb_vertical_band(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid config")?;
        Ok(config)
    }

    /// 読めなければデフォルト設定を返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}; using default config", e);
                Self::default()
            }
        }
    }
}
