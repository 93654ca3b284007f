//! 1フレーム分の処理 (検出 -> 推定 -> 採用判定) と、そのスケジューリング。

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::gesture::{gesture_symbol, Estimation, GestureEstimator, GestureMatch};
use crate::hand::Landmark;

/// 検出器が返す1つの手
#[derive(Debug, Clone, PartialEq)]
pub struct HandPrediction {
    pub landmarks: Vec<Landmark>,
    /// 手の存在スコア (0.0〜1.0)
    pub confidence: f32,
}

/// 画像から手のランドマークを返す外部検出器
///
/// 手がなければ空の Vec を返す。
pub trait LandmarkDetector<F: ?Sized> {
    fn detect(&mut self, frame: &F) -> Result<Vec<HandPrediction>>;
}

/// 採用されたジェスチャー
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedGesture {
    pub name: String,
    pub confidence: f32,
    pub symbol: Option<&'static str>,
}

/// 1フレームの処理結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// 先頭の手のランドマーク (描画用)
    pub landmarks: Option<Vec<Landmark>>,
    pub estimation: Estimation,
    pub gesture: Option<RecognizedGesture>,
}

pub struct FramePipeline<D> {
    detector: D,
    estimator: GestureEstimator,
    min_confidence: f32,
}

impl<D> FramePipeline<D> {
    pub fn new(detector: D, estimator: GestureEstimator, min_confidence: f32) -> Self {
        Self {
            detector,
            estimator,
            min_confidence,
        }
    }

    pub fn from_config(detector: D, config: &Config) -> Self {
        Self::new(
            detector,
            GestureEstimator::from_config(config),
            config.estimator.min_confidence,
        )
    }

    pub fn estimator(&self) -> &GestureEstimator {
        &self.estimator
    }

    /// 検出 -> 推定 -> 採用判定
    ///
    /// 複数の手が返った場合は存在スコアが最も高いものだけを使う。
    /// 手が見つからない場合はエラーではなく空の結果を返す。
    pub fn process<F: ?Sized>(&mut self, frame: &F) -> Result<FrameOutcome>
    where
        D: LandmarkDetector<F>,
    {
        let predictions = self.detector.detect(frame)?;
        let Some(hand) = predictions
            .into_iter()
            .reduce(|best, p| if p.confidence > best.confidence { p } else { best })
        else {
            return Ok(FrameOutcome::default());
        };

        let estimation = self.estimator.estimate(&hand.landmarks);
        let gesture = estimation
            .best(self.min_confidence)
            .map(|m| self.recognize(m, estimation.confidence_scale));
        if let Some(ref g) = gesture {
            debug!(gesture = %g.name, confidence = g.confidence, "gesture recognized");
        }

        Ok(FrameOutcome {
            landmarks: Some(hand.landmarks),
            estimation,
            gesture,
        })
    }

    fn recognize(&self, m: &GestureMatch, scale: f32) -> RecognizedGesture {
        RecognizedGesture {
            name: m.name.clone(),
            confidence: m.confidence(scale),
            symbol: gesture_symbol(&m.name),
        }
    }
}

/// 固定レートでフレーム処理を起動するためのティッカー
///
/// 処理が周期を超過した場合、次の期限は現在時刻から取り直す (遅れたフレームを溜めない)。
pub struct FrameTicker {
    period: Duration,
    next: Instant,
}

impl FrameTicker {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: u32, start: Instant) -> Self {
        let period = Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1)));
        Self {
            period,
            next: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// 次の期限までの残り時間を返し、期限を1周期進める
    pub fn advance(&mut self, now: Instant) -> Duration {
        let remaining = self.next.saturating_duration_since(now);
        if remaining.is_zero() {
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
        remaining
    }

    /// 次の期限まで待つ
    pub fn wait(&mut self) {
        let remaining = self.advance(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
