use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use hand_gesture::camera::OpenCvCamera;
use hand_gesture::config::Config;
use hand_gesture::hand::OnnxHandDetector;
use hand_gesture::pipeline::{FramePipeline, FrameTicker};
use hand_gesture::render::MinifbRenderer;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_gesture=info,gesture_viewer=info".into()),
        )
        .init();

    let config = Config::load_or_default(CONFIG_PATH);
    info!(
        width = config.video.width,
        height = config.video.height,
        fps = config.video.fps,
        min_confidence = config.estimator.min_confidence,
        "starting gesture viewer (ESC to exit)"
    );

    let mut camera = OpenCvCamera::open(&config.video)?;
    let (width, height) = camera.resolution();

    let detector = OnnxHandDetector::new(&config.detector)?;
    let mut pipeline = FramePipeline::from_config(detector, &config);
    for template in pipeline.estimator().templates() {
        info!(gesture = template.name(), max_score = template.max_score(), "gesture registered");
    }

    let mut renderer = MinifbRenderer::new("Hand Gesture", width as usize, height as usize, config.video.mirror)?;
    let mut ticker = FrameTicker::new(config.video.fps);

    // FPS計測用
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();
    let mut last_gesture: Option<String> = None;

    // 1回のループ = 描画 -> 推論 -> 採点 -> 表示。次のループは前のループの完了後のみ。
    while renderer.is_open() {
        let frame = match camera.read_frame() {
            Ok(f) => f,
            Err(e) => {
                warn!("Frame capture error: {:#}", e);
                ticker.wait();
                continue;
            }
        };

        let outcome = pipeline.process(&frame)?;

        renderer.draw_frame(&frame)?;
        if let Some(ref landmarks) = outcome.landmarks {
            renderer.draw_hand(landmarks);
        }
        renderer.draw_gesture(outcome.gesture.as_ref());
        renderer.update()?;

        let current = outcome.gesture.as_ref().map(|g| g.name.clone());
        if current != last_gesture {
            if let Some(ref g) = outcome.gesture {
                info!(gesture = %g.name, confidence = g.confidence, "{}", g.symbol.unwrap_or(""));
            }
            last_gesture = current;
        }

        frame_count += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            info!("FPS: {:.1}", frame_count as f32 / elapsed);
            frame_count = 0;
            fps_timer = Instant::now();
        }

        ticker.wait();
    }

    info!("Shutting down...");
    Ok(())
}
