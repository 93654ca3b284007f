use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::error;

use hand_gesture::config::Config;
use hand_gesture::gesture::{gesture_symbol, GestureEstimator};
use hand_gesture::hand::Landmark;

const CONFIG_PATH: &str = "config.toml";

/// ランドマーク JSON (21 x [x, y, z]) を採点して結果を表示する
///
/// 引数にファイルを渡せばそれを、無ければ標準入力を1行1スナップショットとして読む。
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_gesture=info".into()),
        )
        .init();

    let config = Config::load_or_default(CONFIG_PATH);
    let estimator = GestureEstimator::from_config(&config);
    let threshold = config.estimator.min_confidence;

    if let Some(path) = std::env::args().nth(1) {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path))?;
        report(&estimator, threshold, content.trim())?;
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = report(&estimator, threshold, line) {
            error!("{:#}", e);
        }
    }

    Ok(())
}

fn report(estimator: &GestureEstimator, threshold: f32, json: &str) -> Result<()> {
    let landmarks: Vec<Landmark> = serde_json::from_str(json).context("Invalid landmark JSON")?;
    let estimation = estimator.estimate(&landmarks);

    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, &estimation)?;
    writeln!(out)?;

    match estimation.best(threshold) {
        Some(m) => eprintln!(
            "{} {} ({:.2})",
            gesture_symbol(&m.name).unwrap_or(""),
            m.name,
            m.confidence(estimation.confidence_scale)
        ),
        None => eprintln!("no gesture"),
    }
    Ok(())
}
