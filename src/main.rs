//! stroke-coach CLI - 記録済みランドマークでローイングフォーム判定を再生する

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stroke_coach::coach::{analyze_phase, FeedbackSession};
use stroke_coach::config::Config;
use stroke_coach::pose::{extract_keypoints, load_landmark_dir, load_landmark_file, LandmarkSet};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stroke-coach")]
#[command(version = env!("GIT_VERSION"))]
#[command(about = "Rowing technique feedback from recorded pose landmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 設定ファイルのパス
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// デバッグログを出す
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// ランドマークJSON（ファイルまたはディレクトリ）をフィードバックループに流す
    Replay {
        path: PathBuf,
    },

    /// 各フレームのストロークフェーズを判定する
    Phase {
        path: PathBuf,
    },
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

fn load_frames(path: &Path) -> Result<Vec<(PathBuf, LandmarkSet)>> {
    let frames = if path.is_dir() {
        load_landmark_dir(path)?
    } else {
        vec![(path.to_path_buf(), load_landmark_file(path)?)]
    };
    Ok(frames)
}

fn frame_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn replay(config: &Config, path: &Path) -> Result<()> {
    let frames = load_frames(path)
        .with_context(|| format!("Failed to load frames from {}", path.display()))?;
    info!(frames = frames.len(), fps = config.replay.fps, "replaying");

    let mut session = FeedbackSession::from_config(config);
    let mut displayed: Option<String> = None;

    for (i, (frame_path, set)) in frames.iter().enumerate() {
        let now_ms = config.replay.timestamp_ms(i);
        debug!(frame = i, landmarks = set.len(), visibility = set.average_visibility(), "frame");
        let message = session.on_frame(Some(set), now_ms);
        if displayed.as_deref() != Some(message) {
            println!("[{:>7} ms] {}: {}", now_ms, frame_name(frame_path), message);
            displayed = Some(message.to_string());
        }
    }

    Ok(())
}

fn phase(path: &Path) -> Result<()> {
    let frames = load_frames(path)
        .with_context(|| format!("Failed to load frames from {}", path.display()))?;

    for (frame_path, set) in &frames {
        let name = frame_name(frame_path);
        if set.is_empty() {
            println!("{}: No people detected in the image", name);
            continue;
        }
        // 距離比のみで判定するので正規化座標のまま渡す
        let keypoints = extract_keypoints(set, 1.0, 1.0);
        match analyze_phase(&keypoints) {
            Ok(phase) => println!("{}: {}", name, phase),
            Err(e) => println!("{}: {}", name, e),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = Config::load_or_default(&cli.config);
    println!("Stroke Coach ({})", env!("GIT_VERSION"));

    match &cli.command {
        Commands::Replay { path } => {
            println!(
                "Viewport: {}x{}, update interval: {} ms",
                config.viewport.width, config.viewport.height, config.coach.update_interval_ms
            );
            replay(&config, path)
        }
        Commands::Phase { path } => phase(path),
    }
}
