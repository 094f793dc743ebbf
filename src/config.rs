use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::coach::UPDATE_INTERVAL_MS;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoachConfig {
    /// メッセージ更新の最小間隔（ミリ秒）
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportConfig {
    /// キーポイントをスケールする表示幅（ピクセル）
    #[serde(default = "default_width")]
    pub width: u32,
    /// 表示高さ（ピクセル）
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayConfig {
    /// 再生時のフレームレート（タイムスタンプ生成用）
    #[serde(default = "default_fps")]
    pub fps: f64,
}

fn default_update_interval_ms() -> u64 { UPDATE_INTERVAL_MS }
fn default_width() -> u32 { 1280 }
fn default_height() -> u32 { 720 }
fn default_fps() -> f64 { 30.0 }

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl ReplayConfig {
    /// i番目のフレームのタイムスタンプ（ミリ秒）
    pub fn timestamp_ms(&self, frame_index: usize) -> u64 {
        if self.fps <= 0.0 {
            return 0;
        }
        (frame_index as f64 * 1000.0 / self.fps).round() as u64
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
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        Ok(config)
    }

    /// 読み込みに失敗したらデフォルト設定で続行する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{:#}", e), "using default config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.coach.update_interval_ms, 2000);
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.replay.fps, 30.0);
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("[viewport]\nwidth = 640\n").unwrap();
        assert_eq!(config.viewport.width, 640);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.coach.update_interval_ms, 2000);
    }

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.replay.fps, 30.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Config::parse("[coach]\nupdate_interval_ms = \"soon\"\n").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("config.toml"));
        assert_eq!(config.coach.update_interval_ms, 2000);
    }

    #[test]
    fn test_load_or_default_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();
        let config = Config::load_or_default(&path);
        assert_eq!(config.viewport.width, 1280);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[coach]\nupdate_interval_ms = 1500\n[replay]\nfps = 10.0\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.coach.update_interval_ms, 1500);
        assert_eq!(config.replay.timestamp_ms(3), 300);
    }

    #[test]
    fn test_timestamp_ms() {
        let replay = ReplayConfig::default();
        assert_eq!(replay.timestamp_ms(0), 0);
        assert_eq!(replay.timestamp_ms(30), 1000);
        assert_eq!(replay.timestamp_ms(45), 1500);
        assert_eq!(ReplayConfig { fps: 0.0 }.timestamp_ms(10), 0);
    }
}
