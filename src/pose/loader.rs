//! ランドマークJSONの読み書き
//!
//! 1ファイル = 1フレーム。中身は `{id, x, y, z, visibility}` の配列で、
//! 空配列は「人物未検出」のフレームを表す。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PoseError;

use super::landmark::{Landmark, LandmarkSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LandmarkRecord {
    id: usize,
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
    #[serde(default = "default_visibility")]
    visibility: f32,
}

fn default_visibility() -> f32 { 1.0 }

/// JSON文字列からランドマークセットを作る
pub fn parse_landmarks(content: &str) -> Result<LandmarkSet, serde_json::Error> {
    let records: Vec<LandmarkRecord> = serde_json::from_str(content)?;
    Ok(LandmarkSet::from_indexed(records.into_iter().map(|r| {
        (r.id, Landmark::new(r.x, r.y, r.z, r.visibility))
    })))
}

pub fn load_landmark_file<P: AsRef<Path>>(path: P) -> Result<LandmarkSet, PoseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| PoseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_landmarks(&content).map_err(|source| PoseError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_landmark_file<P: AsRef<Path>>(path: P, set: &LandmarkSet) -> Result<(), PoseError> {
    let path = path.as_ref();
    let records: Vec<LandmarkRecord> = set
        .iter()
        .map(|(id, lm)| LandmarkRecord {
            id,
            x: lm.x,
            y: lm.y,
            z: lm.z,
            visibility: lm.visibility,
        })
        .collect();
    let json = serde_json::to_string_pretty(&records).map_err(|source| PoseError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PoseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// ディレクトリ内の `*.json` をファイル名順に読み込む
pub fn load_landmark_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<(PathBuf, LandmarkSet)>, PoseError> {
    let dir = dir.as_ref();
    let io_err = |source: std::io::Error| PoseError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| load_landmark_file(&path).map(|set| (path, set)))
        .collect()
}
