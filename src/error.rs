use std::path::PathBuf;

use thiserror::Error;

use crate::pose::BodyPart;

/// ポーズ処理のエラー
#[derive(Debug, Error)]
pub enum PoseError {
    /// 人物が検出されなかった
    #[error("no person detected")]
    NoDetection,

    /// 判定に必要なキーポイントが欠けている
    #[error("missing keypoint: {0}")]
    MissingKeypoint(BodyPart),

    #[error("failed to access landmark file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid landmark file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
