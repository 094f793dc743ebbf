use tracing::{debug, warn};

use crate::config::CoachConfig;
use crate::error::PoseError;
use crate::pose::NamedKeypoints;

use super::form::classify;

/// メッセージ更新の最小間隔（ミリ秒）
pub const UPDATE_INTERVAL_MS: u64 = 2000;

/// 初回判定前に表示するメッセージ
pub const WAITING_MESSAGE: &str = "Waiting for pose...";

/// 必須キーポイントが欠けていたときのメッセージ
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient pose data.";

/// セッションごとの判定状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationState {
    last_message: String,
    /// 最後に更新した時刻。None は未判定
    last_update_ms: Option<u64>,
}

impl ClassificationState {
    pub fn new() -> Self {
        Self {
            last_message: WAITING_MESSAGE.to_string(),
            last_update_ms: None,
        }
    }

    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn last_update_ms(&self) -> Option<u64> {
        self.last_update_ms
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ClassificationState {
    fn default() -> Self {
        Self::new()
    }
}

/// 表示メッセージの更新頻度を制限するゲート
#[derive(Debug, Clone, Copy)]
pub struct UpdateGate {
    interval_ms: u64,
}

impl UpdateGate {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    pub fn from_config(config: &CoachConfig) -> Self {
        Self::new(config.update_interval_ms)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// 再判定すべき時刻か（境界を含む）
    pub fn is_due(&self, state: &ClassificationState, now_ms: u64) -> bool {
        match state.last_update_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// 間隔が経過していれば再判定して状態を更新し、表示すべきメッセージを返す
    ///
    /// キーポイント不足のときは状態を変えずに不足メッセージを返すので、
    /// 次のフレームで即座に再判定される。
    pub fn maybe_update<'a>(
        &self,
        state: &'a mut ClassificationState,
        keypoints: &NamedKeypoints,
        now_ms: u64,
    ) -> &'a str {
        if !self.is_due(state, now_ms) {
            return &state.last_message;
        }

        match classify(keypoints) {
            Ok(cue) => {
                debug!(now_ms, cue = ?cue, "form message updated");
                state.last_message = cue.message().to_string();
                state.last_update_ms = Some(now_ms);
                &state.last_message
            }
            Err(PoseError::MissingKeypoint(part)) => {
                warn!(now_ms, %part, "insufficient pose data");
                INSUFFICIENT_DATA_MESSAGE
            }
            Err(e) => {
                warn!(now_ms, error = %e, "classification failed");
                INSUFFICIENT_DATA_MESSAGE
            }
        }
    }
}

impl Default for UpdateGate {
    fn default() -> Self {
        Self::new(UPDATE_INTERVAL_MS)
    }
}
