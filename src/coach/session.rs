use tracing::debug;

use crate::config::Config;
use crate::pose::{extract_keypoints, LandmarkSet};

use super::gate::{ClassificationState, UpdateGate};

/// 人物未検出のときに表示するメッセージ
pub const NO_PERSON_MESSAGE: &str = "No person detected.";

/// 1回のカメラセッション分のフィードバックループ
///
/// フレームごとに [`FeedbackSession::on_frame`] を呼ぶ。判定状態はセッションが
/// 専有し、カメラを止めて再開するときは [`FeedbackSession::restart`] で捨てる。
pub struct FeedbackSession {
    gate: UpdateGate,
    state: ClassificationState,
    width: f32,
    height: f32,
}

impl FeedbackSession {
    pub fn new(gate: UpdateGate, width: u32, height: u32) -> Self {
        Self {
            gate,
            state: ClassificationState::new(),
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            UpdateGate::from_config(&config.coach),
            config.viewport.width,
            config.viewport.height,
        )
    }

    /// 表示サイズの変更（状態は保持）
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// 推論済みフレームを1枚処理し、表示すべきメッセージを返す
    ///
    /// `None` または空のセットは未検出として扱い、タイマーには触れない。
    pub fn on_frame(&mut self, landmarks: Option<&LandmarkSet>, now_ms: u64) -> &str {
        let landmarks = match landmarks {
            Some(set) if !set.is_empty() => set,
            _ => {
                debug!(now_ms, "no person detected");
                return NO_PERSON_MESSAGE;
            }
        };

        let keypoints = extract_keypoints(landmarks, self.width, self.height);
        self.gate.maybe_update(&mut self.state, &keypoints, now_ms)
    }

    /// セッション再開。前回のタイムスタンプとメッセージを破棄する
    pub fn restart(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &ClassificationState {
        &self.state
    }
}
