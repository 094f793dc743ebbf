use std::fmt;

use crate::error::PoseError;
use crate::pose::{BodyPart, NamedKeypoints};

use super::geometry::joint_angle;

/// フォーム判定の結果（コーチングメッセージ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormCue {
    GreatRowing,
    LiftElbows,
    LeanForward,
    KeepArmsStraight,
    /// どのルールにも該当しない（NaN 角度を含む）
    AdjustForm,
}

impl FormCue {
    pub fn message(self) -> &'static str {
        match self {
            Self::GreatRowing => "Great Rowing!",
            Self::LiftElbows => "Lift your elbows 45° from your sides.",
            Self::LeanForward => "Lean forward as your hands approach the front.",
            Self::KeepArmsStraight => "Keep your arms straight as you approach the front.",
            Self::AdjustForm => "Adjust your form.",
        }
    }
}

impl fmt::Display for FormCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 右半身のキーポイントからフォームを判定する
///
/// 上から順に評価し、最初に成立したルールで決まる（ルール同士は排他ではない）。
/// 1. 上腕が縦向き かつ 肩-肘-手首 > 180° かつ 手首-腰の縦距離 < 0.7×手首-肩
/// 2. 上腕が横向き かつ 肩-肘-手首 < 70° かつ 手首-腰の縦距離 > 手首-肩
/// 3. 以降は補助ルール（肘の高さ → 前傾 → 腕の伸び → 既定）
///
/// 1 の閾値 180° は通常の幾何では到達しないが、そのまま残す。
pub fn classify(keypoints: &NamedKeypoints) -> Result<FormCue, PoseError> {
    let shoulder = keypoints.require(BodyPart::ShoulderR)?;
    let elbow = keypoints.require(BodyPart::ElbowR)?;
    let wrist = keypoints.require(BodyPart::WristR)?;
    let hip = keypoints.require(BodyPart::HipR)?;

    let angle_sew = joint_angle(shoulder, elbow, wrist);
    let angle_hsw = joint_angle(hip, shoulder, wrist);

    let elbow_dx = (elbow.x - shoulder.x).abs();
    let elbow_dy = (elbow.y - shoulder.y).abs();
    let wrist_hip_dy = (wrist.y - hip.y).abs();
    let wrist_shoulder_dy = (wrist.y - shoulder.y).abs();
    let hip_shoulder_dy = (hip.y - shoulder.y).abs();

    let cue = if elbow_dx < elbow_dy && angle_sew > 180.0 && wrist_hip_dy < 0.7 * wrist_shoulder_dy {
        FormCue::GreatRowing
    } else if elbow_dx > elbow_dy && angle_sew < 70.0 && wrist_hip_dy > wrist_shoulder_dy {
        FormCue::GreatRowing
    } else if angle_sew < 90.0 && angle_hsw < 30.0 {
        FormCue::LiftElbows
    } else if angle_sew < 90.0 && wrist_hip_dy > 0.7 * hip_shoulder_dy {
        FormCue::LeanForward
    } else if angle_sew > 150.0 {
        FormCue::KeepArmsStraight
    } else {
        FormCue::AdjustForm
    };

    Ok(cue)
}
