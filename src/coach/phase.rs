use std::fmt;

use crate::error::PoseError;
use crate::pose::{BodyPart, NamedKeypoints};

/// ストロークのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokePhase {
    NotRowing,
    /// 膝を曲げて前に詰めた位置
    Catch,
    /// 腕を引き切った位置
    Finish,
    /// キャッチとフィニッシュの間
    Drive,
}

impl StrokePhase {
    pub fn description(self) -> &'static str {
        match self {
            Self::NotRowing => "The person is not rowing",
            Self::Catch => "The person is at the catch",
            Self::Finish => "The person is at the finish",
            Self::Drive => "This person is between catch and finish",
        }
    }

    pub fn is_rowing(self) -> bool {
        self != Self::NotRowing
    }
}

impl fmt::Display for StrokePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 静止画1枚分のキーポイントからストロークフェーズを推定する
///
/// 縦横の距離比だけを使うのでスケールに依存しない（正規化座標のままでよい）。
/// 0除算はIEEEの規則に従う: inf は比較に通り、NaN は常に false。
pub fn analyze_phase(keypoints: &NamedKeypoints) -> Result<StrokePhase, PoseError> {
    use BodyPart::*;

    let nose = keypoints.require(Nose)?;
    let shoulder_r = keypoints.require(ShoulderR)?;
    let elbow_r = keypoints.require(ElbowR)?;
    let elbow_l = keypoints.require(ElbowL)?;
    let wrist_r = keypoints.require(WristR)?;
    let hip_r = keypoints.require(HipR)?;
    let hip_l = keypoints.require(HipL)?;
    let knee_r = keypoints.require(KneeR)?;
    let ankle_r = keypoints.require(AnkleR)?;
    let ankle_l = keypoints.require(AnkleL)?;

    // 立っていない: 胴の縦幅が腰から足首までより長い
    let not_standing = (shoulder_r.y - hip_r.y).abs() / (hip_r.y - ankle_r.y).abs() > 1.0;
    // 肘が腰・足首より上にある（逆さまでない）
    let elbows_high = (elbow_r.y < hip_r.y && elbow_r.y < ankle_r.y)
        || (elbow_l.y < hip_l.y && elbow_l.y < ankle_l.y);
    // 寝そべっていない
    let not_lying = (nose.y - knee_r.y).abs() / (knee_r.x - hip_r.x).abs() > 0.6;

    if !(not_standing && elbows_high && not_lying) {
        return Ok(StrokePhase::NotRowing);
    }

    let knee_bent = (nose.y - knee_r.y).abs() < (nose.y - hip_r.y).abs();
    let arms_bent = (shoulder_r.y - wrist_r.y).abs() < (shoulder_r.y - elbow_r.y).abs();

    let phase = if knee_bent {
        StrokePhase::Catch
    } else if arms_bent {
        StrokePhase::Finish
    } else {
        StrokePhase::Drive
    };
    Ok(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Point2D;

    struct Body {
        nose: (f32, f32),
        shoulder: (f32, f32),
        elbow: (f32, f32),
        wrist: (f32, f32),
        hip: (f32, f32),
        knee: (f32, f32),
        ankle: (f32, f32),
    }

    /// 左右同じ位置に置いたキーポイント
    fn keypoints(b: &Body) -> NamedKeypoints {
        let p = |(x, y): (f32, f32)| Point2D::new(x, y);
        [
            (BodyPart::Nose, p(b.nose)),
            (BodyPart::ShoulderR, p(b.shoulder)),
            (BodyPart::ShoulderL, p(b.shoulder)),
            (BodyPart::ElbowR, p(b.elbow)),
            (BodyPart::ElbowL, p(b.elbow)),
            (BodyPart::WristR, p(b.wrist)),
            (BodyPart::WristL, p(b.wrist)),
            (BodyPart::HipR, p(b.hip)),
            (BodyPart::HipL, p(b.hip)),
            (BodyPart::KneeR, p(b.knee)),
            (BodyPart::KneeL, p(b.knee)),
            (BodyPart::AnkleR, p(b.ankle)),
            (BodyPart::AnkleL, p(b.ankle)),
        ]
        .into_iter()
        .collect()
    }

    /// エルゴに座った横向きの姿勢（正規化座標）
    fn seated() -> Body {
        Body {
            nose: (0.40, 0.30),
            shoulder: (0.42, 0.40),
            elbow: (0.50, 0.52),
            wrist: (0.60, 0.60),
            hip: (0.40, 0.75),
            knee: (0.55, 0.76),
            ankle: (0.70, 0.78),
        }
    }

    #[test]
    fn test_standing_is_not_rowing() {
        let body = Body {
            nose: (0.5, 0.10),
            shoulder: (0.5, 0.20),
            elbow: (0.5, 0.35),
            wrist: (0.5, 0.48),
            hip: (0.5, 0.50),
            knee: (0.52, 0.70),
            ankle: (0.5, 0.90),
        };
        assert_eq!(analyze_phase(&keypoints(&body)).unwrap(), StrokePhase::NotRowing);
    }

    #[test]
    fn test_catch() {
        // 膝が鼻の高さに近い
        let mut body = seated();
        body.knee = (0.55, 0.40);
        let phase = analyze_phase(&keypoints(&body)).unwrap();
        assert_eq!(phase, StrokePhase::Catch);
        assert!(phase.is_rowing());
    }

    #[test]
    fn test_finish() {
        // 手首が肘より肩の高さに近い
        let mut body = seated();
        body.wrist = (0.45, 0.45);
        assert_eq!(analyze_phase(&keypoints(&body)).unwrap(), StrokePhase::Finish);
    }

    #[test]
    fn test_drive() {
        assert_eq!(analyze_phase(&keypoints(&seated())).unwrap(), StrokePhase::Drive);
    }

    #[test]
    fn test_zero_division_does_not_panic() {
        // 膝と腰のX座標が同じ → inf
        let mut body = seated();
        body.knee = (0.40, 0.76);
        assert_eq!(analyze_phase(&keypoints(&body)).unwrap(), StrokePhase::Drive);

        // 全点が同一 → NaN
        let p = (0.5, 0.5);
        let body = Body { nose: p, shoulder: p, elbow: p, wrist: p, hip: p, knee: p, ankle: p };
        assert_eq!(analyze_phase(&keypoints(&body)).unwrap(), StrokePhase::NotRowing);
    }

    #[test]
    fn test_missing_keypoint() {
        let kp: NamedKeypoints = [(BodyPart::Nose, Point2D::new(0.5, 0.5))].into_iter().collect();
        assert!(matches!(analyze_phase(&kp), Err(PoseError::MissingKeypoint(_))));
    }

    #[test]
    fn test_description() {
        assert_eq!(StrokePhase::Catch.to_string(), "The person is at the catch");
        assert!(!StrokePhase::NotRowing.is_rowing());
    }
}
