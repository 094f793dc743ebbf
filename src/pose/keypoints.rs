use std::fmt;

use crate::error::PoseError;

use super::landmark::{LandmarkIndex, LandmarkSet};

/// 判定に使う部位の語彙（固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPart {
    Nose = 0,
    ShoulderL = 1,
    ShoulderR = 2,
    ElbowL = 3,
    ElbowR = 4,
    WristL = 5,
    WristR = 6,
    HipL = 7,
    HipR = 8,
    KneeL = 9,
    KneeR = 10,
    AnkleL = 11,
    AnkleR = 12,
}

impl BodyPart {
    pub const COUNT: usize = 13;

    pub const ALL: [BodyPart; Self::COUNT] = [
        Self::Nose,
        Self::ShoulderL,
        Self::ShoulderR,
        Self::ElbowL,
        Self::ElbowR,
        Self::WristL,
        Self::WristR,
        Self::HipL,
        Self::HipR,
        Self::KneeL,
        Self::KneeR,
        Self::AnkleL,
        Self::AnkleR,
    ];

    /// 対応するランドマーク番号
    pub fn landmark_index(self) -> LandmarkIndex {
        match self {
            Self::Nose => LandmarkIndex::Nose,
            Self::ShoulderL => LandmarkIndex::LeftShoulder,
            Self::ShoulderR => LandmarkIndex::RightShoulder,
            Self::ElbowL => LandmarkIndex::LeftElbow,
            Self::ElbowR => LandmarkIndex::RightElbow,
            Self::WristL => LandmarkIndex::LeftWrist,
            Self::WristR => LandmarkIndex::RightWrist,
            Self::HipL => LandmarkIndex::LeftHip,
            Self::HipR => LandmarkIndex::RightHip,
            Self::KneeL => LandmarkIndex::LeftKnee,
            Self::KneeR => LandmarkIndex::RightKnee,
            Self::AnkleL => LandmarkIndex::LeftAnkle,
            Self::AnkleR => LandmarkIndex::RightAnkle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::ShoulderL => "shoulder_l",
            Self::ShoulderR => "shoulder_r",
            Self::ElbowL => "elbow_l",
            Self::ElbowR => "elbow_r",
            Self::WristL => "wrist_l",
            Self::WristR => "wrist_r",
            Self::HipL => "hip_l",
            Self::HipR => "hip_r",
            Self::KneeL => "knee_l",
            Self::KneeR => "knee_r",
            Self::AnkleL => "ankle_l",
            Self::AnkleR => "ankle_r",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 2D座標（Y下向き、ピクセルまたは正規化単位）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 部位名 → 座標 の対応。構築後は変更しない
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedKeypoints {
    points: [Option<Point2D>; BodyPart::COUNT],
}

impl NamedKeypoints {
    pub fn get(&self, part: BodyPart) -> Option<Point2D> {
        self.points[part as usize]
    }

    /// 必須キーポイントを取得。欠けていれば `MissingKeypoint`
    pub fn require(&self, part: BodyPart) -> Result<Point2D, PoseError> {
        self.get(part).ok_or(PoseError::MissingKeypoint(part))
    }

    pub fn contains(&self, part: BodyPart) -> bool {
        self.points[part as usize].is_some()
    }

    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(BodyPart, Point2D)> for NamedKeypoints {
    fn from_iter<I: IntoIterator<Item = (BodyPart, Point2D)>>(iter: I) -> Self {
        let mut points = [None; BodyPart::COUNT];
        for (part, point) in iter {
            points[part as usize] = Some(point);
        }
        Self { points }
    }
}

/// ランドマークから名前付きキーポイントを取り出し、ビューサイズにスケールする
///
/// 可視性は見ない。該当インデックスにランドマークが無い部位は欠落のまま返す。
pub fn extract_keypoints(landmarks: &LandmarkSet, width: f32, height: f32) -> NamedKeypoints {
    BodyPart::ALL
        .iter()
        .filter_map(|&part| {
            landmarks
                .landmark(part.landmark_index())
                .map(|lm| (part, Point2D::new(lm.x * width, lm.y * height)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;

    fn full_set() -> LandmarkSet {
        let landmarks = (0..LandmarkIndex::COUNT)
            .map(|i| Landmark::new(i as f32 / 100.0, 1.0 - i as f32 / 100.0, 0.0, 0.9))
            .collect();
        LandmarkSet::new(landmarks)
    }

    #[test]
    fn test_body_part_table() {
        assert_eq!(BodyPart::Nose.landmark_index() as usize, 0);
        assert_eq!(BodyPart::ShoulderR.landmark_index() as usize, 12);
        assert_eq!(BodyPart::ElbowR.landmark_index() as usize, 14);
        assert_eq!(BodyPart::WristR.landmark_index() as usize, 16);
        assert_eq!(BodyPart::HipR.landmark_index() as usize, 24);
        assert_eq!(BodyPart::AnkleL.landmark_index() as usize, 27);
        for (i, part) in BodyPart::ALL.iter().enumerate() {
            assert_eq!(*part as usize, i);
        }
    }

    #[test]
    fn test_extract_scales_to_view() {
        let kp = extract_keypoints(&full_set(), 1280.0, 720.0);
        assert_eq!(kp.len(), BodyPart::COUNT);

        let wrist = kp.get(BodyPart::WristR).unwrap();
        assert!((wrist.x - 0.16 * 1280.0).abs() < 1e-3);
        assert!((wrist.y - 0.84 * 720.0).abs() < 1e-3);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let set = full_set();
        let first = extract_keypoints(&set, 640.0, 480.0);
        for _ in 0..5 {
            assert_eq!(extract_keypoints(&set, 640.0, 480.0), first);
        }
    }

    #[test]
    fn test_extract_ignores_visibility() {
        let set = LandmarkSet::from_indexed([(0, Landmark::new(0.5, 0.5, 0.0, 0.0))]);
        let kp = extract_keypoints(&set, 100.0, 100.0);
        assert_eq!(kp.get(BodyPart::Nose), Some(Point2D::new(50.0, 50.0)));
    }

    #[test]
    fn test_extract_partial_set() {
        let set = LandmarkSet::from_indexed([
            (12, Landmark::new(0.5, 0.3, 0.0, 1.0)),
            (14, Landmark::new(0.5, 0.5, 0.0, 1.0)),
        ]);
        let kp = extract_keypoints(&set, 1.0, 1.0);
        assert_eq!(kp.len(), 2);
        assert!(kp.contains(BodyPart::ShoulderR));
        assert!(!kp.contains(BodyPart::HipR));
        assert!(matches!(
            kp.require(BodyPart::HipR),
            Err(PoseError::MissingKeypoint(BodyPart::HipR))
        ));
    }
}
