/// BlazePose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    const ALL: [LandmarkIndex; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0、下向きが正)
    pub y: f32,
    /// 腰中点基準の奥行き（モデル出力のまま）
    pub z: f32,
    /// 可視性スコア (0.0〜1.0)
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// 可視性が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 0.0,
        }
    }
}

/// 1フレーム分の検出ランドマーク
///
/// インデックスは [`LandmarkIndex`] の番号体系に従う。欠番を許すため
/// 各スロットは `Option` で持つ。全スロットが空なら「未検出」扱い。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSet {
    slots: Vec<Option<Landmark>>,
}

impl LandmarkSet {
    /// 連番のランドマーク列から作成
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            slots: landmarks.into_iter().map(Some).collect(),
        }
    }

    /// 未検出フレーム
    pub fn empty() -> Self {
        Self::default()
    }

    /// (インデックス, ランドマーク) の組から作成。同じインデックスは後勝ち
    pub fn from_indexed<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Landmark)>,
    {
        let mut slots: Vec<Option<Landmark>> = Vec::new();
        for (index, landmark) in entries {
            if index >= slots.len() {
                slots.resize(index + 1, None);
            }
            slots[index] = Some(landmark);
        }
        Self { slots }
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// 名前付きインデックスで取得
    pub fn landmark(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.get(index as usize)
    }

    /// 検出済みランドマークが一つもないか
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// 検出済みランドマーク数
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// (インデックス, ランドマーク) を昇順で列挙
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Landmark)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|lm| (i, lm)))
    }

    /// 検出済みランドマークの平均可視性
    pub fn average_visibility(&self) -> f32 {
        let count = self.len();
        if count == 0 {
            return 0.0;
        }
        let sum: f32 = self.iter().map(|(_, lm)| lm.visibility).sum();
        sum / count as f32
    }
}
