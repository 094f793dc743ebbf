use crate::pose::Point2D;

/// `mid` を頂点とする関節角（度）
///
/// 画像座標はY下向きなので、Y成分を反転して数学座標系で計算する。
/// cosθ はクランプしない。ベクトル長が0のとき、または丸め誤差で
/// [-1, 1] を外れたときは NaN を返す（NaN との比較は常に false）。
pub fn joint_angle(p1: Point2D, mid: Point2D, p2: Point2D) -> f32 {
    let v1 = [p1.x - mid.x, -(p1.y - mid.y)];
    let v2 = [p2.x - mid.x, -(p2.y - mid.y)];
    let dot = v1[0] * v2[0] + v1[1] * v2[1];
    let mag1 = v1[0].hypot(v1[1]);
    let mag2 = v2[0].hypot(v2[1]);
    (dot / (mag1 * mag2)).acos().to_degrees()
}
