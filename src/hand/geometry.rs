use super::landmark::Landmark;

/// これ以下の長さのベクトルは退化とみなす
const EPSILON: f64 = 1e-6;

// 大きな座標でも二乗が溢れないよう f64 で計算する
fn dot(a: [f32; 3], b: [f32; 3]) -> f64 {
    a.iter().zip(b).map(|(&x, y)| f64::from(x) * f64::from(y)).sum()
}

fn norm(v: [f32; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// 2点間のユークリッド距離
pub fn distance(p: &Landmark, q: &Landmark) -> f32 {
    norm(p.offset_from(q)) as f32
}

/// 2ベクトルのなす角 [0, π]。どちらかが長さ0なら 0.0
pub fn angle_between_vectors(u: [f32; 3], v: [f32; 3]) -> f32 {
    let lu = norm(u);
    let lv = norm(v);
    if lu < EPSILON || lv < EPSILON {
        return 0.0;
    }
    (dot(u, v) / (lu * lv)).clamp(-1.0, 1.0).acos() as f32
}

/// origin を起点とする (a - origin) と (b - origin) のなす角 [0, π]
pub fn angle_between(a: &Landmark, origin: &Landmark, b: &Landmark) -> f32 {
    angle_between_vectors(a.offset_from(origin), b.offset_from(origin))
}

/// 関節での曲げ角 (0 = 真っ直ぐ)
///
/// 入ってくる骨 (prev -> joint) と出ていく骨 (joint -> next) のなす角。
pub fn bend_angle(prev: &Landmark, joint: &Landmark, next: &Landmark) -> f32 {
    angle_between_vectors(joint.offset_from(prev), next.offset_from(joint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance() {
        let p = Landmark::new(0.0, 0.0, 0.0);
        let q = Landmark::new(3.0, 4.0, 12.0);
        assert!((distance(&p, &q) - 13.0).abs() < 1e-5);
        assert_eq!(distance(&q, &q), 0.0);
    }

    #[test]
    fn test_angle_between_right_angle() {
        let o = Landmark::new(1.0, 1.0, 0.0);
        let a = Landmark::new(2.0, 1.0, 0.0);
        let b = Landmark::new(1.0, 5.0, 0.0);
        assert!((angle_between(&a, &o, &b) - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_angle_between_opposite() {
        let o = Landmark::default();
        let a = Landmark::new(-1.0, 0.0, 0.0);
        let b = Landmark::new(1.0, 0.0, 0.0);
        assert!((angle_between(&a, &o, &b) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_angle_between_degenerate_is_zero() {
        let o = Landmark::new(1.0, 2.0, 3.0);
        let b = Landmark::new(4.0, 5.0, 6.0);
        let angle = angle_between(&o, &o, &b);
        assert_eq!(angle, 0.0);
        assert!(!angle.is_nan());
    }

    #[test]
    fn test_bend_angle_straight_and_folded() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.0, -1.0, 0.0);
        let c = Landmark::new(0.0, -2.0, 0.0);
        assert!(bend_angle(&a, &b, &c).abs() < 1e-5);

        let d = Landmark::new(1.0, -1.0, 0.0);
        assert!((bend_angle(&a, &b, &d) - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_huge_coordinates_keep_angles() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.0, -1e20, 0.0);
        let c = Landmark::new(0.0, -2e20, 0.0);
        let straight = bend_angle(&a, &b, &c);
        assert!(straight.is_finite());
        assert!(straight.abs() < 1e-5);

        let d = Landmark::new(1e20, -1e20, 0.0);
        assert!((bend_angle(&a, &b, &d) - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_vectors_do_not_produce_nan() {
        // 丸め誤差で cos が 1 を超えても NaN にならない
        let u = [0.1, 0.2, 0.3];
        let v = [0.1 * 3.0, 0.2 * 3.0, 0.3 * 3.0];
        let angle = angle_between_vectors(u, v);
        assert!(angle.is_finite());
        assert!(angle < 1e-3);
    }
}
