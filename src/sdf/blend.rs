use crate::math::mix;

// Not 1-Lipschitz near the seam. k <= 0 (and NaN) degrades to min.
#[inline]
pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    if k.is_nan() || k <= 0.0 {
        return d1.min(d2);
    }
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    mix(d2, d1, h) - k * h * (1.0 - h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random01;

    fn random_range(seed: u32, min: f32, max: f32) -> f32 {
        min + (random01(seed) * (max - min))
    }

    #[test]
    fn far_apart_distances_take_the_minimum() {
        assert_eq!(smooth_union(0.2, 5.0, 0.5), 0.2);
        assert_eq!(smooth_union(5.0, -0.3, 0.5), -0.3);
    }

    #[test]
    fn zero_or_negative_bandwidth_is_hard_minimum() {
        assert_eq!(smooth_union(0.4, 0.1, 0.0), 0.1);
        assert_eq!(smooth_union(0.4, 0.1, -1.0), 0.1);
        assert_eq!(smooth_union(0.4, 0.1, f32::NAN), 0.1);
    }

    #[test]
    fn shrinking_bandwidth_converges_to_minimum() {
        let (d1, d2) = (0.3, 0.35);
        let mut previous_gap = f32::INFINITY;
        for k in [0.5, 0.1, 0.01, 0.001, 0.0001] {
            let gap = (smooth_union(d1, d2, k) - d1.min(d2)).abs();
            assert!(gap <= previous_gap + 1e-7);
            previous_gap = gap;
        }
        assert!(previous_gap < 1e-4);
    }

    #[test]
    fn never_exceeds_the_larger_input() {
        for i in 0..200u32 {
            let d1 = random_range(i * 3, -2.0, 2.0);
            let d2 = random_range(i * 3 + 1, -2.0, 2.0);
            let k = random_range(i * 3 + 2, 0.001, 1.5);
            assert!(smooth_union(d1, d2, k) <= d1.max(d2) + 1e-6);
        }
    }

    #[test]
    fn is_commutative() {
        for i in 0..200u32 {
            let d1 = random_range(i * 3 + 7, -2.0, 2.0);
            let d2 = random_range(i * 3 + 8, -2.0, 2.0);
            let k = random_range(i * 3 + 9, 0.001, 1.5);
            let forward = smooth_union(d1, d2, k);
            let backward = smooth_union(d2, d1, k);
            assert!((forward - backward).abs() < 1e-5, "{d1} {d2} {k}");
        }
    }

    #[test]
    fn equal_inputs_are_pulled_down_by_a_quarter_bandwidth() {
        let blended = smooth_union(1.0, 1.0, 0.4);
        assert!((blended - 0.9).abs() < 1e-6);
    }
}
