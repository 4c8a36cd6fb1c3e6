//! Min-max scaling for sparse numeric signals.

/// Scales `values` into `[0, 1]` using the min and max of the present values.
///
/// Missing entries (`None`, NaN or infinite) always map to `0.0`; they are never imputed.
/// When every present value is identical there is no spread to scale by, so
/// present entries land in the middle at `0.5`.
pub fn normalize(values: &[Option<f64>]) -> Vec<f64> {
    let present: Vec<f64> = values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| v.is_finite())
        .collect();

    if present.is_empty() {
        return vec![0.0; values.len()];
    }

    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Halving is exact for normal floats and keeps `max - min` finite even
    // when the values span most of the f64 range.
    let scale = if (max - min).is_finite() { 1.0 } else { 0.5 };
    let range = max * scale - min * scale;

    values
        .iter()
        .map(|v| match v {
            Some(v) if v.is_finite() => {
                if max == min {
                    0.5
                } else {
                    ((v * scale - min * scale) / range).clamp(0.0, 1.0)
                }
            }
            _ => 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_constant_values() {
        assert_eq!(normalize(&[Some(5.0), None, Some(5.0)]), vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_min_max_scaling() {
        assert_eq!(normalize(&[Some(1.0), Some(3.0), None]), vec![0.0, 1.0, 0.0]);
        assert_eq!(
            normalize(&[Some(2.0), Some(4.0), Some(3.0)]),
            vec![0.0, 1.0, 0.5]
        );
    }

    #[test]
    fn test_all_missing() {
        assert_eq!(normalize(&[None, Some(f64::NAN), None]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extreme_spread_stays_in_unit_range() {
        assert_eq!(
            normalize(&[Some(f64::MAX), Some(-f64::MAX), None]),
            vec![1.0, 0.0, 0.0]
        );
        assert_eq!(normalize(&[Some(1e308), Some(-1e308), Some(0.0)]), vec![1.0, 0.0, 0.5]);
        assert_eq!(
            normalize(&[Some(f64::INFINITY), Some(1.0), Some(3.0)]),
            vec![0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_nan_counts_as_missing() {
        assert_eq!(
            normalize(&[Some(f64::NAN), Some(1.0), Some(1.0)]),
            vec![0.0, 0.5, 0.5]
        );
    }
}
