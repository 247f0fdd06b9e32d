//! Mean and simple (one-predictor) ordinary least squares.

/// Arithmetic mean. Caller guarantees a non-empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// OLS slope of `y` regressed on `x`: centered cross-product sum over
/// centered squared-deviation sum. The intercept is fit implicitly by
/// centering and discarded.
///
/// Returns `None` when `x` has zero squared deviation (constant predictor,
/// including the single-observation case) — the slope is undefined there
/// and must not leak out as NaN or infinity.
pub fn ols_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    debug_assert_eq!(x.len(), y.len());

    let mx = mean(x);
    let my = mean(y);

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        ss_xx += (xi - mx) * (xi - mx);
        ss_xy += (xi - mx) * (yi - my);
    }

    if ss_xx == 0.0 {
        return None;
    }
    Some(ss_xy / ss_xx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_mean() {
        assert!((mean(&[3.0, 4.0]) - 3.5).abs() < TOL);
        assert!((mean(&[5.0]) - 5.0).abs() < TOL);
    }

    #[test]
    fn test_slope_matches_cov_over_var() {
        // cov([3,4],[6,4]) / var([3,4]) = -0.5 / 0.25 = -2 (population), and
        // the denominators cancel either way.
        let b = ols_slope(&[3.0, 4.0], &[6.0, 4.0]).unwrap();
        assert!((b - (-2.0)).abs() < TOL);
    }

    #[test]
    fn test_slope_exact_fit() {
        // y = 3x + 1 exactly
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [4.0, 7.0, 10.0, 13.0];
        let b = ols_slope(&x, &y).unwrap();
        assert!((b - 3.0).abs() < TOL);
    }

    #[test]
    fn test_slope_constant_predictor_is_none() {
        assert_eq!(ols_slope(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0]), None);
        assert_eq!(ols_slope(&[7.0], &[1.0]), None);
    }
}
