//! Statistical utility functions.
//!
//! Used by the valuation summary to derive PE bands from the daily series.

/// Mean and sample standard deviation of a set of observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    /// Arithmetic mean of the finite observations.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator).
    pub std: f64,
    /// Number of finite observations used.
    pub n: usize,
}

/// Compute mean and sample standard deviation, ignoring non-finite values.
///
/// Returns `None` with fewer than two finite observations, since the sample
/// standard deviation is undefined there.
///
/// # Examples
///
/// ```
/// use garp_traits::stats::sample_stats;
///
/// let stats = sample_stats(&[1.0, 2.0, 3.0, f64::NAN]).unwrap();
/// assert_eq!(stats.n, 3);
/// assert!((stats.mean - 2.0).abs() < 1e-12);
/// assert!((stats.std - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn sample_stats(values: &[f64]) -> Option<SampleStats> {
    let finite: Vec<f64> = values.iter().filter(|x| x.is_finite()).copied().collect();
    let n = finite.len();
    if n < 2 {
        return None;
    }

    let mean = finite.iter().sum::<f64>() / n as f64;
    // Bessel's correction
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    Some(SampleStats {
        mean,
        std: variance.sqrt(),
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_stats_basic() {
        let stats = sample_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.n, 8);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_stats_too_few() {
        assert!(sample_stats(&[]).is_none());
        assert!(sample_stats(&[1.0]).is_none());
        assert!(sample_stats(&[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_sample_stats_constant() {
        let stats = sample_stats(&[3.0, 3.0, 3.0]).unwrap();
        assert_relative_eq!(stats.std, 0.0);
    }
}
