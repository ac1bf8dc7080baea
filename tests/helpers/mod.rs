// shared fixtures for the integration tests
use chromcore::{AxisKind, Chromatogram, Spectrum, TimeUnit, ValuePeak};

/// Get one Gaussian value at x (bell curve). `base` lifts the whole curve.
#[allow(dead_code)]
#[inline]
pub fn gaussian_value(x: f64, mu: f64, sigma: f64, amp: f64, base: f64) -> f64 {
    base + amp * (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

/// Make an even grid from start to end with n points (inclusive).
#[allow(dead_code)]
pub fn make_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    (0..n)
        .map(|i| start + (end - start) * (i as f64) / ((n - 1) as f64))
        .collect()
}

/// Check two numbers are close within a simple absolute tolerance.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Samples from `(time, intensity)` pairs, ids in order, m/z fixed at 200.
#[allow(dead_code)]
pub fn samples(points: &[(f64, f64)]) -> Vec<ValuePeak> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(t, y))| ValuePeak::new(i, t, 200.0, y))
        .collect()
}

/// Retention-time chromatogram (minutes) from `(time, intensity)` pairs.
#[allow(dead_code)]
pub fn rt_chromatogram(points: &[(f64, f64)]) -> Chromatogram {
    Chromatogram::new(samples(points), AxisKind::RetentionTime(TimeUnit::Minute))
}

/// MS1 scans at unit spacing with a Gaussian elution profile at `mz`, plus a
/// constant interfering ion at `mz + 5`.
#[allow(dead_code)]
pub fn elution_run(n: usize, mz: f64, apex: f64, sigma: f64, amp: f64) -> Vec<Spectrum> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Spectrum {
                index: i,
                retention_time: Some(t),
                ms_level: 1,
                mz: vec![mz - 0.001, mz + 0.001, mz + 5.0],
                intensity: vec![
                    gaussian_value(t, apex, sigma, amp, 0.0),
                    gaussian_value(t, apex, sigma, amp / 2.0, 0.0),
                    10.0,
                ],
            }
        })
        .collect()
}
