use serde::{Deserialize, Serialize};

use crate::utilities::structs::ValuePeak;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SggOptions {
    pub window_size: usize,
    pub derivative: usize,
    pub polynomial: usize,
}

impl Default for SggOptions {
    fn default() -> Self {
        Self {
            window_size: 9,
            derivative: 0,
            polynomial: 3,
        }
    }
}

/// Savitzky–Golay filter over the intensities of `peaks`, using their times
/// as abscissa for derivative scaling. Edge points are fitted with the
/// asymmetric weights of the same window, so the output has the input length.
///
/// Returns `None` when the window is even, shorter than 5, longer than the
/// series, or the polynomial degree is zero.
pub fn savitzky_golay(peaks: &[ValuePeak], opts: SggOptions) -> Option<Vec<f64>> {
    let SggOptions {
        window_size,
        derivative,
        polynomial,
    } = opts;
    let n = peaks.len();
    if window_size % 2 == 0 || window_size < 5 || window_size > n || polynomial < 1 {
        return None;
    }
    if polynomial >= 6 {
        tracing::warn!(
            polynomial,
            "polynomial degree above 5 is prone to oscillation"
        );
    }

    let half = window_size / 2;
    let ys: Vec<f64> = peaks.iter().map(|p| p.intensity).collect();
    let hs = spacing_factors(peaks, half, derivative);
    let weights = convolution_weights(window_size, polynomial, derivative);
    let dot = |w: &[f64], start: usize| -> f64 {
        w.iter()
            .zip(&ys[start..start + window_size])
            .map(|(a, b)| a * b)
            .sum()
    };

    let mut out = vec![0.0f64; n];
    for i in 0..half {
        let left = half - i - 1;
        let right = n - half + i;
        out[left] = dot(&weights[left][..], 0) / hs[left];
        out[right] = dot(&weights[half + i + 1][..], n - window_size) / hs[right];
    }
    for c in half..(n - half) {
        out[c] = dot(&weights[half][..], c - half) / hs[c];
    }
    Some(out)
}

fn spacing_factors(peaks: &[ValuePeak], half: usize, derivative: usize) -> Vec<f64> {
    let n = peaks.len();
    if derivative == 0 || n < 2 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|c| {
            let start = c.saturating_sub(half);
            let end = (c + half).min(n - 1);
            if end > start {
                let step = (peaks[end].time - peaks[start].time) / (end - start) as f64;
                step.powi(derivative as i32)
            } else {
                1.0
            }
        })
        .collect()
}

/// Weight matrix indexed by `[evaluation point][window position]`.
fn convolution_weights(window_size: usize, degree: usize, derivative: usize) -> Vec<Vec<f64>> {
    let half = window_size / 2;
    let offset = |idx: usize| idx as f64 - half as f64;

    let basis: Vec<Vec<f64>> = (0..window_size)
        .map(|j| {
            let g = gram_polynomials(offset(j), half, degree, 0);
            g.iter().map(|row| row[0]).collect()
        })
        .collect();
    let evaluated: Vec<Vec<f64>> = (0..window_size)
        .map(|t| {
            let g = gram_polynomials(offset(t), half, degree, derivative);
            g.iter().map(|row| row[derivative]).collect()
        })
        .collect();

    let coef: Vec<f64> = (0..=degree)
        .map(|k| {
            let num = falling_factorial(2 * half, k);
            let den = falling_factorial(2 * half + k + 1, k + 1);
            (2 * k + 1) as f64 * (num / den)
        })
        .collect();

    (0..window_size)
        .map(|t| {
            (0..window_size)
                .map(|j| {
                    (0..=degree)
                        .map(|k| coef[k] * basis[j][k] * evaluated[t][k])
                        .sum::<f64>()
                })
                .collect()
        })
        .collect()
}

/// Gram polynomials `G[k][s]` (degree `k`, `s`-th derivative) at point `i` of
/// a window of half-width `m`.
fn gram_polynomials(i: f64, m: usize, max_degree: usize, max_derivative: usize) -> Vec<Vec<f64>> {
    let mut g = vec![vec![0.0f64; max_derivative + 1]; max_degree + 1];
    g[0][0] = 1.0;
    let m = m as f64;
    for k in 1..=max_degree {
        let kf = k as f64;
        let denom = kf * (2.0 * m - kf + 1.0);
        let a = (4.0 * kf - 2.0) / denom;
        let b = ((kf - 1.0) * (2.0 * m + kf)) / denom;
        for s in 0..=max_derivative {
            let mut v = i * g[k - 1][s];
            if s > 0 {
                v += s as f64 * g[k - 1][s - 1];
            }
            let prev = if k >= 2 { g[k - 2][s] } else { 0.0 };
            g[k][s] = a * v - b * prev;
        }
    }
    g
}

/// `a * (a - 1) * ... * (a - b + 1)`, or 1 when `b > a`.
fn falling_factorial(a: usize, b: usize) -> f64 {
    if a < b {
        return 1.0;
    }
    ((a - b + 1)..=a).fold(1.0f64, |acc, j| acc * j as f64)
}
