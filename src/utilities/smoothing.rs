use serde::{Deserialize, Serialize};

use crate::utilities::{
    sgg::{SggOptions, savitzky_golay},
    structs::ValuePeak,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmoothingMethod {
    #[default]
    SimpleMovingAverage,
    LinearWeightedMovingAverage,
    BinomialFilter,
    SavitzkyGolay,
}

/// Smoothed intensities of `peaks`, one per input sample.
///
/// The window spans `[i - half_width, i + half_width]` and shrinks at the
/// sequence ends rather than padding, so edge points average fewer samples.
pub fn smooth_intensities(
    peaks: &[ValuePeak],
    method: SmoothingMethod,
    half_width: usize,
) -> Vec<f64> {
    if peaks.is_empty() || half_width == 0 {
        return peaks.iter().map(|p| p.intensity).collect();
    }
    // a wider window already covers the whole trace from every sample
    let half_width = half_width.min(peaks.len() - 1);
    if half_width == 0 {
        return peaks.iter().map(|p| p.intensity).collect();
    }
    match method {
        SmoothingMethod::SimpleMovingAverage => {
            weighted_window(peaks, half_width, &vec![1.0; 2 * half_width + 1])
        }
        SmoothingMethod::LinearWeightedMovingAverage => {
            let weights: Vec<f64> = (0..=2 * half_width)
                .map(|j| (half_width + 1 - j.abs_diff(half_width)) as f64)
                .collect();
            weighted_window(peaks, half_width, &weights)
        }
        SmoothingMethod::BinomialFilter => {
            weighted_window(peaks, half_width, &binomial_row(2 * half_width))
        }
        SmoothingMethod::SavitzkyGolay => {
            let opts = SggOptions {
                window_size: 2 * half_width + 1,
                ..Default::default()
            };
            match savitzky_golay(peaks, opts) {
                Some(ys) => ys.into_iter().map(|y| y.max(0.0)).collect(),
                None => {
                    tracing::debug!(
                        half_width,
                        len = peaks.len(),
                        "Savitzky-Golay window not applicable, intensities left unsmoothed"
                    );
                    peaks.iter().map(|p| p.intensity).collect()
                }
            }
        }
    }
}

/// Weighted mean over the clipped window, normalized by the weights that
/// actually fell inside the sequence.
fn weighted_window(peaks: &[ValuePeak], half_width: usize, weights: &[f64]) -> Vec<f64> {
    let n = peaks.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half_width);
            let hi = (i + half_width).min(n - 1);
            let mut sum = 0.0;
            let mut norm = 0.0;
            for (j, p) in peaks.iter().enumerate().take(hi + 1).skip(lo) {
                let w = weights[j + half_width - i];
                sum += w * p.intensity;
                norm += w;
            }
            sum / norm
        })
        .collect()
}

/// Row `n` of Pascal's triangle scaled so its central entry is 1. Entries
/// only shrink away from the center, so wide rows underflow to 0 instead of
/// overflowing.
fn binomial_row(n: usize) -> Vec<f64> {
    let c = n / 2;
    let mut row = vec![0.0f64; n + 1];
    row[c] = 1.0;
    for k in c..n {
        row[k + 1] = row[k] * (n - k) as f64 / (k + 1) as f64;
    }
    for k in (1..=c).rev() {
        row[k - 1] = row[k] * k as f64 / (n - k + 1) as f64;
    }
    row
}
