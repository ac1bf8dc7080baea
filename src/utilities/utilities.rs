use crate::utilities::structs::ValuePeak;

#[inline]
pub fn is_finite_non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

/// First index whose time is `>= x`.
#[inline]
pub fn lower_bound(peaks: &[ValuePeak], x: f64) -> usize {
    let mut lo = 0usize;
    let mut hi = peaks.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if peaks[mid].time < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// First index whose time is `> x`.
#[inline]
pub fn upper_bound(peaks: &[ValuePeak], x: f64) -> usize {
    let mut lo = 0usize;
    let mut hi = peaks.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if peaks[mid].time <= x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Same bounds over a plain sorted array.
#[inline]
pub fn lower_bound_f64(a: &[f64], x: f64) -> usize {
    a.partition_point(|&v| v < x)
}

#[inline]
pub fn upper_bound_f64(a: &[f64], x: f64) -> usize {
    a.partition_point(|&v| v <= x)
}

#[inline]
pub fn closest_index(peaks: &[ValuePeak], v: f64) -> usize {
    if peaks.is_empty() {
        return 0;
    }
    let lo = lower_bound(peaks, v);
    if lo == 0 {
        0
    } else if lo >= peaks.len() {
        peaks.len() - 1
    } else if (v - peaks[lo - 1].time).abs() <= (peaks[lo].time - v).abs() {
        lo - 1
    } else {
        lo
    }
}

/// Index in `[from, to]` whose time is closest to `v`, first one on ties.
#[inline]
pub fn closest_index_within(peaks: &[ValuePeak], v: f64, from: usize, to: usize) -> usize {
    let mut best = from;
    let mut best_d = f64::INFINITY;
    for (i, p) in peaks.iter().enumerate().take(to + 1).skip(from) {
        let d = (p.time - v).abs();
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Trapezoid area and maximum intensity of a run of samples.
pub fn xy_integration(peaks: &[ValuePeak]) -> (f64, f64) {
    let n = peaks.len();
    if n == 0 {
        return (0.0, f64::NEG_INFINITY);
    }
    if n == 1 {
        return (0.0, peaks[0].intensity);
    }
    let mut s = 0.0f64;
    let mut m = peaks[0].intensity;
    for w in peaks.windows(2) {
        let dx = w[1].time - w[0].time;
        s += dx * (w[0].intensity + w[1].intensity) * 0.5;
        if w[1].intensity > m {
            m = w[1].intensity;
        }
    }
    (s, m)
}
