use std::sync::Arc;

use rayon::{ThreadPoolBuilder, prelude::*};
use serde::{Deserialize, Serialize};

use crate::utilities::{
    array_pool::{ArrayPool, PooledBuffer},
    axis_value::AxisKind,
    errors::ChromatogramError,
    extracted_ion_chromatogram::ExtractedIonChromatogram,
    structs::{FromTo, ValuePeak},
    utilities::{is_finite_non_negative, lower_bound_f64, upper_bound_f64},
};

/// What the raw reader hands over per scan. Spectra are expected in
/// acquisition order with m/z arrays sorted ascending.
pub trait SpectrumLike {
    fn index(&self) -> usize;
    fn retention_time(&self) -> Option<f64>;
    fn ms_level(&self) -> u8;
    fn mz_array(&self) -> &[f64];
    fn intensity_array(&self) -> &[f64];
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub index: usize,
    pub retention_time: Option<f64>,
    pub ms_level: u8,
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl SpectrumLike for Spectrum {
    fn index(&self) -> usize {
        self.index
    }

    fn retention_time(&self) -> Option<f64> {
        self.retention_time
    }

    fn ms_level(&self) -> u8 {
        self.ms_level
    }

    fn mz_array(&self) -> &[f64] {
        &self.mz
    }

    fn intensity_array(&self) -> &[f64] {
        &self.intensity
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EicOptions {
    pub ppm_tolerance: f64,
    pub mz_tolerance: f64,
    pub from_to: Option<FromTo>,
}

impl Default for EicOptions {
    fn default() -> Self {
        Self {
            ppm_tolerance: 20.0,
            mz_tolerance: 0.005,
            from_to: None,
        }
    }
}

impl EicOptions {
    /// Inclusive m/z window around `mz`: the wider of the ppm and absolute
    /// tolerances.
    pub fn mz_window(&self, mz: f64) -> (f64, f64) {
        let tol = ((self.ppm_tolerance / 1e6) * mz).max(self.mz_tolerance);
        (mz - tol, mz + tol)
    }
}

/// Builds the trace of `target_mz` over the MS1 spectra, rented from `pool`.
///
/// Each sample sums the intensities inside the tolerance window and carries
/// the m/z of its most intense contributor (the target when nothing matched)
/// and the spectrum index as id.
#[tracing::instrument(level = "debug", skip_all, fields(target_mz = target_mz))]
pub fn extract_ion_chromatogram<S: SpectrumLike>(
    spectra: &[S],
    target_mz: f64,
    axis: AxisKind,
    options: Option<EicOptions>,
    pool: &Arc<dyn ArrayPool<ValuePeak>>,
) -> ExtractedIonChromatogram {
    let o = options.unwrap_or_default();

    let mut ms1 = Vec::with_capacity(spectra.len());
    let mut times = Vec::with_capacity(spectra.len());
    for s in spectra {
        if s.ms_level() != 1 {
            continue;
        }
        if let Some(rt) = s.retention_time().filter(|rt| rt.is_finite()) {
            ms1.push(s);
            times.push(rt);
        }
    }

    let (start, end) = match o.from_to {
        Some(ft) => (lower_bound_f64(&times, ft.from), upper_bound_f64(&times, ft.to)),
        None => (0, times.len()),
    };
    let end = end.max(start);
    let (min_mz, max_mz) = o.mz_window(target_mz);

    let samples = ms1[start..end]
        .iter()
        .zip(&times[start..end])
        .map(|(s, &rt)| {
            let (mz, intensity) = sum_window(s.mz_array(), s.intensity_array(), min_mz, max_mz);
            ValuePeak::new(s.index(), rt, mz.unwrap_or(target_mz), intensity)
        });
    let buffer = PooledBuffer::rent_from_iter(Arc::clone(pool), end - start, samples);
    tracing::debug!(points = buffer.len(), "extracted ion chromatogram");
    ExtractedIonChromatogram::from_pooled(buffer, axis, target_mz)
}

/// One trace per target m/z, in target order. With `cores > 1` the targets
/// are spread over a dedicated rayon pool of that many threads.
pub fn extract_ion_chromatograms<S: SpectrumLike + Sync>(
    spectra: &[S],
    targets: &[f64],
    axis: AxisKind,
    options: Option<EicOptions>,
    pool: &Arc<dyn ArrayPool<ValuePeak>>,
    cores: usize,
) -> Result<Vec<ExtractedIonChromatogram>, ChromatogramError> {
    let one = |&mz: &f64| extract_ion_chromatogram(spectra, mz, axis, options, pool);
    if cores <= 1 || targets.len() < 2 {
        return Ok(targets.iter().map(one).collect());
    }
    let workers = ThreadPoolBuilder::new()
        .num_threads(cores)
        .build()
        .map_err(|e| ChromatogramError::WorkerPool(e.to_string()))?;
    Ok(workers.install(|| targets.par_iter().map(one).collect()))
}

/// Summed intensity in `[min_mz, max_mz]` and the m/z of its largest point.
fn sum_window(mz: &[f64], intensity: &[f64], min_mz: f64, max_mz: f64) -> (Option<f64>, f64) {
    if mz.is_empty() || mz.len() != intensity.len() {
        return (None, 0.0);
    }
    let lo = lower_bound_f64(mz, min_mz);
    let hi = upper_bound_f64(mz, max_mz);
    let mut acc = 0.0f64;
    let mut best: Option<(f64, f64)> = None;
    for (&m, &v) in mz[lo..hi.max(lo)].iter().zip(&intensity[lo..hi.max(lo)]) {
        if !is_finite_non_negative(v) {
            continue;
        }
        acc += v;
        if best.is_none_or(|(_, bv)| v > bv) {
            best = Some((m, v));
        }
    }
    (best.map(|(m, _)| m), acc)
}
