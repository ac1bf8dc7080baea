use std::sync::Arc;

use crate::utilities::{
    array_pool::{ArrayPool, PooledBuffer},
    axis_value::{AxisKind, ChromXs},
    errors::ChromatogramError,
    peak_of_chromatogram::PeakOfChromatogram,
    smoothing::{SmoothingMethod, smooth_intensities},
    structs::{ChromatogramPeak, PeakHint, ValuePeak},
    utilities::{closest_index, closest_index_within, lower_bound, upper_bound, xy_integration},
};

#[derive(Debug)]
enum PeakStorage {
    Owned(Vec<ValuePeak>),
    Pooled(PooledBuffer<ValuePeak>),
}

/// An ordered trace of samples along one axis.
///
/// Samples must be supplied in non-decreasing axis order; nothing here
/// re-sorts them. The trace is read-only once built.
#[derive(Debug)]
pub struct Chromatogram {
    storage: PeakStorage,
    axis: AxisKind,
}

impl Chromatogram {
    pub fn new(peaks: Vec<ValuePeak>, axis: AxisKind) -> Self {
        Self {
            storage: PeakStorage::Owned(peaks),
            axis,
        }
    }

    pub fn from_pooled(buffer: PooledBuffer<ValuePeak>, axis: AxisKind) -> Self {
        Self {
            storage: PeakStorage::Pooled(buffer),
            axis,
        }
    }

    /// Takes over a buffer rented from `pool` of which the first `length`
    /// samples are valid.
    pub fn from_rented(
        buffer: Vec<ValuePeak>,
        length: usize,
        pool: Arc<dyn ArrayPool<ValuePeak>>,
        axis: AxisKind,
    ) -> Result<Self, ChromatogramError> {
        Ok(Self::from_pooled(PooledBuffer::new(buffer, length, pool)?, axis))
    }

    #[inline]
    pub fn peaks(&self) -> &[ValuePeak] {
        match &self.storage {
            PeakStorage::Owned(v) => v,
            PeakStorage::Pooled(b) => b.as_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.peaks().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peaks().is_empty()
    }

    #[inline]
    pub fn axis(&self) -> AxisKind {
        self.axis
    }

    pub fn is_pooled(&self) -> bool {
        matches!(self.storage, PeakStorage::Pooled(_))
    }

    #[inline]
    pub fn id(&self, i: usize) -> usize {
        self.peaks()[i].id
    }

    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        self.peaks()[i].time
    }

    #[inline]
    pub fn mz(&self, i: usize) -> f64 {
        self.peaks()[i].mz
    }

    #[inline]
    pub fn intensity(&self, i: usize) -> f64 {
        self.peaks()[i].intensity
    }

    /// Highest intensity of the trace, 0 when empty.
    pub fn max_intensity(&self) -> f64 {
        self.peaks()
            .iter()
            .map(|p| p.intensity)
            .fold(0.0, f64::max)
    }

    /// Index of the sample closest to `axis_value`.
    pub fn search_nearest_point(&self, axis_value: f64) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(closest_index(self.peaks(), axis_value))
        }
    }

    /// Local maximum against both direct neighbours.
    pub fn is_peak_top(&self, i: usize) -> bool {
        let p = self.peaks();
        i > 0
            && i + 1 < p.len()
            && p[i - 1].intensity <= p[i].intensity
            && p[i].intensity >= p[i + 1].intensity
    }

    /// Local maximum with two rising samples on each side.
    pub fn is_large_peak_top(&self, i: usize) -> bool {
        let p = self.peaks();
        i > 1
            && i + 2 < p.len()
            && p[i - 2].intensity <= p[i - 1].intensity
            && p[i - 1].intensity <= p[i].intensity
            && p[i].intensity >= p[i + 1].intensity
            && p[i + 1].intensity >= p[i + 2].intensity
    }

    /// New chromatogram with smoothed intensities; ids, times and m/z pass
    /// through. A pool-backed trace rents its result from the same pool.
    pub fn chromatogram_smoothing(
        &self,
        method: SmoothingMethod,
        half_width: usize,
    ) -> Chromatogram {
        let peaks = self.peaks();
        let smoothed = smooth_intensities(peaks, method, half_width);
        let values = peaks.iter().zip(smoothed).map(|(p, intensity)| ValuePeak {
            intensity,
            ..*p
        });
        let storage = match &self.storage {
            PeakStorage::Owned(_) => PeakStorage::Owned(values.collect()),
            PeakStorage::Pooled(b) => PeakStorage::Pooled(PooledBuffer::rent_from_iter(
                Arc::clone(b.pool()),
                peaks.len(),
                values,
            )),
        };
        Chromatogram {
            storage,
            axis: self.axis,
        }
    }

    pub fn as_peak_array(&self) -> Vec<ChromatogramPeak> {
        self.peaks()
            .iter()
            .map(|p| ChromatogramPeak {
                id: p.id,
                mass: p.mz,
                intensity: p.intensity,
                chrom_xs: self.peak_chrom_xs(p.time, p.mz),
            })
            .collect()
    }

    #[inline]
    pub fn peak_chrom_xs(&self, axis_value: f64, mz: f64) -> ChromXs {
        ChromXs::new(self.axis.value(axis_value), mz)
    }

    /// Wraps known indices without checking them.
    pub fn as_peak(&self, top: usize, left: usize, right: usize) -> PeakOfChromatogram<'_> {
        PeakOfChromatogram::new(self.peaks(), top, left, right)
    }

    /// Re-anchors a feature found elsewhere: each of its left, top and right
    /// positions moves to the sample closest in axis value among those within
    /// `search_window` indices of the original index. Hint indices past the
    /// end of this trace are re-centered on the sample nearest `target`.
    pub fn find_peak(
        &self,
        search_window: usize,
        target: f64,
        hint: &PeakHint,
    ) -> Option<PeakOfChromatogram<'_>> {
        let peaks = self.peaks();
        if peaks.is_empty() {
            return None;
        }
        let last = peaks.len() - 1;
        let fallback = closest_index(peaks, target);
        let locate = |index: usize, time: f64| {
            let center = if index <= last { index } else { fallback };
            let from = center.saturating_sub(search_window);
            let to = center.saturating_add(search_window).min(last);
            closest_index_within(peaks, time, from, to)
        };
        let top = locate(hint.top_index, hint.top_time);
        let left = locate(hint.left_index, hint.left_time).min(top);
        let right = locate(hint.right_index, hint.right_time).max(top);
        Some(PeakOfChromatogram::new(peaks, top, left, right))
    }

    /// Peak spanning the samples inside `[time_left, time_right]`, apex at the
    /// most intense of them (first on ties).
    pub fn as_peak_in_range(
        &self,
        time_left: f64,
        time_right: f64,
    ) -> Option<PeakOfChromatogram<'_>> {
        let peaks = self.peaks();
        let lo = lower_bound(peaks, time_left);
        let hi = upper_bound(peaks, time_right);
        if lo >= hi {
            return None;
        }
        let mut top = lo;
        for i in (lo + 1)..hi {
            if peaks[i].intensity > peaks[top].intensity {
                top = i;
            }
        }
        Some(PeakOfChromatogram::new(peaks, top, lo, hi - 1))
    }

    /// Peak spanning the samples inside `[time_left, time_right]`, apex at the
    /// in-range sample closest to `time_top` whatever its intensity.
    pub fn as_peak_with_top(
        &self,
        time_left: f64,
        time_top: f64,
        time_right: f64,
    ) -> Result<Option<PeakOfChromatogram<'_>>, ChromatogramError> {
        if !(time_left <= time_top && time_top <= time_right) {
            return Err(ChromatogramError::UnorderedBoundaries {
                left: time_left,
                top: time_top,
                right: time_right,
            });
        }
        let peaks = self.peaks();
        let lo = lower_bound(peaks, time_left);
        let hi = upper_bound(peaks, time_right);
        if lo >= hi {
            return Ok(None);
        }
        let top = closest_index_within(peaks, time_top, lo, hi - 1);
        Ok(Some(PeakOfChromatogram::new(peaks, top, lo, hi - 1)))
    }

    /// Owned copy of the samples inside `[time_left, time_right]`.
    pub fn slice_by_axis(&self, time_left: f64, time_right: f64) -> Chromatogram {
        let peaks = self.peaks();
        let lo = lower_bound(peaks, time_left);
        let hi = upper_bound(peaks, time_right).max(lo);
        Chromatogram::new(peaks[lo..hi].to_vec(), self.axis)
    }

    /// Trapezoid area of the samples inside `[time_left, time_right]`.
    pub fn integrate(&self, time_left: f64, time_right: f64) -> f64 {
        let peaks = self.peaks();
        let lo = lower_bound(peaks, time_left);
        let hi = upper_bound(peaks, time_right);
        if lo >= hi {
            return 0.0;
        }
        xy_integration(&peaks[lo..hi]).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::axis_value::TimeUnit;

    fn chrom(ys: &[f64]) -> Chromatogram {
        let peaks = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| ValuePeak::new(i, i as f64, 100.0, y))
            .collect();
        Chromatogram::new(peaks, AxisKind::RetentionTime(TimeUnit::Minute))
    }

    #[test]
    fn peak_top_detection() {
        let c = chrom(&[1.0, 2.0, 5.0, 3.0, 1.0]);
        assert!(c.is_peak_top(2));
        assert!(c.is_large_peak_top(2));
        assert!(!c.is_peak_top(0));
        assert!(!c.is_peak_top(4));
        assert!(!c.is_large_peak_top(1));
    }

    #[test]
    fn slice_by_axis_keeps_inclusive_range() {
        let c = chrom(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let s = c.slice_by_axis(1.0, 3.0);
        assert_eq!(s.len(), 3);
        assert_eq!(s.id(0), 1);
        assert_eq!(s.id(2), 3);
        assert!(c.slice_by_axis(3.5, 3.7).is_empty());
    }

    #[test]
    fn integrate_over_range() {
        let c = chrom(&[0.0, 2.0, 2.0, 0.0]);
        assert_eq!(c.integrate(0.0, 3.0), 4.0);
        assert_eq!(c.integrate(10.0, 20.0), 0.0);
        assert_eq!(c.max_intensity(), 2.0);
    }
}
