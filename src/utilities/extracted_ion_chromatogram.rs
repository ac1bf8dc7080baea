use std::sync::Arc;

use crate::utilities::{
    array_pool::{ArrayPool, PooledBuffer},
    axis_value::{AxisKind, ChromXs},
    chromatogram::Chromatogram,
    errors::ChromatogramError,
    peak_of_chromatogram::PeakOfChromatogram,
    smoothing::SmoothingMethod,
    structs::{ChromatogramPeak, PeakHint, ValuePeak},
};

/// The trace of one extracted m/z.
///
/// A pool-backed trace hands its buffer back when [`dispose`] is called or
/// when it is dropped, whichever comes first. After `dispose` every accessor
/// fails with [`ChromatogramError::UsedAfterRelease`].
///
/// [`dispose`]: ExtractedIonChromatogram::dispose
#[derive(Debug)]
pub struct ExtractedIonChromatogram {
    chromatogram: Option<Chromatogram>,
    extracted_mz: f64,
}

impl ExtractedIonChromatogram {
    pub fn new(peaks: Vec<ValuePeak>, axis: AxisKind, extracted_mz: f64) -> Self {
        Self::from_chromatogram(Chromatogram::new(peaks, axis), extracted_mz)
    }

    pub fn from_pooled(
        buffer: PooledBuffer<ValuePeak>,
        axis: AxisKind,
        extracted_mz: f64,
    ) -> Self {
        Self::from_chromatogram(Chromatogram::from_pooled(buffer, axis), extracted_mz)
    }

    pub fn from_rented(
        buffer: Vec<ValuePeak>,
        length: usize,
        pool: Arc<dyn ArrayPool<ValuePeak>>,
        axis: AxisKind,
        extracted_mz: f64,
    ) -> Result<Self, ChromatogramError> {
        let chromatogram = Chromatogram::from_rented(buffer, length, pool, axis)?;
        Ok(Self::from_chromatogram(chromatogram, extracted_mz))
    }

    pub fn from_chromatogram(chromatogram: Chromatogram, extracted_mz: f64) -> Self {
        Self {
            chromatogram: Some(chromatogram),
            extracted_mz,
        }
    }

    #[inline]
    pub fn extracted_mz(&self) -> f64 {
        self.extracted_mz
    }

    pub fn is_disposed(&self) -> bool {
        self.chromatogram.is_none()
    }

    /// Releases the backing buffer. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if let Some(chromatogram) = self.chromatogram.take() {
            tracing::trace!(
                extracted_mz = self.extracted_mz,
                pooled = chromatogram.is_pooled(),
                "releasing extracted ion chromatogram"
            );
        }
    }

    pub fn chromatogram(&self) -> Result<&Chromatogram, ChromatogramError> {
        self.chromatogram
            .as_ref()
            .ok_or(ChromatogramError::UsedAfterRelease {
                extracted_mz: self.extracted_mz,
            })
    }

    pub fn peaks(&self) -> Result<&[ValuePeak], ChromatogramError> {
        Ok(self.chromatogram()?.peaks())
    }

    pub fn len(&self) -> Result<usize, ChromatogramError> {
        Ok(self.chromatogram()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ChromatogramError> {
        Ok(self.chromatogram()?.is_empty())
    }

    pub fn max_intensity(&self) -> Result<f64, ChromatogramError> {
        Ok(self.chromatogram()?.max_intensity())
    }

    /// Smoothed copy that keeps the extracted m/z.
    pub fn chromatogram_smoothing(
        &self,
        method: SmoothingMethod,
        half_width: usize,
    ) -> Result<ExtractedIonChromatogram, ChromatogramError> {
        let smoothed = self.chromatogram()?.chromatogram_smoothing(method, half_width);
        Ok(Self::from_chromatogram(smoothed, self.extracted_mz))
    }

    pub fn as_peak_array(&self) -> Result<Vec<ChromatogramPeak>, ChromatogramError> {
        Ok(self.chromatogram()?.as_peak_array())
    }

    pub fn peak_chrom_xs(&self, axis_value: f64, mz: f64) -> Result<ChromXs, ChromatogramError> {
        Ok(self.chromatogram()?.peak_chrom_xs(axis_value, mz))
    }

    pub fn as_peak(
        &self,
        top: usize,
        left: usize,
        right: usize,
    ) -> Result<PeakOfChromatogram<'_>, ChromatogramError> {
        Ok(self.chromatogram()?.as_peak(top, left, right))
    }

    pub fn find_peak(
        &self,
        search_window: usize,
        target: f64,
        hint: &PeakHint,
    ) -> Result<Option<PeakOfChromatogram<'_>>, ChromatogramError> {
        Ok(self.chromatogram()?.find_peak(search_window, target, hint))
    }

    pub fn as_peak_in_range(
        &self,
        time_left: f64,
        time_right: f64,
    ) -> Result<Option<PeakOfChromatogram<'_>>, ChromatogramError> {
        Ok(self.chromatogram()?.as_peak_in_range(time_left, time_right))
    }

    pub fn as_peak_with_top(
        &self,
        time_left: f64,
        time_top: f64,
        time_right: f64,
    ) -> Result<Option<PeakOfChromatogram<'_>>, ChromatogramError> {
        self.chromatogram()?
            .as_peak_with_top(time_left, time_top, time_right)
    }

    pub fn integrate(&self, time_left: f64, time_right: f64) -> Result<f64, ChromatogramError> {
        Ok(self.chromatogram()?.integrate(time_left, time_right))
    }
}
