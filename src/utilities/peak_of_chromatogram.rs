use crate::utilities::structs::ValuePeak;

/// A peak located on a chromatogram: three indices into the chromatogram's
/// sample buffer. The view borrows the buffer, so it can never outlive the
/// chromatogram (or released pooled buffer) it came from.
///
/// Callers building one directly guarantee `left <= top <= right` and that all
/// three indices are in bounds.
#[derive(Clone, Copy, Debug)]
pub struct PeakOfChromatogram<'a> {
    peaks: &'a [ValuePeak],
    top: usize,
    left: usize,
    right: usize,
}

impl<'a> PeakOfChromatogram<'a> {
    pub(crate) fn new(peaks: &'a [ValuePeak], top: usize, left: usize, right: usize) -> Self {
        debug_assert!(left <= top && top <= right, "unordered peak indices");
        Self {
            peaks,
            top,
            left,
            right,
        }
    }

    #[inline]
    pub fn top_index(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn left_index(&self) -> usize {
        self.left
    }

    #[inline]
    pub fn right_index(&self) -> usize {
        self.right
    }

    #[inline]
    pub fn get_top(&self) -> ValuePeak {
        self.peaks[self.top]
    }

    #[inline]
    pub fn get_left(&self) -> ValuePeak {
        self.peaks[self.left]
    }

    #[inline]
    pub fn get_right(&self) -> ValuePeak {
        self.peaks[self.right]
    }

    /// Source id of the apex sample.
    pub fn top_id(&self) -> usize {
        self.get_top().id
    }

    /// Two trapezoids, left to apex and apex to right.
    pub fn calculate_area(&self) -> f64 {
        let (l, t, r) = (self.get_left(), self.get_top(), self.get_right());
        (l.intensity + t.intensity) / 2.0 * (t.time - l.time)
            + (t.intensity + r.intensity) / 2.0 * (r.time - t.time)
    }

    pub fn calculate_base_line_area(&self) -> f64 {
        let (l, r) = (self.get_left(), self.get_right());
        (l.intensity + r.intensity) / 2.0 * (r.time - l.time)
    }

    pub fn calculate_peak_amplitude(&self) -> f64 {
        let (l, t, r) = (self.get_left(), self.get_top(), self.get_right());
        t.intensity - l.intensity.min(r.intensity)
    }

    pub fn is_valid(&self, minimum_amplitude: f64) -> bool {
        self.calculate_peak_amplitude() >= minimum_amplitude
    }

    /// Samples `[left, right]`, both ends included.
    pub fn slice_peak_area(&self) -> &'a [ValuePeak] {
        &self.peaks[self.left..=self.right]
    }

    /// Axis span from the left to the right boundary.
    pub fn width(&self) -> f64 {
        self.get_right().time - self.get_left().time
    }

    pub fn number_of_points(&self) -> usize {
        self.right - self.left + 1
    }
}
