use serde::{Deserialize, Serialize};

use crate::utilities::axis_value::ChromXs;

/// One raw sample of a chromatographic trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuePeak {
    pub id: usize,
    pub time: f64,
    pub mz: f64,
    pub intensity: f64,
}

impl ValuePeak {
    #[inline]
    pub const fn new(id: usize, time: f64, mz: f64, intensity: f64) -> Self {
        Self {
            id,
            time,
            mz,
            intensity,
        }
    }
}

/// Materialized sample handed out by `Chromatogram::as_peak_array`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChromatogramPeak {
    pub id: usize,
    pub mass: f64,
    pub intensity: f64,
    pub chrom_xs: ChromXs,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FromTo {
    pub from: f64,
    pub to: f64,
}

/// Left, top and right positions of a previously detected feature, used to
/// re-anchor it on another trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakHint {
    pub left_index: usize,
    pub left_time: f64,
    pub top_index: usize,
    pub top_time: f64,
    pub right_index: usize,
    pub right_time: f64,
}
