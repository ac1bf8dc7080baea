//! Chromatographic data model and peak extraction for LC/GC-MS traces.
//!
//! Samples ([`ValuePeak`]) live in a [`Chromatogram`] tagged with the axis it
//! runs along. Traces extracted for one m/z are [`ExtractedIonChromatogram`]s,
//! usually backed by a buffer rented from an [`ArrayPool`]. Peaks located on a
//! trace are [`PeakOfChromatogram`] views borrowing the trace's samples.

pub mod utilities;

pub use utilities::{
    ArrayPool, AxisKind, AxisValue, ChromXs, Chromatogram, ChromatogramError, DriftUnit,
    EicOptions, ExtractedIonChromatogram, MzUnit, PeakOfChromatogram, PooledBuffer,
    SharedArrayPool, SmoothingMethod, Spectrum, SpectrumLike, TimeUnit,
    extract_ion_chromatogram, extract_ion_chromatograms,
    structs::{ChromatogramPeak, FromTo, PeakHint, ValuePeak},
};
