pub mod array_pool;
pub use array_pool::{ArrayPool, PooledBuffer, SharedArrayPool};

pub mod axis_value;
pub use axis_value::{AxisKind, AxisValue, ChromXs, DriftUnit, MzUnit, TimeUnit};

pub mod calculate_eic;
pub use calculate_eic::{
    EicOptions, Spectrum, SpectrumLike, extract_ion_chromatogram, extract_ion_chromatograms,
};

pub mod chromatogram;
pub use chromatogram::Chromatogram;

pub mod errors;
pub use errors::ChromatogramError;

pub mod extracted_ion_chromatogram;
pub use extracted_ion_chromatogram::ExtractedIonChromatogram;

pub mod peak_of_chromatogram;
pub use peak_of_chromatogram::PeakOfChromatogram;

pub mod sgg;

pub mod smoothing;
pub use smoothing::{SmoothingMethod, smooth_intensities};

pub mod structs;

pub mod utilities;
pub use utilities::{closest_index, xy_integration};
