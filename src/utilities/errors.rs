use thiserror::Error;

/// Contract violations surfaced by the chromatogram core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChromatogramError {
    #[error("peak boundaries must be ordered, got left={left}, top={top}, right={right}")]
    UnorderedBoundaries { left: f64, top: f64, right: f64 },
    #[error("extracted ion chromatogram for m/z {extracted_mz} used after its buffer was released")]
    UsedAfterRelease { extracted_mz: f64 },
    #[error("logical length {length} exceeds buffer capacity {capacity}")]
    LengthExceedsCapacity { length: usize, capacity: usize },
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}
