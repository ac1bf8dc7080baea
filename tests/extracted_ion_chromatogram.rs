use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use chromcore::{
    ArrayPool, AxisKind, ChromatogramError, ExtractedIonChromatogram, PeakHint, PooledBuffer,
    SharedArrayPool, SmoothingMethod, TimeUnit, ValuePeak,
};

mod helpers;
use helpers::samples;

const MZ: f64 = 301.1412;

fn axis() -> AxisKind {
    AxisKind::RetentionTime(TimeUnit::Minute)
}

fn pooled_eic(pool: &Arc<SharedArrayPool<ValuePeak>>) -> ExtractedIonChromatogram {
    let points = samples(&[(0.5, 5.0), (1.0, 10.0), (1.5, 20.0), (2.0, 15.0), (2.5, 10.0)]);
    let dyn_pool: Arc<dyn ArrayPool<ValuePeak>> = pool.clone();
    let buffer = PooledBuffer::rent_from_iter(dyn_pool, points.len(), points);
    ExtractedIonChromatogram::from_pooled(buffer, axis(), MZ)
}

fn released() -> ChromatogramError {
    ChromatogramError::UsedAfterRelease { extracted_mz: MZ }
}

#[test]
fn pooled_trace_behaves_like_a_chromatogram() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let eic = pooled_eic(&pool);
    assert_eq!(eic.extracted_mz(), MZ);
    assert_eq!(eic.len().unwrap(), 5);
    assert_eq!(eic.as_peak_array().unwrap().len(), 5);
    let p = eic.as_peak_in_range(1.0, 2.5).unwrap().unwrap();
    assert_eq!(p.get_top().intensity, 20.0);
    let p = eic.as_peak_with_top(0.5, 2.0, 2.5).unwrap().unwrap();
    assert_eq!(p.top_index(), 3);
    assert_eq!(eic.max_intensity().unwrap(), 20.0);
}

#[test]
fn every_access_fails_after_dispose() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let mut eic = pooled_eic(&pool);
    eic.dispose();
    assert!(eic.is_disposed());

    assert_eq!(eic.as_peak_array().unwrap_err(), released());
    assert_eq!(eic.as_peak(1, 0, 2).unwrap_err(), released());
    assert_eq!(eic.as_peak_in_range(0.0, 3.0).unwrap_err(), released());
    assert_eq!(eic.as_peak_with_top(0.0, 1.0, 3.0).unwrap_err(), released());
    assert_eq!(eic.peak_chrom_xs(1.0, MZ).unwrap_err(), released());
    assert_eq!(eic.len().unwrap_err(), released());
    assert_eq!(eic.peaks().unwrap_err(), released());
    assert!(
        eic.chromatogram_smoothing(SmoothingMethod::SimpleMovingAverage, 1)
            .is_err()
    );
    let hint = PeakHint {
        left_index: 0,
        left_time: 0.5,
        top_index: 2,
        top_time: 1.5,
        right_index: 4,
        right_time: 2.5,
    };
    assert_eq!(eic.find_peak(1, 1.5, &hint).unwrap_err(), released());
}

#[test]
fn ordering_errors_stay_distinct_from_release_errors() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let eic = pooled_eic(&pool);
    let err = eic.as_peak_with_top(2.0, 1.0, 3.0).unwrap_err();
    assert!(matches!(err, ChromatogramError::UnorderedBoundaries { .. }));
}

#[test]
fn buffer_returns_to_pool_exactly_once() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let mut eic = pooled_eic(&pool);
    assert_eq!(pool.outstanding(), 1);
    eic.dispose();
    assert_eq!(pool.returned_count(), 1);
    eic.dispose();
    drop(eic);
    assert_eq!(pool.returned_count(), 1);
    assert_eq!(pool.retained(), 1);
}

#[test]
fn dropping_without_dispose_returns_the_buffer() {
    let pool = Arc::new(SharedArrayPool::new(4));
    {
        let _eic = pooled_eic(&pool);
        assert_eq!(pool.outstanding(), 1);
    }
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn unwinding_returns_the_buffer() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let result = catch_unwind(AssertUnwindSafe(|| {
        let eic = pooled_eic(&pool);
        assert_eq!(eic.len().unwrap(), 5);
        panic!("consumer failed");
    }));
    assert!(result.is_err());
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn smoothing_keeps_extracted_mz() {
    let pool = Arc::new(SharedArrayPool::new(4));
    let eic = pooled_eic(&pool);
    let smoothed = eic
        .chromatogram_smoothing(SmoothingMethod::SimpleMovingAverage, 1)
        .unwrap();
    assert_eq!(smoothed.extracted_mz(), MZ);
    assert!(smoothed.chromatogram().unwrap().is_pooled());
    assert_eq!(pool.outstanding(), 2);
}

#[test]
fn rented_length_beyond_capacity_is_rejected() {
    let pool = Arc::new(SharedArrayPool::<ValuePeak>::new(4));
    let dyn_pool: Arc<dyn ArrayPool<ValuePeak>> = pool.clone();
    let buffer = dyn_pool.rent(4);
    let capacity = buffer.len();
    let err = ExtractedIonChromatogram::from_rented(buffer, capacity + 1, dyn_pool, axis(), MZ)
        .unwrap_err();
    assert_eq!(
        err,
        ChromatogramError::LengthExceedsCapacity {
            length: capacity + 1,
            capacity
        }
    );
    assert_eq!(pool.outstanding(), 0);
}

#[test]
fn rented_buffer_exposes_only_its_logical_length() {
    let pool = Arc::new(SharedArrayPool::<ValuePeak>::new(4));
    let dyn_pool: Arc<dyn ArrayPool<ValuePeak>> = pool.clone();
    let mut buffer = dyn_pool.rent(8);
    for (i, slot) in buffer.iter_mut().enumerate() {
        *slot = ValuePeak::new(i, i as f64, MZ, 1.0);
    }
    let eic = ExtractedIonChromatogram::from_rented(buffer, 3, dyn_pool, axis(), MZ).unwrap();
    assert_eq!(eic.len().unwrap(), 3);
    assert!(eic.as_peak_in_range(3.0, 7.0).unwrap().is_none());
}

#[test]
fn owned_trace_needs_no_pool() {
    let mut eic = ExtractedIonChromatogram::new(samples(&[(0.0, 1.0), (1.0, 2.0)]), axis(), MZ);
    assert!(!eic.chromatogram().unwrap().is_pooled());
    eic.dispose();
    assert_eq!(eic.chromatogram().unwrap_err(), released());
}
