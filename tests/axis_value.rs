use chromcore::{AxisKind, AxisValue, ChromXs, DriftUnit, MzUnit, TimeUnit};

#[test]
fn equality_compares_axis_value_and_unit() {
    let rt = AxisValue::RetentionTime(10.0, TimeUnit::Minute);
    assert_eq!(rt, AxisValue::RetentionTime(10.0, TimeUnit::Minute));
    assert_ne!(rt, AxisValue::RetentionTime(10.0, TimeUnit::Second));
    assert_ne!(rt, AxisValue::RetentionTime(10.5, TimeUnit::Minute));
    assert_ne!(rt, AxisValue::RetentionIndex(10.0, TimeUnit::Minute));
    assert_ne!(rt, AxisValue::DriftTime(10.0, DriftUnit::Milliseconds));
    assert_ne!(rt, AxisValue::Mz(10.0, MzUnit::None));
}

#[test]
fn serialization_round_trip_is_exact() {
    let values = [
        AxisValue::RetentionTime(0.1 + 0.2, TimeUnit::Minute),
        AxisValue::RetentionIndex(1234.5678901234, TimeUnit::None),
        AxisValue::DriftTime(std::f64::consts::PI, DriftUnit::OneOverK0),
        AxisValue::Mz(445.120_025_6, MzUnit::None),
    ];
    for v in values {
        let json = serde_json::to_string(&v).unwrap();
        let back: AxisValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.value().to_bits(), v.value().to_bits());
        assert_eq!(back.kind(), v.kind());
    }
}

#[test]
fn chrom_xs_round_trip() {
    let xs = ChromXs::new(AxisValue::DriftTime(1.02, DriftUnit::OneOverK0), 512.3);
    let json = serde_json::to_string(&xs).unwrap();
    let back: ChromXs = serde_json::from_str(&json).unwrap();
    assert_eq!(back, xs);
    assert_eq!(back.mz(), 512.3);
}

#[test]
fn axis_kind_tags_values() {
    let kind = AxisKind::DriftTime(DriftUnit::Milliseconds);
    assert_eq!(kind.value(3.0), AxisValue::DriftTime(3.0, DriftUnit::Milliseconds));
    assert_eq!(kind.value(3.0).kind(), kind);
}

#[test]
fn time_unit_conversion() {
    assert_eq!(AxisValue::RetentionTime(90.0, TimeUnit::Second).to_minutes(), Some(1.5));
    assert_eq!(AxisValue::RetentionTime(1.5, TimeUnit::Minute).to_minutes(), Some(1.5));
    assert_eq!(AxisValue::RetentionTime(1.5, TimeUnit::None).to_minutes(), None);
    assert_eq!(AxisValue::DriftTime(1.5, DriftUnit::None).to_minutes(), None);
    assert_eq!(TimeUnit::Minute.convert(2.0, TimeUnit::Second), 120.0);
}
