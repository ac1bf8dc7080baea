use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    None,
    Second,
    Minute,
}

impl TimeUnit {
    /// Converts `value` expressed in `self` into `target`. `None` carries no
    /// scale, so it converts as the identity in both directions.
    pub fn convert(self, value: f64, target: TimeUnit) -> f64 {
        match (self, target) {
            (TimeUnit::Second, TimeUnit::Minute) => value / 60.0,
            (TimeUnit::Minute, TimeUnit::Second) => value * 60.0,
            _ => value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriftUnit {
    #[default]
    None,
    Milliseconds,
    OneOverK0,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MzUnit {
    #[default]
    None,
}

/// A single chromatographic coordinate. Equality compares the axis, the
/// numeric value and the unit, so a retention time never equals a drift time
/// even when the numbers coincide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AxisValue {
    RetentionTime(f64, TimeUnit),
    RetentionIndex(f64, TimeUnit),
    DriftTime(f64, DriftUnit),
    Mz(f64, MzUnit),
}

impl AxisValue {
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            AxisValue::RetentionTime(v, _)
            | AxisValue::RetentionIndex(v, _)
            | AxisValue::DriftTime(v, _)
            | AxisValue::Mz(v, _) => v,
        }
    }

    #[inline]
    pub fn kind(&self) -> AxisKind {
        match *self {
            AxisValue::RetentionTime(_, u) => AxisKind::RetentionTime(u),
            AxisValue::RetentionIndex(_, u) => AxisKind::RetentionIndex(u),
            AxisValue::DriftTime(_, u) => AxisKind::DriftTime(u),
            AxisValue::Mz(_, u) => AxisKind::Mz(u),
        }
    }

    /// Value in minutes for retention times carrying a time unit.
    pub fn to_minutes(&self) -> Option<f64> {
        match *self {
            AxisValue::RetentionTime(v, u @ (TimeUnit::Second | TimeUnit::Minute)) => {
                Some(u.convert(v, TimeUnit::Minute))
            }
            _ => None,
        }
    }
}

/// The axis a chromatogram runs along, together with its unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    RetentionTime(TimeUnit),
    RetentionIndex(TimeUnit),
    DriftTime(DriftUnit),
    Mz(MzUnit),
}

impl Default for AxisKind {
    fn default() -> Self {
        AxisKind::RetentionTime(TimeUnit::Minute)
    }
}

impl AxisKind {
    #[inline]
    pub fn value(self, v: f64) -> AxisValue {
        match self {
            AxisKind::RetentionTime(u) => AxisValue::RetentionTime(v, u),
            AxisKind::RetentionIndex(u) => AxisValue::RetentionIndex(v, u),
            AxisKind::DriftTime(u) => AxisValue::DriftTime(v, u),
            AxisKind::Mz(u) => AxisValue::Mz(v, u),
        }
    }
}

/// Axis-tagged position of a chromatographic point: the main coordinate on the
/// governing axis plus its m/z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChromXs {
    pub value: AxisValue,
    pub mz: AxisValue,
}

impl ChromXs {
    pub fn new(value: AxisValue, mz: f64) -> Self {
        Self {
            value,
            mz: AxisValue::Mz(mz, MzUnit::None),
        }
    }

    #[inline]
    pub fn main(&self) -> AxisValue {
        self.value
    }

    #[inline]
    pub fn mz(&self) -> f64 {
        self.mz.value()
    }
}
