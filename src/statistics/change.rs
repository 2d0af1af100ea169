use crate::prelude::*;

/// Change of the last value relative to the first one, in percent.
///
/// Against a zero baseline the change is undefined (`None`), unless the value
/// has not moved at all.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent_change(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return (last == 0.0).then_some(0.0);
    }
    let change = (last - first) / first * 100.0;
    if change.is_finite() {
        Some(change)
    } else {
        debug!(first, last, "non-finite change");
        None
    }
}

/// Same as [`percent_change`], but a single point has not changed by definition.
#[must_use]
pub fn series_change(values: &[f64]) -> Option<f64> {
    match values {
        [] | [_] => Some(0.0),
        [first, .., last] => percent_change(*first, *last),
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, derive_more::Display)]
pub enum Stability {
    Stable,
    Volatile,
}

impl Stability {
    /// Absolute growth, in percent, below which the bills are considered stable.
    pub const THRESHOLD: f64 = 10.0;

    /// An undefined growth is anything but stable.
    pub fn of(growth_percent: Option<f64>) -> Self {
        match growth_percent {
            Some(growth_percent) if growth_percent.abs() < Self::THRESHOLD => Self::Stable,
            _ => Self::Volatile,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Trend {
    Up,
    Down,
    Flat,

    /// Moved away from a zero baseline.
    Undefined,
}

impl Trend {
    pub fn of(change_percent: Option<f64>) -> Self {
        match change_percent {
            Some(change) if change > 0.0 => Self::Up,
            Some(change) if change < 0.0 => Self::Down,
            Some(_) => Self::Flat,
            None => Self::Undefined,
        }
    }
}
