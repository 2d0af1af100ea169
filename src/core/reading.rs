use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::energy::KilowattHours};

/// Submeter readings at the start and at the end of a billing period.
///
/// The current reading may be below the previous one: the resulting negative
/// consumption is representable and passed along as is.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    pub previous: KilowattHours,
    pub current: KilowattHours,
}

impl MeterReading {
    pub const fn new(previous: KilowattHours, current: KilowattHours) -> Self {
        Self { previous, current }
    }

    /// Both readings are finite and non-negative.
    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.previous, self.current]
            .into_iter()
            .all(|reading| reading.is_finite() && reading >= KilowattHours::ZERO)
    }

    /// Validate operator input: both readings must be finite and non-negative.
    pub fn try_new(previous: KilowattHours, current: KilowattHours) -> Result<Self> {
        for (name, reading) in [("previous", previous), ("current", current)] {
            ensure!(reading.is_finite(), "{name} reading must be finite, got {reading}");
            ensure!(reading >= KilowattHours::ZERO, "{name} reading must not be negative");
        }
        Ok(Self::new(previous, current))
    }

    pub fn consumption(self) -> KilowattHours {
        self.current - self.previous
    }

    /// A bill can only be computed for a positive current reading.
    #[must_use]
    pub fn is_computable(self) -> bool {
        self.current > KilowattHours::ZERO
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_consumption() {
        let reading = MeterReading::new(KilowattHours(100.0), KilowattHours(150.0));
        assert_abs_diff_eq!(reading.consumption().0, 50.0);
        assert!(reading.is_computable());
    }

    #[test]
    fn test_negative_consumption_is_kept() {
        let reading = MeterReading::new(KilowattHours(150.0), KilowattHours(100.0));
        assert_abs_diff_eq!(reading.consumption().0, -50.0);
        assert!(reading.is_computable());
    }

    #[test]
    fn test_non_positive_current_is_not_computable() {
        for previous in [0.0, 10.0, 1e6] {
            for current in [0.0, -0.0, -0.5, -100.0] {
                let reading = MeterReading::new(KilowattHours(previous), KilowattHours(current));
                assert!(!reading.is_computable(), "{previous} → {current}");
            }
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(MeterReading::new(KilowattHours(0.0), KilowattHours(0.0)).is_valid());
        assert!(!MeterReading::new(KilowattHours(10.0), KilowattHours(-0.5)).is_valid());
        assert!(!MeterReading::new(KilowattHours(f64::NAN), KilowattHours(1.0)).is_valid());
    }

    #[test]
    fn test_try_new() {
        assert!(MeterReading::try_new(KilowattHours(0.0), KilowattHours(1.0)).is_ok());
        assert!(MeterReading::try_new(KilowattHours(-1.0), KilowattHours(1.0)).is_err());
        assert!(MeterReading::try_new(KilowattHours(0.0), KilowattHours(f64::NAN)).is_err());
        assert!(MeterReading::try_new(KilowattHours(f64::INFINITY), KilowattHours(1.0)).is_err());
    }
}
