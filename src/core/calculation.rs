use crate::{
    core::reading::MeterReading,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Figures derived from a unit's readings and rate.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    pub reading: MeterReading,
    pub rate: KilowattHourRate,
}

impl Calculation {
    pub const fn new(reading: MeterReading, rate: KilowattHourRate) -> Self {
        Self { reading, rate }
    }

    pub fn consumption(&self) -> KilowattHours {
        self.reading.consumption()
    }

    /// Unclamped: a negative consumption yields a negative amount.
    pub fn amount(&self) -> Cost {
        self.consumption() * self.rate
    }

    #[must_use]
    pub fn is_computable(&self) -> bool {
        self.reading.is_computable()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_scenario() {
        let calculation = Calculation::new(
            MeterReading::new(KilowattHours(100.0), KilowattHours(150.0)),
            KilowattHourRate(12.5),
        );
        assert_abs_diff_eq!(calculation.consumption().0, 50.0);
        assert_eq!(calculation.amount(), Cost(625.0));
        assert_eq!(calculation.amount().to_string(), "625.00");
        assert!(calculation.is_computable());
    }

    #[test]
    fn test_amount_is_exact_product() {
        for (previous, current, rate) in
            [(0.0, 1.0, 0.0), (12.25, 99.75, 9.99), (1000.0, 1234.5, 17.3), (0.0, 0.5, 1e3)]
        {
            let calculation = Calculation::new(
                MeterReading::new(KilowattHours(previous), KilowattHours(current)),
                KilowattHourRate(rate),
            );
            assert_eq!(calculation.amount(), Cost((current - previous) * rate));
            assert!(calculation.is_computable());
        }
    }

    #[test]
    fn test_negative_amount() {
        let calculation = Calculation::new(
            MeterReading::new(KilowattHours(150.0), KilowattHours(100.0)),
            KilowattHourRate(10.0),
        );
        assert_abs_diff_eq!(calculation.amount().0, -500.0);
    }
}
