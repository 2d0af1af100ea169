use itertools::Itertools;
use serde::Serialize;

use crate::{
    api::models::MonthlyBillPoint,
    prelude::*,
    quantity::cost::Cost,
    statistics::{
        change::{Stability, series_change},
        extrema::{first_max_by_key, first_min_by_key},
    },
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BillStatistics {
    pub total: Cost,
    pub average: Cost,
    pub highest: Cost,
    pub highest_month: String,
    pub lowest: Cost,
    pub lowest_month: String,

    /// Last month against the first one, `None` when undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_percent: Option<f64>,
}

impl BillStatistics {
    pub fn stability(&self) -> Stability {
        Stability::of(self.growth_percent)
    }
}

/// Summarize the monthly bill totals, oldest first.
///
/// `None` for an empty series, or one containing non-finite totals.
#[must_use]
pub fn compute_bill_statistics(series: &[MonthlyBillPoint]) -> Option<BillStatistics> {
    if let Some(point) = series.iter().find(|point| !point.total_bill.is_finite()) {
        warn!(month = %point.month, "non-finite bill total, discarding the series");
        return None;
    }
    let highest = first_max_by_key(series, |point| point.total_bill)?;
    let lowest = first_min_by_key(series, |point| point.total_bill)?;
    let total = series.iter().map(|point| point.total_bill).sum::<Cost>();

    #[allow(clippy::cast_precision_loss)]
    let average = total / series.len() as f64;

    Some(BillStatistics {
        total,
        average,
        highest: highest.total_bill,
        highest_month: highest.month.clone(),
        lowest: lowest.total_bill,
        lowest_month: lowest.month.clone(),
        growth_percent: series_change(&series.iter().map(|point| point.total_bill.0).collect_vec()),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn series(totals: &[f64]) -> Vec<MonthlyBillPoint> {
        totals
            .iter()
            .enumerate()
            .map(|(i, total)| MonthlyBillPoint {
                month: format!("2024-{:02}", i + 1),
                total_bill: Cost(*total),
            })
            .collect()
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(compute_bill_statistics(&[]), None);
    }

    #[test]
    fn test_flat_series_is_stable() {
        let statistics = compute_bill_statistics(&series(&[100.0, 100.0, 100.0])).unwrap();
        assert_eq!(statistics.growth_percent, Some(0.0));
        assert_eq!(statistics.stability(), Stability::Stable);
        assert_eq!(statistics.total, Cost(300.0));
        assert_eq!(statistics.average, Cost(100.0));
    }

    #[test]
    fn test_halving_is_volatile() {
        let statistics = compute_bill_statistics(&series(&[100.0, 50.0])).unwrap();
        assert_abs_diff_eq!(statistics.growth_percent.unwrap(), -50.0);
        assert_eq!(statistics.stability(), Stability::Volatile);
    }

    #[test]
    fn test_zero_baseline() {
        let statistics = compute_bill_statistics(&series(&[0.0, 50.0])).unwrap();
        assert_eq!(statistics.growth_percent, None);
        assert_eq!(statistics.stability(), Stability::Volatile);
        assert_eq!(statistics.lowest, Cost(0.0));
    }

    #[test]
    fn test_single_point() {
        let statistics = compute_bill_statistics(&series(&[0.0])).unwrap();
        assert_eq!(statistics.growth_percent, Some(0.0));
        assert_eq!(statistics.highest_month, "2024-01");
        assert_eq!(statistics.lowest_month, "2024-01");
    }

    #[test]
    fn test_extrema_ties() {
        let statistics =
            compute_bill_statistics(&series(&[120.0, 300.0, 80.0, 300.0, 80.0])).unwrap();
        assert_eq!(statistics.highest, Cost(300.0));
        assert_eq!(statistics.highest_month, "2024-02");
        assert_eq!(statistics.lowest, Cost(80.0));
        assert_eq!(statistics.lowest_month, "2024-03");
        assert_abs_diff_eq!(statistics.average.0, 176.0);
        assert_abs_diff_eq!(statistics.growth_percent.unwrap(), -100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(compute_bill_statistics(&series(&[100.0, f64::NAN])), None);
        assert_eq!(compute_bill_statistics(&series(&[f64::INFINITY])), None);
    }
}
