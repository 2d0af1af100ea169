use itertools::Itertools;
use serde::Serialize;

use crate::{
    api::models::RatePoint,
    prelude::*,
    quantity::rate::KilowattHourRate,
    statistics::{
        change::series_change,
        extrema::{first_max_by_key, first_min_by_key},
    },
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateStatistics {
    pub total: KilowattHourRate,
    pub average: KilowattHourRate,

    /// The latest rate.
    pub current: KilowattHourRate,

    /// Latest rate against the first one (not month-over-month), `None` when undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,

    pub highest: KilowattHourRate,
    pub highest_month: String,
    pub lowest: KilowattHourRate,
    pub lowest_month: String,
}

/// Summarize the monthly rates, oldest first.
///
/// `None` for an empty series, or one containing non-finite rates.
#[must_use]
pub fn compute_rate_statistics(series: &[RatePoint]) -> Option<RateStatistics> {
    if let Some(point) = series.iter().find(|point| !point.rate.is_finite()) {
        warn!(month = %point.month, "non-finite rate, discarding the series");
        return None;
    }
    let current = series.last()?.rate;
    let highest = first_max_by_key(series, |point| point.rate)?;
    let lowest = first_min_by_key(series, |point| point.rate)?;
    let total = series.iter().map(|point| point.rate).sum::<KilowattHourRate>();

    #[allow(clippy::cast_precision_loss)]
    let average = total / series.len() as f64;

    Some(RateStatistics {
        total,
        average,
        current,
        change_percent: series_change(&series.iter().map(|point| point.rate.0).collect_vec()),
        highest: highest.rate,
        highest_month: highest.month.clone(),
        lowest: lowest.rate,
        lowest_month: lowest.month.clone(),
    })
}
