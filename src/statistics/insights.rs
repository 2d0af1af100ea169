use std::fmt::{Display, Formatter};

use crate::{
    quantity::cost::Cost,
    statistics::{
        bills::BillStatistics,
        change::Trend,
        rates::RateStatistics,
    },
};

/// Qualitative statement over the already computed statistics.
#[derive(Clone, Debug, PartialEq)]
pub enum Insight {
    BillTrend { change_percent: Option<f64> },
    RateTrend { change_percent: Option<f64> },
    PeakBilling { month: String, amount: Cost },
}

/// Only produced when both statistics are present.
#[must_use]
pub fn generate_insights(
    bills: Option<&BillStatistics>,
    rates: Option<&RateStatistics>,
) -> Vec<Insight> {
    let (Some(bills), Some(rates)) = (bills, rates) else {
        return Vec::new();
    };
    vec![
        Insight::BillTrend { change_percent: bills.growth_percent },
        Insight::RateTrend { change_percent: rates.change_percent },
        Insight::PeakBilling { month: bills.highest_month.clone(), amount: bills.highest },
    ]
}

impl Display for Insight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BillTrend { change_percent } => write_trend(f, "Total bills", *change_percent),
            Self::RateTrend { change_percent } => write_trend(f, "The rate", *change_percent),
            Self::PeakBilling { month, amount } => {
                write!(f, "Billing peaked in {month} at {amount}")
            }
        }
    }
}

fn write_trend(f: &mut Formatter<'_>, subject: &str, change_percent: Option<f64>) -> std::fmt::Result {
    match (Trend::of(change_percent), change_percent) {
        (Trend::Up, Some(change)) => write!(f, "{subject} increased by {change:.1}% over the period"),
        (Trend::Down, Some(change)) => {
            write!(f, "{subject} decreased by {:.1}% over the period", change.abs())
        }
        (Trend::Flat, _) => write!(f, "{subject} did not change over the period"),
        _ => write!(f, "{subject} moved away from zero, the change is not available"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::models::{MonthlyBillPoint, RatePoint},
        quantity::rate::KilowattHourRate,
        statistics::{compute_bill_statistics, compute_rate_statistics},
    };

    fn bills(totals: &[(&str, f64)]) -> Option<BillStatistics> {
        compute_bill_statistics(
            &totals
                .iter()
                .map(|(month, total)| MonthlyBillPoint {
                    month: (*month).to_owned(),
                    total_bill: Cost(*total),
                })
                .collect::<Vec<_>>(),
        )
    }

    fn rates(rates: &[(&str, f64)]) -> Option<RateStatistics> {
        compute_rate_statistics(
            &rates
                .iter()
                .map(|(month, rate)| RatePoint {
                    month: (*month).to_owned(),
                    rate: KilowattHourRate(*rate),
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_requires_both() {
        let bills = bills(&[("Jan", 100.0)]);
        assert!(generate_insights(bills.as_ref(), None).is_empty());
        assert!(generate_insights(None, rates(&[("Jan", 10.0)]).as_ref()).is_empty());
    }

    #[test]
    fn test_insights() {
        let bills = bills(&[("Jan", 1000.0), ("Feb", 1500.0), ("Mar", 1250.0)]);
        let rates = rates(&[("Jan", 12.0), ("Feb", 11.0), ("Mar", 9.0)]);
        let insights = generate_insights(bills.as_ref(), rates.as_ref())
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            insights,
            [
                "Total bills increased by 25.0% over the period",
                "The rate decreased by 25.0% over the period",
                "Billing peaked in Feb at 1500.00",
            ],
        );
    }

    #[test]
    fn test_flat_and_undefined() {
        let bills = bills(&[("Jan", 0.0), ("Feb", 100.0)]);
        let rates = rates(&[("Jan", 10.0), ("Feb", 10.0)]);
        let insights = generate_insights(bills.as_ref(), rates.as_ref());
        assert_eq!(
            insights[0].to_string(),
            "Total bills moved away from zero, the change is not available",
        );
        assert_eq!(insights[1].to_string(), "The rate did not change over the period");
    }
}
