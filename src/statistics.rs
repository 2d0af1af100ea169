//! Multi-month analytics over the bill and rate histories.

mod bills;
mod change;
mod extrema;
mod insights;
mod month;
mod rates;

pub use self::{
    bills::{BillStatistics, compute_bill_statistics},
    change::Stability,
    insights::generate_insights,
    month::MonthSummary,
    rates::{RateStatistics, compute_rate_statistics},
};
