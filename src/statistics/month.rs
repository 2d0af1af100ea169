use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    api::models::{BillStatus, UnitRecord},
    core::calculation::Calculation,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Totals over the units of the selected month, as derived from their readings.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthSummary {
    pub n_units: usize,

    /// Units which already have a bill for the month.
    pub n_billed: usize,

    pub n_by_status: BTreeMap<BillStatus, usize>,
    pub total_consumption: KilowattHours,
    pub total_amount: Cost,
}

impl MonthSummary {
    pub fn new<'a>(
        records: impl IntoIterator<Item = &'a UnitRecord>,
        default_rate: Option<KilowattHourRate>,
    ) -> Self {
        let records = records.into_iter().collect_vec();
        let billed = records
            .iter()
            .filter_map(|record| {
                let bill = record.bill.as_ref()?;
                Some((bill.status, Calculation::new(bill.reading(), record.rate_or(default_rate))))
            })
            .collect_vec();
        Self {
            n_units: records.len(),
            n_billed: billed.len(),
            n_by_status: billed.iter().map(|(status, _)| *status).counts().into_iter().collect(),
            total_consumption: billed.iter().map(|(_, calculation)| calculation.consumption()).sum(),
            total_amount: billed.iter().map(|(_, calculation)| calculation.amount()).sum(),
        }
    }
}
