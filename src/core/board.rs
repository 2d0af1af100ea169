use std::sync::Arc;

use enumset::EnumSet;

use crate::{
    api::{
        BillingService,
        models::{BillReceipt, Id, UnitRecord},
    },
    core::{lifecycle::UnitCalculator, month::Month, role::Capability},
    prelude::*,
    statistics::MonthSummary,
};

/// Unit record together with its calculator.
pub struct UnitCard {
    pub record: UnitRecord,
    pub calculator: UnitCalculator,
}

/// Everything shown for the selected month.
pub struct Selection {
    pub month: Month,
    pub receipt: BillReceipt,
    pub cards: Vec<UnitCard>,
}

/// Monthly billing board: one calculator per unit of the selected month.
pub struct Board {
    service: Arc<dyn BillingService>,
    capabilities: EnumSet<Capability>,
    selection: Option<Selection>,
}

impl Board {
    pub fn new(service: Arc<dyn BillingService>, capabilities: EnumSet<Capability>) -> Self {
        Self { service, capabilities, selection: None }
    }

    /// Fetch the month and replace the calculators.
    ///
    /// The previous calculators are dropped, together with whatever they had in flight.
    #[instrument(skip_all, fields(month = %month))]
    pub async fn select_month(&mut self, month: Month) -> Result<&Selection> {
        let bills = self.service.fetch_monthly_bills(month).await?;
        let default_rate = bills.receipt.rate;
        let cards = bills
            .records
            .into_iter()
            .map(|record| {
                let calculator = UnitCalculator::builder()
                    .unit_id(record.unit_id.clone())
                    .month(month)
                    .reading(record.reading())
                    .rate(record.rate_or(default_rate))
                    .capabilities(self.capabilities)
                    .service(Arc::clone(&self.service))
                    .build();
                UnitCard { record, calculator }
            })
            .collect::<Vec<_>>();
        info!(n_units = cards.len(), "selected");
        Ok(&*self.selection.insert(Selection { month, receipt: bills.receipt, cards }))
    }

    pub fn calculator_mut(&mut self, unit_id: &Id) -> Option<&mut UnitCalculator> {
        self.selection
            .as_mut()?
            .cards
            .iter_mut()
            .find(|card| card.record.unit_id == *unit_id)
            .map(|card| &mut card.calculator)
    }
}

impl Selection {
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::new(self.cards.iter().map(|card| &card.record), self.receipt.rate)
    }
}
