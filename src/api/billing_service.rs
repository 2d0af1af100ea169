use async_trait::async_trait;

use crate::{
    api::models::{
        CalculationReport,
        ComputationInput,
        ComputationResult,
        Id,
        MonthlyBillPoint,
        MonthlyBills,
        RatePoint,
    },
    core::month::Month,
    prelude::*,
};

/// Billing backend the dashboard talks to.
///
/// Implementations own the transport: the engine only ever sees these shapes.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Unit records and the building receipt for the month.
    async fn fetch_monthly_bills(&self, month: Month) -> Result<MonthlyBills>;

    async fn fetch_calculation_detail(
        &self,
        unit_id: &Id,
        month: Month,
    ) -> Result<CalculationReport>;

    /// Submit the readings and rate of a unit.
    ///
    /// A rejection by the service is `Ok(ComputationResult::Failure(…))`,
    /// whereas `Err(…)` means the call itself has failed.
    async fn submit_computation(&self, input: &ComputationInput) -> Result<ComputationResult>;

    /// Monthly building totals, oldest first.
    async fn fetch_bill_history(&self) -> Result<Vec<MonthlyBillPoint>>;

    /// Monthly rates, oldest first.
    async fn fetch_rate_history(&self) -> Result<Vec<RatePoint>>;
}
