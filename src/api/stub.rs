//! In-memory billing service for the tests.

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    api::{
        BillingService,
        models::{
            BillReceipt,
            CalculationReport,
            ComputationInput,
            ComputationResult,
            Id,
            MonthlyBillPoint,
            MonthlyBills,
            RatePoint,
            UnitRecord,
        },
    },
    core::month::Month,
    prelude::*,
};

pub enum Behaviour {
    Accept,
    Reject(String),
    Fail(String),

    /// Accept once [`StubService::release`] is notified.
    Hold,
}

pub struct StubService {
    pub behaviour: Behaviour,
    pub records: Vec<UnitRecord>,
    pub receipt: BillReceipt,
    pub release: Notify,
    pub n_calls: AtomicUsize,
    inputs: Mutex<Vec<ComputationInput>>,
}

impl StubService {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            records: Vec::new(),
            receipt: BillReceipt::default(),
            release: Notify::new(),
            n_calls: AtomicUsize::new(0),
            inputs: Mutex::default(),
        }
    }

    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::new(Behaviour::Accept))
    }

    pub fn rejecting(reason: &str) -> Arc<Self> {
        Arc::new(Self::new(Behaviour::Reject(reason.to_owned())))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self::new(Behaviour::Fail(message.to_owned())))
    }

    pub fn holding() -> Arc<Self> {
        Arc::new(Self::new(Behaviour::Hold))
    }

    pub fn inputs(&self) -> Vec<ComputationInput> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl BillingService for StubService {
    async fn fetch_monthly_bills(&self, _month: Month) -> Result<MonthlyBills> {
        Ok(MonthlyBills { records: self.records.clone(), receipt: self.receipt.clone() })
    }

    async fn fetch_calculation_detail(
        &self,
        unit_id: &Id,
        _month: Month,
    ) -> Result<CalculationReport> {
        bail!("no calculation detail for `{unit_id}`")
    }

    async fn submit_computation(&self, input: &ComputationInput) -> Result<ComputationResult> {
        self.n_calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.clone());
        match &self.behaviour {
            Behaviour::Accept => Ok(ComputationResult::Success),
            Behaviour::Reject(reason) => Ok(ComputationResult::Failure(reason.clone())),
            Behaviour::Fail(message) => Err(anyhow!("{message}")),
            Behaviour::Hold => {
                self.release.notified().await;
                Ok(ComputationResult::Success)
            }
        }
    }

    async fn fetch_bill_history(&self) -> Result<Vec<MonthlyBillPoint>> {
        Ok(Vec::new())
    }

    async fn fetch_rate_history(&self) -> Result<Vec<RatePoint>> {
        Ok(Vec::new())
    }
}
