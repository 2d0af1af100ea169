//! Compute lifecycle of a single unit: submission, settle, and the expiring notice.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──accepted──▶ Succeeded ──3 s──▶ Idle
//!                             └─rejected──▶ Failed ────5 s──▶ Idle
//! ```
//!
//! The notice itself is hidden 300 ms after the settle. Any edit dismisses it immediately.

use std::{sync::Arc, time::Duration};

use bon::Builder;
use enumset::EnumSet;
use tokio::{sync::watch, task::JoinSet, time::sleep};
use tracing::Instrument;

use crate::{
    api::{
        BillingService,
        models::{ComputationInput, ComputationResult, Id},
    },
    core::{calculation::Calculation, month::Month, reading::MeterReading, role::Capability},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

pub const SUCCESS_MESSAGE: &str = "Bill computed successfully";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ComputeState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub text: String,

    /// Turns `false` shortly after the settle, so that it can fade out before being cleared.
    pub is_visible: bool,
}

#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub state: ComputeState,
    pub notice: Option<Notice>,

    /// Submission attempt which the state belongs to.
    attempt: u64,
}

impl Status {
    /// Text to display right now.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.notice.as_ref().filter(|notice| notice.is_visible).map(|notice| notice.text.as_str())
    }

    fn start(&mut self, attempt: u64) {
        self.state = ComputeState::Submitting;
        self.notice = None;
        self.attempt = attempt;
    }

    fn settle(&mut self, attempt: u64, result: ComputationResult) -> bool {
        if self.attempt != attempt || self.state != ComputeState::Submitting {
            return false;
        }
        let (state, text) = match result {
            ComputationResult::Success => (ComputeState::Succeeded, SUCCESS_MESSAGE.to_owned()),
            ComputationResult::Failure(reason) => (ComputeState::Failed, reason),
        };
        self.state = state;
        self.notice = Some(Notice { text, is_visible: true });
        true
    }

    fn hide(&mut self, attempt: u64) -> bool {
        if self.attempt == attempt
            && let Some(notice) = &mut self.notice
            && notice.is_visible
        {
            notice.is_visible = false;
            true
        } else {
            false
        }
    }

    fn expire(&mut self, attempt: u64) -> bool {
        self.attempt == attempt && self.dismiss()
    }

    fn dismiss(&mut self) -> bool {
        if matches!(self.state, ComputeState::Succeeded | ComputeState::Failed) {
            self.state = ComputeState::Idle;
            self.notice = None;
            true
        } else {
            false
        }
    }
}

/// How long the settle notices stay up.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct NoticeTiming {
    #[builder(default = Duration::from_millis(3000))]
    pub success: Duration,

    #[builder(default = Duration::from_millis(5000))]
    pub failure: Duration,

    /// Exit transition: the notice gets hidden this long after the settle,
    /// the state stays until the window closes.
    #[builder(default = Duration::from_millis(300))]
    pub fade: Duration,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl NoticeTiming {
    const fn window(&self, state: ComputeState) -> Duration {
        match state {
            ComputeState::Failed => self.failure,
            _ => self.success,
        }
    }
}

/// Why an action has not been taken.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum Blocked {
    #[display("read-only access")]
    ReadOnly,

    #[display("the current reading must be positive")]
    NotComputable,

    #[display("a submission is already in flight")]
    InFlight,

    #[display("readings and the rate must be finite and non-negative")]
    Invalid,
}

/// Bill calculator of one unit for one month.
///
/// Dropping the calculator cancels its in-flight submission and notice timers,
/// so a late result never lands on a disposed calculator.
#[must_use]
#[derive(Builder)]
pub struct UnitCalculator {
    #[builder(into)]
    unit_id: Id,

    month: Month,

    #[builder(default)]
    reading: MeterReading,

    #[builder(default)]
    rate: KilowattHourRate,

    /// Empty by default, which makes the calculator read-only.
    #[builder(default)]
    capabilities: EnumSet<Capability>,

    service: Arc<dyn BillingService>,

    #[builder(default)]
    timing: NoticeTiming,

    #[builder(skip = Arc::new(watch::channel(Status::default()).0))]
    status: Arc<watch::Sender<Status>>,

    #[builder(skip)]
    tasks: JoinSet<()>,

    #[builder(skip)]
    n_attempts: u64,
}

impl UnitCalculator {
    pub const fn unit_id(&self) -> &Id {
        &self.unit_id
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn reading(&self) -> MeterReading {
        self.reading
    }

    pub const fn rate(&self) -> KilowattHourRate {
        self.rate
    }

    pub const fn calculation(&self) -> Calculation {
        Calculation::new(self.reading, self.rate)
    }

    pub fn consumption(&self) -> KilowattHours {
        self.calculation().consumption()
    }

    pub fn amount(&self) -> Cost {
        self.calculation().amount()
    }

    #[must_use]
    pub fn is_computable(&self) -> bool {
        self.calculation().is_computable()
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        !self.capabilities.is_superset(Capability::Edit | Capability::Submit)
    }

    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    /// Wait until no submission is in flight.
    pub async fn settled(&self) -> Result<Status> {
        let mut receiver = self.subscribe();
        let status =
            receiver.wait_for(|status| status.state != ComputeState::Submitting).await?.clone();
        Ok(status)
    }

    pub fn set_reading(&mut self, reading: MeterReading) -> Result<(), Blocked> {
        self.ensure_capable(Capability::Edit)?;
        if !reading.is_valid() {
            return Err(Blocked::Invalid);
        }
        self.reading = reading;
        self.dismiss_notice();
        Ok(())
    }

    pub fn set_rate(&mut self, rate: KilowattHourRate) -> Result<(), Blocked> {
        self.ensure_capable(Capability::Edit)?;
        if !rate.is_finite() || rate < KilowattHourRate::ZERO {
            return Err(Blocked::Invalid);
        }
        self.rate = rate;
        self.dismiss_notice();
        Ok(())
    }

    /// Submit the current readings and rate.
    ///
    /// The call returns immediately, the outcome is published through [`Self::subscribe`].
    ///
    /// # Panics
    ///
    /// Outside of a Tokio runtime.
    #[instrument(skip_all, fields(unit_id = %self.unit_id, month = %self.month))]
    pub fn submit(&mut self) -> Result<(), Blocked> {
        self.ensure_capable(Capability::Submit)?;
        if !self.is_computable() {
            return Err(Blocked::NotComputable);
        }
        if self.status.borrow().state == ComputeState::Submitting {
            return Err(Blocked::InFlight);
        }

        // Reap the finished timers of the previous attempts.
        while self.tasks.try_join_next().is_some() {}

        self.n_attempts += 1;
        let attempt = self.n_attempts;
        self.status.send_modify(|status| status.start(attempt));

        let input = ComputationInput {
            unit_id: self.unit_id.clone(),
            month: self.month,
            reading: self.reading,
            rate: self.rate,
        };
        if input.reading.consumption() < KilowattHours::ZERO {
            warn!(reading = ?input.reading, "submitting a negative consumption");
        }
        debug!(attempt, "submitting…");
        self.tasks.spawn(
            settle(attempt, input, Arc::clone(&self.service), Arc::clone(&self.status), self.timing)
                .instrument(tracing::Span::current()),
        );
        Ok(())
    }

    fn ensure_capable(&self, capability: Capability) -> Result<(), Blocked> {
        if self.capabilities.contains(capability) { Ok(()) } else { Err(Blocked::ReadOnly) }
    }

    fn dismiss_notice(&self) {
        if self.status.send_if_modified(Status::dismiss) {
            debug!(unit_id = %self.unit_id, "notice dismissed by an edit");
        }
    }
}

/// Await the submission, publish the outcome, and expire the notice.
async fn settle(
    attempt: u64,
    input: ComputationInput,
    service: Arc<dyn BillingService>,
    status: Arc<watch::Sender<Status>>,
    timing: NoticeTiming,
) {
    let result = match service.submit_computation(&input).await {
        Ok(result) => result,
        Err(error) => {
            warn!("failed to submit the computation: {error:#}");
            ComputationResult::from_fault(&error)
        }
    };
    match &result {
        ComputationResult::Success => {
            let amount = input.reading.consumption() * input.rate;
            info!(?amount, "accepted");
        }
        ComputationResult::Failure(reason) => warn!(%reason, "rejected"),
    }

    let mut state = ComputeState::Idle;
    let is_settled = status.send_if_modified(|status| {
        let is_settled = status.settle(attempt, result);
        state = status.state;
        is_settled
    });
    if !is_settled {
        return;
    }

    let window = timing.window(state);
    sleep(timing.fade.min(window)).await;
    status.send_if_modified(|status| status.hide(attempt));
    sleep(window.saturating_sub(timing.fade)).await;
    if status.send_if_modified(|status| status.expire(attempt)) {
        debug!(attempt, "notice expired");
    }
}
