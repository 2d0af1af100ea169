use clap::Parser;

use crate::{
    api::models::Id,
    cli::session::SessionArgs,
    core::{board::Board, lifecycle::ComputeState, month::Month, reading::MeterReading},
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

#[derive(Parser)]
pub struct ComputeArgs {
    #[clap(flatten)]
    session: SessionArgs,

    #[clap(long = "unit")]
    unit_id: String,

    #[clap(long)]
    month: Month,

    /// Previous meter reading in kilowatt-hours.
    #[clap(long = "previous", allow_negative_numbers = true)]
    previous_reading: KilowattHours,

    /// Current meter reading in kilowatt-hours.
    #[clap(long = "current", allow_negative_numbers = true)]
    current_reading: KilowattHours,

    /// Rate per kilowatt-hour, defaults to the unit's own or the building rate.
    #[clap(long)]
    rate: Option<KilowattHourRate>,
}

impl ComputeArgs {
    #[instrument(skip_all, fields(unit_id = %self.unit_id, month = %self.month))]
    pub async fn run(self) -> Result {
        let reading = MeterReading::try_new(self.previous_reading, self.current_reading)?;
        let unit_id = Id::from(self.unit_id);

        let mut board = Board::new(self.session.connect()?, self.session.capabilities());
        board.select_month(self.month).await?;
        let calculator = board
            .calculator_mut(&unit_id)
            .with_context(|| format!("unit `{unit_id}` is not billed in {}", self.month))?;

        calculator.set_reading(reading)?;
        if let Some(rate) = self.rate {
            calculator.set_rate(rate).with_context(|| format!("invalid rate: `{rate}`"))?;
        }
        info!(
            consumption = %calculator.consumption(),
            rate = %calculator.rate(),
            amount = %calculator.amount(),
            "submitting…",
        );
        calculator.submit()?;
        debug!(state = ?calculator.status().state, "submitted");

        let status = calculator.settled().await?;
        let text = status.message().unwrap_or_default();
        match status.state {
            ComputeState::Failed => {
                bail!("{} ({}): {text}", calculator.unit_id(), calculator.month())
            }
            _ => println!("{} ({}): {text}", calculator.unit_id(), calculator.month()),
        }
        Ok(())
    }
}
