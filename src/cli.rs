mod analytics;
mod bills;
mod compute;
mod detail;
mod session;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        analytics::AnalyticsArgs,
        bills::BillsArgs,
        compute::ComputeArgs,
        detail::DetailArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub async fn run(self) -> Result {
        match self.command {
            Command::Bills(args) => args.run().await,
            Command::Detail(args) => args.run().await,
            Command::Compute(args) => args.run().await,
            Command::Analytics(args) => args.run().await,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the units and their bills for a month.
    Bills(Box<BillsArgs>),

    /// Show the calculation detail of a single unit.
    Detail(Box<DetailArgs>),

    /// Compute and submit a unit's bill.
    Compute(Box<ComputeArgs>),

    /// Aggregate the billing and rate history.
    Analytics(Box<AnalyticsArgs>),
}
