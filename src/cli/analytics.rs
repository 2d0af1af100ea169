use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Serialize;
use tokio::try_join;

use crate::{
    cli::session::SessionArgs,
    prelude::*,
    statistics::{
        BillStatistics,
        RateStatistics,
        compute_bill_statistics,
        compute_rate_statistics,
        generate_insights,
    },
    tables::{build_bill_statistics_table, build_rate_statistics_table},
};

#[derive(Parser)]
pub struct AnalyticsArgs {
    #[clap(flatten)]
    session: SessionArgs,

    /// Also write the statistics into the TOML file.
    #[clap(long, env = "ANALYTICS_OUTPUT_FILE")]
    output_file: Option<PathBuf>,
}

impl AnalyticsArgs {
    pub async fn run(self) -> Result {
        let service = self.session.connect()?;
        let (bill_history, rate_history) =
            try_join!(service.fetch_bill_history(), service.fetch_rate_history())?;
        info!(n_bills = bill_history.len(), n_rates = rate_history.len(), "fetched the history");

        let report = AnalyticsReport {
            bills: compute_bill_statistics(&bill_history),
            rates: compute_rate_statistics(&rate_history),
        };
        match &report.bills {
            Some(bills) => println!("{}", build_bill_statistics_table(bills)),
            None => warn!("no bill statistics available"),
        }
        match &report.rates {
            Some(rates) => println!("{}", build_rate_statistics_table(rates)),
            None => warn!("no rate statistics available"),
        }
        for insight in generate_insights(report.bills.as_ref(), report.rates.as_ref()) {
            println!("• {insight}");
        }

        if let Some(output_file) = &self.output_file {
            report.write_to(output_file)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct AnalyticsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    bills: Option<BillStatistics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    rates: Option<RateStatistics>,
}

impl AnalyticsReport {
    #[instrument(skip(self))]
    fn write_to<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        let path = path.as_ref();
        fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("written");
        Ok(())
    }
}
