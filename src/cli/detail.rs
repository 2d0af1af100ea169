use clap::Parser;

use crate::{
    api::models::Id,
    cli::session::SessionArgs,
    core::month::Month,
    prelude::*,
    tables::build_detail_table,
};

#[derive(Parser)]
pub struct DetailArgs {
    #[clap(flatten)]
    session: SessionArgs,

    #[clap(long = "unit")]
    unit_id: String,

    #[clap(long)]
    month: Month,
}

impl DetailArgs {
    pub async fn run(self) -> Result {
        let report = self
            .session
            .connect()?
            .fetch_calculation_detail(&Id::from(self.unit_id), self.month)
            .await?;
        println!("{}", build_detail_table(&report));
        Ok(())
    }
}
