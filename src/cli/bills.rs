use clap::Parser;

use crate::{
    cli::session::SessionArgs,
    core::{board::Board, month::Month},
    prelude::*,
    tables::{build_summary_table, build_units_table},
};

#[derive(Parser)]
pub struct BillsArgs {
    #[clap(flatten)]
    session: SessionArgs,

    /// Billing month, for example: `2024-05`.
    #[clap(long)]
    month: Month,
}

impl BillsArgs {
    pub async fn run(self) -> Result {
        let mut board = Board::new(self.session.connect()?, self.session.capabilities());
        let selection = board.select_month(self.month).await?;
        println!("Bills for {}", selection.month);
        println!("{}", build_units_table(selection));
        println!("{}", build_summary_table(&selection.summary(), &selection.receipt));
        Ok(())
    }
}
