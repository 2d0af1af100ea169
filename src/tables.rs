use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::models::{BillReceipt, BillStatus, CalculationReport},
    core::board::Selection,
    fmt::FormattedPercent,
    quantity::{cost::Cost, energy::KilowattHours},
    statistics::{BillStatistics, MonthSummary, RateStatistics, Stability},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

const fn status_color(status: BillStatus) -> Color {
    match status {
        BillStatus::Pending => Color::DarkYellow,
        BillStatus::Computed => Color::Green,
        BillStatus::Paid => Color::Blue,
        BillStatus::Unknown => Color::Reset,
    }
}

fn amount_cell(amount: Cost) -> Cell {
    Cell::new(amount)
        .set_alignment(CellAlignment::Right)
        .fg(if amount < Cost::ZERO { Color::Red } else { Color::Reset })
}

pub fn build_units_table(selection: &Selection) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Tenant",
        "Submeter",
        "Status",
        "Previous",
        "Current",
        "Consumption",
        "Rate",
        "Amount",
        "Access",
    ]);
    for card in &selection.cards {
        let reading = card.calculator.reading();
        let status = card.record.bill.as_ref().map(|bill| bill.status);
        table.add_row(vec![
            Cell::new(&card.record.tenant_name),
            Cell::new(&card.record.submeter_id).add_attribute(Attribute::Dim),
            status.map_or_else(
                || Cell::new("no bill").add_attribute(Attribute::Dim),
                |status| Cell::new(status).fg(status_color(status)),
            ),
            Cell::new(reading.previous)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(reading.current).set_alignment(CellAlignment::Right),
            Cell::new(card.calculator.consumption()).set_alignment(CellAlignment::Right).fg(
                if card.calculator.consumption() < KilowattHours::ZERO {
                    Color::Red
                } else {
                    Color::Reset
                },
            ),
            Cell::new(card.calculator.rate()).set_alignment(CellAlignment::Right),
            amount_cell(card.calculator.amount()),
            if card.calculator.is_read_only() {
                Cell::new("read-only").add_attribute(Attribute::Dim)
            } else if card.calculator.is_computable() {
                Cell::new("computable").fg(Color::Green)
            } else {
                Cell::new("not computable").fg(Color::DarkYellow)
            },
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(summary: &MonthSummary, receipt: &BillReceipt) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Derived", "Receipt"]);
    table.add_row(vec![
        Cell::new("Units"),
        Cell::new(format!("{} of {} billed", summary.n_billed, summary.n_units))
            .set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    for (status, n_units) in &summary.n_by_status {
        table.add_row(vec![
            Cell::new(status).fg(status_color(*status)),
            Cell::new(n_units).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
    }
    table.add_row(vec![
        Cell::new("Consumption"),
        Cell::new(summary.total_consumption).set_alignment(CellAlignment::Right),
        Cell::new(receipt.total_consumption).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Default rate"),
        Cell::new(""),
        receipt.rate.map_or_else(
            || Cell::new("not set").add_attribute(Attribute::Dim),
            |rate| Cell::new(rate).set_alignment(CellAlignment::Right),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Amount"),
        amount_cell(summary.total_amount),
        amount_cell(receipt.total_amount),
    ]);
    table
}

#[must_use]
pub fn build_detail_table(report: &CalculationReport) -> Table {
    let detail = &report.detail;
    let reading = detail.reading();
    let derived_consumption = reading.consumption();
    let derived_amount = derived_consumption * report.rate();

    let mut table = new_table();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![Cell::new("Unit"), Cell::new(&detail.unit_id)]);
    table.add_row(vec![Cell::new("Submeter"), Cell::new(&detail.submeter_id)]);
    table.add_row(vec![Cell::new("Tenant"), Cell::new(&detail.tenant_name)]);
    table.add_row(vec![Cell::new("Status"), Cell::new(detail.status).fg(status_color(detail.status))]);
    table.add_row(vec![Cell::new("Previous reading"), Cell::new(reading.previous)]);
    table.add_row(vec![Cell::new("Current reading"), Cell::new(reading.current)]);
    table.add_row(vec![
        Cell::new("Consumption"),
        Cell::new(detail.consumption.unwrap_or(derived_consumption)),
    ]);
    table.add_row(vec![Cell::new("Rate"), Cell::new(report.rate())]);
    table.add_row(vec![Cell::new("Amount"), amount_cell(detail.amount.unwrap_or(derived_amount))]);
    table
}

#[must_use]
pub fn build_bill_statistics_table(statistics: &BillStatistics) -> Table {
    let stability = statistics.stability();
    let mut table = new_table();
    table.set_header(vec!["Bills", ""]);
    table.add_row(vec![Cell::new("Total"), amount_cell(statistics.total)]);
    table.add_row(vec![Cell::new("Average"), amount_cell(statistics.average)]);
    table.add_row(vec![
        Cell::new(format!("Highest ({})", statistics.highest_month)),
        amount_cell(statistics.highest),
    ]);
    table.add_row(vec![
        Cell::new(format!("Lowest ({})", statistics.lowest_month)),
        amount_cell(statistics.lowest),
    ]);
    table.add_row(vec![
        Cell::new("Growth"),
        Cell::new(FormattedPercent(statistics.growth_percent)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Stability"),
        Cell::new(stability).fg(match stability {
            Stability::Stable => Color::Green,
            Stability::Volatile => Color::DarkYellow,
        }),
    ]);
    table
}

#[must_use]
pub fn build_rate_statistics_table(statistics: &RateStatistics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Rates", ""]);
    table.add_row(vec![
        Cell::new("Current"),
        Cell::new(statistics.current).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Average"),
        Cell::new(statistics.average).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new(format!("Highest ({})", statistics.highest_month)),
        Cell::new(statistics.highest).set_alignment(CellAlignment::Right).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new(format!("Lowest ({})", statistics.lowest_month)),
        Cell::new(statistics.lowest).set_alignment(CellAlignment::Right).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Change"),
        Cell::new(FormattedPercent(statistics.change_percent)).set_alignment(CellAlignment::Right),
    ]);
    table
}
