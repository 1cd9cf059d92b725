//! Plain-text rendering of the finished gains report.

use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::gains::{GainsReport, Term, TermReport};

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Proceeds")]
    proceeds: String,
    #[tabled(rename = "Cost Basis")]
    cost_basis: String,
    #[tabled(rename = "Gain")]
    gain: String,
}

/// Render the report, short term section first, then long term.
pub fn render(report: &GainsReport) -> String {
    let mut out = String::new();
    render_term(&mut out, Term::Short, &report.short_term);
    out.push('\n');
    render_term(&mut out, Term::Long, &report.long_term);
    out
}

fn render_term(out: &mut String, term: Term, report: &TermReport) {
    out.push_str(term.heading());
    out.push('\n');
    out.push_str(&format!(
        "  Proceeds: {} | Cost Basis: {} | Gain: {}\n",
        format_usd(report.totals.proceeds),
        format_usd(report.totals.cost_basis),
        format_usd(report.totals.gain),
    ));

    if report.assets.is_empty() {
        out.push_str("  (no disposals)\n");
        return;
    }

    let rows: Vec<AssetRow> = report
        .assets
        .iter()
        .map(|(asset, totals)| AssetRow {
            asset: asset.clone(),
            proceeds: format_usd(totals.proceeds),
            cost_basis: format_usd(totals.cost_basis),
            gain: format_usd(totals.gain),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    out.push_str(&table);
    out.push('\n');
}

/// Format a whole-dollar amount as `$1,234`, with the sign ahead of the `$`.
fn format_usd(amount: Decimal) -> String {
    let negative = amount < Decimal::ZERO;
    let digits = amount.abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
