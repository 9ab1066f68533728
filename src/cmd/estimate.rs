//! Estimate command - per-item and whole-building replacement costs

use super::display::{format_amount, format_percent, format_quantity};
use super::{read_building, read_rates, VatArgs};
use crate::core::{
    compute_building_estimate, BuildingEstimate, Element, EstimatedItem, EstimatorConfig,
};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EstimateCommand {
    /// Building profile (JSON). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    building: PathBuf,

    /// Rate table (CSV, or JSON for .json files)
    #[arg(short, long)]
    rates: PathBuf,

    #[command(flatten)]
    vat: VatArgs,

    /// Output the full unrounded result as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output item rows as CSV
    #[arg(long)]
    csv: bool,
}

impl EstimateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = self.vat.config()?;
        let request = read_building(&self.building)?.into_request()?;
        let rates = read_rates(&self.rates)?;

        let estimate = compute_building_estimate(&request, &rates, &config);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&estimate)?);
            Ok(())
        } else if self.csv {
            write_csv(&estimate.items)
        } else {
            print_estimate(&estimate, &config);
            Ok(())
        }
    }
}

/// Row for the estimate table output
#[derive(Debug, Tabled)]
struct ItemRow {
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Option")]
    option: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Typical")]
    typical: String,
    #[tabled(rename = "Quality Adj.")]
    quality_adjusted: String,
}

impl From<&EstimatedItem> for ItemRow {
    fn from(estimated: &EstimatedItem) -> Self {
        let item = &estimated.item;
        let quantity = match (&item.multiplier_identifier, item.multiplier) {
            (Some(identifier), Some(value)) => format!("{} ({})", format_quantity(value), identifier),
            (Some(identifier), None) => format!("- ({})", identifier),
            (None, _) => String::new(),
        };
        ItemRow {
            element: item.element.to_string(),
            option: item.property_option.map(|o| o.to_string()).unwrap_or_default(),
            quality: item
                .quality_of_finish
                .map_or_else(|| "?".to_string(), |q| q.to_string()),
            quantity,
            typical: format_amount(estimated.estimate.typical_estimate),
            quality_adjusted: format_amount(estimated.estimate.quality_estimate),
        }
    }
}

/// CSV record; amounts keep full precision
#[derive(Debug, Serialize)]
struct ItemRecord<'a> {
    element: &'static str,
    property_option: Option<&'static str>,
    quality_of_finish: Option<&'static str>,
    multiplier_identifier: Option<&'a str>,
    multiplier: Option<Decimal>,
    typical_estimate: Decimal,
    quality_estimate: Decimal,
}

impl<'a> From<&'a EstimatedItem> for ItemRecord<'a> {
    fn from(estimated: &'a EstimatedItem) -> Self {
        let item = &estimated.item;
        ItemRecord {
            element: item.element.label(),
            property_option: item.property_option.map(|o| o.label()),
            quality_of_finish: item.quality_of_finish.map(|q| q.label()),
            multiplier_identifier: item.multiplier_identifier.as_deref(),
            multiplier: item.multiplier,
            typical_estimate: estimated.estimate.typical_estimate,
            quality_estimate: estimated.estimate.quality_estimate,
        }
    }
}

/// Display order: Veranda rows last, everything else as estimated.
fn display_order(items: &[EstimatedItem]) -> Vec<&EstimatedItem> {
    let (mut ordered, verandas): (Vec<_>, Vec<_>) =
        items.iter().partition(|i| i.item.element != Element::Veranda);
    ordered.extend(verandas);
    ordered
}

fn print_estimate(estimate: &BuildingEstimate, config: &EstimatorConfig) {
    let kind = estimate.kind.map_or("Any kind".to_string(), |k| k.to_string());

    println!();
    println!(
        "REPLACEMENT COST ESTIMATE ({}, {} development year)",
        kind, estimate.development_year
    );
    println!();

    if estimate.items.is_empty() {
        println!("No applicable construction items");
    } else {
        let rows: Vec<ItemRow> = display_order(&estimate.items)
            .into_iter()
            .map(ItemRow::from)
            .collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(4..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
    println!();

    let totals = &estimate.totals;
    let area = estimate
        .floor_area
        .map_or("-".to_string(), format_quantity);
    println!("TOTALS (floor area {})", area);
    println!(
        "  Typical: {} | Quality adjusted: {}",
        format_amount(totals.total_typical),
        format_amount(totals.total_quality)
    );
    println!(
        "  Excl. VAT ({}): {} | {}",
        format_percent(Some(config.vat_rate().saturating_mul(dec!(100)))),
        format_amount(totals.total_typical_excl_vat),
        format_amount(totals.total_quality_excl_vat)
    );
    println!(
        "  Per area: {} | {}",
        format_amount(totals.cost_per_area_typical),
        format_amount(totals.cost_per_area_quality)
    );
    println!(
        "  Per area excl. VAT: {} | {}",
        format_amount(totals.cost_per_area_typical_excl_vat),
        format_amount(totals.cost_per_area_quality_excl_vat)
    );
    println!("  Obsolescence: {}", format_percent(totals.obsolescence_percent));
    println!();
}

fn write_csv(items: &[EstimatedItem]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for item in items {
        wtr.serialize(ItemRecord::from(item))?;
    }
    wtr.flush()?;
    Ok(())
}
