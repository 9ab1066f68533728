pub mod display;
pub mod elements;
pub mod estimate;
pub mod schema;
pub mod template;
pub mod validate;

use crate::core::{BuildingInput, ConfigError, EstimatorConfig, RateTable, DEFAULT_VAT_RATE};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// VAT settings shared by commands that produce totals.
#[derive(Args, Debug, Clone)]
pub struct VatArgs {
    /// VAT rate included in the rates (e.g. 0.14 for 14%)
    #[arg(long, env = "GRCALC_VAT_RATE", default_value_t = DEFAULT_VAT_RATE)]
    vat_rate: Decimal,
}

impl VatArgs {
    pub fn config(&self) -> Result<EstimatorConfig, ConfigError> {
        EstimatorConfig::with_vat_rate(self.vat_rate)
    }
}

/// Read a building profile (JSON) from a file, or stdin with "-"
pub fn read_building(path: &Path) -> anyhow::Result<BuildingInput> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a building file or pipe JSON to stdin.");
        }
        return BuildingInput::read_json(buffer.as_slice()).context("invalid building JSON on stdin");
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    BuildingInput::read_json(BufReader::new(file))
        .with_context(|| format!("invalid building JSON in {}", path.display()))
}

/// Read a rate table from CSV or JSON based on extension
pub fn read_rates(path: &Path) -> anyhow::Result<RateTable> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let table = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => RateTable::read_json(reader),
        // Default to CSV for .csv files and any other extension
        _ => RateTable::read_csv(reader),
    }
    .with_context(|| format!("invalid rate table {}", path.display()))?;
    if table.is_empty() {
        log::warn!("Rate table {} has no entries, every item prices at 0", path.display());
    }
    Ok(table)
}
