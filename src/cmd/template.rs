//! Template command - a seeded building profile for a calculator kind

use crate::core::{default_request, BuildingInput, CalculatorKind, DevelopmentYearBracket};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct TemplateCommand {
    /// Calculator kind (e.g. Residential_SS_up_to_100m2)
    #[arg(short, long)]
    kind: String,

    /// Development year bracket: First, Second or Third
    #[arg(short = 'y', long, default_value = "First")]
    development_year: String,

    /// Floor area to fill in
    #[arg(long)]
    floor_area: Option<Decimal>,
}

impl TemplateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let kind = CalculatorKind::from_label(&self.kind)
            .ok_or_else(|| anyhow::anyhow!("unknown calculator kind '{}'", self.kind))?;
        let development_year = DevelopmentYearBracket::from_label(&self.development_year)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown development year bracket '{}'", self.development_year)
            })?;

        let mut request = default_request(kind, development_year);
        request.floor_area = self.floor_area;
        log::info!("Seeded {} items for {}", request.items.len(), kind);

        let input = BuildingInput::from(&request);
        println!("{}", serde_json::to_string_pretty(&input)?);
        Ok(())
    }
}
