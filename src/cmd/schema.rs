//! Schema command - print expected input formats

use crate::core::{BuildingInput, RateRecord};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the building profile
    JsonSchema,
    /// JSON Schema for a JSON rate table
    RatesJsonSchema,
    /// CSV header row for a rate table
    RatesCsvHeader,
    /// Rate table CSV column descriptions
    RatesCsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(BuildingInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::RatesJsonSchema => {
                let schema = schema_for!(Vec<RateRecord>);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::RatesCsvHeader => {
                let names: Vec<_> = RATE_CSV_FIELDS.iter().map(|(name, _)| *name).collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::RatesCsvFields => {
                println!("Rate Table CSV Format");
                println!("=====================");
                println!();
                for (name, description) in RATE_CSV_FIELDS {
                    println!("{:12} (required)  {}", name, description);
                }
                println!();
                println!("identifier is unique within a kind; missing rates price items at 0");
            }
        }
        Ok(())
    }
}

const RATE_CSV_FIELDS: &[(&str, &str)] = &[
    ("kind", "Calculator kind label (e.g. Residential_SS_up_to_100m2)"),
    (
        "identifier",
        "Property option label, or element label for elements without options",
    ),
    ("first", "Unit rate for the First development year bracket"),
    ("second", "Unit rate for the Second development year bracket"),
    ("third", "Unit rate for the Third development year bracket"),
];
