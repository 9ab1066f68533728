//! Elements command - which elements and options apply to a calculator kind

use crate::core::{applicable_elements, is_hard_excluded, CalculatorKind, Element};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct ElementsCommand {
    /// Calculator kind (e.g. Residential_SS_up_to_100m2). Lists every element if omitted.
    #[arg(short, long)]
    kind: Option<String>,

    /// List the calculator kinds instead of elements
    #[arg(long, conflicts_with = "kind")]
    kinds: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled, Serialize)]
struct ElementRow {
    #[tabled(rename = "Element")]
    element: &'static str,
    #[tabled(rename = "Family")]
    family: &'static str,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "Quantity")]
    multiplier_prompt: &'static str,
    #[tabled(rename = "Estimated")]
    estimated: &'static str,
}

impl ElementsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.kinds {
            return self.print_kinds();
        }

        let kind = match self.kind.as_deref() {
            None => None,
            Some(label) => Some(
                CalculatorKind::from_label(label)
                    .ok_or_else(|| anyhow::anyhow!("unknown calculator kind '{}'", label))?,
            ),
        };

        let rows = element_rows(kind);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            let title = kind.map_or("All kinds".to_string(), |k| k.to_string());
            println!();
            println!("ELEMENTS ({})", title);
            println!();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        Ok(())
    }

    fn print_kinds(&self) -> anyhow::Result<()> {
        let rows = kind_rows();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for row in rows {
                println!("{:40} {}", row.kind, row.family);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct KindRow {
    kind: &'static str,
    family: &'static str,
}

fn kind_rows() -> Vec<KindRow> {
    CalculatorKind::ALL
        .iter()
        .map(|kind| KindRow {
            kind: kind.label(),
            family: kind.family().label(),
        })
        .collect()
}

fn element_rows(kind: Option<CalculatorKind>) -> Vec<ElementRow> {
    applicable_elements(kind)
        .into_iter()
        .map(|element: Element| ElementRow {
            element: element.label(),
            family: element.family().label(),
            options: element
                .options()
                .iter()
                .map(|o| o.label())
                .collect::<Vec<_>>()
                .join(", "),
            multiplier_prompt: element.multiplier_prompt().unwrap_or(""),
            estimated: if is_hard_excluded(kind, element) { "no" } else { "yes" },
        })
        .collect()
}
