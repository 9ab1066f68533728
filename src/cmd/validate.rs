//! Validate command - surface data quality issues without producing an estimate

use super::{read_building, read_rates};
use crate::core::{is_applicable, is_hard_excluded, BuildingInput, RateTable};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Building profile (JSON). Reads from stdin if not specified.
    #[arg(short, long, default_value = "-")]
    building: PathBuf,

    /// Rate table to check for missing rates (CSV, or JSON for .json files)
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<usize>,
    message: String,
}

impl ValidationIssue {
    fn new(issue_type: &'static str, item: Option<usize>, message: String) -> Self {
        ValidationIssue {
            issue_type,
            item,
            message,
        }
    }
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let building = read_building(&self.building)?;
        let rates = self.rates.as_deref().map(read_rates).transpose()?;

        let issues = collect_issues(&building, rates.as_ref());

        if self.json {
            let output = ValidationOutput {
                issue_count: issues.len(),
                issues,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            if output.issue_count > 0 {
                std::process::exit(1);
            }
            return Ok(());
        }

        print_text(&issues);

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn collect_issues(building: &BuildingInput, rates: Option<&RateTable>) -> Vec<ValidationIssue> {
    let errors = building.check();
    if !errors.is_empty() {
        return errors
            .into_iter()
            .map(|err| ValidationIssue::new("Input", None, err.to_string()))
            .collect();
    }

    let mut issues = Vec::new();
    if let Some(label) = building.unrecognised_kind() {
        issues.push(ValidationIssue::new(
            "UnknownKind",
            None,
            format!("'{}' is not a calculator kind; no items will be filtered", label),
        ));
    }

    let request = match building.clone().into_request() {
        Ok(request) => request,
        Err(err) => return vec![ValidationIssue::new("Input", None, err.to_string())],
    };
    let kind = request.kind;

    for (index, (item, raw)) in request.items.iter().zip(&building.items).enumerate() {
        if is_hard_excluded(kind, item.element) {
            issues.push(ValidationIssue::new(
                "Excluded",
                Some(index),
                format!("{} is always excluded for this kind", item.element),
            ));
            continue;
        }
        if !is_applicable(item.element, kind) {
            issues.push(ValidationIssue::new(
                "NotApplicable",
                Some(index),
                format!("{} does not apply to this kind and will be dropped", item.element),
            ));
            continue;
        }

        match (&raw.quality_of_finish, item.quality_of_finish) {
            (None, _) => issues.push(ValidationIssue::new(
                "MissingQuality",
                Some(index),
                format!("{} has no quality of finish; quality estimate will be 0", item.element),
            )),
            (Some(label), None) => issues.push(ValidationIssue::new(
                "UnknownQuality",
                Some(index),
                format!("'{}' is not a quality of finish; quality estimate will be 0", label),
            )),
            _ => {}
        }

        if item.multiplier_identifier.is_some() && item.multiplier.is_none() {
            issues.push(ValidationIssue::new(
                "MissingMultiplier",
                Some(index),
                format!(
                    "{} expects a quantity ({}); estimate will be 0",
                    item.element,
                    item.multiplier_identifier.as_deref().unwrap_or_default()
                ),
            ));
        }

        if let Some(rates) = rates {
            if !rates.contains(kind, item.rate_key()) {
                issues.push(ValidationIssue::new(
                    "MissingRate",
                    Some(index),
                    format!("no rate for '{}'; estimate will be 0", item.rate_key()),
                ));
            }
        }
    }

    issues
}

fn print_text(issues: &[ValidationIssue]) {
    println!();
    println!("VALIDATION RESULTS");
    println!();

    if issues.is_empty() {
        println!("\u{2713} No issues found.");
    } else {
        println!("\u{26A0} {} issue(s) found:", issues.len());
        println!();
        for (i, issue) in issues.iter().enumerate() {
            match issue.item {
                Some(item) => println!(
                    "  {}. [{}] item {}: {}",
                    i + 1,
                    issue.issue_type,
                    item,
                    issue.message
                ),
                None => println!("  {}. [{}] {}", i + 1, issue.issue_type, issue.message),
            }
        }
    }
    println!();
}
