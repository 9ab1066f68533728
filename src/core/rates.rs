use super::taxonomy::{CalculatorKind, DevelopmentYearBracket};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("unknown calculator kind '{kind}' for rate '{identifier}'")]
    UnknownKind { kind: String, identifier: String },
    #[error("duplicate rate identifier '{identifier}' for {kind}")]
    DuplicateIdentifier { kind: String, identifier: String },
    #[error("failed to read rate table csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read rate table json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the rate table as supplied by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RateRecord {
    /// Calculator kind label the rate applies to (e.g. Residential_SS_up_to_100m2)
    pub kind: String,
    /// Property option (or option-less element) label the rate is keyed by
    pub identifier: String,
    /// Unit rate for the first development-year bracket
    #[schemars(with = "f64")]
    pub first: Decimal,
    /// Unit rate for the second development-year bracket
    #[schemars(with = "f64")]
    pub second: Decimal,
    /// Unit rate for the third development-year bracket
    #[schemars(with = "f64")]
    pub third: Decimal,
}

/// A validated rate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTableEntry {
    pub kind: CalculatorKind,
    pub identifier: String,
    pub first: Decimal,
    pub second: Decimal,
    pub third: Decimal,
}

impl RateTableEntry {
    pub fn rate(&self, bracket: DevelopmentYearBracket) -> Decimal {
        match bracket {
            DevelopmentYearBracket::First => self.first,
            DevelopmentYearBracket::Second => self.second,
            DevelopmentYearBracket::Third => self.third,
        }
    }
}

impl TryFrom<RateRecord> for RateTableEntry {
    type Error = RateTableError;

    fn try_from(record: RateRecord) -> Result<Self, Self::Error> {
        let kind = CalculatorKind::from_label(&record.kind).ok_or_else(|| {
            RateTableError::UnknownKind {
                kind: record.kind.clone(),
                identifier: record.identifier.clone(),
            }
        })?;
        Ok(RateTableEntry {
            kind,
            identifier: record.identifier.trim().to_string(),
            first: record.first,
            second: record.second,
            third: record.third,
        })
    }
}

/// Unit rates keyed by identifier within each calculator kind.
///
/// Read-only once built. Identifiers are unique within a kind.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    entries: Vec<RateTableEntry>,
    index: HashMap<(CalculatorKind, String), usize>,
}

impl RateTable {
    pub fn from_entries(entries: Vec<RateTableEntry>) -> Result<Self, RateTableError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index
                .insert((entry.kind, entry.identifier.clone()), position)
                .is_some()
            {
                return Err(RateTableError::DuplicateIdentifier {
                    kind: entry.kind.to_string(),
                    identifier: entry.identifier.clone(),
                });
            }
        }
        Ok(RateTable { entries, index })
    }

    pub fn from_records(records: Vec<RateRecord>) -> Result<Self, RateTableError> {
        let entries = records
            .into_iter()
            .map(RateTableEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = rdr
            .deserialize::<RateRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self::from_records(records)?;
        log::info!("Loaded {} rate table entries", table.len());
        Ok(table)
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let records: Vec<RateRecord> = serde_json::from_reader(reader)?;
        let table = Self::from_records(records)?;
        log::info!("Loaded {} rate table entries", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for `identifier` within the scope of `kind`.
    ///
    /// Without a kind the first entry in table order with that identifier wins.
    pub fn find(&self, kind: Option<CalculatorKind>, identifier: &str) -> Option<&RateTableEntry> {
        match kind {
            Some(kind) => self
                .index
                .get(&(kind, identifier.to_string()))
                .map(|position| &self.entries[*position]),
            None => self.entries.iter().find(|e| e.identifier == identifier),
        }
    }

    pub fn contains(&self, kind: Option<CalculatorKind>, identifier: &str) -> bool {
        self.find(kind, identifier).is_some()
    }

    /// Unit rate for `identifier` in the bracket's column; zero when absent.
    pub fn rate(
        &self,
        kind: Option<CalculatorKind>,
        identifier: &str,
        bracket: DevelopmentYearBracket,
    ) -> Decimal {
        self.find(kind, identifier)
            .map_or(Decimal::ZERO, |entry| entry.rate(bracket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CSV: &str = "\
kind,identifier,first,second,third
Residential_SS_up_to_100m2,StockBricks,100,120,150
Residential_SS_up_to_100m2,Foundations,80.50,90,95
Boundary_Wall,SlidingGate,4500,5000,5500
Shopping_Mall,StockBricks,200,220,250
";

    #[test]
    fn reads_csv_and_selects_column() {
        let table = RateTable::read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        let kind = Some(CalculatorKind::ResidentialSingleStoreyUpTo100);
        assert_eq!(table.rate(kind, "StockBricks", DevelopmentYearBracket::First), dec!(100));
        assert_eq!(table.rate(kind, "StockBricks", DevelopmentYearBracket::Second), dec!(120));
        assert_eq!(table.rate(kind, "StockBricks", DevelopmentYearBracket::Third), dec!(150));
        assert_eq!(table.rate(kind, "Foundations", DevelopmentYearBracket::First), dec!(80.50));
    }

    #[test]
    fn identifiers_are_scoped_by_kind() {
        let table = RateTable::read_csv(CSV.as_bytes()).unwrap();
        let mall = Some(CalculatorKind::ShoppingMall);
        assert_eq!(table.rate(mall, "StockBricks", DevelopmentYearBracket::First), dec!(200));
        assert!(!table.contains(mall, "Foundations"));
    }

    #[test]
    fn missing_rate_is_zero() {
        let table = RateTable::read_csv(CSV.as_bytes()).unwrap();
        let kind = Some(CalculatorKind::ResidentialSingleStoreyUpTo100);
        assert_eq!(table.rate(kind, "ClayTiles", DevelopmentYearBracket::First), Decimal::ZERO);
        assert_eq!(
            RateTable::default().rate(None, "StockBricks", DevelopmentYearBracket::Third),
            Decimal::ZERO
        );
    }

    #[test]
    fn without_kind_first_match_wins() {
        let table = RateTable::read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.rate(None, "StockBricks", DevelopmentYearBracket::First), dec!(100));
        assert_eq!(table.rate(None, "SlidingGate", DevelopmentYearBracket::Third), dec!(5500));
    }

    #[test]
    fn duplicate_identifier_within_kind_rejected() {
        let csv = "\
kind,identifier,first,second,third
Outbuilding,StockBricks,1,2,3
Outbuilding,StockBricks,4,5,6
";
        let err = RateTable::read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RateTableError::DuplicateIdentifier { ref identifier, .. } if identifier == "StockBricks"
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        let csv = "\
kind,identifier,first,second,third
Lighthouse,StockBricks,1,2,3
";
        let err = RateTable::read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RateTableError::UnknownKind { .. }));
    }

    #[test]
    fn reads_json_records() {
        let json = r#"[
            {"kind": "Boundary_Wall", "identifier": "SlidingGate", "first": "4500", "second": "5000", "third": "5500"}
        ]"#;
        let table = RateTable::read_json(json.as_bytes()).unwrap();
        assert_eq!(
            table.rate(
                Some(CalculatorKind::BoundaryWall),
                "SlidingGate",
                DevelopmentYearBracket::Second
            ),
            dec!(5000)
        );
    }
}
