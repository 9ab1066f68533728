use super::estimate::{ConstructionLineItem, EstimateRequest};
use super::taxonomy::{CalculatorKind, DevelopmentYearBracket, Element, PropertyOption, QualityOfFinish};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Input-shape violations, rejected before anything is estimated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown development year bracket '{0}' (expected First, Second or Third)")]
    UnknownDevelopmentYear(String),
    #[error("item {index}: unknown element '{element}'")]
    UnknownElement { index: usize, element: String },
    #[error("item {index}: unknown property option '{option}'")]
    UnknownPropertyOption { index: usize, option: String },
    #[error("item {index}: property option '{option}' is not valid for {element}")]
    OptionNotValidForElement {
        index: usize,
        option: PropertyOption,
        element: Element,
    },
    #[error("{field} must not be negative: {value}")]
    NegativeArea { field: &'static str, value: Decimal },
    #[error("item {index}: multiplier must not be negative: {value}")]
    NegativeMultiplier { index: usize, value: Decimal },
}

/// A building's construction profile as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildingInput {
    /// Calculator kind label (e.g. Residential_SS_up_to_100m2). Missing or
    /// unrecognised kinds apply no element filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Development year bracket: First, Second or Third
    pub development_year: String,
    /// Gross floor area
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub floor_area: Option<Decimal>,
    /// Veranda area, used for the Veranda element instead of floor area
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub veranda_area: Option<Decimal>,
    pub items: Vec<LineItemInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LineItemInput {
    /// Element label (e.g. Brickwork, Gate)
    pub element: String,
    /// Property option label valid for the element (e.g. StockBricks)
    #[serde(default)]
    pub property_option: Option<String>,
    /// Delapidated, Poor, Fair, Good, VeryGood, Excellent or NotApplicable
    #[serde(default)]
    pub quality_of_finish: Option<String>,
    /// Name of the user-entered quantity (e.g. "Enter number of bathrooms")
    #[serde(default)]
    pub multiplier_identifier: Option<String>,
    /// User-entered quantity replacing the floor area
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub multiplier: Option<Decimal>,
}

impl BuildingInput {
    pub fn read_json<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// The calculator kind, if one was supplied and recognised.
    pub fn resolve_kind(&self) -> Option<CalculatorKind> {
        let label = self.kind.as_deref()?;
        let kind = CalculatorKind::from_label(label);
        if kind.is_none() {
            log::warn!("Unknown calculator kind '{}', no element filtering applied", label);
        }
        kind
    }

    /// A supplied kind label that matches no calculator kind.
    pub fn unrecognised_kind(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .filter(|label| CalculatorKind::from_label(label).is_none())
    }

    /// Converts to a typed request, failing on the first shape violation.
    pub fn into_request(self) -> Result<EstimateRequest, InputError> {
        let kind = self.resolve_kind();
        let development_year = parse_development_year(&self.development_year)?;
        check_area("floor_area", self.floor_area)?;
        check_area("veranda_area", self.veranda_area)?;

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| item.to_line_item(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EstimateRequest {
            kind,
            development_year,
            floor_area: self.floor_area,
            veranda_area: self.veranda_area,
            items,
        })
    }

    /// Collects every shape violation instead of stopping at the first.
    pub fn check(&self) -> Vec<InputError> {
        let mut errors = Vec::new();
        if let Err(err) = parse_development_year(&self.development_year) {
            errors.push(err);
        }
        for (field, area) in [("floor_area", self.floor_area), ("veranda_area", self.veranda_area)] {
            if let Err(err) = check_area(field, area) {
                errors.push(err);
            }
        }
        errors.extend(
            self.items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| item.to_line_item(index).err()),
        );
        errors
    }
}

impl LineItemInput {
    fn to_line_item(&self, index: usize) -> Result<ConstructionLineItem, InputError> {
        let element = Element::from_label(&self.element).ok_or_else(|| InputError::UnknownElement {
            index,
            element: self.element.clone(),
        })?;

        let property_option = match self.property_option.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => {
                let option = PropertyOption::from_label(label).ok_or_else(|| {
                    InputError::UnknownPropertyOption {
                        index,
                        option: label.to_string(),
                    }
                })?;
                if !element.accepts(option) {
                    return Err(InputError::OptionNotValidForElement {
                        index,
                        option,
                        element,
                    });
                }
                Some(option)
            }
        };

        let quality_of_finish = self.quality_of_finish.as_deref().and_then(|label| {
            let quality = QualityOfFinish::from_label(label);
            if quality.is_none() {
                log::warn!("item {}: unknown quality of finish '{}'", index, label);
            }
            quality
        });

        if let Some(value) = self.multiplier {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(InputError::NegativeMultiplier { index, value });
            }
        }

        Ok(ConstructionLineItem {
            element,
            property_option,
            quality_of_finish,
            multiplier_identifier: self.multiplier_identifier.clone(),
            multiplier: self.multiplier,
        })
    }
}

impl From<&ConstructionLineItem> for LineItemInput {
    fn from(item: &ConstructionLineItem) -> Self {
        LineItemInput {
            element: item.element.label().to_string(),
            property_option: item.property_option.map(|o| o.label().to_string()),
            quality_of_finish: item.quality_of_finish.map(|q| q.label().to_string()),
            multiplier_identifier: item.multiplier_identifier.clone(),
            multiplier: item.multiplier,
        }
    }
}

impl From<&EstimateRequest> for BuildingInput {
    fn from(request: &EstimateRequest) -> Self {
        BuildingInput {
            kind: request.kind.map(|k| k.label().to_string()),
            development_year: request.development_year.label().to_string(),
            floor_area: request.floor_area,
            veranda_area: request.veranda_area,
            items: request.items.iter().map(LineItemInput::from).collect(),
        }
    }
}

fn parse_development_year(label: &str) -> Result<DevelopmentYearBracket, InputError> {
    DevelopmentYearBracket::from_label(label)
        .ok_or_else(|| InputError::UnknownDevelopmentYear(label.to_string()))
}

fn check_area(field: &'static str, area: Option<Decimal>) -> Result<(), InputError> {
    match area {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            Err(InputError::NegativeArea { field, value })
        }
        _ => Ok(()),
    }
}
