pub mod aggregate;
pub mod archetype;
pub mod config;
pub mod estimate;
pub mod input;
pub mod profile;
pub mod rates;
pub mod taxonomy;

// Flat public surface for domain types and functions.
pub use aggregate::{aggregate, obsolescence_percent, EstimateTotals, ItemEstimate};
pub use archetype::{applicable_elements, has_no_floor_area, is_applicable, is_hard_excluded};
pub use config::{ConfigError, EstimatorConfig, DEFAULT_VAT_RATE};
pub use estimate::{
    compute_building_estimate, estimate_item, is_estimated, BuildingEstimate, ConstructionLineItem,
    EstimateContext, EstimateRequest, EstimatedItem,
};
pub use input::{BuildingInput, InputError, LineItemInput};
pub use profile::{default_items, default_request};
pub use rates::{RateRecord, RateTable, RateTableEntry, RateTableError};
pub use taxonomy::{
    CalculatorKind, DevelopmentYearBracket, Element, ElementFamily, PropertyOption, QualityOfFinish,
};
