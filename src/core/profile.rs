use super::archetype::{applicable_elements, is_hard_excluded};
use super::estimate::{ConstructionLineItem, EstimateRequest};
use super::taxonomy::{CalculatorKind, DevelopmentYearBracket, QualityOfFinish};

/// Quality assigned to freshly seeded items.
pub const DEFAULT_QUALITY: QualityOfFinish = QualityOfFinish::Good;

/// The full default set of line items for a kind, one per estimated element.
///
/// Each item takes the element's first option and, for per-unit elements,
/// the multiplier prompt with no quantity entered yet. Switching kind means
/// replacing the whole set with the new kind's defaults.
pub fn default_items(kind: Option<CalculatorKind>) -> Vec<ConstructionLineItem> {
    applicable_elements(kind)
        .into_iter()
        .filter(|element| !is_hard_excluded(kind, *element))
        .map(|element| {
            let item = ConstructionLineItem::new(element, element.options().first().copied(), DEFAULT_QUALITY);
            match element.multiplier_prompt() {
                Some(prompt) => item.with_multiplier(prompt, None),
                None => item,
            }
        })
        .collect()
}

/// A seeded request without areas, for the caller to complete.
pub fn default_request(kind: CalculatorKind, development_year: DevelopmentYearBracket) -> EstimateRequest {
    EstimateRequest {
        kind: Some(kind),
        development_year,
        floor_area: None,
        veranda_area: None,
        items: default_items(Some(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::taxonomy::{Element, PropertyOption};

    #[test]
    fn boundary_wall_profile() {
        let items = default_items(Some(CalculatorKind::BoundaryWall));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].element, Element::BoundaryWall);
        assert_eq!(items[0].property_option, Some(PropertyOption::BrickBoundaryWall));
        assert_eq!(items[0].multiplier_identifier.as_deref(), Some("Enter wall length"));
        assert_eq!(items[0].multiplier, None);
        assert_eq!(items[1].element, Element::Gate);
        assert_eq!(items[1].multiplier_identifier, None);
    }

    #[test]
    fn shha_profile_has_no_concrete() {
        let items = default_items(Some(CalculatorKind::ShhaHouseTypes));
        assert!(items.iter().all(|i| i.element != Element::Concrete));
        assert!(items.iter().any(|i| i.element == Element::Brickwork));
    }

    #[test]
    fn seeded_items_use_default_quality() {
        let request = default_request(CalculatorKind::Outbuilding, DevelopmentYearBracket::Second);
        assert_eq!(request.development_year, DevelopmentYearBracket::Second);
        assert!(!request.items.is_empty());
        for item in &request.items {
            assert_eq!(item.quality_of_finish, Some(DEFAULT_QUALITY));
            if let Some(option) = item.property_option {
                assert!(item.element.accepts(option));
            }
        }
        let foundations = request
            .items
            .iter()
            .find(|i| i.element == Element::Foundations)
            .unwrap();
        assert_eq!(foundations.property_option, None);
    }
}
