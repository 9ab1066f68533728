use super::taxonomy::{CalculatorKind, Element};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use Element::*;

const RESIDENTIAL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    CarPort,
    Veranda,
];

const RESIDENTIAL_LARGE: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    CarPort,
    Veranda,
];

const FLATS: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    FireProtection,
    Lifts,
    CarPort,
];

const SHHA: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    Veranda,
];

const OUTBUILDING: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
];

const HOSPITALITY: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    CarPort,
    Veranda,
];

const HOTEL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Lifts,
    CarPort,
    Veranda,
];

const OFFICE_LOW_RISE: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    CarPort,
];

const OFFICE_HIGH_RISE: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Lifts,
    CarPort,
];

const RETAIL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Veranda,
];

const SHOPPING_MALL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Lifts,
    Escalators,
    CarPort,
];

const RESTAURANT: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Veranda,
];

const INDUSTRIAL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    FireProtection,
];

const FILLING_STATION: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    FireProtection,
    CarPort,
];

const HOSPITAL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    CarpentryAndJoineryFittedKitchen,
    CarpentryAndJoineryBuiltInCupboards,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    AirConditioning,
    FireProtection,
    Lifts,
    Veranda,
];

const INSTITUTIONAL: &[Element] = &[
    Foundations,
    Concrete,
    Brickwork,
    Plastering,
    RoofingStructure,
    RoofingCover,
    Ceilings,
    FloorFinishes,
    Painting,
    Windows,
    Doors,
    SanitaryFittings,
    Plumbing,
    ElectricalInstallation,
    FireProtection,
    Veranda,
];

const BOUNDARY_WALL: &[Element] = &[BoundaryWall, Gate];

const EXTERNAL_WORKS: &[Element] = &[
    BoundaryWall,
    Gate,
    SwimmingPool,
    Paving,
    Fencing,
    Landscaping,
    Borehole,
    SepticTank,
];

fn whitelist_for(kind: CalculatorKind) -> &'static [Element] {
    match kind {
        CalculatorKind::ResidentialSingleStoreyUpTo100
        | CalculatorKind::ResidentialSingleStorey100To250
        | CalculatorKind::Townhouses => RESIDENTIAL,
        CalculatorKind::ResidentialSingleStoreyOver250
        | CalculatorKind::ResidentialDoubleStorey => RESIDENTIAL_LARGE,
        CalculatorKind::ResidentialFlats => FLATS,
        CalculatorKind::ShhaHouseTypes => SHHA,
        CalculatorKind::Outbuilding => OUTBUILDING,
        CalculatorKind::GuestHouse | CalculatorKind::Lodge => HOSPITALITY,
        CalculatorKind::Hotel => HOTEL,
        CalculatorKind::OfficeLowRise | CalculatorKind::Bank => OFFICE_LOW_RISE,
        CalculatorKind::OfficeHighRise => OFFICE_HIGH_RISE,
        CalculatorKind::RetailShop => RETAIL,
        CalculatorKind::ShoppingMall => SHOPPING_MALL,
        CalculatorKind::Restaurant => RESTAURANT,
        CalculatorKind::Warehouse | CalculatorKind::FactoryLightIndustrial => INDUSTRIAL,
        CalculatorKind::FillingStation => FILLING_STATION,
        CalculatorKind::Hospital => HOSPITAL,
        CalculatorKind::Clinic
        | CalculatorKind::School
        | CalculatorKind::Church
        | CalculatorKind::SportsComplex => INSTITUTIONAL,
        CalculatorKind::BoundaryWall => BOUNDARY_WALL,
        CalculatorKind::ExternalWorksResidential => EXTERNAL_WORKS,
    }
}

static WHITELISTS: LazyLock<HashMap<CalculatorKind, HashSet<Element>>> = LazyLock::new(|| {
    CalculatorKind::ALL
        .iter()
        .map(|kind| (*kind, whitelist_for(*kind).iter().copied().collect()))
        .collect()
});

/// Whether `element` is on the whitelist of `kind`.
///
/// This is the plain membership check, also used for element listings; it
/// does not apply [`is_hard_excluded`]. Without a kind nothing is filtered.
pub fn is_applicable(element: Element, kind: Option<CalculatorKind>) -> bool {
    match kind {
        None => true,
        Some(kind) => WHITELISTS
            .get(&kind)
            .map_or(true, |elements| elements.contains(&element)),
    }
}

/// Elements removed for a kind even though its whitelist contains them.
pub fn is_hard_excluded(kind: Option<CalculatorKind>, element: Element) -> bool {
    matches!(
        (kind, element),
        (Some(CalculatorKind::ShhaHouseTypes), Element::Concrete)
    )
}

/// Elements priced per unit under `kind`: their floor area is forced to 1.
pub fn has_no_floor_area(kind: Option<CalculatorKind>, element: Element) -> bool {
    match (kind, element) {
        (
            Some(
                CalculatorKind::ShhaHouseTypes
                | CalculatorKind::Outbuilding
                | CalculatorKind::ResidentialSingleStoreyUpTo100,
            ),
            Element::CarpentryAndJoineryFittedKitchen,
        ) => true,
        (Some(CalculatorKind::BoundaryWall), Element::Gate) => true,
        _ => false,
    }
}

/// Whitelisted elements of `kind` in taxonomy order, for listings.
pub fn applicable_elements(kind: Option<CalculatorKind>) -> Vec<Element> {
    Element::ALL
        .iter()
        .copied()
        .filter(|element| is_applicable(*element, kind))
        .collect()
}
