use super::aggregate::{aggregate, EstimateTotals, ItemEstimate};
use super::archetype::{has_no_floor_area, is_applicable, is_hard_excluded};
use super::config::EstimatorConfig;
use super::rates::RateTable;
use super::taxonomy::{CalculatorKind, DevelopmentYearBracket, Element, PropertyOption, QualityOfFinish};
use rust_decimal::Decimal;
use serde::Serialize;

/// One priced component of a building's construction profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionLineItem {
    pub element: Element,
    pub property_option: Option<PropertyOption>,
    /// `None` when the supplied grade was not recognised; such items carry no
    /// quality estimate.
    pub quality_of_finish: Option<QualityOfFinish>,
    /// Set when the item is priced per user-entered quantity instead of area
    pub multiplier_identifier: Option<String>,
    pub multiplier: Option<Decimal>,
}

impl ConstructionLineItem {
    pub fn new(
        element: Element,
        property_option: Option<PropertyOption>,
        quality_of_finish: QualityOfFinish,
    ) -> Self {
        ConstructionLineItem {
            element,
            property_option,
            quality_of_finish: Some(quality_of_finish),
            multiplier_identifier: None,
            multiplier: None,
        }
    }

    pub fn with_multiplier(mut self, identifier: impl Into<String>, multiplier: Option<Decimal>) -> Self {
        self.multiplier_identifier = Some(identifier.into());
        self.multiplier = multiplier;
        self
    }

    /// Rate-table identifier: the option label, or the element label for
    /// elements without options.
    pub fn rate_key(&self) -> &'static str {
        self.property_option
            .map_or_else(|| self.element.label(), |option| option.label())
    }
}

/// A line item together with its computed estimates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimatedItem {
    #[serde(flatten)]
    pub item: ConstructionLineItem,
    #[serde(flatten)]
    pub estimate: ItemEstimate,
}

/// The inputs shared by every item of one building.
#[derive(Debug, Clone, Copy)]
pub struct EstimateContext<'a> {
    pub kind: Option<CalculatorKind>,
    pub development_year: DevelopmentYearBracket,
    pub floor_area: Option<Decimal>,
    pub veranda_area: Option<Decimal>,
    pub rates: &'a RateTable,
}

/// Computes the typical and quality-adjusted cost of a single item.
///
/// The quantity the rate is multiplied by is resolved in order:
/// 1. the user-entered multiplier when a multiplier identifier is set
/// 2. the veranda area (falling back to floor area) for [`Element::Veranda`]
/// 3. the floor area, forced to 1 for elements exempt under the active kind
///
/// Missing quantities and missing rates count as zero.
pub fn estimate_item(item: &ConstructionLineItem, ctx: &EstimateContext<'_>) -> ItemEstimate {
    let rate = ctx.rates.rate(ctx.kind, item.rate_key(), ctx.development_year);
    if rate.is_zero() {
        log::warn!(
            "No rate for {} ({}) under {}",
            item.rate_key(),
            item.element,
            ctx.kind.map_or("any kind", |kind| kind.label())
        );
    }

    let multiplier = effective_multiplier(item, ctx);
    let typical_estimate = rate.checked_mul(multiplier).unwrap_or_else(|| {
        log::warn!(
            "{} [{}]: {} x {} is out of range, clamping",
            item.element,
            item.rate_key(),
            rate,
            multiplier
        );
        rate.saturating_mul(multiplier)
    });
    let quality_estimate = item
        .quality_of_finish
        .map_or(Decimal::ZERO, |quality| typical_estimate.saturating_mul(quality.weight()));

    log::debug!(
        "{} [{}]: typical {}, quality {}",
        item.element,
        item.rate_key(),
        typical_estimate,
        quality_estimate
    );

    ItemEstimate {
        typical_estimate,
        quality_estimate,
    }
}

fn effective_multiplier(item: &ConstructionLineItem, ctx: &EstimateContext<'_>) -> Decimal {
    let floor_area = if has_no_floor_area(ctx.kind, item.element) {
        Some(Decimal::ONE)
    } else {
        ctx.floor_area
    };

    if item.multiplier_identifier.is_some() {
        item.multiplier.unwrap_or(Decimal::ZERO)
    } else if item.element == Element::Veranda {
        ctx.veranda_area.or(floor_area).unwrap_or(Decimal::ZERO)
    } else {
        floor_area.unwrap_or(Decimal::ZERO)
    }
}

/// A building description ready for estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateRequest {
    pub kind: Option<CalculatorKind>,
    pub development_year: DevelopmentYearBracket,
    pub floor_area: Option<Decimal>,
    pub veranda_area: Option<Decimal>,
    pub items: Vec<ConstructionLineItem>,
}

/// Per-item estimates and whole-building totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingEstimate {
    pub kind: Option<CalculatorKind>,
    pub development_year: DevelopmentYearBracket,
    pub floor_area: Option<Decimal>,
    pub veranda_area: Option<Decimal>,
    pub items: Vec<EstimatedItem>,
    pub totals: EstimateTotals,
}

/// Whether an item takes part in the estimate for `kind`: not hard-excluded
/// and on the kind's whitelist.
pub fn is_estimated(item: &ConstructionLineItem, kind: Option<CalculatorKind>) -> bool {
    !is_hard_excluded(kind, item.element) && is_applicable(item.element, kind)
}

/// Filters, prices and aggregates a building's line items.
///
/// Items keep their input order. Inputs are not modified.
pub fn compute_building_estimate(
    request: &EstimateRequest,
    rates: &RateTable,
    config: &EstimatorConfig,
) -> BuildingEstimate {
    let ctx = EstimateContext {
        kind: request.kind,
        development_year: request.development_year,
        floor_area: request.floor_area,
        veranda_area: request.veranda_area,
        rates,
    };

    let items: Vec<EstimatedItem> = request
        .items
        .iter()
        .filter(|item| {
            let estimated = is_estimated(item, request.kind);
            if !estimated {
                log::debug!("{} dropped for {:?}", item.element, request.kind);
            }
            estimated
        })
        .map(|item| EstimatedItem {
            item: item.clone(),
            estimate: estimate_item(item, &ctx),
        })
        .collect();

    let totals = aggregate(items.iter().map(|i| &i.estimate), request.floor_area, config);

    BuildingEstimate {
        kind: request.kind,
        development_year: request.development_year,
        floor_area: request.floor_area,
        veranda_area: request.veranda_area,
        items,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::archetype::applicable_elements;
    use rust_decimal_macros::dec;

    const RATES: &str = "\
kind,identifier,first,second,third
Residential_SS_up_to_100m2,StockBricks,100,120,150
Residential_SS_up_to_100m2,Foundations,80,90,100
Residential_SS_up_to_100m2,StandardBathroom,300,320,340
Residential_SS_up_to_100m2,StandardKitchenUnits,25000,26000,27000
Residential_SS_up_to_100m2,TiledVeranda,40,45,50
Residential_SS_up_to_100m2,SteelCarPort,90,95,100
SHHA_House_Types,ConcreteSurfaceBed,60,65,70
SHHA_House_Types,StockBricks,70,75,80
Boundary_Wall,SlidingGate,4500,5000,5500
Boundary_Wall,BrickBoundaryWall,900,950,1000
";

    fn rates() -> RateTable {
        RateTable::read_csv(RATES.as_bytes()).unwrap()
    }

    fn ctx(rates: &RateTable, kind: CalculatorKind, floor_area: Option<Decimal>) -> EstimateContext<'_> {
        EstimateContext {
            kind: Some(kind),
            development_year: DevelopmentYearBracket::First,
            floor_area,
            veranda_area: None,
            rates,
        }
    }

    fn brickwork(quality: QualityOfFinish) -> ConstructionLineItem {
        ConstructionLineItem::new(Element::Brickwork, Some(PropertyOption::StockBricks), quality)
    }

    fn request(kind: Option<CalculatorKind>, items: Vec<ConstructionLineItem>) -> EstimateRequest {
        EstimateRequest {
            kind,
            development_year: DevelopmentYearBracket::First,
            floor_area: Some(dec!(50)),
            veranda_area: None,
            items,
        }
    }

    #[test]
    fn excellent_brickwork_is_rate_times_area() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let estimate = estimate_item(&brickwork(QualityOfFinish::Excellent), &ctx);
        assert_eq!(estimate.typical_estimate, dec!(5000));
        assert_eq!(estimate.quality_estimate, dec!(5000));
    }

    #[test]
    fn poor_brickwork_is_weighted() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let estimate = estimate_item(&brickwork(QualityOfFinish::Poor), &ctx);
        assert_eq!(estimate.typical_estimate, dec!(5000));
        assert_eq!(estimate.quality_estimate, dec!(3500));
    }

    #[test]
    fn development_year_selects_column() {
        let rates = rates();
        let mut ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(10)));
        ctx.development_year = DevelopmentYearBracket::Third;
        let estimate = estimate_item(&brickwork(QualityOfFinish::Excellent), &ctx);
        assert_eq!(estimate.typical_estimate, dec!(1500));
    }

    #[test]
    fn user_multiplier_replaces_floor_area() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = ConstructionLineItem::new(
            Element::SanitaryFittings,
            Some(PropertyOption::StandardBathroom),
            QualityOfFinish::Excellent,
        )
        .with_multiplier("Enter number of bathrooms", Some(dec!(2)));
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(600));
    }

    #[test]
    fn multiplier_identifier_without_value_is_zero() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = ConstructionLineItem::new(
            Element::CarPort,
            Some(PropertyOption::SteelCarPort),
            QualityOfFinish::Good,
        )
        .with_multiplier("Enter car-port area", None);
        assert_eq!(estimate_item(&item, &ctx), ItemEstimate::default());
    }

    #[test]
    fn veranda_uses_veranda_area_then_floor_area() {
        let rates = rates();
        let mut ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = ConstructionLineItem::new(
            Element::Veranda,
            Some(PropertyOption::TiledVeranda),
            QualityOfFinish::Excellent,
        );
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(2000));
        ctx.veranda_area = Some(dec!(12));
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(480));
        ctx.veranda_area = None;
        ctx.floor_area = None;
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, Decimal::ZERO);
    }

    #[test]
    fn boundary_wall_gate_is_priced_per_gate() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::BoundaryWall, Some(dec!(350)));
        let item = ConstructionLineItem::new(
            Element::Gate,
            Some(PropertyOption::SlidingGate),
            QualityOfFinish::Excellent,
        );
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(4500));
    }

    #[test]
    fn fitted_kitchen_exempt_for_small_residential() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(80)));
        let item = ConstructionLineItem::new(
            Element::CarpentryAndJoineryFittedKitchen,
            Some(PropertyOption::StandardKitchenUnits),
            QualityOfFinish::Good,
        );
        let estimate = estimate_item(&item, &ctx);
        assert_eq!(estimate.typical_estimate, dec!(25000));
        assert_eq!(estimate.quality_estimate, dec!(21250));
    }

    #[test]
    fn exempt_element_still_honours_user_multiplier() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::BoundaryWall, Some(dec!(350)));
        let item = ConstructionLineItem::new(
            Element::Gate,
            Some(PropertyOption::SlidingGate),
            QualityOfFinish::Excellent,
        )
        .with_multiplier("Enter number of gates", Some(dec!(2)));
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(9000));
    }

    #[test]
    fn missing_rate_yields_zero_estimates() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = ConstructionLineItem::new(
            Element::RoofingCover,
            Some(PropertyOption::ClayTiles),
            QualityOfFinish::Good,
        );
        assert_eq!(estimate_item(&item, &ctx), ItemEstimate::default());
    }

    #[test]
    fn unrecognised_quality_gives_zero_quality_estimate() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let mut item = brickwork(QualityOfFinish::Good);
        item.quality_of_finish = None;
        let estimate = estimate_item(&item, &ctx);
        assert_eq!(estimate.typical_estimate, dec!(5000));
        assert_eq!(estimate.quality_estimate, Decimal::ZERO);
    }

    #[test]
    fn option_less_element_is_priced_by_label() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = ConstructionLineItem::new(Element::Foundations, None, QualityOfFinish::Excellent);
        assert_eq!(item.rate_key(), "Foundations");
        assert_eq!(estimate_item(&item, &ctx).typical_estimate, dec!(4000));
    }

    #[test]
    fn quality_never_exceeds_typical() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(73.5)));
        for quality in QualityOfFinish::ALL {
            let estimate = estimate_item(&brickwork(*quality), &ctx);
            assert!(estimate.quality_estimate <= estimate.typical_estimate, "{quality}");
        }
    }

    #[test]
    fn pipeline_filters_and_preserves_order() {
        let items = vec![
            ConstructionLineItem::new(
                Element::Veranda,
                Some(PropertyOption::TiledVeranda),
                QualityOfFinish::Good,
            ),
            ConstructionLineItem::new(
                Element::Gate,
                Some(PropertyOption::SlidingGate),
                QualityOfFinish::Good,
            ),
            brickwork(QualityOfFinish::Excellent),
            ConstructionLineItem::new(Element::Foundations, None, QualityOfFinish::Poor),
        ];
        let req = request(Some(CalculatorKind::ResidentialSingleStoreyUpTo100), items);
        let result = compute_building_estimate(&req, &rates(), &EstimatorConfig::default());

        let elements: Vec<_> = result.items.iter().map(|i| i.item.element).collect();
        assert_eq!(
            elements,
            vec![Element::Veranda, Element::Brickwork, Element::Foundations]
        );
        // 40*50 + 100*50 + 80*50
        assert_eq!(result.totals.total_typical, dec!(11000));
        // 2000*0.85 + 5000 + 4000*0.7
        assert_eq!(result.totals.total_quality, dec!(9500));
        assert_eq!(result.totals.cost_per_area_typical, dec!(220));
        assert_eq!(result.totals.cost_per_area_quality, dec!(190));
    }

    #[test]
    fn pipeline_applies_shha_concrete_exclusion() {
        let items = vec![
            ConstructionLineItem::new(
                Element::Concrete,
                Some(PropertyOption::ConcreteSurfaceBed),
                QualityOfFinish::Good,
            ),
            brickwork(QualityOfFinish::Good),
        ];
        let req = request(Some(CalculatorKind::ShhaHouseTypes), items);
        let result = compute_building_estimate(&req, &rates(), &EstimatorConfig::default());
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item.element, Element::Brickwork);
        assert_eq!(result.items[0].estimate.typical_estimate, dec!(3500));

        // the standalone filter still lists Concrete for SHHA
        assert!(applicable_elements(Some(CalculatorKind::ShhaHouseTypes)).contains(&Element::Concrete));
    }

    #[test]
    fn filter_closure_holds_for_every_kind() {
        let items: Vec<_> = Element::ALL
            .iter()
            .map(|element| ConstructionLineItem {
                element: *element,
                property_option: element.options().first().copied(),
                quality_of_finish: Some(QualityOfFinish::Fair),
                multiplier_identifier: None,
                multiplier: None,
            })
            .collect();
        let rates = rates();
        for kind in CalculatorKind::ALL {
            let req = request(Some(*kind), items.clone());
            let result = compute_building_estimate(&req, &rates, &EstimatorConfig::default());
            for estimated in &result.items {
                assert!(is_applicable(estimated.item.element, Some(*kind)));
                assert!(!is_hard_excluded(Some(*kind), estimated.item.element));
            }
            let expected = applicable_elements(Some(*kind))
                .into_iter()
                .filter(|e| !is_hard_excluded(Some(*kind), *e))
                .count();
            assert_eq!(result.items.len(), expected, "{kind}");
        }
    }

    #[test]
    fn unknown_kind_keeps_every_item() {
        let items = vec![
            brickwork(QualityOfFinish::Good),
            ConstructionLineItem::new(
                Element::SwimmingPool,
                Some(PropertyOption::ConcretePool),
                QualityOfFinish::Good,
            ),
        ];
        let req = request(None, items);
        let result = compute_building_estimate(&req, &rates(), &EstimatorConfig::default());
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].estimate.typical_estimate, dec!(5000));
        assert_eq!(result.items[1].estimate.typical_estimate, Decimal::ZERO);
    }

    #[test]
    fn pipeline_is_idempotent_and_leaves_input_untouched() {
        let req = request(
            Some(CalculatorKind::ResidentialSingleStoreyUpTo100),
            vec![brickwork(QualityOfFinish::VeryGood)],
        );
        let before = req.clone();
        let rates = rates();
        let first = compute_building_estimate(&req, &rates, &EstimatorConfig::default());
        let second = compute_building_estimate(&req, &rates, &EstimatorConfig::default());
        assert_eq!(first, second);
        assert_eq!(req, before);
    }

    #[test]
    fn estimated_item_serialises_flat() {
        let rates = rates();
        let ctx = ctx(&rates, CalculatorKind::ResidentialSingleStoreyUpTo100, Some(dec!(50)));
        let item = brickwork(QualityOfFinish::Poor);
        let estimated = EstimatedItem {
            estimate: estimate_item(&item, &ctx),
            item,
        };
        let json = serde_json::to_value(&estimated).unwrap();
        assert_eq!(json["element"], "Brickwork");
        assert_eq!(json["property_option"], "StockBricks");
        assert_eq!(json["typical_estimate"], "5000");
        assert_eq!(json["quality_estimate"], "3500.0");
    }

    #[test]
    fn oversized_quantity_clamps_instead_of_overflowing() {
        let rates = RateTable::read_csv(
            "kind,identifier,first,second,third\n\
             Residential_SS_up_to_100m2,SteelCarPort,10000000000,10000000000,10000000000\n"
                .as_bytes(),
        )
        .unwrap();
        let carport = ConstructionLineItem::new(
            Element::CarPort,
            Some(PropertyOption::SteelCarPort),
            QualityOfFinish::Good,
        )
        .with_multiplier("Enter car-port area", Some(dec!(100000000000000000000)));
        let req = request(Some(CalculatorKind::ResidentialSingleStoreyUpTo100), vec![carport]);

        let estimate = compute_building_estimate(&req, &rates, &EstimatorConfig::default());
        assert_eq!(estimate.items.len(), 1);
        assert_eq!(estimate.items[0].estimate.typical_estimate, Decimal::MAX);
        assert!(estimate.items[0].estimate.quality_estimate < Decimal::MAX);
        assert_eq!(estimate.totals.total_typical, Decimal::MAX);
    }
}
