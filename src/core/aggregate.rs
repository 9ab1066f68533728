use super::config::EstimatorConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Typical and quality-adjusted cost of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ItemEstimate {
    pub typical_estimate: Decimal,
    pub quality_estimate: Decimal,
}

/// Whole-building figures derived from the item estimates.
///
/// Per-area figures are zero when no floor area was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EstimateTotals {
    pub total_typical: Decimal,
    pub total_quality: Decimal,
    pub cost_per_area_typical: Decimal,
    pub cost_per_area_quality: Decimal,
    pub total_typical_excl_vat: Decimal,
    pub total_quality_excl_vat: Decimal,
    pub cost_per_area_typical_excl_vat: Decimal,
    pub cost_per_area_quality_excl_vat: Decimal,
    /// `None` when the quality total is zero
    pub obsolescence_percent: Option<Decimal>,
}

/// Sums item estimates and derives unit-area and VAT-exclusive figures.
pub fn aggregate<'a, I>(items: I, floor_area: Option<Decimal>, config: &EstimatorConfig) -> EstimateTotals
where
    I: IntoIterator<Item = &'a ItemEstimate>,
{
    let (total_typical, total_quality) = items
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(typical, quality), item| {
            (
                typical.saturating_add(item.typical_estimate),
                quality.saturating_add(item.quality_estimate),
            )
        });

    let total_typical_excl_vat = config.exclusive_of_vat(total_typical);
    let total_quality_excl_vat = config.exclusive_of_vat(total_quality);

    let per_area = |amount: Decimal| match floor_area {
        Some(area) if !area.is_zero() => saturating_div(amount, area),
        _ => Decimal::ZERO,
    };

    let totals = EstimateTotals {
        total_typical,
        total_quality,
        cost_per_area_typical: per_area(total_typical),
        cost_per_area_quality: per_area(total_quality),
        total_typical_excl_vat,
        total_quality_excl_vat,
        cost_per_area_typical_excl_vat: per_area(total_typical_excl_vat),
        cost_per_area_quality_excl_vat: per_area(total_quality_excl_vat),
        obsolescence_percent: obsolescence_percent(total_typical, total_quality),
    };
    log::info!(
        "Totals: typical {}, quality {}, per area {} / {}",
        totals.total_typical,
        totals.total_quality,
        totals.cost_per_area_typical,
        totals.cost_per_area_quality
    );
    totals
}

/// Percentage loss from `before` (typical) to `after` (quality-adjusted),
/// expressed relative to `after`.
///
/// Returns `None` when `after` is zero or the percentage is out of range.
pub fn obsolescence_percent(before: Decimal, after: Decimal) -> Option<Decimal> {
    before
        .checked_sub(after)?
        .checked_div(after)?
        .checked_mul(dec!(100))
}

/// `amount / divisor`, clamped to the representable range on overflow.
///
/// `divisor` must be non-zero.
fn saturating_div(amount: Decimal, divisor: Decimal) -> Decimal {
    amount.checked_div(divisor).unwrap_or_else(|| {
        log::warn!("{} / {} is out of range, clamping", amount, divisor);
        if amount.is_sign_negative() == divisor.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
