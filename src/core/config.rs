use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// VAT rate assumed to be included in all rates unless configured otherwise.
pub const DEFAULT_VAT_RATE: Decimal = dec!(0.14);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VAT rate must not be negative: {0}")]
    NegativeVatRate(Decimal),
}

/// Settings that vary by jurisdiction rather than by building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    vat_rate: Decimal,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

impl EstimatorConfig {
    pub fn with_vat_rate(vat_rate: Decimal) -> Result<Self, ConfigError> {
        if vat_rate.is_sign_negative() && !vat_rate.is_zero() {
            return Err(ConfigError::NegativeVatRate(vat_rate));
        }
        Ok(EstimatorConfig { vat_rate })
    }

    pub fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    /// Divisor that strips VAT from a VAT-inclusive amount (1.14 at 14%).
    pub fn vat_divisor(&self) -> Decimal {
        Decimal::ONE.saturating_add(self.vat_rate)
    }

    pub fn exclusive_of_vat(&self, amount: Decimal) -> Decimal {
        amount / self.vat_divisor()
    }
}
