//! Pricing configuration.

use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_ONETIME_PRICE, DEFAULT_MAX_FIXED_VALUE, DEFAULT_MAX_PERCENT_VALUE,
    DEFAULT_TERM_MONTHS,
};
use crate::discounts::AmountFormat;
use crate::errors::{Error, Result};

pub const ENV_BASE_PRICE: &str = "SIDECART_BASE_PRICE";
pub const ENV_TERM_MONTHS: &str = "SIDECART_TERM_MONTHS";
pub const ENV_FLAT_MONTHLY_PRICE: &str = "SIDECART_FLAT_MONTHLY_PRICE";
pub const ENV_MAX_PERCENT: &str = "SIDECART_MAX_PERCENT";
pub const ENV_MAX_FIXED: &str = "SIDECART_MAX_FIXED";

/// Where the undiscounted monthly price comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthlyBasis {
    /// The discounted one-time price spread over the term
    #[default]
    AmortizedOnetime,
    /// A constant monthly price, independent of one-time discounts
    #[serde(rename_all = "camelCase")]
    Flat { monthly_price: Decimal },
}

/// Upper bounds on the value a shopper may enter in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLimits {
    pub max_percent: Decimal,
    pub max_fixed: Decimal,
}

impl DiscountLimits {
    pub fn max_for(&self, format: AmountFormat) -> Decimal {
        match format {
            AmountFormat::Percent => self.max_percent,
            AmountFormat::FixedCurrency => self.max_fixed,
        }
    }
}

impl Default for DiscountLimits {
    fn default() -> Self {
        Self {
            max_percent: DEFAULT_MAX_PERCENT_VALUE,
            max_fixed: DEFAULT_MAX_FIXED_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub base_onetime_price: Decimal,
    pub term_months: u32,
    pub monthly_basis: MonthlyBasis,
    pub limits: DiscountLimits,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_onetime_price: DEFAULT_BASE_ONETIME_PRICE,
            term_months: DEFAULT_TERM_MONTHS,
            monthly_basis: MonthlyBasis::default(),
            limits: DiscountLimits::default(),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidConfigValue(format!("{}={}", key, raw)))
}

impl PricingConfig {
    /// Reads overrides from the process environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns for the
    /// `SIDECART_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BASE_PRICE) {
            config.base_onetime_price = parse_value(ENV_BASE_PRICE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TERM_MONTHS) {
            config.term_months = parse_value(ENV_TERM_MONTHS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FLAT_MONTHLY_PRICE) {
            config.monthly_basis = MonthlyBasis::Flat {
                monthly_price: parse_value(ENV_FLAT_MONTHLY_PRICE, &raw)?,
            };
        }
        if let Some(raw) = lookup(ENV_MAX_PERCENT) {
            config.limits.max_percent = parse_value(ENV_MAX_PERCENT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_FIXED) {
            config.limits.max_fixed = parse_value(ENV_MAX_FIXED, &raw)?;
        }

        config.validate()?;
        debug!("Pricing config loaded: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_onetime_price < Decimal::ZERO {
            return Err(Error::InvalidConfigValue(
                "base one-time price must not be negative".to_string(),
            ));
        }
        if self.term_months == 0 {
            return Err(Error::InvalidConfigValue(
                "term must be at least one month".to_string(),
            ));
        }
        if let MonthlyBasis::Flat { monthly_price } = self.monthly_basis {
            if monthly_price < Decimal::ZERO {
                return Err(Error::InvalidConfigValue(
                    "flat monthly price must not be negative".to_string(),
                ));
            }
        }
        if self.limits.max_percent < Decimal::ZERO || self.limits.max_fixed < Decimal::ZERO {
            return Err(Error::InvalidConfigValue(
                "discount limits must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = PricingConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PricingConfig::default());
        assert_eq!(config.base_onetime_price, dec!(1000));
        assert_eq!(config.term_months, 12);
        assert_eq!(config.monthly_basis, MonthlyBasis::AmortizedOnetime);
        assert_eq!(config.limits.max_for(AmountFormat::Percent), dec!(5));
        assert_eq!(config.limits.max_for(AmountFormat::FixedCurrency), dec!(50));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = PricingConfig::from_lookup(lookup_from(&[
            (ENV_BASE_PRICE, "1499.95"),
            (ENV_TERM_MONTHS, "24"),
            (ENV_FLAT_MONTHLY_PRICE, " 39.99 "),
            (ENV_MAX_PERCENT, "10"),
        ]))
        .unwrap();

        assert_eq!(config.base_onetime_price, dec!(1499.95));
        assert_eq!(config.term_months, 24);
        assert_eq!(
            config.monthly_basis,
            MonthlyBasis::Flat {
                monthly_price: dec!(39.99)
            }
        );
        assert_eq!(config.limits.max_percent, dec!(10));
        assert_eq!(config.limits.max_fixed, dec!(50));
    }

    #[test]
    fn test_unparseable_value_is_rejected() {
        let err = PricingConfig::from_lookup(lookup_from(&[(ENV_TERM_MONTHS, "twelve")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(msg) if msg.contains("twelve")));
    }

    #[test]
    fn test_zero_term_is_rejected() {
        let err =
            PricingConfig::from_lookup(lookup_from(&[(ENV_TERM_MONTHS, "0")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_negative_base_price_is_rejected() {
        let err =
            PricingConfig::from_lookup(lookup_from(&[(ENV_BASE_PRICE, "-1")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_monthly_basis_serialization() {
        let json = serde_json::to_value(MonthlyBasis::Flat {
            monthly_price: dec!(40),
        })
        .unwrap();
        assert_eq!(json["type"], "FLAT");
        assert_eq!(json["monthlyPrice"], 40.0);

        let amortized = serde_json::to_value(MonthlyBasis::AmortizedOnetime).unwrap();
        assert_eq!(amortized["type"], "AMORTIZED_ONETIME");
    }
}
