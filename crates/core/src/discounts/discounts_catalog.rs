//! Sources of the discounts a session starts with.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::discounts_model::{AmountFormat, Applicability, Discount};
use crate::constants::PREDEFINED_DISCOUNT_NAME;
use crate::errors::Result;

/// Trait for loading the discounts offered at session start
pub trait DiscountCatalogTrait: Send + Sync {
    fn load_discounts(&self) -> Result<Vec<Discount>>;
}

/// The fixed catalog shipped with the storefront.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDiscountCatalog;

fn predefined(
    id: &str,
    amount_format: AmountFormat,
    amount_value: Decimal,
    is_editable_value: bool,
    applicability: Applicability,
) -> Discount {
    Discount {
        id: id.to_string(),
        name: PREDEFINED_DISCOUNT_NAME.to_string(),
        amount_format,
        amount_value,
        is_editable_value,
        is_user_created: false,
        is_enabled: false,
        applicability,
        description: None,
    }
}

impl DiscountCatalogTrait for StaticDiscountCatalog {
    fn load_discounts(&self) -> Result<Vec<Discount>> {
        use AmountFormat::{FixedCurrency, Percent};
        let one_time = Applicability::OneTime;

        Ok(vec![
            predefined("discount-1", FixedCurrency, dec!(250), false, one_time),
            predefined("discount-2", Percent, dec!(50), true, one_time),
            predefined("discount-3", FixedCurrency, dec!(250), false, one_time),
            predefined("discount-4", FixedCurrency, dec!(0), false, one_time),
            predefined("discount-5", FixedCurrency, dec!(250), false, one_time),
            predefined("discount-6", Percent, dec!(50), true, Applicability::monthly(3)),
            predefined("discount-7", FixedCurrency, dec!(25), false, one_time),
            predefined("discount-8", FixedCurrency, dec!(25), false, one_time),
        ])
    }
}

/// Catalog read from a JSON array of discounts.
#[derive(Debug, Clone)]
pub struct JsonDiscountCatalog {
    raw: String,
}

impl JsonDiscountCatalog {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl DiscountCatalogTrait for JsonDiscountCatalog {
    fn load_discounts(&self) -> Result<Vec<Discount>> {
        let discounts: Vec<Discount> = serde_json::from_str(&self.raw)?;
        debug!("Loaded {} discounts from JSON catalog", discounts.len());
        Ok(discounts)
    }
}
