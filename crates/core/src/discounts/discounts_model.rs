//! Discount domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::CURRENCY_SYMBOL;
use crate::errors::ValidationError;

/// How a discount amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountFormat {
    /// Percent of the price the discount is applied to
    Percent,
    /// Absolute amount in currency units
    FixedCurrency,
}

impl AmountFormat {
    pub fn symbol(&self) -> &'static str {
        match self {
            AmountFormat::Percent => "%",
            AmountFormat::FixedCurrency => CURRENCY_SYMBOL,
        }
    }

    /// Amount taken off `basis` by a discount of `value` in this format, or
    /// `None` when the product does not fit in a `Decimal`.
    pub fn reduction(&self, value: Decimal, basis: Decimal) -> Option<Decimal> {
        match self {
            AmountFormat::Percent => basis
                .checked_mul(value)
                .and_then(|scaled| scaled.checked_div(dec!(100))),
            AmountFormat::FixedCurrency => Some(value),
        }
    }

    /// Renders a value with its unit, e.g. `5%` or `€ 50`.
    pub fn describe(&self, value: Decimal) -> String {
        match self {
            AmountFormat::Percent => format!("{}%", value.normalize()),
            AmountFormat::FixedCurrency => format!("{} {}", CURRENCY_SYMBOL, value.normalize()),
        }
    }
}

impl fmt::Display for AmountFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for AmountFormat {
    type Err = ValidationError;

    /// Accepts the display symbols as well as the serialized names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "%" | "PERCENT" => Ok(AmountFormat::Percent),
            "€" | "FIXED_CURRENCY" => Ok(AmountFormat::FixedCurrency),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown discount format '{}'",
                other
            ))),
        }
    }
}

/// Which price a discount reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicabilityPeriod {
    #[default]
    OneTime,
    Monthly,
}

impl ApplicabilityPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicabilityPeriod::OneTime => "One Time",
            ApplicabilityPeriod::Monthly => "Monthly",
        }
    }
}

/// Period-specific part of a discount, tagged by `applicabilityPeriod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "applicabilityPeriod", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Applicability {
    #[default]
    OneTime,
    Monthly {
        /// Months the reduced monthly price applies before the full price returns
        #[serde(
            rename = "monthlyDurationMonths",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        monthly_duration_months: Option<u32>,
    },
}

impl Applicability {
    pub fn monthly(duration_months: u32) -> Self {
        Applicability::Monthly {
            monthly_duration_months: Some(duration_months),
        }
    }

    pub fn period(&self) -> ApplicabilityPeriod {
        match self {
            Applicability::OneTime => ApplicabilityPeriod::OneTime,
            Applicability::Monthly { .. } => ApplicabilityPeriod::Monthly,
        }
    }

    pub fn duration_months(&self) -> Option<u32> {
        match self {
            Applicability::OneTime => None,
            Applicability::Monthly {
                monthly_duration_months,
            } => *monthly_duration_months,
        }
    }
}

/// Domain model representing one offer or manual adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub name: String,
    pub amount_format: AmountFormat,
    pub amount_value: Decimal,
    pub is_editable_value: bool,
    pub is_user_created: bool,
    pub is_enabled: bool,
    #[serde(flatten)]
    pub applicability: Applicability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Discount {
    pub fn period(&self) -> ApplicabilityPeriod {
        self.applicability.period()
    }

    pub fn is_one_time(&self) -> bool {
        self.period() == ApplicabilityPeriod::OneTime
    }

    pub fn is_monthly(&self) -> bool {
        self.period() == ApplicabilityPeriod::Monthly
    }

    /// Positive duration of a monthly discount; `None` for one-time discounts
    /// and for monthly discounts without a usable duration.
    pub fn active_duration_months(&self) -> Option<u32> {
        self.applicability.duration_months().filter(|months| *months > 0)
    }

    /// Amount this discount takes off `basis`; `None` on overflow.
    pub fn reduction(&self, basis: Decimal) -> Option<Decimal> {
        self.amount_format.reduction(self.amount_value, basis)
    }
}

/// Input model for adding a discount through the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscount {
    pub id: Option<String>,
    pub amount_format: AmountFormat,
    pub amount_value: Decimal,
    #[serde(flatten)]
    pub applicability: Applicability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One `(format, value)` contribution to a total.
///
/// Used where a draft value has to be combined with stored discounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountAmount {
    pub amount_format: AmountFormat,
    pub amount_value: Decimal,
}

impl DiscountAmount {
    pub fn new(amount_format: AmountFormat, amount_value: Decimal) -> Self {
        Self {
            amount_format,
            amount_value,
        }
    }

    pub fn reduction(&self, basis: Decimal) -> Option<Decimal> {
        self.amount_format.reduction(self.amount_value, basis)
    }
}

impl From<&Discount> for DiscountAmount {
    fn from(discount: &Discount) -> Self {
        DiscountAmount::new(discount.amount_format, discount.amount_value)
    }
}
