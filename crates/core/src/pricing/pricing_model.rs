//! Pricing domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::discounts::{AmountFormat, ApplicabilityPeriod, Discount};

/// Totals shown to the shopper for the current discount selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub total_onetime_costs: Decimal,
    pub normal_monthly: Decimal,
    pub discounted_monthly: Decimal,
    pub discount_months: u32,
}

impl PriceSummary {
    /// Copy with every amount rounded to display precision.
    pub fn rounded(&self) -> Self {
        Self {
            total_onetime_costs: self.total_onetime_costs.round_dp(DISPLAY_DECIMAL_PRECISION),
            normal_monthly: self.normal_monthly.round_dp(DISPLAY_DECIMAL_PRECISION),
            discounted_monthly: self.discounted_monthly.round_dp(DISPLAY_DECIMAL_PRECISION),
            discount_months: self.discount_months,
        }
    }

    pub fn schedule(&self) -> MonthlySchedule {
        MonthlySchedule {
            normal_monthly: self.normal_monthly,
            discounted_monthly: self.discounted_monthly,
            discount_months: self.discount_months,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySchedule {
    pub normal_monthly: Decimal,
    pub discounted_monthly: Decimal,
    pub discount_months: u32,
}

/// One labeled period of the monthly schedule, e.g. `First 3 months`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub label: String,
    pub months: u32,
    pub total: Decimal,
}

/// Split of the term into the discounted first period and the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePresentation {
    pub first_period: ScheduleRow,
    pub rest_period: ScheduleRow,
}

/// An enabled discount as listed in the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    pub id: String,
    pub name: String,
    pub amount_format: AmountFormat,
    pub amount_value: Decimal,
    pub applicability_period: ApplicabilityPeriod,
}

impl From<&Discount> for DiscountLine {
    fn from(discount: &Discount) -> Self {
        Self {
            id: discount.id.clone(),
            name: discount.name.clone(),
            amount_format: discount.amount_format,
            amount_value: discount.amount_value,
            applicability_period: discount.period(),
        }
    }
}

/// Everything the overview card reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOverview {
    pub subtotal_onetime: Decimal,
    pub discount_lines: Vec<DiscountLine>,
    pub summary: PriceSummary,
    pub schedule: Option<SchedulePresentation>,
}
