//! Price calculation for the side cart.
//!
//! All functions are pure and recompute from the full input every time, so a
//! result never depends on the order in which discounts were toggled.
//!
//! Semantics that must hold:
//! - percentages are taken of the price the discount applies to (the base
//!   one-time price, or the normal monthly price), never of a running
//!   subtotal, so discounts add up instead of compounding
//! - results are not clamped; discounts larger than the price give a
//!   negative total
//! - arithmetic is checked; leaving the `Decimal` range is an error, not a
//!   panic
//! - only the first enabled monthly discount with a positive duration counts

use log::{debug, warn};
use rust_decimal::Decimal;

use super::pricing_model::{
    DiscountLine, MonthlySchedule, PriceOverview, PriceSummary, SchedulePresentation, ScheduleRow,
};
use crate::config::{MonthlyBasis, PricingConfig};
use crate::discounts::{Discount, DiscountAmount};
use crate::errors::{CalculationError, Error, Result};

fn overflow(what: &str) -> Error {
    warn!("Decimal overflow while computing the {}", what);
    CalculationError::Overflow(what.to_string()).into()
}

/// One-time price after subtracting every discount in `amounts` from `base_price`.
///
/// Fails with [`CalculationError::Overflow`] when a reduction or the running
/// sum leaves the `Decimal` range.
pub fn compute_onetime_total<I>(base_price: Decimal, amounts: I) -> Result<Decimal>
where
    I: IntoIterator<Item = DiscountAmount>,
{
    let reduction = amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| {
            amount
                .reduction(base_price)
                .and_then(|reduction| sum.checked_add(reduction))
        })
        .ok_or_else(|| overflow("one-time total"))?;
    base_price
        .checked_sub(reduction)
        .ok_or_else(|| overflow("one-time total"))
}

/// The monthly discount honored by the schedule: the first enabled monthly
/// discount that has a positive duration. Later ones are ignored.
pub fn select_monthly_discount<'a, I>(discounts: I) -> Option<&'a Discount>
where
    I: IntoIterator<Item = &'a Discount>,
{
    discounts
        .into_iter()
        .find(|d| d.is_enabled && d.is_monthly() && d.active_duration_months().is_some())
}

/// Spreads `base_after_onetime` over `term_months` and applies the monthly
/// discount, if any, to the resulting monthly price.
///
/// A zero term is rejected with [`CalculationError::ZeroTerm`].
pub fn compute_monthly_schedule(
    base_after_onetime: Decimal,
    term_months: u32,
    monthly_discount: Option<&Discount>,
) -> Result<MonthlySchedule> {
    if term_months == 0 {
        return Err(CalculationError::ZeroTerm.into());
    }
    let normal_monthly = base_after_onetime
        .checked_div(Decimal::from(term_months))
        .ok_or_else(|| overflow("monthly price"))?;
    apply_monthly_discount(normal_monthly, monthly_discount)
}

fn apply_monthly_discount(
    normal_monthly: Decimal,
    monthly_discount: Option<&Discount>,
) -> Result<MonthlySchedule> {
    match monthly_discount.and_then(|d| d.active_duration_months().map(|months| (d, months))) {
        Some((discount, months)) => {
            let discounted_monthly = discount
                .reduction(normal_monthly)
                .and_then(|reduction| normal_monthly.checked_sub(reduction))
                .ok_or_else(|| overflow("discounted monthly price"))?;
            Ok(MonthlySchedule {
                normal_monthly,
                discounted_monthly,
                discount_months: months,
            })
        }
        None => Ok(MonthlySchedule {
            normal_monthly,
            discounted_monthly: normal_monthly,
            discount_months: 0,
        }),
    }
}

fn period_total(monthly: Decimal, months: u32) -> Result<Decimal> {
    monthly
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| overflow("schedule total"))
}

/// Rows shown under the one-time total when a monthly discount is active.
///
/// Returns `None` when no discount months apply. A duration longer than the
/// term leaves an empty rest period rather than a negative one.
pub fn compute_schedule_presentation(
    schedule: &MonthlySchedule,
    term_months: u32,
) -> Result<Option<SchedulePresentation>> {
    if schedule.discount_months == 0 {
        return Ok(None);
    }

    let first_months = schedule.discount_months;
    let rest_months = term_months.saturating_sub(first_months);

    Ok(Some(SchedulePresentation {
        first_period: ScheduleRow {
            label: format!("First {} months", first_months),
            months: first_months,
            total: period_total(schedule.discounted_monthly, first_months)?,
        },
        rest_period: ScheduleRow {
            label: format!("Next {} months", rest_months),
            months: rest_months,
            total: period_total(schedule.normal_monthly, rest_months)?,
        },
    }))
}

/// Full pipeline over a discount collection in its stored order.
pub fn summarize(config: &PricingConfig, discounts: &[Discount]) -> Result<PriceSummary> {
    let total_onetime_costs = compute_onetime_total(
        config.base_onetime_price,
        discounts
            .iter()
            .filter(|d| d.is_enabled && d.is_one_time())
            .map(DiscountAmount::from),
    )?;

    let monthly_discount = select_monthly_discount(discounts);
    let schedule = match config.monthly_basis {
        MonthlyBasis::AmortizedOnetime => {
            compute_monthly_schedule(total_onetime_costs, config.term_months, monthly_discount)?
        }
        MonthlyBasis::Flat { monthly_price } => {
            apply_monthly_discount(monthly_price, monthly_discount)?
        }
    };

    let summary = PriceSummary {
        total_onetime_costs,
        normal_monthly: schedule.normal_monthly,
        discounted_monthly: schedule.discounted_monthly,
        discount_months: schedule.discount_months,
    };
    debug!(
        "Recalculated totals: onetime {}, monthly {} ({} for {} months)",
        summary.total_onetime_costs,
        summary.normal_monthly,
        summary.discounted_monthly,
        summary.discount_months
    );
    Ok(summary)
}

/// Builds the overview card data from an already computed summary.
pub fn overview(
    config: &PricingConfig,
    discounts: &[Discount],
    summary: &PriceSummary,
) -> Result<PriceOverview> {
    Ok(PriceOverview {
        subtotal_onetime: config.base_onetime_price,
        discount_lines: discounts
            .iter()
            .filter(|d| d.is_enabled)
            .map(DiscountLine::from)
            .collect(),
        summary: *summary,
        schedule: compute_schedule_presentation(&summary.schedule(), config.term_months)?,
    })
}
