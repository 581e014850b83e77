//! Pricing module - totals and schedule derived from the enabled discounts.

mod pricing_calculator;
mod pricing_model;


pub use pricing_calculator::{
    compute_monthly_schedule, compute_onetime_total, compute_schedule_presentation, overview,
    select_monthly_discount, summarize,
};
pub use pricing_model::{
    DiscountLine, MonthlySchedule, PriceOverview, PriceSummary, SchedulePresentation, ScheduleRow,
};
