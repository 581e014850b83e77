//! Side cart core - discounts, price calculation and the discount editor.
//!
//! This crate holds the logic behind the storefront side cart: the set of
//! discounts a shopper can toggle or add, and the one-time and monthly totals
//! derived from them. Rendering and currency formatting are left to the host.

pub mod config;
pub mod constants;
pub mod discounts;
pub mod editor;
pub mod errors;
pub mod events;
pub mod pricing;
pub mod session;

pub use config::{DiscountLimits, MonthlyBasis, PricingConfig};
pub use discounts::*;
pub use editor::{DiscountEditor, EditorMode, EditorOutcome};
pub use pricing::{PriceOverview, PriceSummary};
pub use session::DiscountSession;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
