//! Discount event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::PriceSummary;

/// Events emitted by the session after a committed change.
///
/// Presentation adapters use them to refresh what they show. Every store
/// change is followed by a `TotalsRecalculated` event carrying the new
/// summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountEvent {
    DiscountToggled { id: String, is_enabled: bool },

    DiscountAdded { id: String },

    DiscountRemoved { id: String },

    DiscountValueUpdated { id: String, amount_value: Decimal },

    TotalsRecalculated { summary: PriceSummary },
}

impl DiscountEvent {
    pub fn discount_toggled(id: impl Into<String>, is_enabled: bool) -> Self {
        Self::DiscountToggled {
            id: id.into(),
            is_enabled,
        }
    }

    pub fn discount_added(id: impl Into<String>) -> Self {
        Self::DiscountAdded { id: id.into() }
    }

    pub fn discount_removed(id: impl Into<String>) -> Self {
        Self::DiscountRemoved { id: id.into() }
    }

    pub fn discount_value_updated(id: impl Into<String>, amount_value: Decimal) -> Self {
        Self::DiscountValueUpdated {
            id: id.into(),
            amount_value,
        }
    }

    pub fn totals_recalculated(summary: PriceSummary) -> Self {
        Self::TotalsRecalculated { summary }
    }

    /// Id of the discount the event is about, if any.
    pub fn discount_id(&self) -> Option<&str> {
        match self {
            Self::DiscountToggled { id, .. }
            | Self::DiscountAdded { id }
            | Self::DiscountRemoved { id }
            | Self::DiscountValueUpdated { id, .. } => Some(id),
            Self::TotalsRecalculated { .. } => None,
        }
    }
}
