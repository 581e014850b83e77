//! Editor domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discounts::NewDiscount;

/// What the editor was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorMode {
    /// Adding a manual discount
    Create,
    /// Changing the value of an existing discount
    #[serde(rename_all = "camelCase")]
    Edit { discount_id: String },
}

/// Result of confirming the editor, to be applied to the discount store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorOutcome {
    Created(NewDiscount),
    #[serde(rename_all = "camelCase")]
    ValueUpdated { id: String, amount_value: Decimal },
}
