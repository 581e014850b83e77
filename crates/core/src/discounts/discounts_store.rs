use std::collections::HashSet;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::discounts_model::{Discount, NewDiscount};
use crate::constants::{DISCOUNT_ID_PREFIX, MANUAL_DISCOUNT_NAME};
use crate::errors::{DiscountError, Result, ValidationError};

/// Ordered collection of the discounts of one session.
///
/// Mutations never touch `self`: each returns a new store with the change
/// applied, and existing entries keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiscountStore {
    discounts: Vec<Discount>,
}

/// Creates a fresh discount id, e.g. `discount-3f2b...`.
pub fn generate_discount_id() -> String {
    format!("{}{}", DISCOUNT_ID_PREFIX, Uuid::new_v4().simple())
}

fn ensure_non_negative(value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount.into());
    }
    Ok(())
}

impl DiscountStore {
    /// Builds a store, rejecting duplicate ids and negative amounts.
    pub fn new(discounts: Vec<Discount>) -> Result<Self> {
        let mut seen = HashSet::new();
        for discount in &discounts {
            if !seen.insert(discount.id.as_str()) {
                return Err(DiscountError::DuplicateId(discount.id.clone()).into());
            }
            ensure_non_negative(discount.amount_value)?;
        }
        Ok(Self { discounts })
    }

    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Discount> {
        self.discounts.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Enabled discounts in collection order.
    pub fn enabled(&self) -> impl Iterator<Item = &Discount> {
        self.discounts.iter().filter(|d| d.is_enabled)
    }

    fn require(&self, id: &str) -> Result<&Discount> {
        self.get(id).ok_or_else(|| {
            warn!("Discount {} not found", id);
            DiscountError::NotFound(id.to_string()).into()
        })
    }

    /// Returns a copy with the discount identified by `id` replaced by `f(discount)`.
    fn map_one<F>(&self, id: &str, f: F) -> Self
    where
        F: Fn(&Discount) -> Discount,
    {
        let discounts = self
            .discounts
            .iter()
            .map(|d| if d.id == id { f(d) } else { d.clone() })
            .collect();
        Self { discounts }
    }

    /// Flips `is_enabled` of a predefined discount.
    pub fn toggle_enabled(&self, id: &str) -> Result<Self> {
        let discount = self.require(id)?;
        if discount.is_user_created {
            warn!("Refusing to toggle manual discount {}", id);
            return Err(DiscountError::NotToggleable(id.to_string()).into());
        }

        debug!(
            "Toggling discount {}: enabled {} -> {}",
            id, discount.is_enabled, !discount.is_enabled
        );
        Ok(self.map_one(id, |d| Discount {
            is_enabled: !d.is_enabled,
            ..d.clone()
        }))
    }

    /// Appends a shopper-created discount. It starts enabled and editable.
    pub fn add_user_discount(&self, new_discount: NewDiscount) -> Result<Self> {
        ensure_non_negative(new_discount.amount_value)?;

        let id = match new_discount.id {
            Some(id) if self.contains(&id) => {
                warn!("Discount id {} is already in use", id);
                return Err(DiscountError::DuplicateId(id).into());
            }
            Some(id) => id,
            None => {
                let mut id = generate_discount_id();
                while self.contains(&id) {
                    id = generate_discount_id();
                }
                id
            }
        };

        debug!(
            "Adding manual discount {} ({} {})",
            id, new_discount.amount_value, new_discount.amount_format
        );

        let mut discounts = self.discounts.clone();
        discounts.push(Discount {
            id,
            name: MANUAL_DISCOUNT_NAME.to_string(),
            amount_format: new_discount.amount_format,
            amount_value: new_discount.amount_value,
            is_editable_value: true,
            is_user_created: true,
            is_enabled: true,
            applicability: new_discount.applicability,
            description: new_discount.description,
        });
        Ok(Self { discounts })
    }

    /// Removes a shopper-created discount. Predefined discounts are rejected.
    pub fn remove_user_discount(&self, id: &str) -> Result<Self> {
        let discount = self.require(id)?;
        if !discount.is_user_created {
            warn!("Refusing to remove predefined discount {}", id);
            return Err(DiscountError::NotUserCreated(id.to_string()).into());
        }

        debug!("Removing manual discount {}", id);
        let discounts = self
            .discounts
            .iter()
            .filter(|d| d.id != id)
            .cloned()
            .collect();
        Ok(Self { discounts })
    }

    /// Replaces the amount of a discount whose value is editable. Every other
    /// field, the id included, is preserved.
    pub fn update_value(&self, id: &str, amount_value: Decimal) -> Result<Self> {
        let discount = self.require(id)?;
        if !discount.is_editable_value {
            warn!("Refusing to change the value of discount {}", id);
            return Err(DiscountError::ValueNotEditable(id.to_string()).into());
        }
        ensure_non_negative(amount_value)?;

        debug!(
            "Updating discount {} value {} -> {}",
            id, discount.amount_value, amount_value
        );
        Ok(self.map_one(id, |d| Discount {
            amount_value,
            ..d.clone()
        }))
    }
}
