//! Discounts module - domain models, seed catalog and the session collection.

mod discounts_catalog;
mod discounts_model;
mod discounts_store;



pub use discounts_catalog::{DiscountCatalogTrait, JsonDiscountCatalog, StaticDiscountCatalog};
pub use discounts_model::{
    AmountFormat, Applicability, ApplicabilityPeriod, Discount, DiscountAmount, NewDiscount,
};
pub use discounts_store::{generate_discount_id, DiscountStore};
