//! Editor module - the add/edit discount form with validation and live preview.

mod editor_model;
mod editor_service;


pub use editor_model::{EditorMode, EditorOutcome};
pub use editor_service::DiscountEditor;
