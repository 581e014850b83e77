//! Core error types for the side cart.
//!
//! Every failure is local and recoverable: the shopper corrects the input,
//! cancels the editor, or the host rejects the action. Nothing here is fatal.

use std::num::ParseIntError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the side cart core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Discount operation failed: {0}")]
    Discount(#[from] DiscountError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Failed to load discount catalog: {0}")]
    Catalog(String),

    #[error("Price calculation failed: {0}")]
    Calculation(#[from] CalculationError),
}

/// Errors raised while deriving totals from a discount collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// An intermediate amount left the range `Decimal` can represent.
    #[error("Amount overflowed while computing the {0}")]
    Overflow(String),

    #[error("The term must be at least one month")]
    ZeroTerm,
}

/// Errors raised by discount collection mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    #[error("Discount '{0}' not found")]
    NotFound(String),

    #[error("Discount id '{0}' is already in use")]
    DuplicateId(String),

    /// Only discounts added through the editor may be removed.
    #[error("Discount '{0}' is predefined and cannot be removed")]
    NotUserCreated(String),

    /// Manual discounts are always applied and have no switch.
    #[error("Discount '{0}' cannot be toggled")]
    NotToggleable(String),

    #[error("The value of discount '{0}' cannot be changed")]
    ValueNotEditable(String),
}

/// Validation errors for shopper input.
///
/// The `Display` output of these variants is what the editor shows next to
/// the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' is not a valid number")]
    NumberParse(String),

    #[error("Failed to parse whole number: {0}")]
    IntegerParse(#[from] ParseIntError),

    #[error("The discount cannot be negative")]
    NegativeAmount,

    /// `limit` is already rendered with its unit, e.g. `5%` or `€ 50`.
    #[error("The discount cannot exceed {limit}")]
    ExceedsLimit { limit: String },

    #[error("The discount is too large to calculate a total")]
    AmountOutOfRange,

    #[error("Duration must be between 1 and {max_months} months")]
    InvalidDuration { max_months: u32 },

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(err.to_string())
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Validation(ValidationError::IntegerParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
