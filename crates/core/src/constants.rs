use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Undiscounted one-time purchase price
pub const DEFAULT_BASE_ONETIME_PRICE: Decimal = dec!(1000);

/// Number of months the one-time price is amortized over
pub const DEFAULT_TERM_MONTHS: u32 = 12;

/// Highest percent value a shopper may enter in the editor
pub const DEFAULT_MAX_PERCENT_VALUE: Decimal = dec!(5);

/// Highest fixed currency value a shopper may enter in the editor
pub const DEFAULT_MAX_FIXED_VALUE: Decimal = dec!(50);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Prefix for generated discount ids
pub const DISCOUNT_ID_PREFIX: &str = "discount-";

/// Display name shared by the predefined catalog entries
pub const PREDEFINED_DISCOUNT_NAME: &str = "Discount name";

/// Display name given to discounts added through the editor
pub const MANUAL_DISCOUNT_NAME: &str = "Manual Discount";

/// Symbol of the single supported currency
pub const CURRENCY_SYMBOL: &str = "€";
