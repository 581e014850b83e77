//! Session module - the state container the storefront view owns.

mod session_service;


pub use session_service::DiscountSession;
