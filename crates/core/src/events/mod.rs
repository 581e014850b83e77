//! Discount events module.
//!
//! Provides the event types and the sink trait the session reports committed
//! changes through. Presentation adapters implement the sink to refresh the
//! views that read the totals.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
