//! Discount event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DiscountEvent;

/// Trait for receiving discount events.
///
/// `emit()` runs synchronously inside the session operation that produced
/// the event, so implementations must not block. Emitting never affects the
/// outcome of the operation.
pub trait DiscountEventSink: Send + Sync {
    fn emit(&self, event: DiscountEvent);

    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<DiscountEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for hosts that poll the session instead.
#[derive(Clone, Default)]
pub struct NoOpDiscountEventSink;

impl DiscountEventSink for NoOpDiscountEventSink {
    fn emit(&self, _event: DiscountEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockDiscountEventSink {
    events: Arc<Mutex<Vec<DiscountEvent>>>,
}

impl MockDiscountEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DiscountEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiscountEventSink for MockDiscountEventSink {
    fn emit(&self, event: DiscountEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpDiscountEventSink;
        sink.emit(DiscountEvent::discount_added("discount-1"));
        sink.emit_batch(vec![
            DiscountEvent::discount_removed("discount-1"),
            DiscountEvent::discount_toggled("discount-2", true),
        ]);
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockDiscountEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DiscountEvent::discount_added("discount-9"));
        assert_eq!(sink.len(), 1);

        sink.emit_batch(vec![
            DiscountEvent::discount_toggled("discount-2", true),
            DiscountEvent::discount_removed("discount-9"),
        ]);
        assert_eq!(sink.len(), 3);

        let ids: Vec<_> = sink
            .events()
            .iter()
            .filter_map(|e| e.discount_id().map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["discount-9", "discount-2", "discount-9"]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let sink = MockDiscountEventSink::new();
        let handle = sink.clone();
        handle.emit(DiscountEvent::discount_removed("discount-9"));
        assert_eq!(sink.len(), 1);
    }
}
