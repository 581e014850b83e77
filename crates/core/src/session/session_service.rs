use std::sync::Arc;

use log::{debug, warn};

use crate::config::PricingConfig;
use crate::discounts::{DiscountCatalogTrait, DiscountStore};
use crate::editor::{DiscountEditor, EditorOutcome};
use crate::errors::Result;
use crate::events::{DiscountEvent, DiscountEventSink};
use crate::pricing::{self, PriceOverview, PriceSummary, SchedulePresentation};

/// State container owned by the top-level view.
///
/// Holds the discount collection of one shopping session together with the
/// totals derived from it. Every committed change replaces the store and
/// recomputes the summary from the whole collection before the call returns,
/// so readers never see totals for an older selection. A rejected operation
/// leaves both untouched.
pub struct DiscountSession {
    config: PricingConfig,
    store: DiscountStore,
    overview: PriceOverview,
    event_sink: Arc<dyn DiscountEventSink>,
}

/// Summary, schedule rows and overview lines for `store`.
fn derive_overview(config: &PricingConfig, store: &DiscountStore) -> Result<PriceOverview> {
    let summary = pricing::summarize(config, store.discounts())?;
    pricing::overview(config, store.discounts(), &summary)
}

impl DiscountSession {
    pub fn new(
        config: PricingConfig,
        catalog: &dyn DiscountCatalogTrait,
        event_sink: Arc<dyn DiscountEventSink>,
    ) -> Result<Self> {
        config.validate()?;
        let store = DiscountStore::new(catalog.load_discounts()?)?;
        debug!("Starting discount session with {} discounts", store.len());
        let overview = derive_overview(&config, &store)?;
        Ok(Self {
            config,
            store,
            overview,
            event_sink,
        })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn store(&self) -> &DiscountStore {
        &self.store
    }

    pub fn summary(&self) -> &PriceSummary {
        &self.overview.summary
    }

    pub fn schedule_presentation(&self) -> Option<&SchedulePresentation> {
        self.overview.schedule.as_ref()
    }

    pub fn overview(&self) -> &PriceOverview {
        &self.overview
    }

    /// Installs `store` once its totals have been derived. When they cannot
    /// be, the previous store and totals stay in place.
    fn commit(&mut self, store: DiscountStore, event: DiscountEvent) -> Result<PriceSummary> {
        let overview = derive_overview(&self.config, &store).inspect_err(|e| {
            warn!("Discarding change, totals could not be derived: {}", e);
        })?;
        self.store = store;
        self.overview = overview;

        let summary = self.overview.summary;
        self.event_sink.emit_batch(vec![
            event,
            DiscountEvent::totals_recalculated(summary),
        ]);
        Ok(summary)
    }

    pub fn toggle_discount(&mut self, id: &str) -> Result<PriceSummary> {
        let store = self.store.toggle_enabled(id)?;
        let is_enabled = store.get(id).map(|d| d.is_enabled).unwrap_or_default();
        self.commit(store, DiscountEvent::discount_toggled(id, is_enabled))
    }

    pub fn remove_discount(&mut self, id: &str) -> Result<PriceSummary> {
        let store = self.store.remove_user_discount(id)?;
        self.commit(store, DiscountEvent::discount_removed(id))
    }

    pub fn open_create_editor(&self) -> DiscountEditor {
        DiscountEditor::for_new_discount(&self.config, &self.store)
    }

    pub fn open_edit_editor(&self, id: &str) -> Result<DiscountEditor> {
        DiscountEditor::for_existing(&self.config, &self.store, id)
    }

    /// Confirms the editor and applies its outcome to the store.
    pub fn commit_editor(&mut self, editor: DiscountEditor) -> Result<PriceSummary> {
        let outcome = editor.confirm()?;
        self.apply_outcome(outcome)
    }

    pub fn apply_outcome(&mut self, outcome: EditorOutcome) -> Result<PriceSummary> {
        match outcome {
            EditorOutcome::Created(new_discount) => {
                let store = self.store.add_user_discount(new_discount)?;
                let id = store
                    .discounts()
                    .last()
                    .map(|d| d.id.clone())
                    .unwrap_or_default();
                self.commit(store, DiscountEvent::discount_added(id))
            }
            EditorOutcome::ValueUpdated { id, amount_value } => {
                let store = self.store.update_value(&id, amount_value).inspect_err(|e| {
                    warn!("Could not apply edited value to {}: {}", id, e);
                })?;
                self.commit(
                    store,
                    DiscountEvent::discount_value_updated(id, amount_value),
                )
            }
        }
    }

    /// Closes the editor without applying anything.
    pub fn cancel_editor(&self, editor: DiscountEditor) {
        editor.cancel();
    }
}
