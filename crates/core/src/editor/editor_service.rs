use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::editor_model::{EditorMode, EditorOutcome};
use crate::config::{DiscountLimits, PricingConfig};
use crate::discounts::{
    AmountFormat, Applicability, ApplicabilityPeriod, DiscountAmount, DiscountStore, NewDiscount,
};
use crate::errors::{DiscountError, Error, Result, ValidationError};
use crate::pricing::compute_onetime_total;

/// Form state for creating one manual discount or changing the value of an
/// existing one.
///
/// The editor keeps a snapshot of the other enabled discounts taken when it
/// was opened, and recomputes its preview total after every field change.
/// Nothing reaches the store until [`DiscountEditor::confirm`] is called and
/// its outcome is applied; dropping the editor discards the draft.
#[derive(Debug, Clone)]
pub struct DiscountEditor {
    mode: EditorMode,
    base_price: Decimal,
    term_months: u32,
    limits: DiscountLimits,
    other_enabled: Vec<DiscountAmount>,

    amount_format: AmountFormat,
    amount_input: String,
    applicability_period: ApplicabilityPeriod,
    duration_input: String,
    description: String,

    amount_value: Option<Decimal>,
    error: Option<ValidationError>,
    preview_total: Option<Decimal>,
}

impl DiscountEditor {
    /// Opens an empty editor for a new manual discount.
    pub fn for_new_discount(config: &PricingConfig, store: &DiscountStore) -> Self {
        debug!("Opening editor for a new discount");
        let other_enabled = store.enabled().map(DiscountAmount::from).collect();
        let mut editor = Self {
            mode: EditorMode::Create,
            base_price: config.base_onetime_price,
            term_months: config.term_months,
            limits: config.limits,
            other_enabled,
            amount_format: AmountFormat::Percent,
            amount_input: "0".to_string(),
            applicability_period: ApplicabilityPeriod::OneTime,
            duration_input: String::new(),
            description: String::new(),
            amount_value: None,
            error: None,
            preview_total: None,
        };
        editor.revalidate();
        editor
    }

    /// Opens the editor on an existing discount whose value may be changed.
    pub fn for_existing(config: &PricingConfig, store: &DiscountStore, id: &str) -> Result<Self> {
        let discount = store
            .get(id)
            .ok_or_else(|| DiscountError::NotFound(id.to_string()))?;
        if !discount.is_editable_value {
            warn!("Refusing to open editor on read-only discount {}", id);
            return Err(DiscountError::ValueNotEditable(id.to_string()).into());
        }

        debug!("Opening editor for discount {}", id);
        let other_enabled = store
            .enabled()
            .filter(|d| d.id != id)
            .map(DiscountAmount::from)
            .collect();
        let mut editor = Self {
            mode: EditorMode::Edit {
                discount_id: discount.id.clone(),
            },
            base_price: config.base_onetime_price,
            term_months: config.term_months,
            limits: config.limits,
            other_enabled,
            amount_format: discount.amount_format,
            amount_input: discount.amount_value.normalize().to_string(),
            applicability_period: discount.period(),
            duration_input: discount
                .applicability
                .duration_months()
                .map(|m| m.to_string())
                .unwrap_or_default(),
            description: discount.description.clone().unwrap_or_default(),
            amount_value: None,
            error: None,
            preview_total: None,
        };
        editor.revalidate();
        Ok(editor)
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_creating(&self) -> bool {
        self.mode == EditorMode::Create
    }

    pub fn amount_format(&self) -> AmountFormat {
        self.amount_format
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn applicability_period(&self) -> ApplicabilityPeriod {
        self.applicability_period
    }

    pub fn duration_input(&self) -> &str {
        &self.duration_input
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// One-time total with the draft applied; `None` while the amount is
    /// invalid.
    pub fn preview_total(&self) -> Option<Decimal> {
        self.preview_total
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Message to show next to the form, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn can_confirm(&self) -> bool {
        self.error.is_none() && self.amount_value.is_some()
    }

    fn create_only(&self, field: &str) -> Result<()> {
        if self.is_creating() {
            Ok(())
        } else {
            Err(ValidationError::InvalidInput(format!(
                "The {} of an existing discount cannot be changed",
                field
            ))
            .into())
        }
    }

    pub fn set_amount_format(&mut self, amount_format: AmountFormat) -> Result<()> {
        if amount_format != self.amount_format {
            self.create_only("format")?;
        }
        self.amount_format = amount_format;
        self.revalidate();
        Ok(())
    }

    /// Takes the raw text of the value field.
    pub fn set_amount_input(&mut self, input: &str) {
        self.amount_input = input.to_string();
        self.revalidate();
    }

    pub fn set_applicability_period(&mut self, period: ApplicabilityPeriod) -> Result<()> {
        if period != self.applicability_period {
            self.create_only("price type")?;
        }
        self.applicability_period = period;
        self.revalidate();
        Ok(())
    }

    /// Takes the raw text of the duration field. Only used for new monthly
    /// discounts.
    pub fn set_duration_input(&mut self, input: &str) -> Result<()> {
        self.create_only("duration")?;
        self.duration_input = input.to_string();
        self.revalidate();
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.create_only("description")?;
        self.description = description.to_string();
        Ok(())
    }

    fn parse_amount(&self) -> std::result::Result<Decimal, ValidationError> {
        let raw = self.amount_input.trim();
        Decimal::from_str(raw).map_err(|_| ValidationError::NumberParse(raw.to_string()))
    }

    fn check_amount(&self, value: Decimal) -> std::result::Result<(), ValidationError> {
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount);
        }
        let limit = self.limits.max_for(self.amount_format);
        if value > limit {
            return Err(ValidationError::ExceedsLimit {
                limit: self.amount_format.describe(limit),
            });
        }
        Ok(())
    }

    fn wants_duration(&self) -> bool {
        self.is_creating() && self.applicability_period == ApplicabilityPeriod::Monthly
    }

    /// Parsed duration; `None` when the field is empty or not applicable.
    fn parse_duration(&self) -> std::result::Result<Option<u32>, ValidationError> {
        if !self.wants_duration() {
            return Ok(None);
        }
        let raw = self.duration_input.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let months: u32 = raw.parse()?;
        if months == 0 || months > self.term_months {
            return Err(ValidationError::InvalidDuration {
                max_months: self.term_months,
            });
        }
        Ok(Some(months))
    }

    /// One-time total with the draft added to the other enabled discounts.
    fn compute_preview(&self, value: Decimal) -> std::result::Result<Decimal, ValidationError> {
        let draft = DiscountAmount::new(self.amount_format, value);
        compute_onetime_total(
            self.base_price,
            self.other_enabled
                .iter()
                .copied()
                .chain(std::iter::once(draft)),
        )
        .map_err(|err| {
            warn!("Editor preview failed: {}", err);
            ValidationError::AmountOutOfRange
        })
    }

    fn revalidate(&mut self) {
        let checked = self
            .parse_amount()
            .and_then(|value| self.check_amount(value).map(|_| value));
        let preview = checked
            .clone()
            .and_then(|value| self.compute_preview(value));

        self.amount_value = checked.as_ref().ok().copied();
        self.preview_total = preview.as_ref().ok().copied();
        self.error = preview
            .and_then(|_| self.parse_duration().map(|_| ()))
            .err();
    }

    /// Validates the draft and produces the change to apply.
    pub fn confirm(self) -> Result<EditorOutcome> {
        if let Some(err) = &self.error {
            warn!("Editor confirm rejected: {}", err);
            return Err(Error::Validation(err.clone()));
        }
        let amount_value = self
            .amount_value
            .ok_or_else(|| ValidationError::MissingField("amountValue".to_string()))?;
        let duration_months = self.parse_duration()?;

        let outcome = match self.mode {
            EditorMode::Create => {
                let applicability = match self.applicability_period {
                    ApplicabilityPeriod::OneTime => Applicability::OneTime,
                    ApplicabilityPeriod::Monthly => Applicability::Monthly {
                        monthly_duration_months: duration_months,
                    },
                };
                let description = self.description.trim();
                EditorOutcome::Created(NewDiscount {
                    id: None,
                    amount_format: self.amount_format,
                    amount_value,
                    applicability,
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
            }
            EditorMode::Edit { discount_id } => EditorOutcome::ValueUpdated {
                id: discount_id,
                amount_value,
            },
        };
        debug!("Editor confirmed: {:?}", outcome);
        Ok(outcome)
    }

    /// Discards the draft.
    pub fn cancel(self) {
        debug!("Editor cancelled ({:?})", self.mode);
    }
}
