//! Registration form stage.
//!
//! Collects every participant and shipping field, re-validates on each
//! change, recomputes the shirt cost exactly when a pricing input changes,
//! and mirrors every change into the draft store's shadow copy before
//! control returns to the caller. No network calls happen here; the final
//! submission belongs to the summary stage.

use tracing::debug;

use crate::client::ThemeSettings;
use crate::draft::{DraftFields, RegistrationDraft};
use crate::error::Result;
use crate::options::{
    GERMANY, RunningLevel, Selection, ShippingRegion, ShirtModel, ShirtSize, StartingPoint,
};
use crate::pricing;
use crate::store::DraftStore;
use crate::validation::{self, Field, ValidationErrors};

/// A single field edit, typed per field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Firstname(String),
    Lastname(String),
    Team(String),
    Email(String),
    RepeatedEmail(String),
    StartingPoint(Selection<StartingPoint>),
    RunningLevel(Selection<RunningLevel>),
    BsvParticipant(bool),
    Donation(String),
    WantsShirt(bool),
    ShirtModel(Selection<ShirtModel>),
    ShirtSize(Selection<ShirtSize>),
    ShippingRegion(Selection<ShippingRegion>),
    Country(String),
    AddressFirstname(String),
    AddressLastname(String),
    StreetName(String),
    HouseNumber(String),
    AddressExtra(String),
    PostalCode(String),
    City(String),
    TermsConfirmed(bool),
}

/// Outcome of mounting the form stage.
pub enum FormInit {
    Open(FormStage),
    /// Registration is closed; the form is bypassed for a static notice.
    Closed { message: String },
}

pub struct FormStage {
    fields: DraftFields,
    errors: ValidationErrors,
    tshirts_enabled: bool,
}

impl FormStage {
    /// Mounts the form: bypassed entirely when registration is closed,
    /// otherwise pre-populated from a draft left in the store (edit path or
    /// shadow-copy rehydration) or started from defaults.
    pub fn initialize(store: &mut DraftStore, theme: &ThemeSettings) -> FormInit {
        if !theme.is_registration_open {
            return FormInit::Closed {
                message: theme.closed_registration_message.clone(),
            };
        }
        let fields = store.get_draft().cloned().unwrap_or_default();
        FormInit::Open(Self::resume(fields, theme.tshirts_enabled))
    }

    /// Re-enters the form with known field state, e.g. returning from the
    /// summary stage via "edit".
    pub fn resume(fields: DraftFields, tshirts_enabled: bool) -> Self {
        let errors = validation::validate(&fields);
        Self {
            fields,
            errors,
            tshirts_enabled,
        }
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Inline message for one field, if it is currently invalid.
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).map(|e| e.message())
    }

    /// Sizes offered by the currently selected model; empty until a model is
    /// chosen.
    pub fn size_options(&self) -> &'static [ShirtSize] {
        match self.fields.shirt_model.chosen() {
            Some(model) => model.sizes(),
            None => &[],
        }
    }

    /// Applies one edit: updates the field, re-runs validation, recomputes
    /// the shirt cost iff a pricing input changed, and flushes the shadow
    /// copy before returning.
    pub fn apply(&mut self, store: &mut DraftStore, change: FieldChange) -> Result<()> {
        self.apply_change(change);
        self.errors = validation::validate(&self.fields);
        store.set_draft(self.fields.clone())
    }

    fn apply_change(&mut self, change: FieldChange) {
        let fields = &mut self.fields;
        match change {
            FieldChange::Firstname(v) => fields.firstname = v,
            FieldChange::Lastname(v) => fields.lastname = v,
            FieldChange::Team(v) => fields.team = v,
            FieldChange::Email(v) => fields.email = v,
            FieldChange::RepeatedEmail(v) => fields.repeated_email = v,
            FieldChange::StartingPoint(v) => fields.starting_point = v,
            FieldChange::RunningLevel(v) => fields.running_level = v,
            FieldChange::BsvParticipant(v) => fields.bsv_participant = v,
            FieldChange::Donation(v) => fields.donation = v,
            FieldChange::WantsShirt(v) => {
                if v && !self.tshirts_enabled {
                    debug!("shirt sales disabled, ignoring toggle");
                    return;
                }
                fields.wants_shirt = v;
                fields.shirt_cost = pricing::shirt_cost(v, fields.shipping_region);
            }
            FieldChange::ShirtModel(v) => {
                fields.shirt_model = v;
                // A size the new model does not offer must be re-selected.
                fields.shirt_size = pricing::retained_size(v, fields.shirt_size);
            }
            FieldChange::ShirtSize(v) => fields.shirt_size = v,
            FieldChange::ShippingRegion(v) => {
                fields.shipping_region = v;
                fields.country = match v.chosen() {
                    Some(ShippingRegion::Germany) => GERMANY.to_string(),
                    _ => String::new(),
                };
                fields.shirt_cost = pricing::shirt_cost(fields.wants_shirt, v);
            }
            FieldChange::Country(v) => fields.country = v,
            FieldChange::AddressFirstname(v) => fields.address_firstname = v,
            FieldChange::AddressLastname(v) => fields.address_lastname = v,
            FieldChange::StreetName(v) => fields.street_name = v,
            FieldChange::HouseNumber(v) => fields.house_number = v,
            FieldChange::AddressExtra(v) => fields.address_extra = v,
            FieldChange::PostalCode(v) => fields.postal_code = v,
            FieldChange::City(v) => fields.city = v,
            FieldChange::TermsConfirmed(v) => fields.terms_confirmed = v,
        }
    }

    /// The submit control stays disabled while any field is invalid or the
    /// terms are not confirmed.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && self.fields.terms_confirmed
    }

    /// Freezes the draft and hands it to the store; the caller then navigates
    /// to the summary. `Ok(None)` is the disabled-control no-op, not an error.
    pub fn submit(&mut self, store: &mut DraftStore) -> Result<Option<RegistrationDraft>> {
        if !self.can_submit() {
            return Ok(None);
        }
        let Ok(draft) = self.fields.freeze() else {
            return Ok(None);
        };
        store.set_draft(self.fields.clone())?;
        Ok(Some(draft))
    }
}
