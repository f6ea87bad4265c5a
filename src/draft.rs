//! The in-progress registration draft and its frozen, validated form.
//!
//! [`DraftFields`] is what the form stage edits and what the shadow copy
//! persists: raw text plus explicit selections, so a half-filled form survives
//! a reload byte for byte. [`RegistrationDraft`] is the frozen record handed
//! to the summary stage; its merchandise block is a tagged union, so shirt
//! sub-fields cannot exist when no shirt is wanted.

use serde::{Deserialize, Serialize};

use crate::options::{
    RunningLevel, Selection, ShippingRegion, ShirtModel, ShirtSize, StartingPoint,
};
use crate::pricing;
use crate::validation::{self, ValidationErrors};

/// Default donation preset on a fresh form, in euros.
pub const DEFAULT_DONATION: &str = "10";

/// Raw, editable form state. Everything the user typed or selected, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftFields {
    pub firstname: String,
    pub lastname: String,
    pub team: String,
    pub email: String,
    pub repeated_email: String,
    pub starting_point: Selection<StartingPoint>,
    pub running_level: Selection<RunningLevel>,
    pub bsv_participant: bool,
    /// Raw text of the donation input; parsed during validation.
    pub donation: String,

    pub wants_shirt: bool,
    pub shirt_model: Selection<ShirtModel>,
    pub shirt_size: Selection<ShirtSize>,
    pub shipping_region: Selection<ShippingRegion>,
    pub country: String,
    pub address_firstname: String,
    pub address_lastname: String,
    pub street_name: String,
    pub house_number: String,
    pub address_extra: String,
    pub postal_code: String,
    pub city: String,

    pub terms_confirmed: bool,
    /// Derived by the pricing rule whenever `wants_shirt` or the region
    /// changes; never entered by the user.
    pub shirt_cost: u32,
}

impl Default for DraftFields {
    fn default() -> Self {
        Self {
            firstname: String::new(),
            lastname: String::new(),
            team: String::new(),
            email: String::new(),
            repeated_email: String::new(),
            starting_point: Selection::Unset,
            running_level: Selection::Unset,
            bsv_participant: false,
            donation: DEFAULT_DONATION.to_string(),
            wants_shirt: false,
            shirt_model: Selection::Unset,
            shirt_size: Selection::Unset,
            shipping_region: Selection::Unset,
            country: String::new(),
            address_firstname: String::new(),
            address_lastname: String::new(),
            street_name: String::new(),
            house_number: String::new(),
            address_extra: String::new(),
            postal_code: String::new(),
            city: String::new(),
            terms_confirmed: false,
            shirt_cost: 0,
        }
    }
}

impl DraftFields {
    /// Validates and freezes the draft. Fails with the per-field error map
    /// when any rule is violated or consent is missing.
    pub fn freeze(&self) -> std::result::Result<RegistrationDraft, ValidationErrors> {
        let errors = validation::validate(self);
        if !errors.is_empty() || !self.terms_confirmed {
            return Err(errors);
        }

        // Validation guarantees these hold; the fallbacks keep freeze total.
        let Ok(donation) = self.donation.trim().parse::<u32>() else {
            return Err(errors);
        };

        let merchandise = if self.wants_shirt {
            let (
                Selection::Chosen(model),
                Selection::Chosen(size),
                Selection::Chosen(region),
            ) = (self.shirt_model, self.shirt_size, self.shipping_region)
            else {
                return Err(errors);
            };
            Merchandise::Shirt(ShirtOrder {
                model,
                size,
                region,
                country: self.country.clone(),
                address: ShippingAddress {
                    firstname: self.address_firstname.clone(),
                    lastname: self.address_lastname.clone(),
                    street_name: self.street_name.clone(),
                    house_number: self.house_number.clone(),
                    extra: non_empty(&self.address_extra),
                    postal_code: self.postal_code.clone(),
                    city: self.city.clone(),
                },
                cost: pricing::shirt_cost(true, self.shipping_region),
            })
        } else {
            Merchandise::None
        };

        let (Selection::Chosen(starting_point), Selection::Chosen(running_level)) =
            (self.starting_point, self.running_level)
        else {
            return Err(errors);
        };

        Ok(RegistrationDraft {
            firstname: non_empty(&self.firstname),
            lastname: non_empty(&self.lastname),
            team: non_empty(&self.team),
            email: non_empty(&self.email),
            starting_point,
            running_level,
            bsv_participant: self.bsv_participant,
            donation,
            merchandise,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Frozen, validated draft as handed to the summary stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDraft {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub team: Option<String>,
    pub email: Option<String>,
    pub starting_point: StartingPoint,
    pub running_level: RunningLevel,
    pub bsv_participant: bool,
    pub donation: u32,
    pub merchandise: Merchandise,
}

/// Merchandise block: absent entirely, or a complete shirt order.
#[derive(Debug, Clone, PartialEq)]
pub enum Merchandise {
    None,
    Shirt(ShirtOrder),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShirtOrder {
    pub model: ShirtModel,
    pub size: ShirtSize,
    pub region: ShippingRegion,
    pub country: String,
    pub address: ShippingAddress,
    /// Combined shirt price incl. shipping, frozen at submit time.
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingAddress {
    pub firstname: String,
    pub lastname: String,
    pub street_name: String,
    pub house_number: String,
    pub extra: Option<String>,
    pub postal_code: String,
    pub city: String,
}

impl RegistrationDraft {
    pub fn shirt_cost(&self) -> u32 {
        match &self.merchandise {
            Merchandise::None => 0,
            Merchandise::Shirt(order) => order.cost,
        }
    }

    /// Donation plus shirt cost, the amount the participant has to transfer.
    pub fn total_due(&self) -> u32 {
        self.donation + self.shirt_cost()
    }

    pub fn shirt_order(&self) -> Option<&ShirtOrder> {
        match &self.merchandise {
            Merchandise::None => None,
            Merchandise::Shirt(order) => Some(order),
        }
    }

    /// Turns the frozen draft back into editable form state for the
    /// summary → form "edit" transition. Lossless for every entered value;
    /// consent stays granted and the repeated email mirrors the email.
    pub fn thaw(&self) -> DraftFields {
        let mut fields = DraftFields {
            firstname: self.firstname.clone().unwrap_or_default(),
            lastname: self.lastname.clone().unwrap_or_default(),
            team: self.team.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            repeated_email: self.email.clone().unwrap_or_default(),
            starting_point: Selection::Chosen(self.starting_point),
            running_level: Selection::Chosen(self.running_level),
            bsv_participant: self.bsv_participant,
            donation: self.donation.to_string(),
            terms_confirmed: true,
            ..DraftFields::default()
        };
        if let Merchandise::Shirt(order) = &self.merchandise {
            fields.wants_shirt = true;
            fields.shirt_model = Selection::Chosen(order.model);
            fields.shirt_size = Selection::Chosen(order.size);
            fields.shipping_region = Selection::Chosen(order.region);
            fields.country = order.country.clone();
            fields.address_firstname = order.address.firstname.clone();
            fields.address_lastname = order.address.lastname.clone();
            fields.street_name = order.address.street_name.clone();
            fields.house_number = order.address.house_number.clone();
            fields.address_extra = order.address.extra.clone().unwrap_or_default();
            fields.postal_code = order.address.postal_code.clone();
            fields.city = order.address.city.clone();
            fields.shirt_cost = order.cost;
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GERMANY;

    fn filled_fields() -> DraftFields {
        DraftFields {
            firstname: "Hans".into(),
            lastname: "Meyer".into(),
            email: "hans@example.org".into(),
            repeated_email: "hans@example.org".into(),
            starting_point: Selection::Chosen(StartingPoint::Hamburg),
            running_level: Selection::Chosen(RunningLevel::Often),
            donation: "10".into(),
            terms_confirmed: true,
            ..DraftFields::default()
        }
    }

    #[test]
    fn freeze_without_shirt_has_no_merchandise() {
        let draft = filled_fields().freeze().unwrap();
        assert_eq!(draft.merchandise, Merchandise::None);
        assert_eq!(draft.shirt_cost(), 0);
        assert_eq!(draft.total_due(), 10);
    }

    #[test]
    fn freeze_requires_consent() {
        let mut fields = filled_fields();
        fields.terms_confirmed = false;
        assert!(fields.freeze().is_err());
    }

    #[test]
    fn freeze_then_thaw_is_lossless() {
        let mut fields = filled_fields();
        fields.team = "FC St. Pauli".into();
        fields.wants_shirt = true;
        fields.shirt_model = Selection::Chosen(ShirtModel::Unisex);
        fields.shirt_size = Selection::Chosen(ShirtSize::M);
        fields.shipping_region = Selection::Chosen(ShippingRegion::Germany);
        fields.country = GERMANY.into();
        fields.address_firstname = "Hans".into();
        fields.address_lastname = "Meyer".into();
        fields.street_name = "Budapester Straße".into();
        fields.house_number = "45".into();
        fields.postal_code = "20359".into();
        fields.city = "Hamburg".into();
        fields.shirt_cost = 15;

        let thawed = fields.freeze().unwrap().thaw();
        assert_eq!(thawed, fields);
    }

    #[test]
    fn total_due_sums_donation_and_shirt_cost() {
        let mut fields = filled_fields();
        fields.wants_shirt = true;
        fields.shirt_model = Selection::Chosen(ShirtModel::Slimfit);
        fields.shirt_size = Selection::Chosen(ShirtSize::L);
        fields.shipping_region = Selection::Chosen(ShippingRegion::Eu);
        fields.country = "Estland".into();
        fields.address_firstname = "Hans".into();
        fields.address_lastname = "Meyer".into();
        fields.street_name = "Budapester Straße".into();
        fields.house_number = "45".into();
        fields.postal_code = "20359".into();
        fields.city = "Hamburg".into();
        fields.shirt_cost = 17;

        let draft = fields.freeze().unwrap();
        assert_eq!(draft.shirt_cost(), 17);
        assert_eq!(draft.total_due(), 27);
    }
}
