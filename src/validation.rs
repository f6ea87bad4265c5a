//! Field validation rules for the registration form.
//!
//! [`validate`] is pure: it reads the current draft and produces a per-field
//! error map, nothing else. It runs on every field change, and the submit
//! control stays disabled while the map is non-empty.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::draft::DraftFields;
use crate::options::{EU_COUNTRIES, Selection, ShippingRegion};

/// Minimum acceptable donation in euros.
pub const MIN_DONATION: u32 = 5;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

/// Every field a rule can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Firstname,
    Lastname,
    Email,
    RepeatedEmail,
    StartingPoint,
    RunningLevel,
    Donation,
    ShirtModel,
    ShirtSize,
    ShippingRegion,
    Country,
    AddressFirstname,
    AddressLastname,
    StreetName,
    HouseNumber,
    PostalCode,
    City,
}

/// Why a field is currently invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Empty where a value is needed.
    Required,
    /// Dropdown still on the placeholder, distinct from an empty text field.
    NotChosen,
    ContainsDigits,
    InvalidCharacters,
    TooShort,
    TooLong,
    InvalidEmail,
    EmailMismatch,
    NotANumber,
    NotAWholeNumber,
    BelowMinimumDonation,
}

impl FieldError {
    /// User-facing message in the event locale.
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::Required => "Bitte geben Sie die notwendigen Informationen an!",
            FieldError::NotChosen => "Bitte wählen Sie eine Option aus!",
            FieldError::ContainsDigits => "Der Name darf keine Ziffern enthalten!",
            FieldError::InvalidCharacters => {
                "Der Name darf nur Buchstaben, Bindestriche, Apostrophe und Leerzeichen enthalten!"
            }
            FieldError::TooShort => "Muss mindestens zwei Zeichen enthalten!",
            FieldError::TooLong => "Darf maximal 50 Zeichen enthalten!",
            FieldError::InvalidEmail => "Bitte geben Sie eine gültige E-Mail-Adresse an!",
            FieldError::EmailMismatch => "E-Mail Adressen müssen übereinstimmen!",
            FieldError::NotANumber => "Bitte geben Sie einen Spendenbetrag an!",
            FieldError::NotAWholeNumber => "Die Spende muss eine ganze Zahl sein!",
            FieldError::BelowMinimumDonation => "Die Spende muss mindestens 5€ betragen!",
        }
    }
}

pub type ValidationErrors = BTreeMap<Field, FieldError>;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}' \-]+$").expect("name pattern compiles"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Runs every rule against the current draft. Merchandise sub-fields carry no
/// validation burden while `wants_shirt` is off, whatever they contain.
pub fn validate(fields: &DraftFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    check_name(&mut errors, Field::Firstname, &fields.firstname, false);
    check_name(&mut errors, Field::Lastname, &fields.lastname, false);
    check_email(&mut errors, fields);
    check_choice(&mut errors, Field::StartingPoint, fields.starting_point.is_unset());
    check_choice(&mut errors, Field::RunningLevel, fields.running_level.is_unset());
    check_donation(&mut errors, &fields.donation);

    if fields.wants_shirt {
        check_choice(&mut errors, Field::ShirtModel, fields.shirt_model.is_unset());
        check_choice(&mut errors, Field::ShirtSize, fields.shirt_size.is_unset());
        check_choice(
            &mut errors,
            Field::ShippingRegion,
            fields.shipping_region.is_unset(),
        );
        check_country(&mut errors, fields);
        check_name(&mut errors, Field::AddressFirstname, &fields.address_firstname, true);
        check_name(&mut errors, Field::AddressLastname, &fields.address_lastname, true);
        check_required(&mut errors, Field::StreetName, &fields.street_name);
        check_required(&mut errors, Field::HouseNumber, &fields.house_number);
        check_required(&mut errors, Field::PostalCode, &fields.postal_code);
        check_required(&mut errors, Field::City, &fields.city);
    }

    errors
}

/// Name rule: letters (incl. diacritics), hyphen, apostrophe, space; 2–50
/// chars. Participant names may stay empty, address names may not.
fn check_name(errors: &mut ValidationErrors, field: Field, value: &str, required: bool) {
    if value.is_empty() {
        if required {
            errors.insert(field, FieldError::Required);
        }
        return;
    }
    if value.chars().any(|c| c.is_numeric()) {
        errors.insert(field, FieldError::ContainsDigits);
        return;
    }
    if !NAME_CHARS.is_match(value) {
        errors.insert(field, FieldError::InvalidCharacters);
        return;
    }
    let len = value.chars().count();
    if len < NAME_MIN_CHARS {
        errors.insert(field, FieldError::TooShort);
    } else if len > NAME_MAX_CHARS {
        errors.insert(field, FieldError::TooLong);
    }
}

fn check_email(errors: &mut ValidationErrors, fields: &DraftFields) {
    if !fields.email.is_empty() && !EMAIL.is_match(&fields.email) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }
    // Byte-for-byte comparison, re-evaluated on every change to either field.
    if fields.repeated_email != fields.email {
        errors.insert(Field::RepeatedEmail, FieldError::EmailMismatch);
    }
}

fn check_choice(errors: &mut ValidationErrors, field: Field, unset: bool) {
    if unset {
        errors.insert(field, FieldError::NotChosen);
    }
}

fn check_required(errors: &mut ValidationErrors, field: Field, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, FieldError::Required);
    }
}

fn check_donation(errors: &mut ValidationErrors, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(Field::Donation, FieldError::Required);
        return;
    }
    match raw.parse::<u32>() {
        Ok(value) if value < MIN_DONATION => {
            errors.insert(Field::Donation, FieldError::BelowMinimumDonation);
        }
        Ok(_) => {}
        Err(_) => {
            // "6.5" is a different mistake than "abc". A whole number beyond
            // the supported range still lands in the generic bucket.
            let error = match raw.replace(',', ".").parse::<f64>() {
                Ok(value) if value.fract() != 0.0 => FieldError::NotAWholeNumber,
                _ => FieldError::NotANumber,
            };
            errors.insert(Field::Donation, error);
        }
    }
}

/// Country rule depends on the region tier: Germany pins the fixed value, EU
/// restricts to the member list, outside the EU any non-empty name is fine.
fn check_country(errors: &mut ValidationErrors, fields: &DraftFields) {
    match fields.shipping_region {
        Selection::Unset => {
            // Region error already covers this; a country cannot be judged yet.
        }
        Selection::Chosen(ShippingRegion::Germany) => {
            if fields.country != crate::options::GERMANY {
                errors.insert(Field::Country, FieldError::Required);
            }
        }
        Selection::Chosen(ShippingRegion::Eu) => {
            if !EU_COUNTRIES.contains(&fields.country.as_str()) {
                errors.insert(Field::Country, FieldError::NotChosen);
            }
        }
        Selection::Chosen(ShippingRegion::NonEu) => {
            check_required(errors, Field::Country, &fields.country);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{RunningLevel, StartingPoint};

    fn base() -> DraftFields {
        DraftFields {
            starting_point: Selection::Chosen(StartingPoint::Hamburg),
            running_level: Selection::Chosen(RunningLevel::Often),
            ..DraftFields::default()
        }
    }

    #[test]
    fn empty_defaults_only_flag_the_dropdowns() {
        let errors = validate(&DraftFields::default());
        assert_eq!(errors.get(&Field::StartingPoint), Some(&FieldError::NotChosen));
        assert_eq!(errors.get(&Field::RunningLevel), Some(&FieldError::NotChosen));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn names_with_digits_are_rejected() {
        for name in ["Hans2", "4ns", "Meyer 1. von", "123"] {
            let mut fields = base();
            fields.firstname = name.into();
            let errors = validate(&fields);
            assert_eq!(
                errors.get(&Field::Firstname),
                Some(&FieldError::ContainsDigits),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn names_with_diacritics_hyphens_and_apostrophes_are_valid() {
        for name in ["Sönke-Maël", "Büşra Maria", "O'Connor", "Anne Liese"] {
            let mut fields = base();
            fields.firstname = name.into();
            assert!(
                !validate(&fields).contains_key(&Field::Firstname),
                "{name:?} should be valid"
            );
        }
    }

    #[test]
    fn name_punctuation_outside_the_allowed_set_is_rejected() {
        let mut fields = base();
        fields.lastname = "Meyer!".into();
        assert_eq!(
            validate(&fields).get(&Field::Lastname),
            Some(&FieldError::InvalidCharacters)
        );
    }

    #[test]
    fn name_length_is_bounded() {
        let mut fields = base();
        fields.firstname = "H".into();
        assert_eq!(validate(&fields).get(&Field::Firstname), Some(&FieldError::TooShort));

        fields.firstname = "H".repeat(51);
        assert_eq!(validate(&fields).get(&Field::Firstname), Some(&FieldError::TooLong));
    }

    #[test]
    fn repeated_email_must_match_exactly() {
        let mut fields = base();
        fields.email = "hans@example.org".into();
        fields.repeated_email = "Hans@example.org".into();
        assert_eq!(
            validate(&fields).get(&Field::RepeatedEmail),
            Some(&FieldError::EmailMismatch)
        );

        fields.repeated_email = "hans@example.org".into();
        assert!(!validate(&fields).contains_key(&Field::RepeatedEmail));
    }

    #[test]
    fn malformed_email_is_flagged() {
        let mut fields = base();
        fields.email = "hans@example".into();
        fields.repeated_email = "hans@example".into();
        assert_eq!(validate(&fields).get(&Field::Email), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn donation_failures_are_distinct() {
        let mut fields = base();

        fields.donation = "4".into();
        assert_eq!(
            validate(&fields).get(&Field::Donation),
            Some(&FieldError::BelowMinimumDonation)
        );

        fields.donation = "5".into();
        assert!(!validate(&fields).contains_key(&Field::Donation));

        fields.donation = "6.5".into();
        assert_eq!(
            validate(&fields).get(&Field::Donation),
            Some(&FieldError::NotAWholeNumber)
        );

        fields.donation = "zehn".into();
        assert_eq!(validate(&fields).get(&Field::Donation), Some(&FieldError::NotANumber));

        // Whole but far beyond the euro field's range is not "not whole".
        fields.donation = "99999999999999999999".into();
        assert_eq!(validate(&fields).get(&Field::Donation), Some(&FieldError::NotANumber));

        fields.donation = "".into();
        assert_eq!(validate(&fields).get(&Field::Donation), Some(&FieldError::Required));
    }

    #[test]
    fn merchandise_fields_carry_no_burden_while_shirt_is_off() {
        let mut fields = base();
        fields.wants_shirt = false;
        // Leftover content in hidden fields must not block submission either.
        fields.country = "Narnia".into();
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn merchandise_fields_are_required_once_shirt_is_on() {
        let mut fields = base();
        fields.wants_shirt = true;
        let errors = validate(&fields);
        for field in [
            Field::ShirtModel,
            Field::ShirtSize,
            Field::ShippingRegion,
            Field::AddressFirstname,
            Field::AddressLastname,
            Field::StreetName,
            Field::HouseNumber,
            Field::PostalCode,
            Field::City,
        ] {
            assert!(errors.contains_key(&field), "{field:?} should be required");
        }
    }

    #[test]
    fn eu_country_must_come_from_the_member_list() {
        let mut fields = base();
        fields.wants_shirt = true;
        fields.shipping_region = Selection::Chosen(ShippingRegion::Eu);
        fields.country = "Norwegen".into();
        assert_eq!(validate(&fields).get(&Field::Country), Some(&FieldError::NotChosen));

        fields.country = "Estland".into();
        assert!(!validate(&fields).contains_key(&Field::Country));
    }
}
