//! Shirt price and shipping surcharge rules.
//!
//! The three price points (15/17/20) are fixed by the event owner; they are not
//! derived from a carrier formula and must not be "simplified" into one.

use crate::options::{Selection, ShippingRegion, ShirtModel, ShirtSize};

/// Base price of a shirt before shipping, in euros.
pub const SHIRT_BASE_PRICE: u32 = 15;

/// Shipping surcharge on top of the base price, in euros.
pub fn shipping_surcharge(region: ShippingRegion) -> u32 {
    match region {
        ShippingRegion::Germany => 0,
        ShippingRegion::Eu => 2,
        ShippingRegion::NonEu => 5,
    }
}

/// Combined shirt cost written into the draft. Pure; downstream stages only
/// sum fields and never re-apply this rule.
///
/// While a shirt is wanted but no region is chosen yet, the cost stays 0;
/// validation flags the missing region separately.
pub fn shirt_cost(wants_shirt: bool, region: Selection<ShippingRegion>) -> u32 {
    if !wants_shirt {
        return 0;
    }
    match region {
        Selection::Unset => 0,
        Selection::Chosen(region) => SHIRT_BASE_PRICE + shipping_surcharge(region),
    }
}

/// Carries a previously chosen size across a model change, dropping it when
/// the new model does not offer it (XXL exists only for unisex). The user is
/// prompted to re-select rather than being coerced into a wrong size.
pub fn retained_size(
    model: Selection<ShirtModel>,
    size: Selection<ShirtSize>,
) -> Selection<ShirtSize> {
    match (model.chosen(), size.chosen()) {
        (Some(model), Some(size)) if model.sizes().contains(size) => Selection::Chosen(*size),
        (_, _) => Selection::Unset,
    }
}
