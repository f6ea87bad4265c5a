//! Domain enums for the registration form and the explicit "nothing chosen yet"
//! selection state.
//!
//! Every dropdown on the form is backed by a real enum plus [`Selection`]; the
//! placeholder entry ("Bitte auswählen") is represented by [`Selection::Unset`]
//! and can never be confused with a legitimate choice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dropdown selection: either nothing chosen yet, or a real value.
///
/// Serializes as `null` / the inner wire value, so persisted drafts keep
/// partially filled forms intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection<T> {
    Unset,
    Chosen(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Unset
    }
}

impl<T> Selection<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Selection::Unset)
    }

    pub fn chosen(&self) -> Option<&T> {
        match self {
            Selection::Unset => None,
            Selection::Chosen(v) => Some(v),
        }
    }
}

/// Where the participant will run from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingPoint {
    Hamburg,
    Other,
}

impl StartingPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartingPoint::Hamburg => "hamburg",
            StartingPoint::Other => "other",
        }
    }

    /// Dropdown label on the form.
    pub fn label(&self) -> &'static str {
        match self {
            StartingPoint::Hamburg => "in Hamburg bei der Alster vor Ort",
            StartingPoint::Other => "woanders",
        }
    }

    /// Short form used on the summary page.
    pub fn short_label(&self) -> &'static str {
        match self {
            StartingPoint::Hamburg => "Hamburg",
            StartingPoint::Other => "Woanders",
        }
    }
}

/// Self-assessed running level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunningLevel {
    Rarely,
    Sometimes,
    Often,
}

impl RunningLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunningLevel::Rarely => "rarely",
            RunningLevel::Sometimes => "sometimes",
            RunningLevel::Often => "often",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunningLevel::Rarely => "Ich laufe selten",
            RunningLevel::Sometimes => "Ich laufe gelegentlich bis regelmäßig",
            RunningLevel::Often => "Ich laufe häufig und ambitioniert",
        }
    }
}

/// T-shirt cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShirtModel {
    Unisex,
    Slimfit,
}

impl ShirtModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShirtModel::Unisex => "unisex",
            ShirtModel::Slimfit => "slimfit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShirtModel::Unisex => "Unisex",
            ShirtModel::Slimfit => "Tailliert",
        }
    }

    /// Sizes offered for this cut. Only the unisex cut comes in XXL.
    pub fn sizes(&self) -> &'static [ShirtSize] {
        match self {
            ShirtModel::Unisex => &[
                ShirtSize::S,
                ShirtSize::M,
                ShirtSize::L,
                ShirtSize::Xl,
                ShirtSize::Xxl,
            ],
            ShirtModel::Slimfit => {
                &[ShirtSize::S, ShirtSize::M, ShirtSize::L, ShirtSize::Xl]
            }
        }
    }
}

/// T-shirt size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShirtSize {
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl ShirtSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShirtSize::S => "s",
            ShirtSize::M => "m",
            ShirtSize::L => "l",
            ShirtSize::Xl => "xl",
            ShirtSize::Xxl => "xxl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShirtSize::S => "S",
            ShirtSize::M => "M",
            ShirtSize::L => "L",
            ShirtSize::Xl => "XL",
            ShirtSize::Xxl => "XXL",
        }
    }
}

/// Coarse shipping tier driving both the country field and the shirt price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingRegion {
    Germany,
    Eu,
    NonEu,
}

impl ShippingRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingRegion::Germany => "germany",
            ShippingRegion::Eu => "eu",
            ShippingRegion::NonEu => "non-eu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingRegion::Germany => "Deutschland (kostenloser Versand)",
            ShippingRegion::Eu => "EU-Ausland (Versandkosten: 2€)",
            ShippingRegion::NonEu => "Außerhalb der EU (Versandkosten: 5€)",
        }
    }
}

macro_rules! impl_from_str {
    ($ty:ty, $($s:literal => $variant:expr),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($s => Ok($variant),)+
                    other => Err(format!(
                        "unknown {} value: {other:?}",
                        stringify!($ty)
                    )),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_from_str!(StartingPoint, "hamburg" => StartingPoint::Hamburg, "other" => StartingPoint::Other);
impl_from_str!(
    RunningLevel,
    "rarely" => RunningLevel::Rarely,
    "sometimes" => RunningLevel::Sometimes,
    "often" => RunningLevel::Often,
);
impl_from_str!(ShirtModel, "unisex" => ShirtModel::Unisex, "slimfit" => ShirtModel::Slimfit);
impl_from_str!(
    ShirtSize,
    "s" => ShirtSize::S,
    "m" => ShirtSize::M,
    "l" => ShirtSize::L,
    "xl" => ShirtSize::Xl,
    "xxl" => ShirtSize::Xxl,
);
impl_from_str!(
    ShippingRegion,
    "germany" => ShippingRegion::Germany,
    "eu" => ShippingRegion::Eu,
    "non-eu" => ShippingRegion::NonEu,
);

/// Country entries offered for the `eu` shipping region.
pub const EU_COUNTRIES: &[&str] = &[
    "Belgien",
    "Bulgarien",
    "Dänemark",
    "Estland",
    "Finnland",
    "Frankreich",
    "Griechenland",
    "Irland",
    "Italien",
    "Kroatien",
    "Lettland",
    "Litauen",
    "Luxemburg",
    "Malta",
    "Niederlande",
    "Österreich",
    "Polen",
    "Portugal",
    "Rumänien",
    "Schweden",
    "Slowakei",
    "Slowenien",
    "Spanien",
    "Tschechien",
    "Ungarn",
    "Zypern",
];

/// Fixed country value when shipping within Germany.
pub const GERMANY: &str = "Deutschland";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unisex_offers_five_sizes_ending_in_xxl() {
        let sizes = ShirtModel::Unisex.sizes();
        assert_eq!(sizes.len(), 5);
        assert_eq!(sizes.last(), Some(&ShirtSize::Xxl));
    }

    #[test]
    fn slimfit_never_offers_xxl() {
        let sizes = ShirtModel::Slimfit.sizes();
        assert_eq!(sizes.len(), 4);
        assert!(!sizes.contains(&ShirtSize::Xxl));
    }

    #[test]
    fn selection_roundtrips_through_json() {
        let unset: Selection<ShippingRegion> = Selection::Unset;
        assert_eq!(serde_json::to_string(&unset).unwrap(), "null");

        let chosen = Selection::Chosen(ShippingRegion::NonEu);
        let json = serde_json::to_string(&chosen).unwrap();
        assert_eq!(json, "\"non-eu\"");
        let back: Selection<ShippingRegion> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chosen);
    }

    #[test]
    fn wire_values_parse_back() {
        assert_eq!(
            "non-eu".parse::<ShippingRegion>().unwrap(),
            ShippingRegion::NonEu
        );
        assert_eq!("slimfit".parse::<ShirtModel>().unwrap(), ShirtModel::Slimfit);
        assert!("null".parse::<StartingPoint>().is_err());
    }
}
