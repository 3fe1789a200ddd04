use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::formatter::format_input;

/// The fixed set of validated inputs. The string forms (`givenName`, ...) are
/// the stable identifiers used to route edit events from whatever surface
/// hosts the form.
#[derive(
    Serialize, Deserialize, Display, EnumString, EnumIter, Clone, Copy, Debug, PartialEq, Eq,
    PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldKind {
    GivenName,
    FamilyName,
    CardNumber,
    ExpiryDate,
    SecurityCode,
    NationalId,
}

impl FieldKind {
    /// Name fields carry free text; everything else is digits-only.
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldKind::GivenName | FieldKind::FamilyName)
    }
}

/// The two representations of a single input: `raw` is what semantic
/// validation and payload construction read, `display` is what the user sees.
/// `display` is always a pure function of the typed text and the kind, never
/// edited independently.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValue {
    pub raw: String,
    pub display: String,
}

impl FieldValue {
    pub fn from_input(kind: FieldKind, input: &str) -> Self {
        let display = format_input(kind, input);
        let raw = if kind.is_free_text() {
            input.to_string()
        } else {
            display.chars().filter(char::is_ascii_digit).collect()
        };
        FieldValue { raw, display }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
