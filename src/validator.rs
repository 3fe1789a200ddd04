use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::checksum::{Checksum, Luhn, NationalIdChecksum};
use crate::field::{FieldKind, FieldValue};

/// The fixed error vocabulary surfaced next to a field. The display strings
/// are the form's locale (Hebrew); callers treat the variants as opaque
/// taxonomy labels and own their rendering.
#[derive(Error, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("שדה חובה")]
    Required,
    #[error("מספר לא תקין")]
    InvalidNumber,
    #[error("פורמט לא תקין")]
    InvalidFormat,
    #[error("פג תוקף")]
    Expired,
    #[error("קוד לא תקין")]
    InvalidCode,
    #[error("תעודת זהות לא תקינה")]
    InvalidId,
}

/// Per-field validation results, keyed by field. A field with no entry is
/// currently valid; the form is submittable iff the map is empty after a
/// full [`validate_all`] pass.
pub type ValidationOutcome = BTreeMap<FieldKind, FieldError>;

/// All field values, keyed by kind. Always holds an entry for every
/// [`FieldKind`].
pub type FieldMap = BTreeMap<FieldKind, FieldValue>;

const CARD_NUMBER_MIN_DIGITS: usize = 13;
const CARD_NUMBER_MAX_DIGITS: usize = 19;

/// Validates a single field against its semantic rule. Reads the raw value,
/// except the expiry date which is checked in its formatted `MM/YY` form.
pub fn validate_field(
    kind: FieldKind,
    value: &FieldValue,
    now: DateTime<Utc>,
) -> Option<FieldError> {
    match kind {
        FieldKind::GivenName | FieldKind::FamilyName => {
            if value.raw.trim().is_empty() {
                return Some(FieldError::Required);
            }
            None
        }
        FieldKind::CardNumber => {
            if value.is_empty() {
                return Some(FieldError::Required);
            }
            let digit_count = value.raw.len();
            if !(CARD_NUMBER_MIN_DIGITS..=CARD_NUMBER_MAX_DIGITS).contains(&digit_count)
                || !Luhn.is_valid(&value.raw)
            {
                return Some(FieldError::InvalidNumber);
            }
            None
        }
        FieldKind::ExpiryDate => validate_expiry(&value.display, now),
        FieldKind::SecurityCode => {
            if value.is_empty() {
                return Some(FieldError::Required);
            }
            let is_digits = value.raw.chars().all(|c| c.is_ascii_digit());
            if !is_digits || !(3..=4).contains(&value.raw.len()) {
                return Some(FieldError::InvalidCode);
            }
            None
        }
        FieldKind::NationalId => {
            if value.is_empty() {
                return Some(FieldError::Required);
            }
            if !NationalIdChecksum.is_valid(&value.raw) {
                return Some(FieldError::InvalidId);
            }
            None
        }
    }
}

/// The expiry comparison only sees the last two digits of the year, so it
/// wraps every 100 years ("01/00" reads as the year 2000 forever). Known
/// limitation, kept deliberately.
fn validate_expiry(display: &str, now: DateTime<Utc>) -> Option<FieldError> {
    if display.is_empty() {
        return Some(FieldError::Required);
    }
    let (month, year_yy) = match parse_expiry(display) {
        Some(parsed) => parsed,
        None => return Some(FieldError::InvalidFormat),
    };
    if !(1..=12).contains(&month) {
        return Some(FieldError::InvalidFormat);
    }

    let current_yy = now.year().rem_euclid(100) as u32;
    let current_month = now.month();
    if year_yy < current_yy || (year_yy == current_yy && month < current_month) {
        return Some(FieldError::Expired);
    }
    None
}

/// Accepts exactly `MM/YY`: two digits, a slash, two digits.
fn parse_expiry(display: &str) -> Option<(u32, u32)> {
    let (month, year) = display.split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    if !month.chars().all(|c| c.is_ascii_digit()) || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((month.parse().ok()?, year.parse().ok()?))
}

/// Runs every field validator over the corresponding value and collects the
/// failures. Never short-circuits, so a single submit attempt surfaces every
/// problem at once. Purely a read of the field map.
///
/// Panics if `fields` is missing a kind; the state machine initializes an
/// entry for every kind, so a hole is a broken internal contract rather than
/// a user error.
pub fn validate_all(fields: &FieldMap, now: DateTime<Utc>) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();
    for kind in FieldKind::iter() {
        let value = fields
            .get(&kind)
            .unwrap_or_else(|| panic!("field map has no entry for {kind}"));
        if let Some(error) = validate_field(kind, value, now) {
            outcome.insert(kind, error);
        }
    }
    outcome
}
