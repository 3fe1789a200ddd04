use crate::field::FieldKind;

const CARD_NUMBER_MAX_DIGITS: usize = 19;
const CARD_GROUP_SIZE: usize = 4;
const EXPIRY_MAX_DIGITS: usize = 4;
const SECURITY_CODE_MAX_DIGITS: usize = 4;
const NATIONAL_ID_MAX_DIGITS: usize = 9;

/// Normalizes typed text into the display form for a field. Applied on every
/// edit and idempotent: formatting already-formatted text changes nothing.
pub fn format_input(kind: FieldKind, input: &str) -> String {
    match kind {
        FieldKind::GivenName | FieldKind::FamilyName => input.to_string(),
        FieldKind::CardNumber => group_digits(
            &digits_only(input, CARD_NUMBER_MAX_DIGITS),
            CARD_GROUP_SIZE,
        ),
        FieldKind::ExpiryDate => {
            let digits = digits_only(input, EXPIRY_MAX_DIGITS);
            if digits.len() >= 3 {
                format!("{}/{}", &digits[..2], &digits[2..])
            } else {
                digits
            }
        }
        FieldKind::SecurityCode => digits_only(input, SECURITY_CODE_MAX_DIGITS),
        FieldKind::NationalId => digits_only(input, NATIONAL_ID_MAX_DIGITS),
    }
}

fn digits_only(input: &str, max_digits: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(max_digits)
        .collect()
}

/// Inserts a single space after every complete group. The trailing partial
/// group is left ungrouped and there is never a trailing space.
fn group_digits(digits: &str, group_size: usize) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / group_size);
    for (i, char) in digits.chars().enumerate() {
        if i > 0 && i % group_size == 0 {
            grouped.push(' ');
        }
        grouped.push(char);
    }
    grouped
}
