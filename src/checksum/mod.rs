mod luhn;
mod national_id;

pub use crate::checksum::luhn::Luhn;
pub use crate::checksum::national_id::NationalIdChecksum;

use std::str::Chars;

/// A checksum over a sequence of decimal digits. Non-digit characters in the
/// input are skipped by the digit helpers below, so callers may pass either a
/// raw digit string or a display-formatted one.
pub trait Checksum {
    fn is_valid(&self, input: &str) -> bool;
}

fn previous_digit(chars: &mut Chars<'_>) -> Option<u32> {
    while let Some(char) = chars.next_back() {
        if let Some(digit) = char.to_digit(10) {
            return Some(digit);
        }
    }
    None
}

fn next_digit(chars: &mut Chars<'_>) -> Option<u32> {
    for char in chars.by_ref() {
        if let Some(digit) = char.to_digit(10) {
            return Some(digit);
        }
    }
    None
}
