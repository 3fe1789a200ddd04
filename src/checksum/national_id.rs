use crate::checksum::{next_digit, Checksum};

/// Israeli national ID (Teudat Zehut) check digit: each of the 9 digits is
/// weighted 1 or 2 alternating from the left, products above 9 have 9
/// subtracted, and the weighted sum must be divisible by 10. Inputs shorter
/// than 9 digits are left-padded with zeros before weighting.
pub struct NationalIdChecksum;

const ID_LENGTH: usize = 9;

impl Checksum for NationalIdChecksum {
    fn is_valid(&self, input: &str) -> bool {
        let digit_count = input.chars().filter(char::is_ascii_digit).count();
        if digit_count == 0 || digit_count > ID_LENGTH {
            return false;
        }

        // Leading zero-padding contributes nothing to the sum, but it shifts
        // which positions carry the doubled weight, so parity is derived from
        // the padded position, not the input position.
        let offset = ID_LENGTH - digit_count;
        let mut chars = input.chars();
        let mut sum = 0;
        for i in offset..ID_LENGTH {
            let digit = match next_digit(&mut chars) {
                Some(d) => d,
                None => return false,
            };
            let product = digit * (i as u32 % 2 + 1);
            sum += if product > 9 { product - 9 } else { product };
        }

        sum % 10 == 0
    }
}

#[cfg(test)]
mod test {
    use crate::checksum::*;

    #[test]
    fn valid_ids() {
        let valid_ids = vec![
            "123456782",
            "999999998",
            // checked after zero-padding to 9 digits
            "18",
            "000000018",
        ];
        for id in valid_ids {
            assert!(NationalIdChecksum.is_valid(id), "{id}");
        }
    }

    #[test]
    fn invalid_ids() {
        let invalid_ids = vec![
            // wrong check digit
            "123456789",
            "999999999",
            // empty and over-long inputs fail without computing the checksum
            "",
            "0000000018",
        ];
        for id in invalid_ids {
            assert!(!NationalIdChecksum.is_valid(id), "{id}");
        }
    }
}
