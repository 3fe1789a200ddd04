use crate::checksum::{previous_digit, Checksum};

pub struct Luhn;

impl Checksum for Luhn {
    fn is_valid(&self, input: &str) -> bool {
        let mut input_iter = input.chars();
        let mut sum: u32 = 0;
        let mut double_it = false;
        let mut seen_any = false;

        while let Some(digit) = previous_digit(&mut input_iter) {
            seen_any = true;
            if double_it {
                let doubled = digit * 2;
                sum += if doubled > 9 { doubled - 9 } else { doubled };
            } else {
                sum += digit;
            }
            double_it = !double_it;
        }

        seen_any && sum % 10 == 0
    }
}

#[cfg(test)]
mod test {
    use crate::checksum::*;

    #[test]
    fn validate_various_card_numbers() {
        let card_numbers = vec![
            // source https://www.paypalobjects.com/en_AU/vhelp/paypalmanager_help/credit_card_numbers.htm
            // American Express
            "378282246310005",
            // Diners Club
            "30569309025904",
            // Discover
            "6011111111111117",
            // MasterCard
            "5555555555554444",
            // Visa
            "4111111111111111",
            "4222222222222",
            "4539148803436467",
        ];
        for card_number in card_numbers {
            assert!(Luhn.is_valid(card_number), "{card_number}");

            // tamper with the last digit
            let (head, last_digit) = card_number.split_at(card_number.len() - 1);
            let mut wrong_card_number = head.to_string();
            wrong_card_number
                .push_str(&((last_digit.parse::<u32>().unwrap() + 1) % 10).to_string());
            assert!(!Luhn.is_valid(&wrong_card_number), "{wrong_card_number}");
        }
    }

    #[test]
    fn skip_non_digit_characters() {
        assert!(Luhn.is_valid("4111 1111 1111 1111"));
        assert!(Luhn.is_valid("4539-1488-0343-6467"));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(!Luhn.is_valid(""));
        assert!(!Luhn.is_valid("no digits here"));
    }
}
