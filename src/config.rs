use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MASK_CHARACTER: char = '*';
pub const CARD_VISIBLE_DIGITS: usize = 4;
pub const NATIONAL_ID_VISIBLE_DIGITS: usize = 2;

/// Configuration shared by the state machine and payload construction. The
/// masking widths are fixed at configuration time, never derived per call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormConfig {
    pub mask_character: char,
    /// Trailing card-number digits left visible in the payload.
    pub card_visible_digits: usize,
    /// Trailing national-ID digits left visible in the payload.
    pub national_id_visible_digits: usize,
    /// Fixed description of what the payment is for.
    pub payment_reason: String,
    /// Fixed display amount, currency symbol included.
    pub amount: String,
    // Override the current datetime for testing
    pub forced_datetime_utc: Option<DateTime<Utc>>,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            mask_character: MASK_CHARACTER,
            card_visible_digits: CARD_VISIBLE_DIGITS,
            national_id_visible_digits: NATIONAL_ID_VISIBLE_DIGITS,
            payment_reason: "שירותי דואר ישראל - משלוח חבילה".to_string(),
            amount: "₪9.00".to_string(),
            forced_datetime_utc: None,
        }
    }
}

impl FormConfig {
    pub fn now(&self) -> DateTime<Utc> {
        self.forced_datetime_utc.unwrap_or_else(Utc::now)
    }
}
