use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::field::{FieldKind, FieldValue};
use crate::mask::mask_all_but_last;
use crate::validator::FieldMap;

/// What the gateway delivers. Card and national-ID digits are masked down to
/// their configured visible suffix before the payload ever leaves the state
/// machine; the expiry stays in its `MM/YY` display form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub card_number: String,
    pub expiry: String,
    pub national_id: String,
    pub payment_reason: String,
    pub amount: String,
    pub submitted_at: String,
}

impl SubmissionPayload {
    pub fn build(fields: &FieldMap, config: &FormConfig) -> Self {
        let given = field(fields, FieldKind::GivenName).raw.trim();
        let family = field(fields, FieldKind::FamilyName).raw.trim();

        SubmissionPayload {
            full_name: format!("{given} {family}"),
            card_number: mask_all_but_last(
                &field(fields, FieldKind::CardNumber).raw,
                config.card_visible_digits,
                config.mask_character,
            ),
            expiry: field(fields, FieldKind::ExpiryDate).display.clone(),
            national_id: mask_all_but_last(
                &field(fields, FieldKind::NationalId).raw,
                config.national_id_visible_digits,
                config.mask_character,
            ),
            payment_reason: config.payment_reason.clone(),
            amount: config.amount.clone(),
            // day.month.year, the he-IL convention
            submitted_at: config.now().format("%d.%m.%Y, %H:%M:%S").to_string(),
        }
    }
}

fn field(fields: &FieldMap, kind: FieldKind) -> &FieldValue {
    fields
        .get(&kind)
        .unwrap_or_else(|| panic!("field map has no entry for {kind}"))
}
