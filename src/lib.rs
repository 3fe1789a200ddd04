// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod checksum;
mod config;
mod field;
mod form;
mod formatter;
mod gateway;
mod mask;
mod payload;
mod validator;

// This is the public API of the form core
pub use checksum::{Checksum, Luhn, NationalIdChecksum};
pub use config::FormConfig;
pub use field::{FieldKind, FieldValue};
pub use form::{Form, FormState, SubmissionStatus, SubmitDecision};
pub use formatter::format_input;
pub use gateway::{
    EmailRelayConfig, EmailRelayGateway, LogGateway, SubmissionError, SubmissionGateway,
};
pub use mask::mask_all_but_last;
pub use payload::SubmissionPayload;
pub use validator::{validate_all, validate_field, FieldError, FieldMap, ValidationOutcome};
