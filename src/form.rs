use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::config::FormConfig;
use crate::field::{FieldKind, FieldValue};
use crate::gateway::{SubmissionError, SubmissionGateway};
use crate::payload::SubmissionPayload;
use crate::validator::{validate_all, FieldMap, ValidationOutcome};

/// Submission lifecycle. Created Idle; Submitting is reachable only from
/// Idle or Failed with a clean validation pass; Submitted and Failed only
/// from Submitting; any edit while Submitted or Failed resets to Idle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed,
}

/// Everything the form knows: every field's value, the errors from the last
/// validation pass, and where the submission lifecycle stands. Mutated only
/// through the named transitions on [`Form`].
#[derive(Clone, Debug)]
pub struct FormState {
    pub fields: FieldMap,
    pub errors: ValidationOutcome,
    pub status: SubmissionStatus,
}

/// What `begin_submit` decided to do with the attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Validation passed; the form is now Submitting and this payload must be
    /// handed to the gateway exactly once.
    Started(SubmissionPayload),
    /// Validation failed; the errors are stored and the status is unchanged.
    Rejected,
    /// The attempt was dropped: either a submission is already in flight
    /// (repeated triggers must not produce a second gateway call) or the form
    /// is already Submitted.
    Ignored,
}

/// The form state machine. Owns the state exclusively; external surfaces
/// route edits and submit triggers through it and render from its snapshot.
pub struct Form {
    state: FormState,
    config: FormConfig,
    gateway: Box<dyn SubmissionGateway>,
}

impl Form {
    pub fn new(gateway: Box<dyn SubmissionGateway>) -> Self {
        Self::with_config(gateway, FormConfig::default())
    }

    pub fn with_config(gateway: Box<dyn SubmissionGateway>, config: FormConfig) -> Self {
        let mut fields = FieldMap::new();
        for kind in FieldKind::iter() {
            fields.insert(kind, FieldValue::default());
        }
        Form {
            state: FormState {
                fields,
                errors: ValidationOutcome::new(),
                status: SubmissionStatus::Idle,
            },
            config,
            gateway,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.status
    }

    pub fn errors(&self) -> &ValidationOutcome {
        &self.state.errors
    }

    pub fn field(&self, kind: FieldKind) -> &FieldValue {
        self.state
            .fields
            .get(&kind)
            .unwrap_or_else(|| panic!("field map has no entry for {kind}"))
    }

    /// Stores a new value for the field, formatted for display, and clears
    /// that field's stale error. Errors on untouched fields stay until the
    /// next submit attempt. A fresh edit invalidates a prior Submitted or
    /// Failed outcome, dropping back to Idle.
    pub fn edit(&mut self, kind: FieldKind, input: &str) {
        self.state.fields.insert(kind, FieldValue::from_input(kind, input));
        self.state.errors.remove(&kind);
        if matches!(
            self.state.status,
            SubmissionStatus::Submitted | SubmissionStatus::Failed
        ) {
            tracing::debug!(?kind, "edit resets submission status to Idle");
            self.state.status = SubmissionStatus::Idle;
        }
    }

    /// Runs the full validation pass and either rejects the attempt (storing
    /// every field error), starts a submission, or ignores the trigger. The
    /// single-flight guard lives here: while Submitting, further triggers do
    /// nothing.
    pub fn begin_submit(&mut self) -> SubmitDecision {
        match self.state.status {
            SubmissionStatus::Submitting => {
                tracing::debug!("submit trigger ignored, submission already in flight");
                SubmitDecision::Ignored
            }
            SubmissionStatus::Submitted => {
                tracing::debug!("submit trigger ignored, form already submitted");
                SubmitDecision::Ignored
            }
            SubmissionStatus::Idle | SubmissionStatus::Failed => {
                let outcome = validate_all(&self.state.fields, self.config.now());
                if outcome.is_empty() {
                    self.state.errors.clear();
                    self.state.status = SubmissionStatus::Submitting;
                    tracing::debug!("validation passed, submitting");
                    SubmitDecision::Started(SubmissionPayload::build(
                        &self.state.fields,
                        &self.config,
                    ))
                } else {
                    tracing::debug!(error_count = outcome.len(), "validation rejected submit");
                    self.state.errors = outcome;
                    SubmitDecision::Rejected
                }
            }
        }
    }

    /// Applies the gateway's verdict. Field values are retained on failure so
    /// the user can retry without re-entering anything. A completion arriving
    /// outside Submitting has nothing to complete and is dropped.
    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        if self.state.status != SubmissionStatus::Submitting {
            tracing::warn!(status = ?self.state.status, "submission completion with nothing in flight");
            return;
        }
        self.state.status = match result {
            Ok(()) => SubmissionStatus::Submitted,
            Err(error) => {
                tracing::warn!(%error, "submission failed");
                SubmissionStatus::Failed
            }
        };
    }

    /// Full submit cycle: validate, call the gateway at most once, record the
    /// outcome. Returns the resulting status.
    pub async fn submit(&mut self) -> SubmissionStatus {
        if let SubmitDecision::Started(payload) = self.begin_submit() {
            let result = self.gateway.deliver(&payload).await;
            self.finish_submit(result);
        }
        self.state.status
    }
}
