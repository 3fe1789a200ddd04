use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;

use payform::{
    EmailRelayConfig, EmailRelayGateway, FieldKind, Form, FormConfig, SubmissionError,
    SubmissionGateway, SubmissionPayload, SubmissionStatus, SubmitDecision,
};

/// Gateway double that records every delivered payload and answers with a
/// preconfigured result.
struct RecordingGateway {
    deliveries: Arc<Mutex<Vec<SubmissionPayload>>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingGateway {
    fn new(fail: bool) -> (Self, Arc<Mutex<Vec<SubmissionPayload>>>, Arc<AtomicUsize>) {
        let deliveries = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        (
            RecordingGateway {
                deliveries: deliveries.clone(),
                calls: calls.clone(),
                fail,
            },
            deliveries,
            calls,
        )
    }
}

#[async_trait]
impl SubmissionGateway for RecordingGateway {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deliveries.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(SubmissionError::UnexpectedStatus(502))
        } else {
            Ok(())
        }
    }
}

fn test_config() -> FormConfig {
    FormConfig {
        forced_datetime_utc: Some(Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()),
        ..FormConfig::default()
    }
}

fn fill_valid(form: &mut Form) {
    form.edit(FieldKind::GivenName, "Dana");
    form.edit(FieldKind::FamilyName, "Levi");
    form.edit(FieldKind::CardNumber, "4539 1488 0343 6467");
    // one month past the forced date
    form.edit(FieldKind::ExpiryDate, "0725");
    form.edit(FieldKind::SecurityCode, "123");
    form.edit(FieldKind::NationalId, "123456782");
}

#[tokio::test]
async fn valid_form_submits_end_to_end() {
    let (gateway, deliveries, calls) = RecordingGateway::new(false);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);

    assert_eq!(form.status(), SubmissionStatus::Idle);
    let status = form.submit().await;
    assert_eq!(status, SubmissionStatus::Submitted);
    assert!(form.errors().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let delivered = deliveries.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].full_name, "Dana Levi");
    assert_eq!(delivered[0].card_number, "************6467");
    assert_eq!(delivered[0].expiry, "07/25");
    assert_eq!(delivered[0].national_id, "*******82");
    assert_eq!(delivered[0].submitted_at, "15.06.2025, 09:30:00");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_gateway() {
    let (gateway, _deliveries, calls) = RecordingGateway::new(false);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);
    form.edit(FieldKind::CardNumber, "4539148803436468");

    let status = form.submit().await;
    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(form.errors().len(), 1);
    assert!(form.errors().contains_key(&FieldKind::CardNumber));
}

#[tokio::test]
async fn failed_submission_can_be_retried_with_same_values() {
    let (gateway, _deliveries, calls) = RecordingGateway::new(true);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);

    assert_eq!(form.submit().await, SubmissionStatus::Failed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // values are retained; a second trigger revalidates and goes out again
    assert_eq!(form.field(FieldKind::CardNumber).raw, "4539148803436467");
    assert_eq!(form.submit().await, SubmissionStatus::Failed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn repeated_triggers_in_flight_produce_one_delivery() {
    let (gateway, _deliveries, _calls) = RecordingGateway::new(false);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);

    // drive the transitions by hand so the first submission stays in flight
    let first = form.begin_submit();
    assert!(matches!(first, SubmitDecision::Started(_)));
    assert_eq!(form.begin_submit(), SubmitDecision::Ignored);
    assert_eq!(form.begin_submit(), SubmitDecision::Ignored);

    form.finish_submit(Ok(()));
    assert_eq!(form.status(), SubmissionStatus::Submitted);
    // once delivered, further triggers are still no-ops until an edit
    assert_eq!(form.begin_submit(), SubmitDecision::Ignored);
}

#[tokio::test]
async fn email_relay_gateway_maps_http_status() {
    let server = MockServer::start();
    let accepted = server.mock(|when, then| {
        when.method(POST)
            .path("/api/send")
            .json_body_partial(r#"{ "service_id": "svc_1", "template_id": "tpl_1" }"#);
        then.status(200);
    });

    let config = EmailRelayConfig::new(server.url("/api/send"), "svc_1", "tpl_1", "user_1");
    let gateway = EmailRelayGateway::new(config);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);

    assert_eq!(form.submit().await, SubmissionStatus::Submitted);
    accepted.assert();
}

#[tokio::test]
async fn email_relay_gateway_surfaces_server_errors_as_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/send");
        then.status(503);
    });

    let config = EmailRelayConfig::new(server.url("/api/send"), "svc_1", "tpl_1", "user_1");
    let gateway = EmailRelayGateway::new(config);
    let mut form = Form::with_config(Box::new(gateway), test_config());
    fill_valid(&mut form);

    assert_eq!(form.submit().await, SubmissionStatus::Failed);
}
