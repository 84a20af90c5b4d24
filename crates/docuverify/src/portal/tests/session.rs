use super::common::*;
use std::sync::Arc;

use tokio::time::sleep;

use crate::portal::domain::{ConsentField, FinalConsent, SectionPayload};
use crate::portal::payment::{lock_host, ModalDocument, DEFAULT_PAYMENT_BUTTON_ID};
use crate::portal::review::{FinalReview, ReviewSummary, NOT_PROVIDED};
use crate::portal::session::{next_session_id, NavigationRequest, PortalSession};
use crate::portal::validation::ValidationRuleset;
use crate::portal::wizard::Transition;
use crate::portal::{PortalServiceError, SessionId};

fn session(ruleset: ValidationRuleset) -> PortalSession<ModalDocument> {
    PortalSession::new(
        next_session_id(),
        ruleset,
        ModalDocument::new(),
        widget_config(),
    )
}

fn filled_session(ruleset: ValidationRuleset) -> PortalSession<ModalDocument> {
    let mut session = session(ruleset);
    let record = complete_record();
    session.update_section(SectionPayload::PersonalDetails(record.personal_details));
    session.update_section(SectionPayload::AcademicHistory(record.academic_history));
    session.update_section(SectionPayload::Documents(record.documents));
    session.update_section(SectionPayload::JobSection(record.job_section));
    session
}

#[test]
fn session_ids_are_sequential_and_prefixed() {
    let first = next_session_id();
    let second = next_session_id();
    assert!(first.0.starts_with("ses-"));
    assert_ne!(first, second);
}

#[test]
fn navigation_requests_map_onto_the_wizard() {
    let mut session = session(ValidationRuleset::current());
    assert!(session.navigate(NavigationRequest::Next).moved());
    assert!(session.navigate(NavigationRequest::Back).moved());
    assert!(matches!(
        session.navigate(NavigationRequest::GoTo { step: 5 }),
        Transition::Blocked { step: 1, .. }
    ));
}

#[test]
fn view_marks_the_review_step_locked_until_complete() {
    let session = session(ValidationRuleset::current());
    let view = session.view();
    assert_eq!(view.steps.len(), 5);
    assert!(view.steps[0].current);
    assert!(view.steps[4].locked);
    assert!(!view.complete);

    let session = filled_session(ValidationRuleset::current());
    let view = session.view();
    assert!(view.complete);
    assert!(view.steps.iter().all(|step| !step.locked));
}

#[tokio::test(start_paused = true)]
async fn review_finalize_waits_for_consent() {
    let mut session = filled_session(ValidationRuleset::current());
    session.go_to_step(5);

    assert!(!session.request_finalize().expect("runtime available"));
    assert!(!session.wizard().payment_modal_visible());
    assert!(!session.injector().is_open());

    session.set_consent(ConsentField::Declaration, true);
    assert!(session.wizard().record().final_consent.declaration);
    assert!(session.request_finalize().expect("runtime available"));
    assert!(session.wizard().payment_modal_visible());

    session.mount_payment_container();
    sleep(POLL_INTERVAL).await;
    let payment = session.payment_view();
    assert!(payment.visible);
    assert_eq!(payment.script_count, 1);
    assert!(payment
        .markup
        .as_deref()
        .is_some_and(|markup| markup.contains(DEFAULT_PAYMENT_BUTTON_ID)));

    assert!(session.close_payment_modal());
    let payment = session.payment_view();
    assert!(!payment.visible);
    assert_eq!(payment.script_count, 0);
}

#[tokio::test(start_paused = true)]
async fn legacy_review_needs_both_declarations() {
    let mut session = filled_session(ValidationRuleset::legacy());
    session.set_consent(ConsentField::Declaration, true);
    assert!(!session.review().can_finalize());
    session.set_consent(ConsentField::Terms, true);
    assert!(session.request_finalize().expect("runtime available"));
}

#[tokio::test(start_paused = true)]
async fn consent_section_writes_reseed_the_review_check() {
    let mut session = filled_session(ValidationRuleset::current());
    session.set_consent(ConsentField::Declaration, true);
    assert!(session.review().can_finalize());

    session.update_section(SectionPayload::FinalConsent(FinalConsent::default()));
    assert!(!session.wizard().record().final_consent.declaration);
    assert!(!session.review().can_finalize());
    assert!(!session.request_finalize().expect("runtime available"));
    assert!(!session.wizard().payment_modal_visible());

    let accepted = FinalConsent {
        declaration: true,
        ..FinalConsent::default()
    };
    session.update_section(SectionPayload::FinalConsent(accepted));
    assert!(session.review().can_finalize());
    assert!(session.view().can_finalize);
    assert!(session.request_finalize().expect("runtime available"));
}

#[tokio::test(start_paused = true)]
async fn direct_finalize_skips_the_consent_check() {
    let mut session = session(ValidationRuleset::current());
    session.finalize().expect("runtime available");
    assert!(session.wizard().payment_modal_visible());
    assert!(session.injector().is_open());
}

#[test]
fn finalize_without_runtime_rolls_back_the_modal() {
    let mut session = session(ValidationRuleset::current());
    assert!(session.finalize().is_err());
    assert!(!session.wizard().payment_modal_visible());
}

#[tokio::test(start_paused = true)]
async fn dropping_a_session_tears_down_the_widget() {
    let mut session = session(ValidationRuleset::current());
    session.finalize().expect("runtime available");
    session.mount_payment_container();
    sleep(POLL_INTERVAL).await;

    let host = Arc::clone(session.host());
    assert_eq!(lock_host(&host).script_count(DEFAULT_PAYMENT_BUTTON_ID), 1);
    drop(session);
    assert_eq!(lock_host(&host).script_count(DEFAULT_PAYMENT_BUTTON_ID), 0);
}

#[test]
fn final_review_invokes_callback_only_when_enabled() {
    let ruleset = ValidationRuleset::current();
    let mut wizard = complete_wizard(ruleset.clone());
    let mut review = FinalReview::new(&ruleset, wizard.record().final_consent);

    let mut calls = 0;
    assert!(!review.finalize(|| calls += 1));
    review.set_consent(&mut wizard, ConsentField::Declaration, true);
    assert!(review.finalize(|| calls += 1));
    assert_eq!(calls, 1);
    assert_eq!(review.required_fields(), &[ConsentField::Declaration]);
}

#[test]
fn review_summary_marks_missing_values() {
    let ruleset = ValidationRuleset::current();
    let mut record = complete_record();
    record.personal_details.email_address.clear();
    record.documents.degree = None;

    let summary = ReviewSummary::from_record(&record, &ruleset);
    let email = summary
        .personal
        .iter()
        .find(|line| line.label == "Email Address")
        .expect("email line");
    assert_eq!(email.value, NOT_PROVIDED);
    assert_eq!(summary.documents.iter().filter(|doc| doc.uploaded).count(), 3);
    assert_eq!(summary.courses, vec!["Cloud Fundamentals: A".to_string()]);
    assert!(summary.job.is_some());

    let legacy = ReviewSummary::from_record(&record, &ValidationRuleset::legacy());
    assert!(legacy.job.is_none());
    assert_eq!(legacy.consent.len(), 2);
}

#[test]
fn service_reports_unknown_sessions() {
    let service = build_service();
    let missing = SessionId("ses-missing".to_string());
    assert!(matches!(
        service.get(&missing),
        Err(PortalServiceError::SessionNotFound(_))
    ));
    assert!(service.discard(&missing).is_err());
}

#[test]
fn service_decodes_sections_by_wire_name() {
    let service = build_service();
    let created = service.create();

    let view = service
        .update_section(
            &created.session_id,
            "personal_details",
            serde_json::json!({ "fullName": "Asha Verma" }),
        )
        .expect("section accepted");
    assert_eq!(view.record.personal_details.full_name, "Asha Verma");
    assert_eq!(view.record.personal_details.father_name, "");

    assert!(matches!(
        service.update_section(&created.session_id, "payments", serde_json::json!({})),
        Err(PortalServiceError::UnknownSection(_))
    ));
    assert!(matches!(
        service.update_section(
            &created.session_id,
            "documents",
            serde_json::json!({ "passport": 7 })
        ),
        Err(PortalServiceError::InvalidPayload { .. })
    ));
}
