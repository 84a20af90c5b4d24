use std::sync::Arc;
use std::time::Duration;

use axum::body::to_bytes;
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::portal::domain::{
    AcademicHistory, ApplicationRecord, BachelorQualification, CourseEntry, DocumentKind,
    Documents, FileHandle, JobPreferences, PersonalDetails, Qualification, ROLE_OPTIONS,
};
use crate::portal::payment::PaymentWidgetConfig;
use crate::portal::validation::ValidationRuleset;
use crate::portal::wizard::WizardController;
use crate::portal::{portal_router, PortalService, SectionPayload};

pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(super) fn personal_details() -> PersonalDetails {
    PersonalDetails {
        full_name: "Asha Verma".to_string(),
        father_name: "Raghav Verma".to_string(),
        email_address: "asha.verma@example.com".to_string(),
        date_of_birth: "1999-04-12".to_string(),
        contact_number: "+91 98450 12345".to_string(),
        permanent_address: "14 Lake Road, Pune".to_string(),
    }
}

pub(super) fn academic_history() -> AcademicHistory {
    AcademicHistory {
        tenth: Qualification {
            board: "CBSE".to_string(),
            year: "2015".to_string(),
            percentage: "91".to_string(),
        },
        twelfth: Qualification {
            board: "CBSE".to_string(),
            year: "2017".to_string(),
            percentage: "88".to_string(),
        },
        bachelor: BachelorQualification {
            board: "Pune University".to_string(),
            year: "2021".to_string(),
            percentage: "8.4".to_string(),
            degree: "B.E. Computer Engineering".to_string(),
        },
        courses: vec![CourseEntry {
            name: "Cloud Fundamentals".to_string(),
            grade: "A".to_string(),
        }],
    }
}

pub(super) fn documents() -> Documents {
    let mut documents = Documents::default();
    for kind in DocumentKind::ordered() {
        documents.attach(kind, FileHandle::named(format!("{kind:?}.pdf").to_lowercase()));
    }
    documents
}

pub(super) fn job_preferences() -> JobPreferences {
    JobPreferences {
        interested_role: ROLE_OPTIONS[1].to_string(),
        selected_roles: vec![ROLE_OPTIONS[3].to_string()],
        why_best_fit: "Three years of shipping Node services backed by Postgres.".to_string(),
    }
}

pub(super) fn complete_record() -> ApplicationRecord {
    ApplicationRecord {
        personal_details: personal_details(),
        academic_history: academic_history(),
        documents: documents(),
        job_section: job_preferences(),
        ..ApplicationRecord::default()
    }
}

/// Commits every gated section of `record` through the controller.
pub(super) fn fill(wizard: &mut WizardController, record: &ApplicationRecord) {
    wizard.update_section(SectionPayload::PersonalDetails(record.personal_details.clone()));
    wizard.update_section(SectionPayload::AcademicHistory(record.academic_history.clone()));
    wizard.update_section(SectionPayload::Documents(record.documents.clone()));
    wizard.update_section(SectionPayload::JobSection(record.job_section.clone()));
}

pub(super) fn complete_wizard(ruleset: ValidationRuleset) -> WizardController {
    let mut wizard = WizardController::new(ruleset);
    fill(&mut wizard, &complete_record());
    wizard
}

pub(super) fn widget_config() -> PaymentWidgetConfig {
    PaymentWidgetConfig {
        poll_interval: POLL_INTERVAL,
        ..PaymentWidgetConfig::default()
    }
}

pub(super) fn build_service() -> Arc<PortalService> {
    Arc::new(PortalService::with_ruleset(
        ValidationRuleset::current(),
        widget_config(),
    ))
}

pub(super) fn router_with_service(service: Arc<PortalService>) -> Router {
    portal_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("valid json body")
}
