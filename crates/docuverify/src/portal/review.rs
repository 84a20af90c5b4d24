use serde::Serialize;
use tracing::debug;

use super::domain::{
    AcademicLevel, ApplicationRecord, ConsentField, DocumentKind, FinalConsent, PersonalField,
    SectionPayload,
};
use super::validation::ValidationRuleset;
use super::wizard::WizardController;

pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationSummary {
    pub level: &'static str,
    pub lines: Vec<ReviewLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLine {
    pub label: &'static str,
    pub uploaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub primary_role: String,
    pub additional_roles: Vec<String>,
    pub why_best_fit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentLine {
    pub field: ConsentField,
    pub statement: &'static str,
    pub accepted: bool,
}

/// Read-only rendering of the record for the final review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub personal: Vec<ReviewLine>,
    pub academic: Vec<QualificationSummary>,
    pub courses: Vec<String>,
    pub documents: Vec<DocumentLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    pub consent: Vec<ConsentLine>,
}

fn or_not_provided(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

fn line(label: &'static str, value: &str) -> ReviewLine {
    ReviewLine {
        label,
        value: or_not_provided(value),
    }
}

impl ReviewSummary {
    pub fn from_record(record: &ApplicationRecord, ruleset: &ValidationRuleset) -> Self {
        let personal = [
            PersonalField::FullName,
            PersonalField::FatherName,
            PersonalField::EmailAddress,
            PersonalField::DateOfBirth,
            PersonalField::ContactNumber,
            PersonalField::PermanentAddress,
        ]
        .into_iter()
        .map(|field| line(field.label(), record.personal_details.field(field)))
        .collect();

        let history = &record.academic_history;
        let academic = AcademicLevel::ordered()
            .into_iter()
            .map(|level| {
                let lines = match level {
                    AcademicLevel::Tenth | AcademicLevel::Twelfth => {
                        let school = if level == AcademicLevel::Tenth {
                            &history.tenth
                        } else {
                            &history.twelfth
                        };
                        vec![
                            line("Board", &school.board),
                            line("Year", &school.year),
                            line("Percentage", &school.percentage),
                        ]
                    }
                    AcademicLevel::Bachelor => vec![
                        line("University", &history.bachelor.board),
                        line("Year", &history.bachelor.year),
                        line("CGPA", &history.bachelor.percentage),
                        line("Degree", &history.bachelor.degree),
                    ],
                };
                QualificationSummary {
                    level: level.label(),
                    lines,
                }
            })
            .collect();

        let courses = history
            .courses
            .iter()
            .filter(|course| !course.name.trim().is_empty() || !course.grade.trim().is_empty())
            .map(|course| format!("{}: {}", course.name, course.grade))
            .collect();

        let documents = DocumentKind::ordered()
            .into_iter()
            .map(|kind| {
                let handle = record.documents.get(kind);
                DocumentLine {
                    label: kind.label(),
                    uploaded: handle.is_some(),
                    file_name: handle.map(|handle| handle.name.clone()),
                }
            })
            .collect();

        let job = ruleset.require_job_section.then(|| {
            let job = &record.job_section;
            JobSummary {
                primary_role: or_not_provided(&job.interested_role),
                additional_roles: job.selected_roles.clone(),
                why_best_fit: or_not_provided(&job.why_best_fit),
            }
        });

        let consent = ruleset
            .consent_fields
            .iter()
            .map(|field| ConsentLine {
                field: *field,
                statement: field.statement(),
                accepted: record.final_consent.get(*field),
            })
            .collect();

        Self {
            personal,
            academic,
            courses,
            documents,
            job,
            consent,
        }
    }
}

/// Review-screen collaborator. Tracks consent locally and only fires the finalize
/// callback once every required declaration is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalReview {
    required: Vec<ConsentField>,
    consent: FinalConsent,
}

impl FinalReview {
    pub fn new(ruleset: &ValidationRuleset, seed: FinalConsent) -> Self {
        Self {
            required: ruleset.consent_fields.clone(),
            consent: seed,
        }
    }

    pub fn consent(&self) -> FinalConsent {
        self.consent
    }

    /// Replaces the local check with a consent section committed elsewhere.
    pub fn reseed(&mut self, seed: FinalConsent) {
        self.consent = seed;
    }

    pub fn required_fields(&self) -> &[ConsentField] {
        &self.required
    }

    /// Records the change locally and commits the whole consent section.
    pub fn set_consent(&mut self, wizard: &mut WizardController, field: ConsentField, value: bool) {
        self.consent.set(field, value);
        wizard.update_section(SectionPayload::FinalConsent(self.consent));
    }

    pub fn can_finalize(&self) -> bool {
        self.required.iter().all(|field| self.consent.get(*field))
    }

    /// Invokes `on_finalize` only when the finalize control would be enabled.
    pub fn finalize<F>(&self, on_finalize: F) -> bool
    where
        F: FnOnce(),
    {
        if !self.can_finalize() {
            debug!(required = ?self.required, "finalize ignored: consent incomplete");
            return false;
        }
        on_finalize();
        true
    }
}
