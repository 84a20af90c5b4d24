use super::super::domain::{
    AcademicHistory, BachelorQualification, DocumentKind, Documents, FinalConsent,
    JobPreferences, PersonalDetails, PersonalField, Qualification,
};
use super::config::ValidationRuleset;

/// Whitespace-only input counts as empty.
pub(crate) fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

const REQUIRED_PERSONAL: [PersonalField; 5] = [
    PersonalField::FullName,
    PersonalField::FatherName,
    PersonalField::ContactNumber,
    PersonalField::PermanentAddress,
    PersonalField::DateOfBirth,
];

pub fn personal_valid(personal: &PersonalDetails, ruleset: &ValidationRuleset) -> bool {
    let core = REQUIRED_PERSONAL
        .iter()
        .all(|field| filled(personal.field(*field)));
    core && (!ruleset.require_email || filled(&personal.email_address))
}

fn qualification_valid(record: &Qualification) -> bool {
    filled(&record.board) && filled(&record.year) && filled(&record.percentage)
}

fn bachelor_valid(record: &BachelorQualification) -> bool {
    filled(&record.board)
        && filled(&record.year)
        && filled(&record.percentage)
        && filled(&record.degree)
}

/// Course rows are never required.
pub fn academic_valid(history: &AcademicHistory) -> bool {
    qualification_valid(&history.tenth)
        && qualification_valid(&history.twelfth)
        && bachelor_valid(&history.bachelor)
}

pub fn documents_valid(documents: &Documents, ruleset: &ValidationRuleset) -> bool {
    !ruleset.require_documents
        || DocumentKind::ordered()
            .into_iter()
            .all(|kind| documents.get(kind).is_some())
}

/// Additional roles are never required.
pub fn job_valid(job: &JobPreferences, ruleset: &ValidationRuleset) -> bool {
    if !ruleset.require_job_section {
        return true;
    }

    let within_limit = ruleset
        .justification_char_limit
        .map_or(true, |limit| job.justification_chars() <= limit);

    filled(&job.interested_role) && filled(&job.why_best_fit) && within_limit
}

pub fn consent_satisfied(consent: &FinalConsent, ruleset: &ValidationRuleset) -> bool {
    ruleset
        .consent_fields
        .iter()
        .all(|field| consent.get(*field))
}
