//! Completeness rules deciding whether the review step may be entered.

mod config;
mod rules;

pub use config::{RulesetVersion, ValidationRuleset};
pub use rules::{
    academic_valid, consent_satisfied, documents_valid, job_valid, personal_valid,
};

use serde::Serialize;

use super::domain::{ApplicationRecord, SectionKey};

/// Pass/fail flag per gated section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionChecklist {
    pub personal: bool,
    pub academic: bool,
    pub documents: bool,
    pub job: bool,
}

impl SectionChecklist {
    pub fn is_complete(&self) -> bool {
        self.personal && self.academic && self.documents && self.job
    }

    /// Sections still blocking the review step, in step order.
    pub fn missing(&self) -> Vec<SectionKey> {
        [
            (self.personal, SectionKey::PersonalDetails),
            (self.academic, SectionKey::AcademicHistory),
            (self.documents, SectionKey::Documents),
            (self.job, SectionKey::JobSection),
        ]
        .into_iter()
        .filter_map(|(valid, key)| (!valid).then_some(key))
        .collect()
    }
}

/// Stateless evaluator applying one ruleset to record snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationEngine {
    ruleset: ValidationRuleset,
}

impl ValidationEngine {
    pub fn new(ruleset: ValidationRuleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &ValidationRuleset {
        &self.ruleset
    }

    pub fn checklist(&self, record: &ApplicationRecord) -> SectionChecklist {
        checklist(record, &self.ruleset)
    }

    pub fn is_complete(&self, record: &ApplicationRecord) -> bool {
        is_complete(record, &self.ruleset)
    }
}

pub fn checklist(record: &ApplicationRecord, ruleset: &ValidationRuleset) -> SectionChecklist {
    SectionChecklist {
        personal: personal_valid(&record.personal_details, ruleset),
        academic: academic_valid(&record.academic_history),
        documents: documents_valid(&record.documents, ruleset),
        job: job_valid(&record.job_section, ruleset),
    }
}

/// Gate for the review step. Consent is deliberately not part of it.
pub fn is_complete(record: &ApplicationRecord, ruleset: &ValidationRuleset) -> bool {
    checklist(record, ruleset).is_complete()
}
