use serde::{Deserialize, Serialize};

use super::super::domain::ConsentField;
use super::super::steps::StepPlan;

/// Named variants of the required-field rules observed across portal releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesetVersion {
    Current,
    Legacy,
}

impl RulesetVersion {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "current" | "v2" => Some(Self::Current),
            "legacy" | "v1" => Some(Self::Legacy),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }

    pub fn steps(self) -> StepPlan {
        match self {
            Self::Current => StepPlan::current(),
            Self::Legacy => StepPlan::legacy(),
        }
    }
}

/// Versioned configuration consumed by the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRuleset {
    pub version: RulesetVersion,
    pub require_email: bool,
    pub require_documents: bool,
    pub require_job_section: bool,
    pub justification_char_limit: Option<usize>,
    pub consent_fields: Vec<ConsentField>,
}

impl ValidationRuleset {
    pub fn current() -> Self {
        Self {
            version: RulesetVersion::Current,
            require_email: false,
            require_documents: true,
            require_job_section: true,
            justification_char_limit: Some(400),
            consent_fields: vec![ConsentField::Declaration],
        }
    }

    pub fn legacy() -> Self {
        Self {
            version: RulesetVersion::Legacy,
            require_email: true,
            require_documents: false,
            require_job_section: false,
            justification_char_limit: None,
            consent_fields: vec![ConsentField::Declaration, ConsentField::Terms],
        }
    }

    pub fn for_version(version: RulesetVersion) -> Self {
        match version {
            RulesetVersion::Current => Self::current(),
            RulesetVersion::Legacy => Self::legacy(),
        }
    }

    pub fn steps(&self) -> StepPlan {
        self.version.steps()
    }
}

impl Default for ValidationRuleset {
    fn default() -> Self {
        Self::current()
    }
}
