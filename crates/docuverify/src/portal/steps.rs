use serde::Serialize;

use super::domain::SectionKey;

/// One screen of the wizard. `section` is the record section the screen edits, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub ordinal: u8,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionKey>,
}

/// Ordered, immutable list of steps. Defines both display order and the legal range `[1, N]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    steps: Vec<StepDescriptor>,
}

const PERSONAL: StepDescriptor = StepDescriptor {
    ordinal: 1,
    title: "Personal Details",
    section: Some(SectionKey::PersonalDetails),
};

const ACADEMIC: StepDescriptor = StepDescriptor {
    ordinal: 2,
    title: "Academic History",
    section: Some(SectionKey::AcademicHistory),
};

const DOCUMENTS: StepDescriptor = StepDescriptor {
    ordinal: 3,
    title: "Document Locker",
    section: Some(SectionKey::Documents),
};

impl StepPlan {
    /// Personal, academic, documents, job, review.
    pub fn current() -> Self {
        Self {
            steps: vec![
                PERSONAL,
                ACADEMIC,
                DOCUMENTS,
                StepDescriptor {
                    ordinal: 4,
                    title: "Job Section",
                    section: Some(SectionKey::JobSection),
                },
                StepDescriptor {
                    ordinal: 5,
                    title: "Final Review",
                    section: Some(SectionKey::FinalConsent),
                },
            ],
        }
    }

    /// Four-step flow without a job section.
    pub fn legacy() -> Self {
        Self {
            steps: vec![
                PERSONAL,
                ACADEMIC,
                DOCUMENTS,
                StepDescriptor {
                    ordinal: 4,
                    title: "Final Review",
                    section: Some(SectionKey::FinalConsent),
                },
            ],
        }
    }

    pub fn len(&self) -> u8 {
        self.steps.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The review step, which is gated on completeness.
    pub fn final_step(&self) -> u8 {
        self.len()
    }

    pub fn contains(&self, step: u8) -> bool {
        (1..=self.len()).contains(&step)
    }

    pub fn descriptor(&self, step: u8) -> Option<&StepDescriptor> {
        step.checked_sub(1)
            .and_then(|index| self.steps.get(index as usize))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_contiguous_from_one() {
        for plan in [StepPlan::current(), StepPlan::legacy()] {
            for (index, step) in plan.iter().enumerate() {
                assert_eq!(step.ordinal as usize, index + 1);
            }
        }
    }

    #[test]
    fn range_checks_follow_plan_length() {
        let plan = StepPlan::legacy();
        assert_eq!(plan.final_step(), 4);
        assert!(!plan.contains(0));
        assert!(plan.contains(4));
        assert!(!plan.contains(5));
        assert!(plan.descriptor(0).is_none());
        assert_eq!(
            plan.descriptor(4).map(|step| step.title),
            Some("Final Review")
        );
    }
}
