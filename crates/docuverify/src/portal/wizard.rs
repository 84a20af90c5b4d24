use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicationRecord, SectionKey, SectionPayload};
use super::editor::{Section, SectionEditor};
use super::steps::{StepDescriptor, StepPlan};
use super::validation::{consent_satisfied, SectionChecklist, ValidationEngine, ValidationRuleset};

/// Result of a navigation request. Rejections are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    Moved { from: u8, to: u8 },
    Stayed { step: u8 },
    Blocked { step: u8, reason: GateBlock },
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateBlock {
    OutOfRange { requested: u8 },
    Incomplete { missing: Vec<SectionKey> },
}

/// Owns the current step, the aggregated record, and payment modal visibility.
#[derive(Debug, Clone)]
pub struct WizardController {
    plan: StepPlan,
    engine: ValidationEngine,
    current_step: u8,
    record: ApplicationRecord,
    payment_modal_visible: bool,
}

impl WizardController {
    pub fn new(ruleset: ValidationRuleset) -> Self {
        let plan = ruleset.steps();
        Self {
            plan,
            engine: ValidationEngine::new(ruleset),
            current_step: 1,
            record: ApplicationRecord::default(),
            payment_modal_visible: false,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn current_descriptor(&self) -> Option<&StepDescriptor> {
        self.plan.descriptor(self.current_step)
    }

    pub fn step_count(&self) -> u8 {
        self.plan.len()
    }

    pub fn steps(&self) -> &StepPlan {
        &self.plan
    }

    pub fn ruleset(&self) -> &ValidationRuleset {
        self.engine.ruleset()
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn payment_modal_visible(&self) -> bool {
        self.payment_modal_visible
    }

    pub fn checklist(&self) -> SectionChecklist {
        self.engine.checklist(&self.record)
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete(&self.record)
    }

    pub fn next(&mut self) -> Transition {
        if self.current_step < self.plan.len() {
            self.move_to(self.current_step + 1)
        } else {
            Transition::Stayed {
                step: self.current_step,
            }
        }
    }

    pub fn back(&mut self) -> Transition {
        if self.current_step > 1 {
            self.move_to(self.current_step - 1)
        } else {
            Transition::Stayed {
                step: self.current_step,
            }
        }
    }

    /// Jumps to any in-range step. The review step additionally requires a complete record.
    pub fn go_to_step(&mut self, step: u8) -> Transition {
        if !self.plan.contains(step) {
            debug!(requested = step, "step jump rejected: out of range");
            return Transition::Blocked {
                step: self.current_step,
                reason: GateBlock::OutOfRange { requested: step },
            };
        }

        if step == self.plan.final_step() {
            let checklist = self.checklist();
            if !checklist.is_complete() {
                let missing = checklist.missing();
                debug!(?missing, "review step rejected: record incomplete");
                return Transition::Blocked {
                    step: self.current_step,
                    reason: GateBlock::Incomplete { missing },
                };
            }
        }

        if step == self.current_step {
            return Transition::Stayed { step };
        }
        self.move_to(step)
    }

    /// Replaces one section wholesale with the editor's snapshot.
    pub fn update_section(&mut self, payload: SectionPayload) {
        debug!(section = %payload.key(), "section committed");
        self.record.replace(payload);
    }

    /// Opens a typed editor over one section. The editor borrows the controller.
    pub fn editor<S: Section>(&mut self) -> SectionEditor<'_, S> {
        SectionEditor::open(self)
    }

    /// Shows the payment modal. Consent is the caller's responsibility; an unmet consent
    /// requirement is logged but does not stop the modal from opening.
    pub fn finalize(&mut self) -> bool {
        if !consent_satisfied(&self.record.final_consent, self.engine.ruleset()) {
            warn!("payment modal opened without the required consent declarations");
        }
        let changed = !self.payment_modal_visible;
        self.payment_modal_visible = true;
        info!(step = self.current_step, "application finalized; payment modal shown");
        changed
    }

    pub fn close_payment_modal(&mut self) -> bool {
        let changed = self.payment_modal_visible;
        self.payment_modal_visible = false;
        if changed {
            info!("payment modal closed");
        }
        changed
    }

    fn move_to(&mut self, step: u8) -> Transition {
        let from = self.current_step;
        self.current_step = step;
        debug!(from, to = step, "wizard step changed");
        Transition::Moved { from, to: step }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(ValidationRuleset::default())
    }
}
