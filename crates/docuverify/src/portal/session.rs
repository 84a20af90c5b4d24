use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{ApplicationRecord, ConsentField, SectionPayload};
use super::payment::{
    lock_host, ModalDocument, PaymentError, PaymentInjector, PaymentWidgetConfig, WidgetHost,
};
use super::review::{FinalReview, ReviewSummary};
use super::validation::{RulesetVersion, SectionChecklist, ValidationRuleset};
use super::wizard::{Transition, WizardController};

/// Identifier wrapper for live wizard sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("ses-{id:06}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigationRequest {
    Next,
    Back,
    GoTo { step: u8 },
}

/// One applicant's pass through the wizard. Dropping the session tears down any open
/// payment widget.
pub struct PortalSession<H: WidgetHost> {
    id: SessionId,
    created_at: DateTime<Utc>,
    wizard: WizardController,
    review: FinalReview,
    injector: PaymentInjector<H>,
}

impl<H: WidgetHost> PortalSession<H> {
    pub fn new(
        id: SessionId,
        ruleset: ValidationRuleset,
        host: H,
        payment: PaymentWidgetConfig,
    ) -> Self {
        let wizard = WizardController::new(ruleset);
        let review = FinalReview::new(wizard.ruleset(), wizard.record().final_consent);
        info!(session = %id, steps = wizard.step_count(), "wizard session created");

        Self {
            id,
            created_at: Utc::now(),
            wizard,
            review,
            injector: PaymentInjector::new(Arc::new(Mutex::new(host)), payment),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn injector(&self) -> &PaymentInjector<H> {
        &self.injector
    }

    pub fn host(&self) -> &Arc<Mutex<H>> {
        self.injector.host()
    }

    pub fn next(&mut self) -> Transition {
        self.wizard.next()
    }

    pub fn back(&mut self) -> Transition {
        self.wizard.back()
    }

    pub fn go_to_step(&mut self, step: u8) -> Transition {
        self.wizard.go_to_step(step)
    }

    pub fn navigate(&mut self, request: NavigationRequest) -> Transition {
        match request {
            NavigationRequest::Next => self.next(),
            NavigationRequest::Back => self.back(),
            NavigationRequest::GoTo { step } => self.go_to_step(step),
        }
    }

    /// Commits `payload`. A consent section written here also reseeds the review check.
    pub fn update_section(&mut self, payload: SectionPayload) {
        if let SectionPayload::FinalConsent(consent) = &payload {
            self.review.reseed(*consent);
        }
        self.wizard.update_section(payload);
    }

    pub fn review(&self) -> &FinalReview {
        &self.review
    }

    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::from_record(self.wizard.record(), self.wizard.ruleset())
    }

    pub fn set_consent(&mut self, field: ConsentField, value: bool) {
        self.review.set_consent(&mut self.wizard, field, value);
    }

    /// Finalize through the review screen: opens the payment modal only when consent is
    /// complete. Returns whether the modal was opened.
    pub fn request_finalize(&mut self) -> Result<bool, PaymentError> {
        let wizard = &mut self.wizard;
        let accepted = self.review.finalize(|| {
            wizard.finalize();
        });
        if accepted {
            self.sync_payment()?;
        }
        Ok(accepted)
    }

    /// Opens the payment modal without consulting consent.
    pub fn finalize(&mut self) -> Result<(), PaymentError> {
        self.wizard.finalize();
        self.sync_payment()
    }

    pub fn close_payment_modal(&mut self) -> bool {
        let changed = self.wizard.close_payment_modal();
        self.injector.close();
        changed
    }

    fn sync_payment(&mut self) -> Result<(), PaymentError> {
        if let Err(err) = self.injector.sync(self.wizard.payment_modal_visible()) {
            self.wizard.close_payment_modal();
            return Err(err);
        }
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        let wizard = &self.wizard;
        let complete = wizard.is_complete();
        let final_step = wizard.steps().final_step();
        let steps = wizard
            .steps()
            .iter()
            .map(|step| StepView {
                ordinal: step.ordinal,
                title: step.title,
                current: step.ordinal == wizard.current_step(),
                locked: step.ordinal == final_step && !complete,
            })
            .collect();

        SessionView {
            session_id: self.id.clone(),
            created_at: self.created_at,
            ruleset: wizard.ruleset().version,
            current_step: wizard.current_step(),
            steps,
            checklist: wizard.checklist(),
            complete,
            can_finalize: self.review.can_finalize(),
            payment_modal_visible: wizard.payment_modal_visible(),
            record: wizard.record().clone(),
        }
    }
}

impl PortalSession<ModalDocument> {
    /// Signals that the modal content has rendered its payment container.
    pub fn mount_payment_container(&self) {
        lock_host(self.host()).mount();
    }

    pub fn payment_view(&self) -> PaymentView {
        let document = lock_host(self.host());
        let button_id = &self.injector.config().payment_button_id;
        PaymentView {
            visible: self.wizard.payment_modal_visible(),
            polling: self.injector.is_polling(),
            container_mounted: document.is_mounted(),
            script_count: document.script_count(button_id),
            markup: document.markup(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub ordinal: u8,
    pub title: &'static str,
    pub current: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub ruleset: RulesetVersion,
    pub current_step: u8,
    pub steps: Vec<StepView>,
    pub checklist: SectionChecklist,
    pub complete: bool,
    pub can_finalize: bool,
    pub payment_modal_visible: bool,
    pub record: ApplicationRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    pub visible: bool,
    pub polling: bool,
    pub container_mounted: bool,
    pub script_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub transition: Transition,
    pub session: SessionView,
}
