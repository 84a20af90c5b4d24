//! Document verification application portal.
//!
//! A step wizard aggregates the applicant's sections into one record, gates the review
//! step on record completeness, and drives the payment widget once the applicant
//! finalizes.

pub mod domain;
pub mod editor;
pub mod payment;
pub mod review;
pub mod router;
pub mod service;
pub mod session;
pub mod steps;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    AcademicHistory, AcademicLevel, ApplicationRecord, BachelorQualification, ConsentField,
    CourseEntry, CourseField, DocumentKind, Documents, FileHandle, FinalConsent,
    JobPreferences, PersonalDetails, PersonalField, Qualification, QualificationField,
    SectionKey, SectionPayload, ROLE_OPTIONS,
};
pub use editor::{Section, SectionEditor};
pub use payment::{
    InjectionGuard, ModalDocument, PaymentError, PaymentInjector, PaymentWidgetConfig,
    TickOutcome, WidgetHost,
};
pub use review::{FinalReview, ReviewSummary};
pub use router::portal_router;
pub use service::{ConsentRequest, PortalService, PortalServiceError};
pub use session::{NavigationRequest, PaymentView, PortalSession, SessionId, SessionView};
pub use steps::{StepDescriptor, StepPlan};
pub use validation::{RulesetVersion, SectionChecklist, ValidationEngine, ValidationRuleset};
pub use wizard::{GateBlock, Transition, WizardController};
