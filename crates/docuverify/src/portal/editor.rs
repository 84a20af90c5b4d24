//! Section editor contract.
//!
//! An editor borrows the controller, seeds a local draft from the committed section, and
//! pushes the complete draft back after every change. It never owns the record.

use super::domain::{
    AcademicHistory, ApplicationRecord, Documents, FinalConsent, JobPreferences,
    PersonalDetails, SectionKey, SectionPayload,
};
use super::wizard::WizardController;

/// A typed record section with an explicit default shape.
pub trait Section: Clone + Default {
    const KEY: SectionKey;

    fn view(record: &ApplicationRecord) -> &Self;

    fn into_payload(self) -> SectionPayload;
}

impl Section for PersonalDetails {
    const KEY: SectionKey = SectionKey::PersonalDetails;

    fn view(record: &ApplicationRecord) -> &Self {
        &record.personal_details
    }

    fn into_payload(self) -> SectionPayload {
        SectionPayload::PersonalDetails(self)
    }
}

impl Section for AcademicHistory {
    const KEY: SectionKey = SectionKey::AcademicHistory;

    fn view(record: &ApplicationRecord) -> &Self {
        &record.academic_history
    }

    fn into_payload(self) -> SectionPayload {
        SectionPayload::AcademicHistory(self)
    }
}

impl Section for Documents {
    const KEY: SectionKey = SectionKey::Documents;

    fn view(record: &ApplicationRecord) -> &Self {
        &record.documents
    }

    fn into_payload(self) -> SectionPayload {
        SectionPayload::Documents(self)
    }
}

impl Section for JobPreferences {
    const KEY: SectionKey = SectionKey::JobSection;

    fn view(record: &ApplicationRecord) -> &Self {
        &record.job_section
    }

    fn into_payload(self) -> SectionPayload {
        SectionPayload::JobSection(self)
    }
}

impl Section for FinalConsent {
    const KEY: SectionKey = SectionKey::FinalConsent;

    fn view(record: &ApplicationRecord) -> &Self {
        &record.final_consent
    }

    fn into_payload(self) -> SectionPayload {
        SectionPayload::FinalConsent(self)
    }
}

pub struct SectionEditor<'w, S: Section> {
    wizard: &'w mut WizardController,
    draft: S,
}

impl<'w, S: Section> SectionEditor<'w, S> {
    pub fn open(wizard: &'w mut WizardController) -> Self {
        let draft = S::view(wizard.record()).clone();
        Self { wizard, draft }
    }

    pub fn draft(&self) -> &S {
        &self.draft
    }

    /// Applies `change` to the draft and commits the whole draft.
    pub fn edit<F>(&mut self, change: F)
    where
        F: FnOnce(&mut S),
    {
        change(&mut self.draft);
        self.commit();
    }

    pub fn replace(&mut self, draft: S) {
        self.draft = draft;
        self.commit();
    }

    /// Read-only access to the controller, e.g. to check the gate after an edit.
    pub fn wizard(&self) -> &WizardController {
        &*self.wizard
    }

    fn commit(&mut self) {
        let payload = self.draft.clone().into_payload();
        debug_assert_eq!(payload.key(), S::KEY);
        self.wizard.update_section(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::domain::{PersonalField, ROLE_OPTIONS};

    #[test]
    fn draft_is_seeded_from_committed_section() {
        let mut wizard = WizardController::default();
        wizard.editor::<PersonalDetails>().edit(|draft| {
            draft.set(PersonalField::FullName, "Asha Verma");
        });

        let editor = wizard.editor::<PersonalDetails>();
        assert_eq!(editor.draft().full_name, "Asha Verma");
    }

    #[test]
    fn every_edit_commits_the_full_draft() {
        let mut wizard = WizardController::default();
        {
            let mut editor = wizard.editor::<JobPreferences>();
            editor.edit(|job| job.select_role(ROLE_OPTIONS[1]));
            assert_eq!(editor.wizard().record().job_section.interested_role, ROLE_OPTIONS[1]);
            editor.edit(|job| job.toggle_role(ROLE_OPTIONS[2], true));
        }

        let job = &wizard.record().job_section;
        assert_eq!(job.interested_role, ROLE_OPTIONS[1]);
        assert_eq!(job.selected_roles, vec![ROLE_OPTIONS[2]]);
    }
}
