use std::fmt;

use serde::{Deserialize, Serialize};

/// The five top-level divisions of an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    PersonalDetails,
    AcademicHistory,
    Documents,
    JobSection,
    FinalConsent,
}

impl SectionKey {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PersonalDetails,
            Self::AcademicHistory,
            Self::Documents,
            Self::JobSection,
            Self::FinalConsent,
        ]
    }

    /// Wire name used by section editors and the HTTP surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonalDetails => "personalDetails",
            Self::AcademicHistory => "academicHistory",
            Self::Documents => "documents",
            Self::JobSection => "jobSection",
            Self::FinalConsent => "finalConsent",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalDetails => "Personal Details",
            Self::AcademicHistory => "Academic History",
            Self::Documents => "Documents",
            Self::JobSection => "Job Preferences",
            Self::FinalConsent => "Final Consent",
        }
    }

    /// Accepts the camelCase wire name as well as snake_case and kebab-case spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ordered()
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub full_name: String,
    pub father_name: String,
    pub email_address: String,
    pub date_of_birth: String,
    pub contact_number: String,
    pub permanent_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    FatherName,
    EmailAddress,
    DateOfBirth,
    ContactNumber,
    PermanentAddress,
}

impl PersonalField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::FatherName => "Father's Name",
            Self::EmailAddress => "Email Address",
            Self::DateOfBirth => "Date of Birth",
            Self::ContactNumber => "Contact Number",
            Self::PermanentAddress => "Permanent Address",
        }
    }
}

impl PersonalDetails {
    pub fn field(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::FatherName => &self.father_name,
            PersonalField::EmailAddress => &self.email_address,
            PersonalField::DateOfBirth => &self.date_of_birth,
            PersonalField::ContactNumber => &self.contact_number,
            PersonalField::PermanentAddress => &self.permanent_address,
        }
    }

    pub fn set(&mut self, field: PersonalField, value: impl Into<String>) {
        let slot = match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::FatherName => &mut self.father_name,
            PersonalField::EmailAddress => &mut self.email_address,
            PersonalField::DateOfBirth => &mut self.date_of_birth,
            PersonalField::ContactNumber => &mut self.contact_number,
            PersonalField::PermanentAddress => &mut self.permanent_address,
        };
        *slot = value.into();
    }
}

/// Board, year, and score for a school-level qualification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qualification {
    pub board: String,
    pub year: String,
    pub percentage: String,
}

/// Bachelor's record; `board` holds the university or college.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BachelorQualification {
    pub board: String,
    pub year: String,
    pub percentage: String,
    pub degree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseEntry {
    pub name: String,
    pub grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicLevel {
    Tenth,
    Twelfth,
    Bachelor,
}

impl AcademicLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Tenth, Self::Twelfth, Self::Bachelor]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tenth => "10th Standard",
            Self::Twelfth => "12th Standard",
            Self::Bachelor => "Bachelor's Degree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationField {
    Board,
    Year,
    Percentage,
    Degree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseField {
    Name,
    Grade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcademicHistory {
    pub tenth: Qualification,
    pub twelfth: Qualification,
    pub bachelor: BachelorQualification,
    pub courses: Vec<CourseEntry>,
}

impl Default for AcademicHistory {
    /// A fresh history offers one blank course row.
    fn default() -> Self {
        Self {
            tenth: Qualification::default(),
            twelfth: Qualification::default(),
            bachelor: BachelorQualification::default(),
            courses: vec![CourseEntry::default()],
        }
    }
}

impl AcademicHistory {
    /// Sets one qualification field. Returns `false` when the level has no such field
    /// (only the bachelor record carries a degree name).
    pub fn set_field(
        &mut self,
        level: AcademicLevel,
        field: QualificationField,
        value: impl Into<String>,
    ) -> bool {
        let value = value.into();
        match (level, field) {
            (AcademicLevel::Bachelor, field) => {
                let slot = match field {
                    QualificationField::Board => &mut self.bachelor.board,
                    QualificationField::Year => &mut self.bachelor.year,
                    QualificationField::Percentage => &mut self.bachelor.percentage,
                    QualificationField::Degree => &mut self.bachelor.degree,
                };
                *slot = value;
                true
            }
            (_, QualificationField::Degree) => false,
            (level, field) => {
                let record = if level == AcademicLevel::Tenth {
                    &mut self.tenth
                } else {
                    &mut self.twelfth
                };
                let slot = match field {
                    QualificationField::Board => &mut record.board,
                    QualificationField::Year => &mut record.year,
                    _ => &mut record.percentage,
                };
                *slot = value;
                true
            }
        }
    }

    pub fn add_course(&mut self) {
        self.courses.push(CourseEntry::default());
    }

    /// Removes the course at `index`. Out-of-range indices are ignored and the last
    /// remaining row is never removed.
    pub fn remove_course(&mut self, index: usize) -> Option<CourseEntry> {
        (self.courses.len() > 1 && index < self.courses.len()).then(|| self.courses.remove(index))
    }

    pub fn update_course(
        &mut self,
        index: usize,
        field: CourseField,
        value: impl Into<String>,
    ) -> bool {
        match self.courses.get_mut(index) {
            Some(course) => {
                match field {
                    CourseField::Name => course.name = value.into(),
                    CourseField::Grade => course.grade = value.into(),
                }
                true
            }
            None => false,
        }
    }
}

/// Opaque handle to an uploaded file. Contents are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}

impl FileHandle {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
            storage_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Passport,
    Tenth,
    Twelfth,
    Degree,
}

impl DocumentKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::Passport, Self::Tenth, Self::Twelfth, Self::Degree]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Passport => "Passport Photograph",
            Self::Tenth => "10th Marksheet",
            Self::Twelfth => "12th Marksheet",
            Self::Degree => "Degree Certificate",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documents {
    pub passport: Option<FileHandle>,
    pub tenth: Option<FileHandle>,
    pub twelfth: Option<FileHandle>,
    pub degree: Option<FileHandle>,
}

impl Documents {
    pub fn get(&self, kind: DocumentKind) -> Option<&FileHandle> {
        match kind {
            DocumentKind::Passport => self.passport.as_ref(),
            DocumentKind::Tenth => self.tenth.as_ref(),
            DocumentKind::Twelfth => self.twelfth.as_ref(),
            DocumentKind::Degree => self.degree.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: DocumentKind) -> &mut Option<FileHandle> {
        match kind {
            DocumentKind::Passport => &mut self.passport,
            DocumentKind::Tenth => &mut self.tenth,
            DocumentKind::Twelfth => &mut self.twelfth,
            DocumentKind::Degree => &mut self.degree,
        }
    }

    pub fn attach(&mut self, kind: DocumentKind, handle: FileHandle) -> Option<FileHandle> {
        self.slot_mut(kind).replace(handle)
    }

    pub fn clear(&mut self, kind: DocumentKind) -> Option<FileHandle> {
        self.slot_mut(kind).take()
    }

    pub fn uploaded_count(&self) -> usize {
        DocumentKind::ordered()
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .count()
    }
}

/// Roles offered by the job section's role pickers.
pub const ROLE_OPTIONS: [&str; 26] = [
    "Junior Frontend Developer (React)",
    "Backend Developer (Node.js + Mongo/Postgres)",
    "QA Engineer (Manual + Automation)",
    "DevOps Intern / Junior Engineer",
    "AI/ML Intern (Applied NLP)",
    "Technical Support Engineer",
    "Junior Data Engineer",
    "Security & Compliance Associate (Entry-level)",
    "Associate Product Manager",
    "UI/UX Designer (Junior)",
    "Technical Content Writer",
    "Sales Development Representative (SDR)",
    "Growth Marketing Executive",
    "Customer Success Associate",
    "Content & Social Media Associate",
    "Marketing Ops Assistant",
    "Business Operations Associate",
    "Customer Support Executive",
    "Implementation Trainee",
    "Business Analyst (Entry Level)",
    "Market Research Analyst",
    "Pre-Sales Analyst",
    "Implementation Consultant (Junior)",
    "Founder's Office Associate",
    "HR & Recruitment Coordinator",
    "Culture & Events Intern",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPreferences {
    pub interested_role: String,
    pub selected_roles: Vec<String>,
    pub why_best_fit: String,
}

impl JobPreferences {
    pub fn select_role(&mut self, role: impl Into<String>) {
        self.interested_role = role.into();
    }

    /// Adds or removes an additional role, keeping selection order and no duplicates.
    pub fn toggle_role(&mut self, role: &str, checked: bool) {
        let present = self.selected_roles.iter().any(|existing| existing == role);
        if checked && !present {
            self.selected_roles.push(role.to_string());
        } else if !checked {
            self.selected_roles.retain(|existing| existing != role);
        }
    }

    pub fn set_justification(&mut self, text: impl Into<String>) {
        self.why_best_fit = text.into();
    }

    pub fn justification_chars(&self) -> usize {
        self.why_best_fit.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentField {
    Declaration,
    Terms,
}

impl ConsentField {
    pub const fn statement(self) -> &'static str {
        match self {
            Self::Declaration => "I declare that all information provided is true and correct.",
            Self::Terms => "I accept the terms and conditions of the verification service.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalConsent {
    pub declaration: bool,
    pub terms: bool,
}

impl FinalConsent {
    pub fn get(&self, field: ConsentField) -> bool {
        match field {
            ConsentField::Declaration => self.declaration,
            ConsentField::Terms => self.terms,
        }
    }

    pub fn set(&mut self, field: ConsentField, value: bool) {
        match field {
            ConsentField::Declaration => self.declaration = value,
            ConsentField::Terms => self.terms = value,
        }
    }
}

/// Aggregated application. Every section is always present; a fresh record holds
/// default-constructed sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub personal_details: PersonalDetails,
    pub academic_history: AcademicHistory,
    pub documents: Documents,
    pub job_section: JobPreferences,
    pub final_consent: FinalConsent,
}

impl ApplicationRecord {
    pub fn section(&self, key: SectionKey) -> SectionPayload {
        match key {
            SectionKey::PersonalDetails => {
                SectionPayload::PersonalDetails(self.personal_details.clone())
            }
            SectionKey::AcademicHistory => {
                SectionPayload::AcademicHistory(self.academic_history.clone())
            }
            SectionKey::Documents => SectionPayload::Documents(self.documents.clone()),
            SectionKey::JobSection => SectionPayload::JobSection(self.job_section.clone()),
            SectionKey::FinalConsent => SectionPayload::FinalConsent(self.final_consent),
        }
    }

    /// Overwrites the payload's section wholesale.
    pub fn replace(&mut self, payload: SectionPayload) {
        match payload {
            SectionPayload::PersonalDetails(section) => self.personal_details = section,
            SectionPayload::AcademicHistory(section) => self.academic_history = section,
            SectionPayload::Documents(section) => self.documents = section,
            SectionPayload::JobSection(section) => self.job_section = section,
            SectionPayload::FinalConsent(section) => self.final_consent = section,
        }
    }
}

/// A complete snapshot of one section, as committed by its editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionPayload {
    PersonalDetails(PersonalDetails),
    AcademicHistory(AcademicHistory),
    Documents(Documents),
    JobSection(JobPreferences),
    FinalConsent(FinalConsent),
}

impl SectionPayload {
    pub fn key(&self) -> SectionKey {
        match self {
            SectionPayload::PersonalDetails(_) => SectionKey::PersonalDetails,
            SectionPayload::AcademicHistory(_) => SectionKey::AcademicHistory,
            SectionPayload::Documents(_) => SectionKey::Documents,
            SectionPayload::JobSection(_) => SectionKey::JobSection,
            SectionPayload::FinalConsent(_) => SectionKey::FinalConsent,
        }
    }

    /// Decodes a JSON body for `key`. Missing fields fall back to the section defaults.
    pub fn from_json(key: SectionKey, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match key {
            SectionKey::PersonalDetails => Self::PersonalDetails(serde_json::from_value(value)?),
            SectionKey::AcademicHistory => Self::AcademicHistory(serde_json::from_value(value)?),
            SectionKey::Documents => Self::Documents(serde_json::from_value(value)?),
            SectionKey::JobSection => Self::JobSection(serde_json::from_value(value)?),
            SectionKey::FinalConsent => Self::FinalConsent(serde_json::from_value(value)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_key_parses_alternate_spellings() {
        assert_eq!(
            SectionKey::parse("personal_details"),
            Some(SectionKey::PersonalDetails)
        );
        assert_eq!(SectionKey::parse("job-section"), Some(SectionKey::JobSection));
        assert_eq!(SectionKey::parse("finalConsent"), Some(SectionKey::FinalConsent));
        assert_eq!(SectionKey::parse("payments"), None);
    }

    #[test]
    fn fresh_record_holds_every_section() {
        let record = ApplicationRecord::default();
        assert_eq!(record.academic_history.courses.len(), 1);
        assert_eq!(record.documents.uploaded_count(), 0);
        for key in SectionKey::ordered() {
            assert_eq!(record.section(key).key(), key);
        }
    }

    #[test]
    fn partial_json_overlays_section_defaults() {
        let payload = SectionPayload::from_json(
            SectionKey::AcademicHistory,
            json!({ "bachelor": { "board": "X", "year": "2020" } }),
        )
        .expect("partial payload decodes");

        let SectionPayload::AcademicHistory(history) = payload else {
            panic!("expected academic history payload");
        };
        assert_eq!(history.bachelor.board, "X");
        assert_eq!(history.bachelor.degree, "");
        assert_eq!(history.courses, vec![CourseEntry::default()]);
    }

    #[test]
    fn degree_is_rejected_below_bachelor_level() {
        let mut history = AcademicHistory::default();
        assert!(!history.set_field(AcademicLevel::Tenth, QualificationField::Degree, "B.Sc"));
        assert!(history.set_field(AcademicLevel::Twelfth, QualificationField::Year, "2016"));
        assert!(history.set_field(AcademicLevel::Bachelor, QualificationField::Degree, "B.Sc"));
        assert_eq!(history.twelfth.year, "2016");
        assert_eq!(history.bachelor.degree, "B.Sc");
    }

    #[test]
    fn course_list_supports_append_edit_and_remove() {
        let mut history = AcademicHistory::default();
        history.add_course();
        assert!(history.update_course(1, CourseField::Name, "Compilers"));
        assert!(history.update_course(1, CourseField::Grade, "A"));
        assert!(!history.update_course(7, CourseField::Name, "Ghost"));

        let removed = history.remove_course(0).expect("first row exists");
        assert_eq!(removed, CourseEntry::default());
        assert_eq!(history.courses.len(), 1);
        assert_eq!(history.courses[0].name, "Compilers");
        assert!(history.remove_course(5).is_none());
        assert!(history.remove_course(0).is_none());
        assert_eq!(history.courses.len(), 1);
    }

    #[test]
    fn document_labels_match_the_locker() {
        assert_eq!(DocumentKind::Passport.label(), "Passport Photograph");
        assert_eq!(DocumentKind::Degree.label(), "Degree Certificate");
    }

    #[test]
    fn toggling_roles_keeps_order_without_duplicates() {
        let mut job = JobPreferences::default();
        job.toggle_role(ROLE_OPTIONS[3], true);
        job.toggle_role(ROLE_OPTIONS[0], true);
        job.toggle_role(ROLE_OPTIONS[3], true);
        assert_eq!(job.selected_roles, vec![ROLE_OPTIONS[3], ROLE_OPTIONS[0]]);

        job.toggle_role(ROLE_OPTIONS[3], false);
        assert_eq!(job.selected_roles, vec![ROLE_OPTIONS[0]]);
    }

    #[test]
    fn documents_attach_and_clear_slots() {
        let mut documents = Documents::default();
        assert!(documents
            .attach(DocumentKind::Passport, FileHandle::named("photo.jpg"))
            .is_none());
        assert_eq!(documents.uploaded_count(), 1);
        let cleared = documents.clear(DocumentKind::Passport).expect("slot was filled");
        assert_eq!(cleared.name, "photo.jpg");
        assert_eq!(documents.uploaded_count(), 0);
    }
}
