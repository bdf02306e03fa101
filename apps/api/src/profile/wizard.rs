//! Profile Wizard state machine.
//!
//! Steps 1-4 are visited strictly in order: `next_step` and `prev_step` move by
//! one and stop at the ends. Nothing gates a move; incomplete steps can be left.
//! Submission is only possible on the last step and locks the wizard.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{Education, PersonalInfo, ProfileSummary, StudentProfile};

pub const TOTAL_STEPS: u8 = 4;

pub const SUBMITTED_ACKNOWLEDGEMENT: &str = "Your profile has been submitted! We'll craft your professional CV and send it to your email within 48 hours.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    Education,
    SkillsAndCertificates,
    CareerGoals,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::PersonalInfo => 1,
            WizardStep::Education => 2,
            WizardStep::SkillsAndCertificates => 3,
            WizardStep::CareerGoals => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::Education => "Education Background",
            WizardStep::SkillsAndCertificates => "Skills & Certificates",
            WizardStep::CareerGoals => "Career Goals",
        }
    }

    fn next(self) -> Self {
        match self {
            WizardStep::PersonalInfo => WizardStep::Education,
            WizardStep::Education => WizardStep::SkillsAndCertificates,
            WizardStep::SkillsAndCertificates | WizardStep::CareerGoals => WizardStep::CareerGoals,
        }
    }

    fn prev(self) -> Self {
        match self {
            WizardStep::PersonalInfo | WizardStep::Education => WizardStep::PersonalInfo,
            WizardStep::SkillsAndCertificates => WizardStep::Education,
            WizardStep::CareerGoals => WizardStep::SkillsAndCertificates,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("The profile has already been submitted")]
    AlreadySubmitted,

    #[error("The profile can only be submitted from step {TOTAL_STEPS} (currently on step {0})")]
    NotOnFinalStep(u8),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::AlreadySubmitted => AppError::Conflict(err.to_string()),
            WizardError::NotOnFinalStep(_) => AppError::Validation(err.to_string()),
        }
    }
}

/// Which ordered list an entry goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryList {
    Skills,
    Certificates,
}

#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub title: &'static str,
    pub progress_percent: u32,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub submitted: bool,
    pub profile: StudentProfile,
    pub skill_input: String,
    pub certificate_input: String,
    /// Review block, present on the last step.
    pub summary: Option<ProfileSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub acknowledgement: &'static str,
    pub profile: StudentProfile,
}

#[derive(Debug, Clone)]
pub struct ProfileWizard {
    step: WizardStep,
    profile: StudentProfile,
    skill_input: String,
    certificate_input: String,
    submitted: bool,
}

impl Default for ProfileWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::PersonalInfo,
            profile: StudentProfile::default(),
            skill_input: String::new(),
            certificate_input: String::new(),
            submitted: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.is_submitted() {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    pub fn next_step(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn prev_step(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        self.step = self.step.prev();
        Ok(self.step)
    }

    pub fn set_personal_info(&mut self, info: PersonalInfo) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.profile.personal_info = info;
        Ok(())
    }

    pub fn set_education(&mut self, education: Education) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.profile.education = education;
        Ok(())
    }

    pub fn set_experience(&mut self, experience: String) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.profile.experience = experience;
        Ok(())
    }

    pub fn set_career_goals(&mut self, career_goals: String) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.profile.career_goals = career_goals;
        Ok(())
    }

    /// Puts `input` in the list's input field, then commits it: trimmed and
    /// appended if non-empty, after which the field is cleared. Returns whether
    /// an entry was added.
    fn add_entry(&mut self, list: EntryList, input: &str) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        let (entries, field) = match list {
            EntryList::Skills => (&mut self.profile.skills, &mut self.skill_input),
            EntryList::Certificates => (&mut self.profile.certificates, &mut self.certificate_input),
        };
        *field = input.to_string();

        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        entries.push(trimmed.to_string());
        field.clear();
        Ok(true)
    }

    /// Removes by position. Out-of-range indices leave the list untouched.
    fn remove_entry(&mut self, list: EntryList, index: usize) -> Result<Option<String>, WizardError> {
        self.ensure_editable()?;
        let entries = match list {
            EntryList::Skills => &mut self.profile.skills,
            EntryList::Certificates => &mut self.profile.certificates,
        };
        if index >= entries.len() {
            return Ok(None);
        }
        Ok(Some(entries.remove(index)))
    }

    pub fn add_skill(&mut self, input: &str) -> Result<bool, WizardError> {
        self.add_entry(EntryList::Skills, input)
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<Option<String>, WizardError> {
        self.remove_entry(EntryList::Skills, index)
    }

    pub fn add_certificate(&mut self, input: &str) -> Result<bool, WizardError> {
        self.add_entry(EntryList::Certificates, input)
    }

    pub fn remove_certificate(&mut self, index: usize) -> Result<Option<String>, WizardError> {
        self.remove_entry(EntryList::Certificates, index)
    }

    /// Terminal action. Logs the full profile; nothing is stored or sent.
    pub fn submit(&mut self) -> Result<Submission, WizardError> {
        self.ensure_editable()?;
        if self.step != WizardStep::CareerGoals {
            return Err(WizardError::NotOnFinalStep(self.step.number()));
        }

        let profile_json = serde_json::to_string(&self.profile).unwrap_or_default();
        info!(profile = %profile_json, "Student profile submitted");
        self.submitted = true;

        Ok(Submission {
            acknowledgement: SUBMITTED_ACKNOWLEDGEMENT,
            profile: self.profile.clone(),
        })
    }

    pub fn view(&self) -> WizardView {
        let step_number = self.step.number();
        WizardView {
            step: self.step,
            step_number,
            total_steps: TOTAL_STEPS,
            title: self.step.title(),
            progress_percent: u32::from(step_number) * 100 / u32::from(TOTAL_STEPS),
            can_go_back: !self.submitted && self.step != WizardStep::PersonalInfo,
            can_go_forward: !self.submitted && self.step != WizardStep::CareerGoals,
            submitted: self.submitted,
            profile: self.profile.clone(),
            skill_input: self.skill_input.clone(),
            certificate_input: self.certificate_input.clone(),
            summary: (self.step == WizardStep::CareerGoals).then(|| self.profile.summary()),
        }
    }
}
