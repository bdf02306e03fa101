use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linked_in: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Education {
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default)]
    pub gpa: String,
}

/// The composite record collected by the profile wizard.
///
/// `skills` and `certificates` hold non-empty trimmed strings in insertion order;
/// duplicates are allowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentProfile {
    pub personal_info: PersonalInfo,
    pub education: Education,
    pub skills: Vec<String>,
    pub certificates: Vec<String>,
    pub experience: String,
    pub career_goals: String,
}

/// The short review block shown on the last step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub university: String,
    pub degree: String,
    pub skills: String,
}

impl StudentProfile {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            name: self.personal_info.full_name.clone(),
            email: self.personal_info.email.clone(),
            university: self.education.university.clone(),
            degree: format!(
                "{} in {}",
                self.education.degree, self.education.field_of_study
            ),
            skills: self.skills.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_personal_info_deserializes() {
        let info: PersonalInfo =
            serde_json::from_str(r#"{"full_name": "Kwame Asante"}"#).unwrap();
        assert_eq!(info.full_name, "Kwame Asante");
        assert!(info.linked_in.is_empty());
    }

    #[test]
    fn test_summary_joins_skills() {
        let profile = StudentProfile {
            education: Education {
                degree: "Bachelor of Science (BSc)".into(),
                field_of_study: "Computer Science".into(),
                ..Default::default()
            },
            skills: vec!["Java".into(), "SQL".into()],
            ..Default::default()
        };
        let s = profile.summary();
        assert_eq!(s.degree, "Bachelor of Science (BSc) in Computer Science");
        assert_eq!(s.skills, "Java, SQL");
    }
}
