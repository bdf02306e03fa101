use serde::Serialize;

pub const UNIVERSITIES: &[&str] = &[
    "University of Ghana (UG)",
    "Kwame Nkrumah University of Science and Technology (KNUST)",
    "University of Cape Coast (UCC)",
    "Ghana Institute of Management and Public Administration (GIMPA)",
    "Ashesi University",
    "University for Development Studies (UDS)",
    "University of Education, Winneba (UEW)",
    "Central University",
    "Valley View University",
    "Other",
];

pub const DEGREES: &[&str] = &[
    "Bachelor of Science (BSc)",
    "Bachelor of Arts (BA)",
    "Bachelor of Technology (BTech)",
    "Bachelor of Commerce (BCom)",
    "Bachelor of Business Administration (BBA)",
    "Bachelor of Engineering (BEng)",
    "Bachelor of Laws (LLB)",
    "Master of Science (MSc)",
    "Master of Arts (MA)",
    "Master of Business Administration (MBA)",
    "Other",
];

/// Choices offered on the education step. Free text is still accepted.
#[derive(Debug, Serialize)]
pub struct ProfileOptions {
    pub universities: &'static [&'static str],
    pub degrees: &'static [&'static str],
}

pub fn profile_options() -> ProfileOptions {
    ProfileOptions {
        universities: UNIVERSITIES,
        degrees: DEGREES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_end_with_other() {
        assert_eq!(UNIVERSITIES.last(), Some(&"Other"));
        assert_eq!(DEGREES.last(), Some(&"Other"));
    }
}
