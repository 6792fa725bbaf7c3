use serde::{Deserialize, Serialize};

use super::{Degree, Experience, Skill};

/// Denormalized candidate record, rebuilt fresh from the graph per request.
///
/// `id` is the local name of the candidate's IRI. Name, email and
/// years-of-experience are always present (the core query requires them);
/// everything else may be absent or empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub years_of_experience: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub skills: Vec<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    pub experiences: Vec<Experience>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillCategory;

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let candidate = Candidate {
            id: "Candidate1".to_string(),
            name: "Alice Martin".to_string(),
            email: "alice@example.org".to_string(),
            years_of_experience: 6,
            profile: Some("Data Scientist".to_string()),
            skills: vec![Skill {
                name: "Python".to_string(),
                category: SkillCategory::Technical,
            }],
            degree: None,
            experiences: vec![],
        };

        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["yearsOfExperience"], 6);
        assert_eq!(value["skills"][0]["type"], "technical");
        assert!(value.get("degree").is_none(), "absent degree is omitted");
    }
}
