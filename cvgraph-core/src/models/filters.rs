use serde::{Deserialize, Serialize};

/// Filter specification for candidate search.
///
/// Every field is optional on the wire; missing fields take the defaults
/// below and unknown keys are ignored. All specified filters are
/// AND-composed; within `skills`, the candidate must carry every requested
/// name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Required skill names, matched verbatim (case-sensitive).
    pub skills: Vec<String>,
    /// Minimum years of experience.
    pub min_experience: u32,
    /// Minimum degree level from the fixed vocabulary.
    pub min_degree_level: Option<String>,
    /// Exact-match professional profile label.
    pub profile: Option<String>,
    /// Case-insensitive substring matched against the candidate name.
    pub search_term: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_unknown_keys_fall_back_to_defaults() {
        let filters: SearchFilters =
            serde_json::from_str(r#"{"minExperience": 5, "sortBy": "name"}"#).unwrap();
        assert_eq!(filters.min_experience, 5);
        assert!(filters.skills.is_empty());
        assert!(filters.min_degree_level.is_none());
        assert!(filters.profile.is_none());
        assert!(filters.search_term.is_empty());
    }

    #[test]
    fn empty_body_is_the_identity_filter() {
        let filters: SearchFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters.min_experience, 0);
        assert!(filters.skills.is_empty());
    }
}
