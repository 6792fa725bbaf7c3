//! Filter engine — in-memory candidate filtering.
//!
//! Each active filter dimension contributes one predicate; a candidate is
//! kept only if every predicate holds. Relative order of the input list is
//! preserved, so the search endpoint inherits the unfiltered ordering.

use crate::models::{Candidate, SearchFilters};

/// Rank of a degree level in the fixed vocabulary. Unrecognized (or absent)
/// levels rank 0, so any active minimum-level filter excludes them.
pub fn degree_rank(level: &str) -> u32 {
    match level {
        "Bac+2" => 2,
        "Bac+3" => 3,
        "Bac+5" => 5,
        "Doctorat" => 8,
        _ => 0,
    }
}

type Predicate<'a> = Box<dyn Fn(&Candidate) -> bool + 'a>;

fn predicates<'a>(filters: &'a SearchFilters) -> Vec<Predicate<'a>> {
    let mut active: Vec<Predicate<'a>> = Vec::new();

    if !filters.search_term.is_empty() {
        let term = filters.search_term.to_lowercase();
        active.push(Box::new(move |c| c.name.to_lowercase().contains(&term)));
    }

    if !filters.skills.is_empty() {
        active.push(Box::new(|c| {
            filters
                .skills
                .iter()
                .all(|wanted| c.skills.iter().any(|s| s.name == *wanted))
        }));
    }

    if filters.min_experience > 0 {
        active.push(Box::new(|c| c.years_of_experience >= filters.min_experience));
    }

    if let Some(min_level) = filters.min_degree_level.as_deref() {
        let floor = degree_rank(min_level);
        active.push(Box::new(move |c| {
            let rank = c
                .degree
                .as_ref()
                .map(|d| degree_rank(&d.level))
                .unwrap_or(0);
            rank >= floor
        }));
    }

    if let Some(profile) = filters.profile.as_deref() {
        active.push(Box::new(move |c| c.profile.as_deref() == Some(profile)));
    }

    active
}

/// The ordered subsequence of `candidates` satisfying every active filter.
/// An empty result is not an error.
pub fn apply_filters(candidates: Vec<Candidate>, filters: &SearchFilters) -> Vec<Candidate> {
    let active = predicates(filters);
    candidates
        .into_iter()
        .filter(|c| active.iter().all(|p| p(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Degree, Skill, SkillCategory};

    fn candidate(
        name: &str,
        years: u32,
        level: Option<&str>,
        skills: &[&str],
        profile: Option<&str>,
    ) -> Candidate {
        Candidate {
            id: name.to_string(),
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            years_of_experience: years,
            profile: profile.map(str::to_string),
            skills: skills
                .iter()
                .map(|s| Skill {
                    name: (*s).to_string(),
                    category: SkillCategory::Technical,
                })
                .collect(),
            degree: level.map(|l| Degree {
                name: "degree".to_string(),
                level: l.to_string(),
                year: None,
            }),
            experiences: vec![],
        }
    }

    fn alice() -> Candidate {
        candidate("Alice", 6, Some("Bac+5"), &["Python", "SQL"], None)
    }

    #[test]
    fn default_filters_are_the_identity() {
        let input = vec![alice(), candidate("Bob", 0, None, &[], None)];
        let output = apply_filters(input.clone(), &SearchFilters::default());
        assert_eq!(output.len(), input.len());
        assert_eq!(output[0].name, "Alice");
        assert_eq!(output[1].name, "Bob");
    }

    #[test]
    fn alice_passes_the_combined_filter() {
        let filters = SearchFilters {
            skills: vec!["Python".to_string()],
            min_experience: 5,
            min_degree_level: Some("Bac+3".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(apply_filters(vec![alice()], &filters).len(), 1);
    }

    #[test]
    fn skills_filter_requires_every_requested_skill() {
        let filters = SearchFilters {
            skills: vec!["Java".to_string()],
            ..SearchFilters::default()
        };
        assert!(apply_filters(vec![alice()], &filters).is_empty());

        let filters = SearchFilters {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            ..SearchFilters::default()
        };
        assert_eq!(apply_filters(vec![alice()], &filters).len(), 1);
    }

    #[test]
    fn skill_matching_is_case_sensitive() {
        let filters = SearchFilters {
            skills: vec!["python".to_string()],
            ..SearchFilters::default()
        };
        assert!(apply_filters(vec![alice()], &filters).is_empty());
    }

    #[test]
    fn degree_filter_is_monotonic_in_rank() {
        let levels = ["Bac+2", "Bac+3", "Bac+5", "Doctorat"];
        for (i, passing) in levels.iter().enumerate() {
            let filters = SearchFilters {
                min_degree_level: Some((*passing).to_string()),
                ..SearchFilters::default()
            };
            let passes =
                !apply_filters(vec![alice()], &filters).is_empty();
            // Alice holds Bac+5 (rank 5): every level up to Bac+5 passes,
            // Doctorat does not.
            assert_eq!(passes, i <= 2, "level {passing}");
        }
    }

    #[test]
    fn degree_filter_excludes_degreeless_candidates() {
        let filters = SearchFilters {
            min_degree_level: Some("Bac+2".to_string()),
            ..SearchFilters::default()
        };
        let no_degree = candidate("Bob", 10, None, &["Python"], None);
        assert!(apply_filters(vec![no_degree], &filters).is_empty());
    }

    #[test]
    fn unknown_degree_level_ranks_zero() {
        let filters = SearchFilters {
            min_degree_level: Some("Bac+2".to_string()),
            ..SearchFilters::default()
        };
        let odd = candidate("Bob", 10, Some("Bootcamp"), &[], None);
        assert!(apply_filters(vec![odd], &filters).is_empty());
    }

    #[test]
    fn search_term_is_a_case_insensitive_substring() {
        let filters = SearchFilters {
            search_term: "aLiC".to_string(),
            ..SearchFilters::default()
        };
        assert_eq!(apply_filters(vec![alice()], &filters).len(), 1);

        let filters = SearchFilters {
            search_term: "bob".to_string(),
            ..SearchFilters::default()
        };
        assert!(apply_filters(vec![alice()], &filters).is_empty());
    }

    #[test]
    fn profile_filter_is_exact_match() {
        let ds = candidate("Alice", 6, None, &[], Some("Data Scientist"));
        let filters = SearchFilters {
            profile: Some("Data Scientist".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(apply_filters(vec![ds.clone()], &filters).len(), 1);

        let filters = SearchFilters {
            profile: Some("Data".to_string()),
            ..SearchFilters::default()
        };
        assert!(apply_filters(vec![ds], &filters).is_empty());
    }

    #[test]
    fn filters_compose_with_logical_and() {
        let filters = SearchFilters {
            skills: vec!["Python".to_string()],
            min_experience: 7,
            ..SearchFilters::default()
        };
        // Has the skill but not the experience.
        assert!(apply_filters(vec![alice()], &filters).is_empty());
    }
}
