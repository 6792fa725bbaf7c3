//! Statistics aggregator — summary counters over the materialized lists.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, SkillEntry};

/// Label under which candidates with no profile are counted.
pub const UNSPECIFIED_PROFILE: &str = "Non défini";

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_candidates: usize,
    pub total_skills: usize,
    pub total_profiles: usize,
    /// Mean years of experience rounded to one decimal; 0 with no candidates.
    pub average_experience: f64,
    /// Candidate count per resolved profile label.
    pub profile_distribution: BTreeMap<String, u32>,
    /// The ten most frequent skill names; ties keep encounter order.
    pub most_common_skills: Vec<SkillCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u32,
}

pub fn aggregate(
    candidates: &[Candidate],
    skills: &[SkillEntry],
    profiles: &[String],
) -> StatsReport {
    let total_candidates = candidates.len();

    let average_experience = if total_candidates == 0 {
        0.0
    } else {
        let sum: u32 = candidates.iter().map(|c| c.years_of_experience).sum();
        let mean = f64::from(sum) / total_candidates as f64;
        (mean * 10.0).round() / 10.0
    };

    let mut profile_distribution: BTreeMap<String, u32> = BTreeMap::new();
    for candidate in candidates {
        let label = candidate
            .profile
            .as_deref()
            .unwrap_or(UNSPECIFIED_PROFILE);
        *profile_distribution.entry(label.to_string()).or_insert(0) += 1;
    }

    // Frequency per skill name, keeping first-seen order for stable ties.
    let mut counts: Vec<SkillCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for candidate in candidates {
        for skill in &candidate.skills {
            match index.get(&skill.name) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(skill.name.clone(), counts.len());
                    counts.push(SkillCount {
                        skill: skill.name.clone(),
                        count: 1,
                    });
                }
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(10);

    StatsReport {
        total_candidates,
        total_skills: skills.len(),
        total_profiles: profiles.len(),
        average_experience,
        profile_distribution,
        most_common_skills: counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Skill, SkillCategory};

    fn candidate(name: &str, years: u32, profile: Option<&str>, skills: &[&str]) -> Candidate {
        Candidate {
            id: name.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.org"),
            years_of_experience: years,
            profile: profile.map(str::to_string),
            skills: skills
                .iter()
                .map(|s| Skill {
                    name: (*s).to_string(),
                    category: SkillCategory::Technical,
                })
                .collect(),
            degree: None,
            experiences: vec![],
        }
    }

    #[test]
    fn empty_input_yields_zeroes_not_errors() {
        let report = aggregate(&[], &[], &[]);
        assert_eq!(report.total_candidates, 0);
        assert_eq!(report.average_experience, 0.0);
        assert!(report.profile_distribution.is_empty());
        assert!(report.most_common_skills.is_empty());
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let candidates = vec![
            candidate("a", 6, None, &[]),
            candidate("b", 3, None, &[]),
            candidate("c", 1, None, &[]),
        ];
        let report = aggregate(&candidates, &[], &[]);
        assert_eq!(report.average_experience, 3.3);
    }

    #[test]
    fn profile_distribution_counts_sum_to_total() {
        let candidates = vec![
            candidate("a", 1, Some("Data Scientist"), &[]),
            candidate("b", 2, Some("Data Scientist"), &[]),
            candidate("c", 3, None, &[]),
        ];
        let report = aggregate(&candidates, &[], &[]);
        let sum: u32 = report.profile_distribution.values().sum();
        assert_eq!(sum as usize, report.total_candidates);
        assert_eq!(report.profile_distribution["Data Scientist"], 2);
        assert_eq!(report.profile_distribution[UNSPECIFIED_PROFILE], 1);
    }

    #[test]
    fn top_skills_are_capped_at_ten_with_stable_ties() {
        let names: Vec<String> = (0..12).map(|i| format!("Skill{i:02}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let candidates = vec![
            candidate("a", 1, None, &name_refs),
            candidate("b", 1, None, &["Skill05"]),
        ];
        let report = aggregate(&candidates, &[], &[]);
        assert_eq!(report.most_common_skills.len(), 10);
        assert_eq!(report.most_common_skills[0].skill, "Skill05");
        assert_eq!(report.most_common_skills[0].count, 2);
        // Ties (all count 1) keep encounter order.
        assert_eq!(report.most_common_skills[1].skill, "Skill00");
    }
}
