use serde::{Deserialize, Serialize};

/// Skill category, decided by which of the two type markers the skill node
/// carries in the graph. Nodes typed as neither never surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// A skill as embedded in a candidate record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(rename = "type")]
    pub category: SkillCategory,
}

/// A skill as listed by the skill catalog endpoint, with its identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: SkillCategory,
}
