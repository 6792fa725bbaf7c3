pub mod candidate;
pub mod degree;
pub mod experience;
pub mod filters;
pub mod skill;

pub use candidate::Candidate;
pub use degree::Degree;
pub use experience::Experience;
pub use filters::SearchFilters;
pub use skill::{Skill, SkillCategory, SkillEntry};
