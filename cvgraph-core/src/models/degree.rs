use serde::{Deserialize, Serialize};

/// Highest degree of a candidate. `level` comes from a fixed vocabulary
/// (Bac+2, Bac+3, Bac+5, Doctorat); see `search::degree_rank` for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degree {
    pub name: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}
