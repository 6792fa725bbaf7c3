use serde::{Deserialize, Serialize};

/// One professional experience entry. All fields are required in the graph;
/// partial entries never surface. No consistency is enforced between
/// `duration` and the start/end years — source data is trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub duration: u32,
    pub start_year: u32,
    pub end_year: u32,
}
