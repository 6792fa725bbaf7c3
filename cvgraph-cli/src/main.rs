//! cvgraph-cli — terminal frontend for the CVGraph candidate-ontology API
//!
//! Talks to a running cvgraph-server over HTTP and prints either raw JSON
//! (`--json`) or a compact human-readable rendering.
//!
//! # Subcommands
//! - `candidates`                      — list all candidates
//! - `get <id>`                        — fetch one candidate by id
//! - `search [filter flags]`          — filtered candidate search
//! - `sparql <query>`                  — raw SPARQL passthrough
//! - `status`                          — show server health

use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "cvgraph-cli",
    version,
    about = "CVGraph candidate search — terminal frontend for the HTTP API"
)]
struct Cli {
    /// CVGraph HTTP server URL (overrides CVGRAPH_HTTP_URL env var)
    #[arg(long, env = "CVGRAPH_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List all candidates, most experienced first
    Candidates {
        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Fetch a single candidate by id
    Get {
        /// Candidate id (the local name of its IRI, e.g. Candidate1)
        id: String,

        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Search candidates with filters (all filters are AND-composed)
    Search {
        /// Required skill name; repeat for several (candidate must have all)
        #[arg(long = "skill")]
        skills: Vec<String>,

        /// Minimum years of experience
        #[arg(long)]
        min_experience: Option<u32>,

        /// Minimum degree level (Bac+2, Bac+3, Bac+5, Doctorat)
        #[arg(long)]
        min_degree_level: Option<String>,

        /// Exact professional profile label
        #[arg(long)]
        profile: Option<String>,

        /// Case-insensitive substring matched against candidate names
        #[arg(long)]
        term: Option<String>,

        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Execute a raw SPARQL query against the ontology
    Sparql {
        /// The query text
        query: String,

        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show CVGraph server status
    Status,
}

// ============================================================================
// API Response Types
// ============================================================================

/// A candidate record from the CVGraph HTTP API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub years_of_experience: u32,
    pub profile: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    pub degree: Option<DegreeRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRecord {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DegreeRecord {
    pub name: String,
    pub level: String,
}

/// The envelope from POST /api/sparql/execute
#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub columns: Vec<String>,
    pub results: Vec<serde_json::Map<String, serde_json::Value>>,
    pub count: usize,
    pub message: String,
}

// ============================================================================
// Human-readable formatting
// ============================================================================

/// One-line rendering of a candidate for terminal output.
pub fn format_candidate(c: &CandidateRecord) -> String {
    let mut line = format!(
        "{} <{}> — {} yrs",
        c.name, c.email, c.years_of_experience
    );
    if let Some(profile) = &c.profile {
        line.push_str(&format!(" — {}", profile));
    }
    if let Some(degree) = &c.degree {
        line.push_str(&format!(" — {}", degree.level));
    }
    if !c.skills.is_empty() {
        let names: Vec<&str> = c.skills.iter().map(|s| s.name.as_str()).collect();
        line.push_str(&format!("\n  skills: {}", names.join(", ")));
    }
    line
}

/// Tabular rendering of a SPARQL result set: header row then one line per
/// solution, unbound values shown as `-`.
pub fn format_sparql_rows(response: &SparqlResponse) -> String {
    let mut out = response.columns.join(" | ");
    for row in &response.results {
        let cells: Vec<String> = response
            .columns
            .iter()
            .map(|col| match row.get(col) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            })
            .collect();
        out.push('\n');
        out.push_str(&cells.join(" | "));
    }
    out
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn client() -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?)
}

fn fetch(server: &str, path: &str) -> reqwest::blocking::Response {
    let url = format!("{}{}", server, path);
    match client().and_then(|c| Ok(c.get(&url).send()?)) {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("cvgraph-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    }
}

fn post_json(server: &str, path: &str, body: serde_json::Value) -> reqwest::blocking::Response {
    let url = format!("{}{}", server, path);
    match client().and_then(|c| Ok(c.post(&url).json(&body).send()?)) {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("cvgraph-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    }
}

fn bail_on_error(resp: reqwest::blocking::Response) -> reqwest::blocking::Response {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("cvgraph-cli: server returned {}: {}", status, body);
        std::process::exit(1);
    }
    resp
}

fn print_candidates(resp: reqwest::blocking::Response, json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let value: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let candidates: Vec<CandidateRecord> = resp.json()?;
    if candidates.is_empty() {
        eprintln!("No candidates found");
        return Ok(());
    }
    for c in &candidates {
        println!("{}\n", format_candidate(c));
    }
    Ok(())
}

fn do_candidates(server: &str, json_output: bool) -> anyhow::Result<()> {
    let resp = bail_on_error(fetch(server, "/api/candidates"));
    print_candidates(resp, json_output)
}

fn do_get(server: &str, id: &str, json_output: bool) -> anyhow::Result<()> {
    let resp = bail_on_error(fetch(server, &format!("/api/candidates/{}", id)));
    if json_output {
        let value: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let candidate: CandidateRecord = resp.json()?;
        println!("{}", format_candidate(&candidate));
    }
    Ok(())
}

fn do_search(
    server: &str,
    skills: Vec<String>,
    min_experience: Option<u32>,
    min_degree_level: Option<String>,
    profile: Option<String>,
    term: Option<String>,
    json_output: bool,
) -> anyhow::Result<()> {
    let mut filters = serde_json::Map::new();
    if !skills.is_empty() {
        filters.insert("skills".to_string(), serde_json::json!(skills));
    }
    if let Some(min) = min_experience {
        filters.insert("minExperience".to_string(), serde_json::json!(min));
    }
    if let Some(level) = min_degree_level {
        filters.insert("minDegreeLevel".to_string(), serde_json::json!(level));
    }
    if let Some(profile) = profile {
        filters.insert("profile".to_string(), serde_json::json!(profile));
    }
    if let Some(term) = term {
        filters.insert("searchTerm".to_string(), serde_json::json!(term));
    }

    let resp = bail_on_error(post_json(
        server,
        "/api/candidates/search",
        serde_json::Value::Object(filters),
    ));
    print_candidates(resp, json_output)
}

fn do_sparql(server: &str, query: &str, json_output: bool) -> anyhow::Result<()> {
    let resp = bail_on_error(post_json(
        server,
        "/api/sparql/execute",
        serde_json::json!({ "query": query }),
    ));

    if json_output {
        let value: serde_json::Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let response: SparqlResponse = resp.json()?;
    println!("{}", format_sparql_rows(&response));
    eprintln!("\n{}", response.message);
    Ok(())
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<()> {
    let resp = fetch(server, "/health");
    if resp.status().is_success() {
        let body: serde_json::Value = resp.json().unwrap_or_default();
        println!("CVGraph server: {}", body["status"].as_str().unwrap_or("unknown"));
        println!("Version:        {}", body["version"].as_str().unwrap_or("?"));
        println!("Triples:        {}", body["triples"].as_u64().unwrap_or(0));
        println!("Ontology:       {}", body["ontology"].as_str().unwrap_or("?"));
    } else {
        eprintln!("cvgraph-cli: server unhealthy (HTTP {})", resp.status());
        std::process::exit(1);
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Candidates { json } => do_candidates(&server, json),
        Commands::Get { id, json } => do_get(&server, &id, json),
        Commands::Search {
            skills,
            min_experience,
            min_degree_level,
            profile,
            term,
            json,
        } => do_search(
            &server,
            skills,
            min_experience,
            min_degree_level,
            profile,
            term,
            json,
        ),
        Commands::Sparql { query, json } => do_sparql(&server, &query, json),
        Commands::Status => do_status(&server),
    };

    if let Err(e) = result {
        eprintln!("cvgraph-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_candidate() -> CandidateRecord {
        CandidateRecord {
            id: "Candidate1".to_string(),
            name: "Alice Martin".to_string(),
            email: "alice@example.org".to_string(),
            years_of_experience: 6,
            profile: Some("Data Scientist".to_string()),
            skills: vec![
                SkillRecord {
                    name: "Python".to_string(),
                },
                SkillRecord {
                    name: "SQL".to_string(),
                },
            ],
            degree: Some(DegreeRecord {
                name: "MSc".to_string(),
                level: "Bac+5".to_string(),
            }),
        }
    }

    // ========================================================================
    // TEST 1: format_candidate includes every populated field
    // ========================================================================
    #[test]
    fn test_format_candidate_full() {
        let line = format_candidate(&mock_candidate());
        assert!(line.contains("Alice Martin"));
        assert!(line.contains("<alice@example.org>"));
        assert!(line.contains("6 yrs"));
        assert!(line.contains("Data Scientist"));
        assert!(line.contains("Bac+5"));
        assert!(line.contains("skills: Python, SQL"));
    }

    // ========================================================================
    // TEST 2: format_candidate omits absent optional fields
    // ========================================================================
    #[test]
    fn test_format_candidate_minimal() {
        let mut candidate = mock_candidate();
        candidate.profile = None;
        candidate.degree = None;
        candidate.skills.clear();

        let line = format_candidate(&candidate);
        assert!(line.contains("Alice Martin"));
        assert!(!line.contains("skills:"));
        assert!(!line.contains("Bac+5"));
        assert_eq!(line.lines().count(), 1, "single line without skills");
    }

    // ========================================================================
    // TEST 3: candidate JSON from the API deserializes (camelCase wire)
    // ========================================================================
    #[test]
    fn test_candidate_record_deserializes_from_wire_shape() {
        let payload = serde_json::json!({
            "id": "Candidate2",
            "name": "Bob Durand",
            "email": "bob@example.org",
            "yearsOfExperience": 3,
            "skills": [{"name": "Java", "type": "technical"}],
            "experiences": [],
        });
        let record: CandidateRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.years_of_experience, 3);
        assert!(record.profile.is_none());
        assert!(record.degree.is_none());
        assert_eq!(record.skills[0].name, "Java");
    }

    // ========================================================================
    // TEST 4: SPARQL table rendering with unbound values
    // ========================================================================
    #[test]
    fn test_format_sparql_rows() {
        let response: SparqlResponse = serde_json::from_value(serde_json::json!({
            "columns": ["name", "years"],
            "results": [
                {"name": "Alice", "years": "6"},
                {"name": "Bob", "years": null},
            ],
            "count": 2,
            "message": "2 result(s) found",
        }))
        .unwrap();

        let table = format_sparql_rows(&response);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "name | years");
        assert_eq!(lines[1], "Alice | 6");
        assert_eq!(lines[2], "Bob | -");
    }

    // ========================================================================
    // TEST 5: empty result set renders the header only
    // ========================================================================
    #[test]
    fn test_format_sparql_rows_empty() {
        let response: SparqlResponse = serde_json::from_value(serde_json::json!({
            "columns": ["name"],
            "results": [],
            "count": 0,
            "message": "Query executed successfully, no results",
        }))
        .unwrap();
        assert_eq!(format_sparql_rows(&response), "name");
    }
}
