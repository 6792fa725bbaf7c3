//! Query layer — fixed SPARQL templates and the record assembler.
//!
//! Each public function issues one or more template queries against the
//! store and maps rows to flat records. Everything here is a pure read; a
//! candidate record is rebuilt from the graph on every call.

use oxigraph::model::{Literal, NamedNode, Term};
use oxigraph::sparql::QuerySolution;
use std::collections::BTreeMap;

use crate::error::CvgraphError;
use crate::models::{Candidate, Degree, Experience, Skill, SkillCategory, SkillEntry};
use crate::store::OntologyStore;

/// All candidates with core fields present, most experienced first.
/// Candidates missing name, email or years-of-experience do not match the
/// core query and are silently absent.
pub fn all_candidates(store: &OntologyStore) -> Result<Vec<Candidate>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT ?person ?name ?email ?experience
WHERE {{
    ?person a :Person ;
            :name ?name ;
            :email ?email ;
            :yearsOfExperience ?experience .
}}
ORDER BY DESC(?experience)"#,
        ns = store.namespace()
    );

    let mut candidates = Vec::new();
    for row in store.select(&sparql)? {
        let Some(Term::NamedNode(person)) = row.get("person") else {
            continue;
        };
        let person_iri = person.as_str().to_string();
        candidates.push(assemble(
            store,
            &person_iri,
            local_name(&person_iri).to_string(),
            required_text(&row, "name")?,
            required_text(&row, "email")?,
            required_integer(&row, "experience")?,
        )?);
    }
    Ok(candidates)
}

/// A single candidate by the local name of its IRI, or `None` if the graph
/// holds no matching entity.
pub fn candidate_by_id(
    store: &OntologyStore,
    id: &str,
) -> Result<Option<Candidate>, CvgraphError> {
    let person = NamedNode::new(format!("{}{}", store.namespace(), id))
        .map_err(|_| CvgraphError::InvalidId(id.to_string()))?;

    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT ?name ?email ?experience
WHERE {{
    <{person}> a :Person ;
               :name ?name ;
               :email ?email ;
               :yearsOfExperience ?experience .
}}"#,
        ns = store.namespace(),
        person = person.as_str()
    );

    let rows = store.select(&sparql)?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };
    Ok(Some(assemble(
        store,
        person.as_str(),
        id.to_string(),
        required_text(row, "name")?,
        required_text(row, "email")?,
        required_integer(row, "experience")?,
    )?))
}

/// The skill catalog: every node typed as one of the two skill markers,
/// ordered by name. Nodes typed as anything else never surface.
pub fn all_skills(store: &OntologyStore) -> Result<Vec<SkillEntry>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT DISTINCT ?skill ?skillName ?type
WHERE {{
    ?skill a ?type ;
           :skillName ?skillName .
    FILTER(?type = :TechnicalSkill || ?type = :SoftSkill)
}}
ORDER BY ?skillName"#,
        ns = store.namespace()
    );

    let mut skills = Vec::new();
    for row in store.select(&sparql)? {
        let Some(Term::NamedNode(skill)) = row.get("skill") else {
            continue;
        };
        skills.push(SkillEntry {
            id: local_name(skill.as_str()).to_string(),
            name: required_text(&row, "skillName")?,
            category: category_of(&row),
        });
    }
    Ok(skills)
}

/// Sorted unique profile labels over all candidates, resolved with the
/// language-fallback policy.
pub fn all_profiles(store: &OntologyStore) -> Result<Vec<String>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT DISTINCT ?profile ?label
WHERE {{
    ?person a :Person ;
            :hasProfile ?profile .
    OPTIONAL {{ ?profile rdfs:label ?label }}
}}"#,
        ns = store.namespace()
    );

    let mut by_profile: BTreeMap<String, Vec<QuerySolution>> = BTreeMap::new();
    for row in store.select(&sparql)? {
        let Some(Term::NamedNode(profile)) = row.get("profile") else {
            continue;
        };
        by_profile
            .entry(profile.as_str().to_string())
            .or_default()
            .push(row);
    }

    let mut labels: Vec<String> = by_profile
        .values()
        .filter_map(|rows| resolve_profile_label(rows))
        .collect();
    labels.sort();
    labels.dedup();
    Ok(labels)
}

fn assemble(
    store: &OntologyStore,
    person_iri: &str,
    id: String,
    name: String,
    email: String,
    years_of_experience: u32,
) -> Result<Candidate, CvgraphError> {
    Ok(Candidate {
        id,
        name,
        email,
        years_of_experience,
        profile: profile_of(store, person_iri)?,
        skills: skills_of(store, person_iri)?,
        degree: degree_of(store, person_iri)?,
        experiences: experiences_of(store, person_iri)?,
    })
}

fn skills_of(store: &OntologyStore, person_iri: &str) -> Result<Vec<Skill>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT ?skillName ?type
WHERE {{
    <{person}> :hasSkill ?skill .
    ?skill :skillName ?skillName ;
           a ?type .
    FILTER(?type = :TechnicalSkill || ?type = :SoftSkill)
}}"#,
        ns = store.namespace(),
        person = person_iri
    );

    let mut skills = Vec::new();
    for row in store.select(&sparql)? {
        skills.push(Skill {
            name: required_text(&row, "skillName")?,
            category: category_of(&row),
        });
    }
    Ok(skills)
}

fn degree_of(store: &OntologyStore, person_iri: &str) -> Result<Option<Degree>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT ?degreeName ?degreeLevel ?yearObtained
WHERE {{
    <{person}> :hasDegree ?degree .
    ?degree :degreeName ?degreeName ;
            :degreeLevel ?degreeLevel .
    OPTIONAL {{ ?degree :yearObtained ?yearObtained }}
}}"#,
        ns = store.namespace(),
        person = person_iri
    );

    // Only the first row is consumed even if the graph holds several
    // degrees; the result is unordered, so which one wins is undefined.
    let rows = store.select(&sparql)?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };
    Ok(Some(Degree {
        name: required_text(row, "degreeName")?,
        level: required_text(row, "degreeLevel")?,
        year: optional_integer(row, "yearObtained")?,
    }))
}

fn experiences_of(
    store: &OntologyStore,
    person_iri: &str,
) -> Result<Vec<Experience>, CvgraphError> {
    // All five fields are required by the pattern; a partial entry yields
    // no row and is thus excluded.
    let sparql = format!(
        r#"PREFIX : <{ns}>
SELECT ?jobTitle ?company ?duration ?startYear ?endYear
WHERE {{
    <{person}> :hasExperience ?exp .
    ?exp :jobTitle ?jobTitle ;
         :company ?company ;
         :duration ?duration ;
         :startYear ?startYear ;
         :endYear ?endYear .
}}"#,
        ns = store.namespace(),
        person = person_iri
    );

    let mut experiences = Vec::new();
    for row in store.select(&sparql)? {
        experiences.push(Experience {
            job_title: required_text(&row, "jobTitle")?,
            company: required_text(&row, "company")?,
            duration: required_integer(&row, "duration")?,
            start_year: required_integer(&row, "startYear")?,
            end_year: required_integer(&row, "endYear")?,
        });
    }
    Ok(experiences)
}

fn profile_of(store: &OntologyStore, person_iri: &str) -> Result<Option<String>, CvgraphError> {
    let sparql = format!(
        r#"PREFIX : <{ns}>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT ?profile ?label
WHERE {{
    <{person}> :hasProfile ?profile .
    OPTIONAL {{ ?profile rdfs:label ?label }}
}}"#,
        ns = store.namespace(),
        person = person_iri
    );

    Ok(resolve_profile_label(&store.select(&sparql)?))
}

/// Language-fallback label resolution: a French-tagged label wins, then an
/// English-tagged one, then the local name of the profile IRI.
fn resolve_profile_label(rows: &[QuerySolution]) -> Option<String> {
    let profile_iri = rows.iter().find_map(|row| match row.get("profile") {
        Some(Term::NamedNode(n)) => Some(n.as_str().to_string()),
        _ => None,
    })?;

    let labels: Vec<&Literal> = rows
        .iter()
        .filter_map(|row| match row.get("label") {
            Some(Term::Literal(lit)) => Some(lit),
            _ => None,
        })
        .collect();

    for lang in ["fr", "en"] {
        if let Some(label) = labels.iter().find(|l| l.language() == Some(lang)) {
            return Some(label.value().to_string());
        }
    }
    Some(local_name(&profile_iri).to_string())
}

fn category_of(row: &QuerySolution) -> SkillCategory {
    match row.get("type") {
        Some(Term::NamedNode(n)) if n.as_str().ends_with("TechnicalSkill") => {
            SkillCategory::Technical
        }
        _ => SkillCategory::Soft,
    }
}

/// Local name of an IRI: the part after the last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

fn text(row: &QuerySolution, var: &str) -> Option<String> {
    match row.get(var) {
        Some(Term::Literal(lit)) => Some(lit.value().to_string()),
        Some(Term::NamedNode(n)) => Some(n.as_str().to_string()),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}

fn required_text(row: &QuerySolution, var: &str) -> Result<String, CvgraphError> {
    text(row, var).ok_or_else(|| CvgraphError::Query(format!("unbound variable ?{var}")))
}

fn optional_integer(row: &QuerySolution, var: &str) -> Result<Option<u32>, CvgraphError> {
    match text(row, var) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CvgraphError::Query(format!("expected an integer for ?{var}: {value}"))),
    }
}

fn required_integer(row: &QuerySolution, var: &str) -> Result<u32, CvgraphError> {
    optional_integer(row, var)?
        .ok_or_else(|| CvgraphError::Query(format!("unbound variable ?{var}")))
}
