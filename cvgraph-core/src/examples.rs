//! Static catalog of example SPARQL queries, served for documentation and
//! demo purposes by the passthrough endpoint's companion route.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparqlExample {
    pub name: String,
    pub description: String,
    pub query: String,
}

/// The example queries, rendered against the configured namespace.
pub fn catalog(namespace: &str) -> Vec<SparqlExample> {
    let example = |name: &str, description: &str, body: &str| SparqlExample {
        name: name.to_string(),
        description: description.to_string(),
        query: format!("PREFIX : <{namespace}>\n\n{body}"),
    };

    vec![
        example(
            "All candidates",
            "Every candidate with email and years of experience",
            "SELECT ?name ?email ?experience\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :email ?email ;\n            :yearsOfExperience ?experience .\n}\nORDER BY DESC(?experience)",
        ),
        example(
            "Python candidates",
            "Every candidate mastering Python",
            "SELECT ?name ?email\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :email ?email ;\n            :hasSkill :Python .\n}",
        ),
        example(
            "Data science profiles",
            "Candidates with both Python and Machine Learning",
            "SELECT ?name ?experience\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :yearsOfExperience ?experience ;\n            :hasSkill :Python ;\n            :hasSkill :MachineLearning .\n}\nORDER BY DESC(?experience)",
        ),
        example(
            "Bac+5 seniors",
            "Candidates holding a Bac+5 with at least 5 years of experience",
            "SELECT ?name ?degreeName ?experience\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :yearsOfExperience ?experience ;\n            :hasDegree ?degree .\n    ?degree :degreeLevel \"Bac+5\" ;\n            :degreeName ?degreeName .\n    FILTER(?experience >= 5)\n}\nORDER BY DESC(?experience)",
        ),
        example(
            "Skill statistics",
            "Candidate count per technical skill",
            "SELECT ?skillName (COUNT(?person) as ?count)\nWHERE {\n    ?person a :Person ;\n            :hasSkill ?skill .\n    ?skill a :TechnicalSkill ;\n           :skillName ?skillName .\n}\nGROUP BY ?skillName\nORDER BY DESC(?count)",
        ),
        example(
            "Full-stack developers",
            "Candidates with both JavaScript and Node.js",
            "SELECT ?name ?profile\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :hasSkill :JavaScript ;\n            :hasSkill :NodeJS .\n    OPTIONAL {\n        ?person :hasProfile ?prof .\n        BIND(REPLACE(STR(?prof), \".*#\", \"\") AS ?profile)\n    }\n}",
        ),
        example(
            "Detailed experiences",
            "Every professional experience entry on record",
            "SELECT ?name ?jobTitle ?company ?duration ?startYear ?endYear\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :hasExperience ?exp .\n    ?exp :jobTitle ?jobTitle ;\n         :company ?company ;\n         :duration ?duration ;\n         :startYear ?startYear ;\n         :endYear ?endYear .\n}\nORDER BY ?name ?startYear",
        ),
        example(
            "All technical skills",
            "Every technical skill available in the ontology",
            "SELECT DISTINCT ?skillName\nWHERE {\n    ?skill a :TechnicalSkill ;\n           :skillName ?skillName .\n}\nORDER BY ?skillName",
        ),
        example(
            "Degrees by level",
            "Candidate count per degree level",
            "SELECT ?degreeLevel (COUNT(?person) as ?count)\nWHERE {\n    ?person a :Person ;\n            :hasDegree ?degree .\n    ?degree :degreeLevel ?degreeLevel .\n}\nGROUP BY ?degreeLevel\nORDER BY ?degreeLevel",
        ),
        example(
            "Soft skills",
            "Soft skills of every candidate",
            "SELECT ?name ?skillName\nWHERE {\n    ?person a :Person ;\n            :name ?name ;\n            :hasSkill ?skill .\n    ?skill a :SoftSkill ;\n           :skillName ?skillName .\n}\nORDER BY ?name",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_namespaced_entries() {
        let examples = catalog("http://example.org/cv#");
        assert_eq!(examples.len(), 10);
        for e in &examples {
            assert!(e.query.starts_with("PREFIX : <http://example.org/cv#>"));
            assert!(!e.name.is_empty());
            assert!(!e.description.is_empty());
        }
    }

    #[test]
    fn every_example_parses_against_an_empty_store() {
        let store = crate::store::OntologyStore::from_turtle("", "http://example.org/cv#")
            .expect("empty store");
        for e in catalog(store.namespace()) {
            crate::sparql::execute(&store, &e.query)
                .unwrap_or_else(|err| panic!("example `{}` failed: {err}", e.name));
        }
    }
}
