//! Ontology store — the injectable service object owning the loaded graph.
//!
//! The graph is loaded once from the configured Turtle document and is
//! read-only afterwards. `OntologyStore` is a cheap cloneable handle; the
//! underlying oxigraph `Store` is safe for concurrent readers, so request
//! handlers share one instance with no locking. There is no teardown beyond
//! dropping the handle.

use std::fs::File;
use std::io::BufReader;

use oxigraph::io::RdfFormat;
use oxigraph::sparql::{Query, QueryResults, QuerySolution};
use oxigraph::store::Store;

use crate::config::OntologyConfig;
use crate::error::CvgraphError;

#[derive(Clone)]
pub struct OntologyStore {
    store: Store,
    namespace: String,
}

impl OntologyStore {
    /// Create a store and load the ontology document named by the config.
    pub fn open(config: &OntologyConfig) -> Result<Self, CvgraphError> {
        let store = Store::new().map_err(|e| CvgraphError::Store(e.to_string()))?;
        let file = File::open(&config.file)?;
        store
            .load_from_reader(RdfFormat::Turtle, BufReader::new(file))
            .map_err(|e| CvgraphError::Load(format!("{}: {}", config.file, e)))?;

        let loaded = Self {
            store,
            namespace: config.namespace.clone(),
        };
        tracing::info!(
            "Ontology loaded from {}: {} triples",
            config.file,
            loaded.triple_count()?
        );
        Ok(loaded)
    }

    /// Create a store from an in-memory Turtle document.
    pub fn from_turtle(document: &str, namespace: &str) -> Result<Self, CvgraphError> {
        let store = Store::new().map_err(|e| CvgraphError::Store(e.to_string()))?;
        store
            .load_from_reader(RdfFormat::Turtle, document.as_bytes())
            .map_err(|e| CvgraphError::Load(e.to_string()))?;
        Ok(Self {
            store,
            namespace: namespace.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn triple_count(&self) -> Result<usize, CvgraphError> {
        self.store.len().map_err(|e| CvgraphError::Store(e.to_string()))
    }

    /// Parse and evaluate a SPARQL query. Parse failures are client errors
    /// (`BadQuery`); evaluation failures are internal (`Query`). Only the
    /// query API is exposed, so the graph cannot be mutated through here.
    pub fn query(&self, sparql: &str) -> Result<QueryResults, CvgraphError> {
        let query =
            Query::parse(sparql, None).map_err(|e| CvgraphError::BadQuery(e.to_string()))?;
        self.store
            .query(query)
            .map_err(|e| CvgraphError::Query(e.to_string()))
    }

    /// Evaluate a SELECT query and collect all solutions.
    pub fn select(&self, sparql: &str) -> Result<Vec<QuerySolution>, CvgraphError> {
        match self.query(sparql)? {
            QueryResults::Solutions(solutions) => solutions
                .map(|s| s.map_err(|e| CvgraphError::Query(e.to_string())))
                .collect(),
            _ => Err(CvgraphError::BadQuery(
                "expected a SELECT query".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
@prefix : <http://example.org/cv#> .
:Alice a :Person ; :name "Alice" .
"#;

    #[test]
    fn loads_turtle_and_counts_triples() {
        let store = OntologyStore::from_turtle(FIXTURE, "http://example.org/cv#").unwrap();
        assert_eq!(store.triple_count().unwrap(), 2);
        assert_eq!(store.namespace(), "http://example.org/cv#");
    }

    #[test]
    fn malformed_turtle_is_a_load_error() {
        let err = OntologyStore::from_turtle("@prefix broken", "http://example.org/cv#")
            .err()
            .expect("must fail");
        assert!(matches!(err, CvgraphError::Load(_)));
    }

    #[test]
    fn malformed_query_is_a_bad_query_error() {
        let store = OntologyStore::from_turtle(FIXTURE, "http://example.org/cv#").unwrap();
        let err = store
            .query("SELECT ?x WHERE { broken")
            .err()
            .expect("must fail");
        assert!(matches!(err, CvgraphError::BadQuery(_)));
    }

    #[test]
    fn select_rejects_non_select_forms() {
        let store = OntologyStore::from_turtle(FIXTURE, "http://example.org/cv#").unwrap();
        let err = store
            .select("ASK { ?s ?p ?o }")
            .expect_err("ASK is not a SELECT");
        assert!(matches!(err, CvgraphError::BadQuery(_)));
    }
}
