//! SPARQL passthrough — arbitrary read-only queries over the graph.
//!
//! Results are shaped into an explicit tagged set (column names plus rows
//! of optional strings) instead of introspecting row shapes at runtime.
//! The store's query API cannot mutate the graph, so a failing or hostile
//! query can at worst burn CPU; there is deliberately no timeout or
//! resource cap here.

use std::collections::BTreeMap;

use oxigraph::model::{Subject, Term};
use oxigraph::sparql::QueryResults;
use serde::{Deserialize, Serialize};

use crate::error::CvgraphError;
use crate::store::OntologyStore;

/// A materialized query result: the bound column names and, per row, a
/// mapping from column name to an optional string rendering (unbound
/// variables are `None` and serialize as JSON null).
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, Option<String>>>,
}

/// Execute a raw query. SELECT yields one row per solution; ASK yields a
/// single `result` column; CONSTRUCT/DESCRIBE yield one
/// subject/predicate/object row per triple.
pub fn execute(store: &OntologyStore, query: &str) -> Result<SelectResultSet, CvgraphError> {
    match store.query(query)? {
        QueryResults::Solutions(solutions) => {
            let columns: Vec<String> = solutions
                .variables()
                .iter()
                .map(|v| v.as_str().to_string())
                .collect();

            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution.map_err(|e| CvgraphError::Query(e.to_string()))?;
                let row = columns
                    .iter()
                    .map(|column| {
                        (
                            column.clone(),
                            solution.get(column.as_str()).map(term_text),
                        )
                    })
                    .collect();
                rows.push(row);
            }
            Ok(SelectResultSet {
                columns,
                rows,
            })
        }
        QueryResults::Boolean(value) => Ok(SelectResultSet {
            columns: vec!["result".to_string()],
            rows: vec![BTreeMap::from([(
                "result".to_string(),
                Some(value.to_string()),
            )])],
        }),
        QueryResults::Graph(triples) => {
            let columns = vec![
                "subject".to_string(),
                "predicate".to_string(),
                "object".to_string(),
            ];
            let mut rows = Vec::new();
            for triple in triples {
                let triple = triple.map_err(|e| CvgraphError::Query(e.to_string()))?;
                rows.push(BTreeMap::from([
                    ("subject".to_string(), Some(subject_text(&triple.subject))),
                    (
                        "predicate".to_string(),
                        Some(triple.predicate.as_str().to_string()),
                    ),
                    ("object".to_string(), Some(term_text(&triple.object))),
                ]));
            }
            Ok(SelectResultSet { columns, rows })
        }
    }
}

/// Plain-text rendering: IRIs as their string form, literals as their
/// lexical value, blank nodes in `_:` form.
fn term_text(term: &Term) -> String {
    match term {
        Term::NamedNode(n) => n.as_str().to_string(),
        Term::Literal(lit) => lit.value().to_string(),
        Term::BlankNode(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn subject_text(subject: &Subject) -> String {
    match subject {
        Subject::NamedNode(n) => n.as_str().to_string(),
        Subject::BlankNode(b) => b.to_string(),
        other => other.to_string(),
    }
}
