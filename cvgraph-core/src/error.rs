use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvgraphError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ontology load error: {0}")]
    Load(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid SPARQL query: {0}")]
    BadQuery(String),

    #[error("Query evaluation error: {0}")]
    Query(String),

    #[error("Invalid identifier `{0}`")]
    InvalidId(String),
}
