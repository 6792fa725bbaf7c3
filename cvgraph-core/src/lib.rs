pub mod config;
pub mod error;
pub mod examples;
pub mod models;
pub mod queries;
pub mod search;
pub mod sparql;
pub mod stats;
pub mod store;

pub use config::CvgraphConfig;
pub use error::CvgraphError;
pub use store::OntologyStore;
