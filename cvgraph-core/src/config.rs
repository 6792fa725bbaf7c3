use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CvgraphConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ontology: OntologyConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OntologyConfig {
    /// Path to the ontology document loaded at startup (Turtle).
    pub file: String,
    /// Namespace prefix used to build entity IRIs in generated queries.
    pub namespace: String,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            file: "data/cv_ontology.ttl".to_string(),
            namespace: "http://www.semanticweb.org/ontologies/cv#".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl CvgraphConfig {
    /// Load configuration from an optional TOML file overlaid with
    /// `CVGRAPH_`-prefixed environment variables (e.g.
    /// `CVGRAPH_ONTOLOGY__FILE`, `CVGRAPH_ONTOLOGY__NAMESPACE`).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("CVGRAPH").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_config_file_is_absent() {
        let config = CvgraphConfig::load("no-such-config-file").expect("defaults");
        assert_eq!(config.http.port, 8000);
        assert!(config.ontology.namespace.ends_with('#'));
        assert_eq!(config.service.log_level, "info");
    }
}
