use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Failed to serialize JSON report: {source}")]
    SerializeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize YAML report: {source}")]
    SerializeYaml {
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to serialize TOML report: {source}")]
    SerializeToml {
        #[source]
        source: toml::ser::Error,
    },
    #[error("Failed to write report '{path}': {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
