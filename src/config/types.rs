use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration;
use crate::args::{EncodeFormat, ReportFormat};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    #[serde(alias = "workers")]
    pub concurrency: Option<usize>,
    pub quiet: Option<bool>,
    pub output: Option<String>,
    pub encode: Option<EncodeFormat>,
    pub format: Option<ReportFormat>,
    pub timeout: Option<DurationValue>,
    pub timestamp: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::config(ConfigError::InvalidTimeout {
                        source: ValidationError::DurationZero,
                    }))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text)
                .map_err(|err| AppError::config(ConfigError::InvalidTimeout { source: err })),
        }
    }
}
