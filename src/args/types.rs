use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console summary only
    Stdout,
    /// Console summary plus an encoded report file
    Txt,
    /// Console summary plus an HTML chart report
    Html,
    /// Console summary, encoded report file and HTML report
    All,
}

impl ReportFormat {
    #[must_use]
    pub const fn writes_file(self) -> bool {
        matches!(self, ReportFormat::Txt | ReportFormat::All)
    }

    #[must_use]
    pub const fn writes_html(self) -> bool {
        matches!(self, ReportFormat::Html | ReportFormat::All)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    Text,
    Json,
    Yaml,
    Toml,
    Csv,
    Xml,
}

impl EncodeFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Text => "txt",
            EncodeFormat::Json => "json",
            EncodeFormat::Yaml => "yaml",
            EncodeFormat::Toml => "toml",
            EncodeFormat::Csv => "csv",
            EncodeFormat::Xml => "xml",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or_else(|| ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
