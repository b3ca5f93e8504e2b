//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Command, StresserArgs, TestArgs};
pub use types::{EncodeFormat, PositiveUsize, ReportFormat};

pub(crate) use defaults::DEFAULT_USER_AGENT;
