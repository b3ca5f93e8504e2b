//! Configuration loading, merging and validation into a [`RunConfig`].
mod apply;
mod loader;
mod run;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use run::RunConfig;

#[cfg(test)]
pub(crate) use loader::{find_default_config, load_config_file};
