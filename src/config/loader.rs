use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Files looked up in the working directory when `--config` is absent, in
/// order of preference.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["stresser.toml", "stresser.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSyntax {
    Toml,
    Json,
}

impl ConfigSyntax {
    fn from_path(path: &Path) -> AppResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            })),
            None => Err(AppError::config(ConfigError::MissingExtension)),
        }
    }
}

/// Reads the stress test settings file.
///
/// An explicit `--config` path must exist. Without one, `stresser.toml` and
/// then `stresser.json` are looked up in the working directory and a run
/// without either simply uses the command line.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read, has an unsupported
/// extension, or does not parse into a [`ConfigFile`].
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = path.map_or_else(
        || find_default_config(Path::new(".")),
        |path| Some(PathBuf::from(path)),
    );
    chosen.map(|path| load_config_file(&path)).transpose()
}

/// First default config file present in `dir`.
pub(crate) fn find_default_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let syntax = ConfigSyntax::from_path(path)?;
    debug!("Loading {:?} config from {}", syntax, path.display());
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match syntax {
        ConfigSyntax::Toml => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        ConfigSyntax::Json => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
    }
}
