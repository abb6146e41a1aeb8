//! Locating, reading, and writing the preferences file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result, WrapErr};
use serde::Serialize;

const PREFS_FILE_NAME: &str = "prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

lazy_static! {
    static ref PREFS_FILE: Option<PathBuf> = default_prefs_file();
}

/// Returns the user preferences file in the system config directory.
pub fn prefs_file() -> Result<&'static Path> {
    PREFS_FILE
        .as_deref()
        .ok_or_eyre("no config directory for this platform")
}

fn default_prefs_file() -> Option<PathBuf> {
    match ProjectDirs::from("", "", "cubesim") {
        Some(dirs) => Some(
            dirs.config_dir()
                .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")),
        ),
        None => {
            log::error!("Error getting config directory");
            None
        }
    }
}

/// Returns the config source for the user preferences. An explicit path must
/// exist; the default file may be missing.
pub(crate) fn user_config_source(
    path: Option<&Path>,
) -> Result<config::File<config::FileSourceFile, config::FileFormat>> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (prefs_file()?, false),
    };
    Ok(config::File::from(path)
        .format(crate::PREFS_FILE_FORMAT)
        .required(required))
}

/// Writes preferences to `path`, or to the default file if `path` is `None`.
pub(crate) fn save(prefs_data: &impl Serialize, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => prefs_file()?,
    };
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)
            .wrap_err_with(|| format!("error creating {}", p.display()))?;
    }
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("error creating {}", path.display()))?;
    serde_norway::to_writer(file, prefs_data).wrap_err("error serializing preferences")?;
    log::info!("saved preferences to {}", path.display());
    Ok(())
}
