//! Platform directories for `trove`: one for configuration, one for the
//! key-value store. Environment overrides win over the locations supplied
//! by the `directories` crate.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

const CONFIG_DIR_ENV: &str = "TROVE_CONFIG_DIR";
const DATA_DIR_ENV: &str = "TROVE_DATA_DIR";

/// Configuration directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    resolve(CONFIG_DIR_ENV, |dirs| dirs.config_local_dir().to_path_buf())
}

/// Data directory backing the key-value store (presets, search history).
pub fn get_data_dir() -> Result<PathBuf> {
    resolve(DATA_DIR_ENV, |dirs| dirs.data_local_dir().to_path_buf())
}

fn resolve(env_name: &str, pick: impl FnOnce(&ProjectDirs) -> PathBuf) -> Result<PathBuf> {
    if let Some(dir) = override_from(env::var_os(env_name)) {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from("dev", "trove-hub", "trove")
        .context("unable to determine platform directories for trove")?;
    Ok(pick(&dirs))
}

/// An empty override value reads the same as an unset one.
fn override_from(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_only_when_nonempty() {
        assert_eq!(override_from(None), None);
        assert_eq!(override_from(Some(OsString::new())), None);
        assert_eq!(
            override_from(Some(OsString::from("/tmp/trove"))),
            Some(PathBuf::from("/tmp/trove"))
        );
    }
}
