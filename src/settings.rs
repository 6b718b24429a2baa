use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use trove::{BROWSE_PAGE_SIZE, app_dirs};

use crate::cli::CliArgs;

const DEFAULT_BASE_URL: &str = "https://trove.dev";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    catalog: Option<PathBuf>,
    page_size: Option<usize>,
    base_url: Option<String>,
}

/// Effective settings after merging config files, environment, and CLI.
/// The catalog path is only required by the commands that browse it.
#[derive(Debug)]
pub struct ResolvedSettings {
    catalog: Option<PathBuf>,
    pub page_size: usize,
    pub base_url: String,
}

impl ResolvedSettings {
    pub fn require_catalog(&self) -> Result<&Path> {
        self.catalog.as_deref().ok_or_else(|| {
            anyhow!(
                "no catalog configured; pass --catalog, set TROVE_CATALOG, or add `catalog` to trove.toml"
            )
        })
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedSettings> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("trove")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".trove.toml"));
        files.push(current_dir.join("trove.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(catalog) = cli.catalog.clone() {
            self.catalog = Some(catalog);
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = Some(page_size);
        }
        if let Some(base_url) = cli.base_url.clone() {
            self.base_url = Some(base_url);
        }
    }

    fn resolve(self) -> Result<ResolvedSettings> {
        let catalog = self.catalog.map(|path| {
            if path.is_relative()
                && let Ok(current_dir) = env::current_dir()
            {
                current_dir.join(path)
            } else {
                path
            }
        });

        let page_size = self.page_size.unwrap_or(BROWSE_PAGE_SIZE);
        ensure!(page_size > 0, "page-size must be greater than zero");

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ResolvedSettings {
            catalog,
            page_size,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_only_fails_when_required() {
        let raw = RawConfig::default();
        let resolved = raw.resolve().expect("resolve without catalog");
        assert!(resolved.require_catalog().is_err());
    }

    #[test]
    fn defaults_fill_page_size_and_base_url() {
        let raw = RawConfig {
            catalog: Some(PathBuf::from("/tmp/catalog.json")),
            ..RawConfig::default()
        };
        let resolved = raw.resolve().expect("resolve");
        assert_eq!(resolved.page_size, BROWSE_PAGE_SIZE);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let raw = RawConfig {
            catalog: Some(PathBuf::from("/tmp/catalog.json")),
            page_size: Some(0),
            ..RawConfig::default()
        };
        assert!(raw.resolve().is_err());
    }
}
