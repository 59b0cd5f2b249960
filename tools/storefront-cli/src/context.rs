//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::FileStore;
use storefront_commerce::cart::PricingRules;
use storefront_commerce::catalog::Catalog;
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the config file in use; relative paths in the config
    /// resolve against it.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_dir) = if let Some(path) = config_path {
            let dir = Path::new(path).parent().map(|p| cwd.join(p));
            (StorefrontConfig::load(path)?, dir)
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, dir)) => (config, Some(dir)),
                None => (StorefrontConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(config_path.to_str()?) {
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the configured catalog, or the bundled one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                debug!(path = %path.display(), "loading catalog");
                Catalog::from_file(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Catalog::builtin().context("Failed to load bundled catalog"),
        }
    }

    /// Order summary rules in the catalog's currency.
    pub fn pricing(&self, catalog: &Catalog) -> Result<PricingRules> {
        self.config.pricing.rules(catalog.currency())
    }

    /// Open the store the delivery location is kept in.
    pub fn location_store(&self) -> Result<FileStore> {
        let path = match &self.config.location.store_path {
            Some(path) => self.resolve_path(path),
            None => self.cwd.join(".storefront").join("state.json"),
        };
        FileStore::open(&path)
            .with_context(|| format!("Failed to open location store: {}", path.display()))
    }

    /// Resolve a path from the config file.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return path;
        }
        self.config_dir.as_ref().unwrap_or(&self.cwd).join(path)
    }
}
