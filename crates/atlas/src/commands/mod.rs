//! CLI command implementations.

pub(crate) mod breadcrumbs;
pub(crate) mod catalog;
pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod serve;
pub(crate) mod subjects;

use std::path::PathBuf;

use atlas_config::{Config, Overrides};
use atlas_nav::NavigationResolver;
use atlas_server::{build_resolver, server_config_from_config};
use clap::Args;

use crate::error::CliError;

pub(crate) use breadcrumbs::BreadcrumbsArgs;
pub(crate) use catalog::CatalogArgs;
pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use subjects::SubjectsArgs;

/// Configuration options shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover atlas.toml).
    #[arg(short, long, env = "ATLAS_CONFIG")]
    config: Option<PathBuf>,

    /// Content directory or JSON export (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Catalog YAML file (overrides config).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load configuration, layering these flags over `overrides`.
    pub(crate) fn load(&self, overrides: Overrides) -> Result<Config, CliError> {
        let overrides = Overrides {
            source_dir: self.source_dir.clone(),
            catalog_path: self.catalog.clone(),
            ..overrides
        };
        Ok(Config::load(self.config.as_deref(), &overrides)?)
    }

    /// Load configuration and build a resolver from it.
    pub(crate) fn resolver(&self) -> Result<NavigationResolver, CliError> {
        let config = self.load(Overrides::default())?;
        Ok(build_resolver(&server_config_from_config(&config))?)
    }
}
