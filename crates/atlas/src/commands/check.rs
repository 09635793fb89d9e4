//! `atlas check` command implementation.
//!
//! Loads everything the server would load and reports what it found.
//! Configuration and catalog problems are errors; content gaps are warnings.

use atlas_config::Overrides;
use atlas_server::{build_resolver, server_config_from_config};
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    /// Validate configuration, catalog and content.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load(Overrides::default())?;
        match &config.file {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no atlas.toml found)"),
        }

        let resolver = build_resolver(&server_config_from_config(&config))?;
        let subjects = resolver.list_subjects();
        let categories = resolver.all_categories();
        let explicit = categories
            .iter()
            .filter(|entry| entry.category.is_explicit())
            .count();
        output.highlight(&format!(
            "Catalog: {} subjects, {} categories ({explicit} with explicit navigation)",
            subjects.len(),
            categories.len(),
        ));

        let mut empty = 0;
        for entry in categories.iter().filter(|entry| !entry.category.is_explicit()) {
            let items = resolver.get_category_navigation(&entry.category.path).await;
            if items.is_empty() {
                empty += 1;
                output.warning(&format!(
                    "No navigable content for {} ({})",
                    entry.category.path, entry.category.title
                ));
            }
        }

        let discovered: usize = resolver
            .merged_catalog()
            .await
            .iter()
            .zip(subjects)
            .map(|(merged, configured)| merged.categories.len() - configured.categories.len())
            .sum();
        if discovered > 0 {
            output.info(&format!(
                "Content: {discovered} unconfigured categories discovered"
            ));
        }

        if empty == 0 {
            output.success("Configuration OK");
        } else {
            output.warning(&format!(
                "Configuration OK, {empty} categories without content"
            ));
        }
        Ok(())
    }
}
