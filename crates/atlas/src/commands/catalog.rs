//! `atlas catalog` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the catalog command.
#[derive(Args)]
pub(crate) struct CatalogArgs {
    /// Print the flat category list instead of the merged subjects.
    #[arg(long)]
    flat: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl CatalogArgs {
    /// Print the merged catalog as JSON.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let resolver = self.config.resolver()?;
        if self.flat {
            output.json(&resolver.all_categories())
        } else {
            output.json(&resolver.merged_catalog().await)
        }
    }
}
