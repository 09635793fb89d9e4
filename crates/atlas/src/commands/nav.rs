//! `atlas nav` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Category path (e.g., /physics/mechanics).
    path: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl NavArgs {
    /// Print the category navigation as JSON.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let resolver = self.config.resolver()?;
        if resolver.catalog().category_by_path(&self.path).is_none() {
            output.warning(&format!("{} is not a configured category", self.path));
        }
        let items = resolver.get_category_navigation(&self.path).await;
        output.json(&*items)
    }
}
