//! `atlas breadcrumbs` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the breadcrumbs command.
#[derive(Args)]
pub(crate) struct BreadcrumbsArgs {
    /// Any content path (e.g., /physics/mechanics/kinematics).
    path: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl BreadcrumbsArgs {
    /// Print the breadcrumb trail as JSON.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let resolver = self.config.resolver()?;
        output.json(&resolver.get_breadcrumbs(&self.path))
    }
}
