//! `atlas subjects` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the subjects command.
#[derive(Args)]
pub(crate) struct SubjectsArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl SubjectsArgs {
    /// Print the configured subjects as JSON.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let resolver = self.config.resolver()?;
        output.json(resolver.list_subjects())
    }
}
