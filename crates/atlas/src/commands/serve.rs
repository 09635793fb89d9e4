//! `atlas serve` command implementation.

use atlas_config::Overrides;
use atlas_server::{run_server, server_config_from_config};
use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and cache logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the navigation cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the navigation cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let overrides = Overrides {
            host: self.host.clone(),
            port: self.port,
            cache_enabled: self.resolve_cache_enabled(),
            ..Overrides::default()
        };
        let config = self.config.load(overrides)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content: {}",
            config.content.source_dir.display()
        ));
        output.info(&format!(
            "Catalog: {}",
            config.catalog.path.display()
        ));
        if config.navigation.cache_enabled {
            output.info(&format!(
                "Navigation cache: {}s TTL",
                config.navigation.cache_ttl_secs
            ));
        } else {
            output.info("Navigation cache: disabled");
        }

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
