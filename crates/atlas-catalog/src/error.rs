use std::path::PathBuf;

/// Catalog loading error.
///
/// All variants are fatal at startup: a process never serves navigation from
/// a catalog that failed to load.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Catalog parsed but violates structural rules.
    #[error("Malformed catalog: {0}")]
    Malformed(String),
}
