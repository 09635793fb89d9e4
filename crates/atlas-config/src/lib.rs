//! Configuration for Atlas.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `atlas.toml`, given explicitly or found by walking up from the current
//!    directory
//! 3. [`Overrides`] from the command line
//!
//! Relative paths in the file resolve against the file's directory. The
//! fields `server.host`, `content.source_dir` and `catalog.path` expand
//! `${VAR}` (required) and `${VAR:-default}` before resolution.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [content]
//! source_dir = "${CONTENT_DIR:-content}"
//! kind = "fs"               # or "json" for an exported tree
//! dir_meta_filename = "_dir.yml"
//!
//! [catalog]
//! path = "catalog.yaml"
//!
//! [navigation]
//! cache_enabled = true
//! cache_ttl_secs = 300
//! fetch_timeout_ms = 5000
//! max_depth = 32
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

const CONFIG_FILENAME: &str = "atlas.toml";

/// Largest accepted `navigation.max_depth`.
const MAX_TREE_DEPTH: usize = 256;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly named config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid {CONFIG_FILENAME}: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range after all layers were applied.
    #[error("Invalid configuration: {0}")]
    Validation(String),
    /// `${VAR}` referenced an unset variable.
    #[error("Cannot expand {field}: {message}")]
    EnvVar { field: String, message: String },
}

/// Command-line values layered over the file. `None` keeps the file value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub source_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub cache_enabled: Option<bool>,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.source_dir {
            config.content.source_dir.clone_from(dir);
        }
        if let Some(path) = &self.catalog_path {
            config.catalog.path.clone_from(path);
        }
        if let Some(enabled) = self.cache_enabled {
            config.navigation.cache_enabled = enabled;
        }
    }
}

/// Content backend kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Markdown directory tree.
    #[default]
    Fs,
    /// Exported JSON content tree.
    Json,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

/// `[content]`, with `source_dir` resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    /// Content directory, or the export file for [`ContentKind::Json`].
    pub source_dir: PathBuf,
    pub kind: ContentKind,
    /// Sidecar file holding directory metadata.
    pub dir_meta_filename: String,
}

/// `[catalog]`, with `path` resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSection {
    pub path: PathBuf,
}

/// `[navigation]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationSection {
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub fetch_timeout_ms: u64,
    /// Nesting limit beneath a category.
    pub max_depth: usize,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_secs: 300,
            fetch_timeout_ms: 5000,
            max_depth: 32,
        }
    }
}

impl NavigationSection {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Bound on each content source call.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerSection,
    pub content: ContentSection,
    pub catalog: CatalogSection,
    pub navigation: NavigationSection,
    /// File the configuration was read from, if any.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().resolve(Path::new("."))
    }
}

impl Config {
    /// Load, override and validate the configuration.
    ///
    /// Without an explicit `file`, the nearest `atlas.toml` in the current
    /// directory or its ancestors is used; with none found, defaults apply
    /// relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, the file cannot be
    /// read or parsed, a required variable is unset, or a value is invalid.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match file {
            Some(file) if !file.is_file() => return Err(ConfigError::NotFound(file.to_path_buf())),
            Some(file) => Some(file.to_path_buf()),
            None => discover(),
        };

        let mut config = match file {
            Some(file) => Self::from_file(&file)?,
            None => RawConfig::default().resolve(&std::env::current_dir().unwrap_or_default()),
        };
        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn from_file(file: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(file)?;
        let base = file.parent().unwrap_or(Path::new("."));
        let mut config = RawConfig::parse(&text)?.expand_env()?.resolve(base);
        config.file = Some(file.to_path_buf());
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return invalid("server.host cannot be empty");
        }
        // Port 0 would bind a random port, never what a config file means.
        if self.server.port == 0 {
            return invalid("server.port cannot be 0");
        }

        let meta = &self.content.dir_meta_filename;
        if meta.trim().is_empty() {
            return invalid("content.dir_meta_filename cannot be empty");
        }
        if meta.contains(['/', '\\']) {
            return invalid("content.dir_meta_filename must be a file name, not a path");
        }

        let nav = &self.navigation;
        if nav.cache_ttl_secs == 0 {
            return invalid("navigation.cache_ttl_secs must be greater than 0");
        }
        if nav.fetch_timeout_ms == 0 {
            return invalid("navigation.fetch_timeout_ms must be greater than 0");
        }
        if !(1..=MAX_TREE_DEPTH).contains(&nav.max_depth) {
            return invalid(format!(
                "navigation.max_depth must be between 1 and {MAX_TREE_DEPTH}"
            ));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Result<(), ConfigError> {
    Err(ConfigError::Validation(message.into()))
}

/// Nearest `atlas.toml` in the current directory or an ancestor.
fn discover() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// `atlas.toml` as written: every field optional, paths unresolved.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    server: RawServer,
    content: RawContent,
    catalog: RawCatalog,
    navigation: NavigationSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawContent {
    source_dir: Option<String>,
    kind: Option<ContentKind>,
    dir_meta_filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCatalog {
    path: Option<String>,
}

impl RawConfig {
    fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    fn expand_env(mut self) -> Result<Self, ConfigError> {
        let fields = [
            (&mut self.server.host, "server.host"),
            (&mut self.content.source_dir, "content.source_dir"),
            (&mut self.catalog.path, "catalog.path"),
        ];
        for (value, field) in fields {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(self)
    }

    /// Apply defaults and resolve relative paths against `base`.
    fn resolve(self, base: &Path) -> Config {
        let path_or = |value: Option<String>, default: &str| {
            base.join(value.as_deref().unwrap_or(default))
        };

        Config {
            server: ServerSection {
                host: self.server.host.unwrap_or_else(|| "127.0.0.1".to_owned()),
                port: self.server.port.unwrap_or(3000),
            },
            content: ContentSection {
                source_dir: path_or(self.content.source_dir, "content"),
                kind: self.content.kind.unwrap_or_default(),
                dir_meta_filename: self
                    .content
                    .dir_meta_filename
                    .unwrap_or_else(|| "_dir.yml".to_owned()),
            },
            catalog: CatalogSection {
                path: path_or(self.catalog.path, "catalog.yaml"),
            },
            navigation: self.navigation,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve_at(text: &str, base: &str) -> Config {
        RawConfig::parse(text).unwrap().resolve(Path::new(base))
    }

    fn validation_message(config: &Config) -> String {
        match config.validate() {
            Err(ConfigError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    // ========================================================================
    // Parsing and resolution
    // ========================================================================

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = resolve_at("", "/srv/notes");

        assert_eq!(
            config.server,
            ServerSection {
                host: "127.0.0.1".to_owned(),
                port: 3000,
            }
        );
        assert_eq!(config.content.source_dir, PathBuf::from("/srv/notes/content"));
        assert_eq!(config.content.kind, ContentKind::Fs);
        assert_eq!(config.content.dir_meta_filename, "_dir.yml");
        assert_eq!(config.catalog.path, PathBuf::from("/srv/notes/catalog.yaml"));
        assert_eq!(config.navigation, NavigationSection::default());
        assert_eq!(config.navigation.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.navigation.fetch_timeout(), Duration::from_secs(5));
        assert!(config.file.is_none());
    }

    #[test]
    fn test_every_section() {
        let config = resolve_at(
            r#"
[server]
host = "0.0.0.0"
port = 9000

[content]
source_dir = "export/content.json"
kind = "json"
dir_meta_filename = "meta.yml"

[catalog]
path = "config/catalog.yaml"

[navigation]
cache_enabled = false
cache_ttl_secs = 60
fetch_timeout_ms = 250
max_depth = 8
"#,
            "/project",
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.content,
            ContentSection {
                source_dir: PathBuf::from("/project/export/content.json"),
                kind: ContentKind::Json,
                dir_meta_filename: "meta.yml".to_owned(),
            }
        );
        assert_eq!(config.catalog.path, PathBuf::from("/project/config/catalog.yaml"));
        assert!(!config.navigation.cache_enabled);
        assert_eq!(config.navigation.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.navigation.fetch_timeout(), Duration::from_millis(250));
        assert_eq!(config.navigation.max_depth, 8);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = resolve_at("[content]\nsource_dir = \"/data/notes\"\n", "/project");

        assert_eq!(config.content.source_dir, PathBuf::from("/data/notes"));
    }

    #[test]
    fn test_unknown_kind_and_keys_rejected() {
        assert!(matches!(
            RawConfig::parse("[content]\nkind = \"s3\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RawConfig::parse("[navigation]\ncache_ttl = 10\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    // ========================================================================
    // Environment expansion
    // ========================================================================

    #[test]
    fn test_expands_env_in_path_fields() {
        // SAFETY: these variables are only touched by this test
        unsafe {
            std::env::set_var("ATLAS_CFG_BIND", "0.0.0.0");
            std::env::set_var("ATLAS_CFG_NOTES", "/data/notes");
            std::env::remove_var("ATLAS_CFG_CATALOG");
        }

        let config = RawConfig::parse(
            r#"
[server]
host = "${ATLAS_CFG_BIND}"

[content]
source_dir = "${ATLAS_CFG_NOTES}"

[catalog]
path = "${ATLAS_CFG_CATALOG:-catalogs/main.yaml}"
"#,
        )
        .unwrap()
        .expand_env()
        .unwrap()
        .resolve(Path::new("/project"));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.content.source_dir, PathBuf::from("/data/notes"));
        assert_eq!(config.catalog.path, PathBuf::from("/project/catalogs/main.yaml"));

        unsafe {
            std::env::remove_var("ATLAS_CFG_BIND");
            std::env::remove_var("ATLAS_CFG_NOTES");
        }
    }

    #[test]
    fn test_unset_required_var_names_field() {
        // SAFETY: this variable is only touched by this test
        unsafe {
            std::env::remove_var("ATLAS_CFG_UNSET");
        }

        let err = RawConfig::parse("[content]\nsource_dir = \"${ATLAS_CFG_UNSET}/x\"\n")
            .unwrap()
            .expand_env()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Cannot expand content.source_dir: ${ATLAS_CFG_UNSET} not set"
        );
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = resolve_at("[server]\nport = 8080\n", "/project");
        let overrides = Overrides {
            host: Some("0.0.0.0".to_owned()),
            catalog_path: Some(PathBuf::from("/elsewhere/catalog.yaml")),
            cache_enabled: Some(false),
            ..Overrides::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.source_dir, PathBuf::from("/project/content"));
        assert_eq!(config.catalog.path, PathBuf::from("/elsewhere/catalog.yaml"));
        assert!(!config.navigation.cache_enabled);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = resolve_at("", "/project");
        let before = config.clone();

        Overrides::default().apply(&mut config);

        assert_eq!(config, before);
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_server_rules() {
        let mut config = Config::default();
        config.server.host = " ".to_owned();
        assert_eq!(validation_message(&config), "server.host cannot be empty");

        let mut config = Config::default();
        config.server.port = 0;
        assert_eq!(validation_message(&config), "server.port cannot be 0");
    }

    #[test]
    fn test_dir_meta_filename_rules() {
        let mut config = Config::default();
        config.content.dir_meta_filename = String::new();
        assert!(validation_message(&config).contains("cannot be empty"));

        config.content.dir_meta_filename = "meta/_dir.yml".to_owned();
        assert!(validation_message(&config).contains("not a path"));
    }

    #[test]
    fn test_navigation_rules() {
        let mut config = Config::default();
        config.navigation.cache_ttl_secs = 0;
        assert!(validation_message(&config).starts_with("navigation.cache_ttl_secs"));

        let mut config = Config::default();
        config.navigation.fetch_timeout_ms = 0;
        assert!(validation_message(&config).starts_with("navigation.fetch_timeout_ms"));

        let mut config = Config::default();
        for depth in [0, MAX_TREE_DEPTH + 1] {
            config.navigation.max_depth = depth;
            assert_eq!(
                validation_message(&config),
                "navigation.max_depth must be between 1 and 256"
            );
        }
        config.navigation.max_depth = MAX_TREE_DEPTH;
        assert!(config.validate().is_ok());
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_load_resolves_against_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("atlas.toml");
        std::fs::write(&file, "[server]\nport = 8080\n[content]\nsource_dir = \"docs\"\n").unwrap();

        let config = Config::load(Some(&file), &Overrides::default()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.source_dir, dir.path().join("docs"));
        assert_eq!(config.file.as_deref(), Some(file.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/atlas.toml")), &Overrides::default())
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_validates_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("atlas.toml");

        std::fs::write(&file, "[navigation]\nmax_depth = 0\n").unwrap();
        assert!(matches!(
            Config::load(Some(&file), &Overrides::default()),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&file, "").unwrap();
        let overrides = Overrides {
            port: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            Config::load(Some(&file), &overrides),
            Err(ConfigError::Validation(_))
        ));
    }
}
