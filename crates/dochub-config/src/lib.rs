//! Configuration management for DocHub.
//!
//! Parses `dochub.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sections
//!
//! Documentation sections are declared as `[[sections]]` tables. When no
//! section is declared, the built-in set (`devops`, `javascript`,
//! `typescript`, `python`, `mongodb`, `mysql`) is used. Per-section
//! `default_key` and `page_prefix` fall back to the `[navigation]` values.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `docs.source_dir`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override navigation filter depth.
    pub depth: Option<NavigationDepth>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dochub.toml";

/// Default page naming convention shared by all built-in sections.
const DEFAULT_PAGE_PREFIX: &str = "day-";

/// Default index page key for a bare section URL.
const DEFAULT_INDEX_KEY: &str = "day-0";

/// Built-in section declaration.
struct BuiltinSection {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    topics: &'static [&'static str],
    features: &'static [&'static str],
}

const BUILTIN_SECTIONS: &[BuiltinSection] = &[
    BuiltinSection {
        id: "devops",
        title: "DevOps",
        description: "Master CI/CD, containers, and infrastructure as code",
        topics: &["Docker", "Kubernetes", "Jenkins", "Terraform", "Ansible"],
        features: &[
            "100-Day Learning Path",
            "Real-world Projects",
            "Industry Best Practices",
        ],
    },
    BuiltinSection {
        id: "javascript",
        title: "JavaScript",
        description: "Modern ES6+, async programming, and web development",
        topics: &["ES6+", "Async/Await", "DOM", "Node.js", "React"],
        features: &["Interactive Examples", "Modern Patterns", "Web Development"],
    },
    BuiltinSection {
        id: "typescript",
        title: "TypeScript",
        description: "Type-safe JavaScript with advanced features",
        topics: &["Types", "Interfaces", "Generics", "Decorators", "Advanced Patterns"],
        features: &["Type Safety", "Enterprise Ready", "Advanced Patterns"],
    },
    BuiltinSection {
        id: "python",
        title: "Python",
        description: "From basics to advanced automation and data science",
        topics: &["Basics", "OOP", "Automation", "Data Science", "Web Development"],
        features: &["Data Science", "Automation", "Web Development"],
    },
    BuiltinSection {
        id: "mongodb",
        title: "MongoDB",
        description: "NoSQL database mastery with aggregation and indexing",
        topics: &["CRUD", "Aggregation", "Indexing", "Sharding", "Replication"],
        features: &["NoSQL Mastery", "Performance Tuning", "Scalability"],
    },
    BuiltinSection {
        id: "mysql",
        title: "MySQL",
        description: "Relational database design, optimization, and administration",
        topics: &["SQL", "Indexing", "Performance", "Backup", "Replication"],
        features: &["Database Design", "Performance Optimization", "Administration"],
    },
];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Navigation configuration.
    pub navigation: NavigationConfig,
    /// Section declarations as parsed from TOML.
    sections: Option<Vec<SectionConfigRaw>>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sections with defaults applied (set after loading).
    #[serde(skip)]
    pub sections_resolved: Vec<SectionConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Content root directory.
    pub source_dir: PathBuf,
}

/// How far the navigation filter descends below the root.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationDepth {
    /// Filter direct children of the root only.
    #[default]
    Shallow,
    /// Also filter the children of the section's own folder.
    OneLevel,
}

impl std::str::FromStr for NavigationDepth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shallow" => Ok(Self::Shallow),
            "one-level" => Ok(Self::OneLevel),
            other => Err(ConfigError::Validation(format!(
                "navigation.depth must be \"shallow\" or \"one-level\", got \"{other}\""
            ))),
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Filter depth applied uniformly to every section.
    pub depth: NavigationDepth,
    /// Default page naming convention for sections that don't set one.
    pub page_prefix: String,
    /// Default index page key (`/`-separated) for sections that don't set one.
    pub default_key: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            depth: NavigationDepth::Shallow,
            page_prefix: DEFAULT_PAGE_PREFIX.to_owned(),
            default_key: DEFAULT_INDEX_KEY.to_owned(),
        }
    }
}

/// Section declaration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SectionConfigRaw {
    id: String,
    title: Option<String>,
    description: Option<String>,
    topics: Vec<String>,
    features: Vec<String>,
    prefix: Option<String>,
    default_key: Option<String>,
    page_prefix: Option<String>,
}

/// Resolved section configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionConfig {
    /// Section identifier (e.g., "python").
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description for the landing listing.
    pub description: String,
    /// Topic labels for the landing listing.
    pub topics: Vec<String>,
    /// Feature highlights for the landing listing.
    pub features: Vec<String>,
    /// Canonical key prefix segments (defaults to `[id]`).
    pub prefix: Vec<String>,
    /// Index page key relative to the prefix.
    pub default_key: Vec<String>,
    /// Page naming convention token (e.g., "day-").
    pub page_prefix: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`DOCHUB_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a section identifier to be lowercase ASCII letters, digits and dashes.
fn require_section_id(id: &str) -> Result<(), ConfigError> {
    let valid = id
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ConfigError::Validation(format!(
            "sections.id \"{id}\" must match [a-z0-9][a-z0-9-]*"
        )));
    }
    Ok(())
}

/// Split a `/`-separated key into segments, dropping empty ones.
fn split_key(key: &str) -> Vec<String> {
    key.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Derive a display title from a section id ("python" -> "Python").
fn title_from_id(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Built-in section declarations.
fn builtin_sections() -> Vec<SectionConfigRaw> {
    BUILTIN_SECTIONS
        .iter()
        .map(|builtin| SectionConfigRaw {
            id: builtin.id.to_owned(),
            title: Some(builtin.title.to_owned()),
            description: Some(builtin.description.to_owned()),
            topics: builtin.topics.iter().map(|t| (*t).to_owned()).collect(),
            features: builtin.features.iter().map(|f| (*f).to_owned()).collect(),
            prefix: None,
            default_key: None,
            page_prefix: None,
        })
        .collect()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dochub.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(depth) = settings.depth {
            self.navigation.depth = depth;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let navigation = NavigationConfig::default();
        let sections_resolved = Self::resolve_sections(&builtin_sections(), &navigation);
        Self {
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            navigation,
            sections: None,
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            sections_resolved,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_sections()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate resolved sections.
    ///
    /// Every section needs a valid unique id, a non-empty prefix not shared with
    /// another section, a non-empty default key and a non-empty page prefix.
    fn validate_sections(&self) -> Result<(), ConfigError> {
        if self.sections_resolved.is_empty() {
            return Err(ConfigError::Validation(
                "at least one section must be configured".to_owned(),
            ));
        }

        let mut ids = HashSet::new();
        let mut prefixes = HashSet::new();
        for section in &self.sections_resolved {
            require_section_id(&section.id)?;
            if !ids.insert(section.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section id \"{}\"",
                    section.id
                )));
            }
            if section.prefix.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sections.prefix for \"{}\" cannot be empty",
                    section.id
                )));
            }
            if !prefixes.insert(section.prefix.join("/")) {
                return Err(ConfigError::Validation(format!(
                    "sections.prefix \"{}\" is shared by more than one section",
                    section.prefix.join("/")
                )));
            }
            if section.default_key.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sections.default_key for \"{}\" cannot be empty",
                    section.id
                )));
            }
            require_non_empty(&section.page_prefix, "sections.page_prefix")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and apply section defaults.
    fn resolve(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };

        self.sections_resolved = match &self.sections {
            Some(sections) => Self::resolve_sections(sections, &self.navigation),
            None => Self::resolve_sections(&builtin_sections(), &self.navigation),
        };
    }

    /// Fill in per-section defaults from navigation settings.
    fn resolve_sections(
        sections: &[SectionConfigRaw],
        navigation: &NavigationConfig,
    ) -> Vec<SectionConfig> {
        sections
            .iter()
            .map(|raw| SectionConfig {
                id: raw.id.clone(),
                title: raw.title.clone().unwrap_or_else(|| title_from_id(&raw.id)),
                description: raw.description.clone().unwrap_or_default(),
                topics: raw.topics.clone(),
                features: raw.features.clone(),
                prefix: match &raw.prefix {
                    Some(prefix) => split_key(prefix),
                    None => split_key(&raw.id),
                },
                default_key: split_key(
                    raw.default_key
                        .as_deref()
                        .unwrap_or(&navigation.default_key),
                ),
                page_prefix: raw
                    .page_prefix
                    .clone()
                    .unwrap_or_else(|| navigation.page_prefix.clone()),
            })
            .collect()
    }
}
