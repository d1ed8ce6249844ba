use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `LOGO_BUILDER__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Tunables for the combination generator and its three entry points.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Logos returned by a batch generation when the caller gives no count.
    #[serde(default = "default_count")]
    pub default_count: usize,
    #[serde(default = "default_diversity")]
    pub default_diversity: f64,
    #[serde(default = "default_batch_size")]
    pub default_batch_size: usize,
    /// Combinations drawn per requested logo in a batch generation.
    #[serde(default = "default_batch_oversample")]
    pub batch_oversample: usize,
    /// Combinations drawn per requested logo in a variation generation.
    #[serde(default = "default_variation_oversample")]
    pub variation_oversample: usize,
    /// Logos requested from the batch per logo asked of `generate_more`.
    #[serde(default = "default_more_oversample")]
    pub more_oversample: usize,
    #[serde(default = "default_more_diversity")]
    pub more_diversity: f64,
    #[serde(default = "default_more_count")]
    pub more_default_count: usize,
    #[serde(default = "default_variation_count")]
    pub variation_default_count: usize,
    #[serde(default = "default_similar_diversity")]
    pub similar_diversity: f64,
    #[serde(default = "default_diverse_diversity")]
    pub diverse_diversity: f64,
    /// Largest count any single call may ask for.
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Fixed seed for the sampling RNG. Unset means seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Bounds on the pools the in-memory asset catalog hands out.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
    #[serde(default = "default_related_pool_size")]
    pub related_pool_size: usize,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_count() -> usize {
    50
}
fn default_diversity() -> f64 {
    0.5
}
fn default_batch_size() -> usize {
    12
}
fn default_batch_oversample() -> usize {
    3
}
fn default_variation_oversample() -> usize {
    2
}
fn default_more_oversample() -> usize {
    2
}
fn default_more_diversity() -> f64 {
    0.8
}
fn default_more_count() -> usize {
    12
}
fn default_variation_count() -> usize {
    8
}
fn default_similar_diversity() -> f64 {
    0.2
}
fn default_diverse_diversity() -> f64 {
    0.8
}
fn default_max_count() -> usize {
    1000
}
fn default_max_pool_size() -> usize {
    24
}
fn default_related_pool_size() -> usize {
    8
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            default_diversity: default_diversity(),
            default_batch_size: default_batch_size(),
            batch_oversample: default_batch_oversample(),
            variation_oversample: default_variation_oversample(),
            more_oversample: default_more_oversample(),
            more_diversity: default_more_diversity(),
            more_default_count: default_more_count(),
            variation_default_count: default_variation_count(),
            similar_diversity: default_similar_diversity(),
            diverse_diversity: default_diverse_diversity(),
            max_count: default_max_count(),
            seed: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_pool_size: default_max_pool_size(),
            related_pool_size: default_related_pool_size(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            log_format: LogFormat::default(),
            generator: GeneratorConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Reject values the generator cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("default_diversity", self.default_diversity),
            ("more_diversity", self.more_diversity),
            ("similar_diversity", self.similar_diversity),
            ("diverse_diversity", self.diverse_diversity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        for (name, value) in [
            ("batch_oversample", self.batch_oversample),
            ("variation_oversample", self.variation_oversample),
            ("more_oversample", self.more_oversample),
            ("default_batch_size", self.default_batch_size),
        ] {
            if value == 0 {
                return Err(format!("{name} must be at least 1"));
            }
        }
        for (name, value) in [
            ("default_count", self.default_count),
            ("more_default_count", self.more_default_count),
            ("variation_default_count", self.variation_default_count),
        ] {
            if value > self.max_count {
                return Err(format!(
                    "{name} must not exceed max_count {}, got {value}",
                    self.max_count
                ));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("LOGO_BUILDER")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config
            .generator
            .validate()
            .map_err(config::ConfigError::Message)?;
        tracing::debug!(node_id = %config.node_id, "configuration resolved");
        Ok(config)
    }
}
