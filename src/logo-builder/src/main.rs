//! Logo Builder — generates ranked logo candidates from brand preferences.
//!
//! Command-line entry point wiring the demo asset catalog, heuristic scorer
//! and SVG renderer into the generation engine. Results are printed as JSON.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use logo_core::config::{AppConfig, LogFormat};
use logo_core::{GeneratedLogo, GenerationOptions, LogoPreferences, VariationMode};
use logo_engine::{HeuristicScorer, InMemoryAssetCatalog, LogoEngine, SvgRenderer};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "logo-builder")]
#[command(about = "Generate, extend and vary logo designs from brand preferences")]
#[command(version)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, env = "LOGO_BUILDER_CONFIG")]
    config: Option<String>,

    /// Fixed RNG seed for reproducible output (overrides config)
    #[arg(long, env = "LOGO_BUILDER__GENERATOR__SEED")]
    seed: Option<u64>,

    /// Human-readable logs instead of JSON
    #[arg(long, default_value_t = false)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a ranked batch of logos
    Generate {
        #[command(flatten)]
        preferences: PreferenceArgs,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        diversity: Option<f64>,
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Generate additional logos, skipping already-seen ids
    More {
        #[command(flatten)]
        preferences: PreferenceArgs,
        /// Comma-separated ids already shown to the user
        #[arg(long, value_delimiter = ',')]
        seen: Vec<String>,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Generate variations of a logo previously emitted as JSON
    Variations {
        /// File holding a generated logo (or an array whose first entry is used)
        #[arg(long)]
        base: PathBuf,
        /// similar | diverse
        #[arg(long, default_value = "similar")]
        mode: VariationMode,
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct PreferenceArgs {
    #[arg(long)]
    industry: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    slogan: Option<String>,
    /// Preferred visual styles, comma-separated (modern, classic, playful, ...)
    #[arg(long = "style", value_delimiter = ',')]
    styles: Vec<String>,
    /// Preferred base colors, comma-separated (Blue, Teal, ...)
    #[arg(long = "color", value_delimiter = ',')]
    colors: Vec<String>,
    /// Symbol tags, comma-separated (Innovation, Trust, ...)
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<String>,
}

impl From<PreferenceArgs> for LogoPreferences {
    fn from(args: PreferenceArgs) -> Self {
        LogoPreferences {
            industry: args.industry,
            company_name: args.name,
            slogan: args.slogan,
            preferred_styles: args.styles,
            preferred_colors: args.colors,
            symbol_tags: args.tags,
        }
    }
}

#[derive(Serialize)]
struct Output<'a> {
    command: &'a str,
    count: usize,
    logos: Vec<GeneratedLogo>,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "logo_builder=info,logo_engine=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_base(path: &Path) -> anyhow::Result<GeneratedLogo> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read base logo from {}", path.display()))?;
    parse_base(&raw).with_context(|| format!("invalid base logo in {}", path.display()))
}

/// Accepts a bare logo, an array of logos, or a prior command's output and
/// picks the first logo it holds.
fn parse_base(raw: &str) -> anyhow::Result<GeneratedLogo> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let first = match value {
        serde_json::Value::Array(mut logos) => {
            anyhow::ensure!(!logos.is_empty(), "base logo file holds an empty array");
            logos.swap_remove(0)
        }
        serde_json::Value::Object(mut object) => match object.remove("logos") {
            Some(serde_json::Value::Array(mut logos)) => {
                anyhow::ensure!(!logos.is_empty(), "base logo file holds no logos");
                logos.swap_remove(0)
            }
            Some(_) => anyhow::bail!("`logos` in base logo file is not an array"),
            None => serde_json::Value::Object(object),
        },
        _ => anyhow::bail!("base logo file must hold a JSON object or array"),
    };
    Ok(serde_json::from_value(first)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_result = AppConfig::load(cli.config.as_deref());
    let mut config = config_result.as_ref().cloned().unwrap_or_default();
    if cli.pretty_logs {
        config.log_format = LogFormat::Pretty;
    }
    init_tracing(config.log_format);

    if let Err(e) = &config_result {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    info!(
        node_id = %config.node_id,
        seed = ?config.generator.seed,
        max_pool_size = config.catalog.max_pool_size,
        "Logo Builder starting up"
    );

    let catalog = Arc::new(InMemoryAssetCatalog::with_demo_assets(config.catalog.clone()));
    let engine = LogoEngine::new(
        catalog,
        Arc::new(HeuristicScorer::new()),
        Arc::new(SvgRenderer::new()),
        config.generator.clone(),
    )?;

    let (command, logos) = match cli.command {
        Command::Generate {
            preferences,
            count,
            diversity,
            batch_size,
        } => {
            let options = GenerationOptions {
                count,
                diversity_factor: diversity,
                batch_size,
            };
            let logos = engine.generate(&preferences.into(), &options).await?;
            ("generate", logos)
        }
        Command::More {
            preferences,
            seen,
            count,
        } => {
            let seen: HashSet<String> = seen.into_iter().collect();
            let logos = engine.generate_more(&preferences.into(), &seen, count).await?;
            ("more", logos)
        }
        Command::Variations { base, mode, count } => {
            let base = read_base(&base)?;
            let logos = engine.generate_variations(&base, mode, count).await?;
            ("variations", logos)
        }
    };

    let output = Output {
        command,
        count: logos.len(),
        logos,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
