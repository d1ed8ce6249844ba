use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::LogoLayout;

/// What the user told us during onboarding. Immutable for a generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoPreferences {
    pub industry: String,
    pub company_name: String,
    #[serde(default)]
    pub slogan: Option<String>,
    #[serde(default)]
    pub preferred_styles: Vec<String>,
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub symbol_tags: Vec<String>,
}

/// A vector symbol categorized by industry and semantic tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IconAsset {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub tags: Vec<String>,
    /// SVG path data drawn in a 100x100 box.
    pub path: String,
}

/// A typeface tagged with its style family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontAsset {
    pub id: String,
    pub family: String,
    /// Style family, e.g. `modern`, `classic`, `playful`.
    pub style: String,
    pub weight: u16,
}

/// Role-to-color bindings for a logo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorPalette {
    pub id: String,
    pub name: String,
    /// The named base color this palette was built around.
    pub base_color: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// One candidate assembly prior to scoring or rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combination {
    pub icon: IconAsset,
    pub font: FontAsset,
    pub palette: ColorPalette,
    pub layout: LogoLayout,
    pub company_name: String,
    pub slogan: Option<String>,
}

impl Combination {
    /// The icon as it appears in the design: `None` for wordmark layouts.
    pub fn displayed_icon(&self) -> Option<&IconAsset> {
        self.layout.shows_icon().then_some(&self.icon)
    }
}

/// A combination paired with its design-quality score.
#[derive(Debug, Clone)]
pub struct ScoredCombination {
    pub combination: Combination,
    pub score: f64,
}

/// A finalized, identified, rendered output unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLogo {
    pub id: String,
    pub svg: String,
    pub company_name: String,
    pub slogan: String,
    pub icon: IconAsset,
    pub font: FontAsset,
    pub palette: ColorPalette,
    pub layout: LogoLayout,
    pub score: f64,
    /// Hash of the icon/font/palette/layout ids. Identical designs share it.
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

/// Per-call overrides for a batch generation. Unset fields fall back to
/// the generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub count: Option<usize>,
    pub diversity_factor: Option<f64>,
    pub batch_size: Option<usize>,
}

impl GenerationOptions {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_diversity(mut self, diversity: f64) -> Self {
        self.diversity_factor = Some(diversity);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

/// How far variations may stray from their base logo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VariationMode {
    Similar,
    Diverse,
}

impl fmt::Display for VariationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariationMode::Similar => f.write_str("similar"),
            VariationMode::Diverse => f.write_str("diverse"),
        }
    }
}

impl FromStr for VariationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "similar" => Ok(VariationMode::Similar),
            "diverse" => Ok(VariationMode::Diverse),
            other => Err(format!("unknown variation mode '{other}'")),
        }
    }
}
