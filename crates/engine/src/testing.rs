//! Fixtures and collaborator doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use logo_core::{
    ColorPalette, Combination, FontAsset, IconAsset, LogoError, LogoLayout, LogoResult,
};

use crate::provider::AssetProvider;
use crate::renderer::LogoRenderer;
use crate::scorer::DesignScorer;

pub fn icon(id: &str) -> IconAsset {
    IconAsset {
        id: id.to_string(),
        name: id.to_string(),
        industry: "Technology".to_string(),
        tags: vec!["Innovation".to_string()],
        path: "M10 10h80v80H10z".to_string(),
    }
}

pub fn font(id: &str, style: &str) -> FontAsset {
    FontAsset {
        id: id.to_string(),
        family: id.to_string(),
        style: style.to_string(),
        weight: 600,
    }
}

pub fn palette(id: &str, base_color: &str) -> ColorPalette {
    ColorPalette {
        id: id.to_string(),
        name: id.to_string(),
        base_color: base_color.to_string(),
        primary: "#3B82F6".to_string(),
        secondary: "#1D4ED8".to_string(),
        accent: "#14B8A6".to_string(),
        background: "#FFFFFF".to_string(),
        text: "#0B0B10".to_string(),
    }
}

pub fn combination() -> Combination {
    Combination {
        icon: icon("icon-0"),
        font: font("font-0", "modern"),
        palette: palette("palette-0", "Blue"),
        layout: LogoLayout::IconLeft,
        company_name: "Acme".to_string(),
        slogan: Some("Build fast".to_string()),
    }
}

/// Provider serving fixed pools. Related lookups return the same pools minus
/// the seed.
#[derive(Default)]
pub struct StaticProvider {
    pub icons: Vec<IconAsset>,
    pub fonts: Vec<FontAsset>,
    pub palettes: Vec<ColorPalette>,
    pub fail: bool,
}

impl StaticProvider {
    pub fn with_pool_size(n: usize) -> Self {
        Self {
            icons: (0..n).map(|i| icon(&format!("icon-{i}"))).collect(),
            fonts: (0..n).map(|i| font(&format!("font-{i}"), "modern")).collect(),
            palettes: (0..n).map(|i| palette(&format!("palette-{i}"), "Blue")).collect(),
            fail: false,
        }
    }

    fn check(&self) -> LogoResult<()> {
        if self.fail {
            Err(LogoError::provider("catalog unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AssetProvider for StaticProvider {
    async fn fetch_icons(&self, _industry: &str, _tags: &[String]) -> LogoResult<Vec<IconAsset>> {
        self.check()?;
        Ok(self.icons.clone())
    }

    async fn fetch_fonts(&self, _styles: &[String]) -> LogoResult<Vec<FontAsset>> {
        self.check()?;
        Ok(self.fonts.clone())
    }

    async fn fetch_palettes(&self, _colors: &[String]) -> LogoResult<Vec<ColorPalette>> {
        self.check()?;
        Ok(self.palettes.clone())
    }

    async fn fetch_related_icons(&self, seed: &IconAsset, _diversity: f64) -> LogoResult<Vec<IconAsset>> {
        self.check()?;
        Ok(self.icons.iter().filter(|i| i.id != seed.id).cloned().collect())
    }

    async fn fetch_related_fonts(&self, seed: &FontAsset, _diversity: f64) -> LogoResult<Vec<FontAsset>> {
        self.check()?;
        Ok(self.fonts.iter().filter(|f| f.id != seed.id).cloned().collect())
    }

    async fn fetch_related_palettes(
        &self,
        seed: &ColorPalette,
        _diversity: f64,
    ) -> LogoResult<Vec<ColorPalette>> {
        self.check()?;
        Ok(self.palettes.iter().filter(|p| p.id != seed.id).cloned().collect())
    }
}

/// Scores every combination identically, so ranking keeps draw order.
pub struct ConstantScorer(pub f64);

impl DesignScorer for ConstantScorer {
    fn score(&self, _combination: &Combination) -> LogoResult<f64> {
        Ok(self.0)
    }
}

/// Scores by the numeric suffix of the icon id, so `icon-3` beats `icon-1`.
pub struct IconIndexScorer;

impl DesignScorer for IconIndexScorer {
    fn score(&self, combination: &Combination) -> LogoResult<f64> {
        combination
            .icon
            .id
            .rsplit('-')
            .next()
            .and_then(|n| n.parse::<f64>().ok())
            .ok_or_else(|| LogoError::scorer("icon id has no index"))
    }
}

/// Renders a short textual description and counts calls.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: AtomicUsize,
    pub fail_after: Option<usize>,
}

#[async_trait]
impl LogoRenderer for RecordingRenderer {
    async fn render(&self, combination: &Combination) -> LogoResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| call >= limit) {
            return Err(LogoError::renderer("render queue closed"));
        }
        Ok(format!(
            "{}|{}|{}|{}",
            combination.icon.id,
            combination.font.id,
            combination.palette.id,
            combination.layout.id()
        ))
    }
}
