//! The asset lookup boundary. Pools come back ordered most-relevant first and
//! may be empty; emptiness is reported by the sampler, not here.

use async_trait::async_trait;

use logo_core::{ColorPalette, FontAsset, IconAsset, LogoResult};

#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Icons for an industry and a set of symbol tags.
    async fn fetch_icons(&self, industry: &str, tags: &[String]) -> LogoResult<Vec<IconAsset>>;

    /// Fonts matching any of the preferred visual styles.
    async fn fetch_fonts(&self, styles: &[String]) -> LogoResult<Vec<FontAsset>>;

    /// Palettes built around any of the preferred base colors.
    async fn fetch_palettes(&self, colors: &[String]) -> LogoResult<Vec<ColorPalette>>;

    /// Icons related to `seed`, excluding the seed itself.
    async fn fetch_related_icons(
        &self,
        seed: &IconAsset,
        diversity: f64,
    ) -> LogoResult<Vec<IconAsset>>;

    /// Fonts related to `seed`, excluding the seed itself.
    async fn fetch_related_fonts(
        &self,
        seed: &FontAsset,
        diversity: f64,
    ) -> LogoResult<Vec<FontAsset>>;

    /// Palettes related to `seed`, excluding the seed itself.
    async fn fetch_related_palettes(
        &self,
        seed: &ColorPalette,
        diversity: f64,
    ) -> LogoResult<Vec<ColorPalette>>;
}
