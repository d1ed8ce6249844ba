use rand::Rng;
use tracing::debug;

use logo_core::{
    ColorPalette, Combination, FontAsset, IconAsset, LogoError, LogoLayout, LogoResult, PoolKind,
};

use crate::sampler::sample;

/// Asset pools a generation run draws from, each ordered most-relevant first.
#[derive(Debug, Clone, Default)]
pub struct AssetPools {
    pub icons: Vec<IconAsset>,
    pub fonts: Vec<FontAsset>,
    pub palettes: Vec<ColorPalette>,
}

/// Everything the generator needs for one run.
#[derive(Debug, Clone, Copy)]
pub struct CombinationRequest<'a> {
    pub pools: &'a AssetPools,
    pub layouts: &'a [LogoLayout],
    pub company_name: &'a str,
    pub slogan: Option<&'a str>,
    pub diversity: f64,
    pub target_count: usize,
}

/// Draws icon/font/palette/layout tuples from asset pools.
///
/// Each axis is sampled independently with replacement, so the output may
/// contain repeats; ranking downstream decides which survive.
#[derive(Debug, Clone)]
pub struct CombinationGenerator;

impl CombinationGenerator {
    /// Create a new generator instance.
    pub fn new() -> Self {
        Self
    }

    /// Produce exactly `request.target_count` combinations.
    pub fn generate<R>(&self, request: &CombinationRequest<'_>, rng: &mut R) -> LogoResult<Vec<Combination>>
    where
        R: Rng + ?Sized,
    {
        let diversity = request.diversity;
        let mut combinations = Vec::with_capacity(request.target_count);

        for _ in 0..request.target_count {
            let icon = sample(&request.pools.icons, diversity, rng)
                .map_err(|_| LogoError::EmptyPool { pool: PoolKind::Icons })?;
            let font = sample(&request.pools.fonts, diversity, rng)
                .map_err(|_| LogoError::EmptyPool { pool: PoolKind::Fonts })?;
            let palette = sample(&request.pools.palettes, diversity, rng)
                .map_err(|_| LogoError::EmptyPool { pool: PoolKind::Palettes })?;
            let layout = sample(request.layouts, diversity, rng)
                .map_err(|_| LogoError::EmptyPool { pool: PoolKind::Layouts })?;

            combinations.push(Combination {
                icon: icon.clone(),
                font: font.clone(),
                palette: palette.clone(),
                layout: *layout,
                company_name: request.company_name.to_string(),
                slogan: request.slogan.map(str::to_string),
            });
        }

        debug!(
            count = combinations.len(),
            icons = request.pools.icons.len(),
            fonts = request.pools.fonts.len(),
            palettes = request.pools.palettes.len(),
            diversity,
            "generated logo combinations"
        );
        Ok(combinations)
    }
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new()
    }
}
