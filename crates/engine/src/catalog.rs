//! In-memory asset catalog: a reference [`AssetProvider`] backed by [`DashMap`].
//!
//! Pools are ranked by how many preference criteria an asset matches, ties
//! broken by id so that identical requests return identical orderings. When a
//! request carries no criteria at all the whole catalog is returned.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use logo_core::{CatalogConfig, ColorPalette, FontAsset, IconAsset, LogoResult};

use crate::provider::AssetProvider;

/// Above this diversity, related-asset lookups also return assets that share
/// nothing with the seed, after the related ones.
const WIDEN_RELATED_ABOVE: f64 = 0.5;

/// Thread-safe asset catalog keyed by asset id.
pub struct InMemoryAssetCatalog {
    icons: DashMap<String, IconAsset>,
    fonts: DashMap<String, FontAsset>,
    palettes: DashMap<String, ColorPalette>,
    config: CatalogConfig,
}

impl InMemoryAssetCatalog {
    /// Create an empty catalog.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            icons: DashMap::new(),
            fonts: DashMap::new(),
            palettes: DashMap::new(),
            config,
        }
    }

    /// Create a catalog pre-loaded with the bundled starter assets.
    pub fn with_demo_assets(config: CatalogConfig) -> Self {
        let catalog = Self::new(config);
        demo_icons().into_iter().for_each(|i| catalog.insert_icon(i));
        demo_fonts().into_iter().for_each(|f| catalog.insert_font(f));
        demo_palettes().into_iter().for_each(|p| catalog.insert_palette(p));
        debug!(
            icons = catalog.icons.len(),
            fonts = catalog.fonts.len(),
            palettes = catalog.palettes.len(),
            "seeded demo asset catalog"
        );
        catalog
    }

    pub fn insert_icon(&self, icon: IconAsset) {
        self.icons.insert(icon.id.clone(), icon);
    }

    pub fn insert_font(&self, font: FontAsset) {
        self.fonts.insert(font.id.clone(), font);
    }

    pub fn insert_palette(&self, palette: ColorPalette) {
        self.palettes.insert(palette.id.clone(), palette);
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn palette_count(&self) -> usize {
        self.palettes.len()
    }
}

impl Default for InMemoryAssetCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

/// Order `assets` by descending relevance, then id. Zero-relevance assets are
/// dropped unless `keep_unmatched` is set.
fn rank<T, F>(
    assets: &DashMap<String, T>,
    relevance: F,
    keep_unmatched: bool,
    limit: usize,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> usize,
{
    let mut scored: Vec<(usize, String, T)> = assets
        .iter()
        .map(|entry| (relevance(entry.value()), entry.key().clone(), entry.value().clone()))
        .filter(|(score, _, _)| keep_unmatched || *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.into_iter().take(limit).map(|(_, _, asset)| asset).collect()
}

fn contains_ci(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| h.eq_ignore_ascii_case(needle))
}

fn shared_tags(a: &[String], b: &[String]) -> usize {
    a.iter().filter(|t| contains_ci(b, t)).count()
}

#[async_trait]
impl AssetProvider for InMemoryAssetCatalog {
    async fn fetch_icons(&self, industry: &str, tags: &[String]) -> LogoResult<Vec<IconAsset>> {
        let unconstrained = industry.is_empty() && tags.is_empty();
        let pool = rank(
            &self.icons,
            |icon| {
                let industry_match = usize::from(icon.industry.eq_ignore_ascii_case(industry));
                industry_match * 2 + shared_tags(&icon.tags, tags)
            },
            unconstrained,
            self.config.max_pool_size,
        );
        debug!(industry, tags = ?tags, size = pool.len(), "resolved icon pool");
        Ok(pool)
    }

    async fn fetch_fonts(&self, styles: &[String]) -> LogoResult<Vec<FontAsset>> {
        let pool = rank(
            &self.fonts,
            |font| usize::from(contains_ci(styles, &font.style)),
            styles.is_empty(),
            self.config.max_pool_size,
        );
        debug!(styles = ?styles, size = pool.len(), "resolved font pool");
        Ok(pool)
    }

    async fn fetch_palettes(&self, colors: &[String]) -> LogoResult<Vec<ColorPalette>> {
        let pool = rank(
            &self.palettes,
            |palette| usize::from(contains_ci(colors, &palette.base_color)),
            colors.is_empty(),
            self.config.max_pool_size,
        );
        debug!(colors = ?colors, size = pool.len(), "resolved palette pool");
        Ok(pool)
    }

    async fn fetch_related_icons(
        &self,
        seed: &IconAsset,
        diversity: f64,
    ) -> LogoResult<Vec<IconAsset>> {
        Ok(rank(
            &self.icons,
            |icon| {
                if icon.id == seed.id {
                    return 0;
                }
                let industry_match = usize::from(icon.industry.eq_ignore_ascii_case(&seed.industry));
                industry_match * 2 + shared_tags(&icon.tags, &seed.tags)
            },
            diversity > WIDEN_RELATED_ABOVE,
            self.config.related_pool_size + 1,
        )
        .into_iter()
        .filter(|icon| icon.id != seed.id)
        .take(self.config.related_pool_size)
        .collect())
    }

    async fn fetch_related_fonts(
        &self,
        seed: &FontAsset,
        diversity: f64,
    ) -> LogoResult<Vec<FontAsset>> {
        Ok(rank(
            &self.fonts,
            |font| {
                if font.id == seed.id {
                    return 0;
                }
                usize::from(font.style.eq_ignore_ascii_case(&seed.style)) * 2
                    + usize::from(font.family == seed.family)
            },
            diversity > WIDEN_RELATED_ABOVE,
            self.config.related_pool_size + 1,
        )
        .into_iter()
        .filter(|font| font.id != seed.id)
        .take(self.config.related_pool_size)
        .collect())
    }

    async fn fetch_related_palettes(
        &self,
        seed: &ColorPalette,
        diversity: f64,
    ) -> LogoResult<Vec<ColorPalette>> {
        Ok(rank(
            &self.palettes,
            |palette| {
                if palette.id == seed.id {
                    return 0;
                }
                usize::from(palette.base_color.eq_ignore_ascii_case(&seed.base_color)) * 2
                    + usize::from(palette.background == seed.background)
            },
            diversity > WIDEN_RELATED_ABOVE,
            self.config.related_pool_size + 1,
        )
        .into_iter()
        .filter(|palette| palette.id != seed.id)
        .take(self.config.related_pool_size)
        .collect())
    }
}

// ─── Starter assets ──────────────────────────────────────────────────────

fn demo_icons() -> Vec<IconAsset> {
    let specs: [(&str, &str, &str, &[&str], &str); 16] = [
        ("icon-circuit", "Circuit", "Technology", &["Innovation", "Digital"], "M20 50h20l10-20 10 40 10-20h10"),
        ("icon-bolt", "Bolt", "Technology", &["Speed", "Innovation"], "M55 5L25 55h20l-5 40 35-55H55z"),
        ("icon-bulb", "Light Bulb", "Technology", &["Innovation", "Creativity"], "M50 10a28 28 0 0 0-16 51v14h32V61a28 28 0 0 0-16-51zM38 82h24v8H38z"),
        ("icon-hexagon", "Hexagon", "Technology", &["Abstract", "Digital"], "M50 5l39 22.5v45L50 95 11 72.5v-45z"),
        ("icon-rocket", "Rocket", "Technology", &["Growth", "Speed"], "M50 5c15 15 20 35 15 55H35C30 40 35 20 50 5zM35 60l-12 15h14zm30 0l12 15H63zM42 65h16l-8 25z"),
        ("icon-shield", "Shield", "Finance", &["Trust", "Security"], "M50 5l38 14v26c0 25-17 42-38 50-21-8-38-25-38-50V19z"),
        ("icon-chart", "Bar Chart", "Finance", &["Growth", "Data"], "M10 90h80v-6H10zM18 80V55h12v25zm22 0V35h12v45zm22 0V15h12v65z"),
        ("icon-leaf", "Leaf", "Health", &["Nature", "Growth"], "M85 15C40 15 15 40 15 85c10-20 30-35 55-40-20 10-35 25-40 40C65 85 85 60 85 15z"),
        ("icon-heart", "Heart", "Health", &["Care", "Community"], "M50 88L15 53a20 20 0 0 1 35-28 20 20 0 0 1 35 28z"),
        ("icon-cross", "Medical Cross", "Health", &["Care", "Trust"], "M38 10h24v28h28v24H62v28H38V62H10V38h28z"),
        ("icon-book", "Open Book", "Education", &["Knowledge", "Trust"], "M10 20h35c3 0 5 2 5 5v60c0-3-2-5-5-5H10zm80 0H55c-3 0-5 2-5 5v60c0-3 2-5 5-5h35z"),
        ("icon-house", "House", "Real Estate", &["Home", "Trust"], "M50 10L8 48h12v42h24V65h12v25h24V48h12z"),
        ("icon-cup", "Cup", "Food & Drink", &["Warmth", "Community"], "M20 30h50v30a25 25 0 0 1-50 0zm50 8h8a10 10 0 0 1 0 20h-8"),
        ("icon-bag", "Shopping Bag", "Retail", &["Commerce", "Growth"], "M20 35h60l-5 55H25zm15 0a15 15 0 0 1 30 0"),
        ("icon-star", "Star", "Creative", &["Abstract", "Creativity"], "M50 5l13 30 32 3-24 21 7 32-28-17-28 17 7-32L5 38l32-3z"),
        ("icon-ring", "Ring", "Creative", &["Abstract", "Community"], "M50 10a40 40 0 1 0 .1 0zm0 15a25 25 0 1 1-.1 0z"),
    ];

    specs
        .into_iter()
        .map(|(id, name, industry, tags, path)| IconAsset {
            id: id.to_string(),
            name: name.to_string(),
            industry: industry.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            path: path.to_string(),
        })
        .collect()
}

fn demo_fonts() -> Vec<FontAsset> {
    [
        ("Inter", "modern", 600),
        ("Space Grotesk", "modern", 700),
        ("Playfair Display", "classic", 700),
        ("Libre Baskerville", "classic", 400),
        ("Fredoka", "playful", 600),
        ("Baloo 2", "playful", 700),
        ("Cormorant Garamond", "elegant", 500),
        ("Cinzel", "elegant", 600),
        ("Anton", "bold", 400),
        ("Archivo Black", "bold", 400),
        ("Telegraf", "minimal", 500),
        ("Public Sans", "minimal", 400),
    ]
    .into_iter()
    .map(|(family, style, weight)| FontAsset {
        id: format!("font-{}", family.to_lowercase().replace(' ', "-")),
        family: family.to_string(),
        style: style.to_string(),
        weight,
    })
    .collect()
}

fn demo_palettes() -> Vec<ColorPalette> {
    // Base colors offered during onboarding, with their gradient stops and an
    // analogous accent.
    let colors = [
        ("Blue", "#3B82F6", "#1D4ED8", "#14B8A6"),
        ("Purple", "#8B5CF6", "#6D28D9", "#EC4899"),
        ("Pink", "#EC4899", "#BE185D", "#F8B4D9"),
        ("Red", "#EF4444", "#B91C1C", "#F97316"),
        ("Orange", "#F97316", "#C2410C", "#EAB308"),
        ("Yellow", "#EAB308", "#A16207", "#22C55E"),
        ("Green", "#22C55E", "#15803D", "#14B8A6"),
        ("Teal", "#14B8A6", "#0F766E", "#3B82F6"),
        ("Greyscale", "#6B7280", "#374151", "#C9CCD3"),
    ];

    let mut palettes = Vec::with_capacity(colors.len() * 2);
    for (name, primary, secondary, accent) in colors {
        for (variant, background, text) in [("light", "#FFFFFF", "#0B0B10"), ("dark", "#0B0B10", "#FFFCF7")] {
            palettes.push(ColorPalette {
                id: format!("palette-{}-{variant}", name.to_lowercase()),
                name: format!("{name} {variant}"),
                base_color: name.to_string(),
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                accent: accent.to_string(),
                background: background.to_string(),
                text: text.to_string(),
            });
        }
    }
    palettes
}
