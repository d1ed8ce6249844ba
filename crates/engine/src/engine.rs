use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use uuid::Uuid;

use logo_core::{
    Combination, GeneratedLogo, GenerationOptions, GeneratorConfig, LogoError, LogoLayout,
    LogoPreferences, LogoResult, ScoredCombination, VariationMode,
};

use crate::combiner::{AssetPools, CombinationGenerator, CombinationRequest};
use crate::ids::{fingerprint, mint_id};
use crate::provider::AssetProvider;
use crate::renderer::LogoRenderer;
use crate::scorer::DesignScorer;

const BATCH_PREFIX: &str = "logo";
const VARIATION_PREFIX: &str = "var";

/// Mints the identifier stamped on each generated logo from its prefix.
pub type IdMinter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Generation orchestrator: fetch pools, draw combinations, score, rank,
/// truncate, render, and stamp identities.
///
/// Every call is all-or-nothing. A provider, scorer, or renderer failure, or
/// an empty pool, aborts the call without returning partial results.
#[derive(Clone)]
pub struct LogoEngine {
    provider: Arc<dyn AssetProvider>,
    scorer: Arc<dyn DesignScorer>,
    renderer: Arc<dyn LogoRenderer>,
    generator: CombinationGenerator,
    config: GeneratorConfig,
    rng: Arc<Mutex<StdRng>>,
    mint: IdMinter,
}

impl LogoEngine {
    /// Create an engine around its three collaborators.
    pub fn new(
        provider: Arc<dyn AssetProvider>,
        scorer: Arc<dyn DesignScorer>,
        renderer: Arc<dyn LogoRenderer>,
        config: GeneratorConfig,
    ) -> LogoResult<Self> {
        config.validate().map_err(LogoError::Config)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            provider,
            scorer,
            renderer,
            generator: CombinationGenerator::new(),
            config,
            rng: Arc::new(Mutex::new(rng)),
            mint: Arc::new(mint_id),
        })
    }

    /// Replace the identifier source. Minted ids must stay unique for the
    /// lifetime of the engine.
    pub fn with_id_minter<F>(mut self, minter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.mint = Arc::new(minter);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a ranked batch of logos for the given preferences.
    ///
    /// Draws `count * batch_oversample` combinations, keeps the `count` best
    /// and returns them in descending score order.
    pub async fn generate(
        &self,
        preferences: &LogoPreferences,
        options: &GenerationOptions,
    ) -> LogoResult<Vec<GeneratedLogo>> {
        let count = self.check_count(options.count.unwrap_or(self.config.default_count))?;
        let diversity = check_diversity(
            options
                .diversity_factor
                .unwrap_or(self.config.default_diversity),
        )?;
        let batch_size = check_batch_size(options.batch_size.unwrap_or(self.config.default_batch_size))?;

        self.run_batch(preferences, count, diversity, batch_size).await
    }

    async fn run_batch(
        &self,
        preferences: &LogoPreferences,
        count: usize,
        diversity: f64,
        batch_size: usize,
    ) -> LogoResult<Vec<GeneratedLogo>> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let target_count = oversampled(count, self.config.batch_oversample)?;

        info!(
            %run_id,
            industry = %preferences.industry,
            count,
            diversity,
            "starting logo generation"
        );

        let (icons, fonts, palettes) = tokio::try_join!(
            self.provider
                .fetch_icons(&preferences.industry, &preferences.symbol_tags),
            self.provider.fetch_fonts(&preferences.preferred_styles),
            self.provider.fetch_palettes(&preferences.preferred_colors),
        )?;
        let pools = AssetPools {
            icons,
            fonts,
            palettes,
        };

        let combinations = self.draw(&CombinationRequest {
            pools: &pools,
            layouts: &LogoLayout::ALL,
            company_name: &preferences.company_name,
            slogan: preferences.slogan.as_deref(),
            diversity,
            target_count,
        })?;
        let top = self.rank(combinations, count)?;
        let logos = self.finalize(top, BATCH_PREFIX, batch_size).await?;

        info!(
            %run_id,
            returned = logos.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "logo generation complete"
        );
        Ok(logos)
    }

    /// Generate further logos for an infinite-scroll feed.
    ///
    /// Runs a batch of `count * more_oversample` at elevated diversity and drops
    /// any logo whose id is in `seen_ids`, then keeps at most `count`. Ids come
    /// from the engine's minter, so a re-drawn design under a new id still passes.
    pub async fn generate_more(
        &self,
        preferences: &LogoPreferences,
        seen_ids: &HashSet<String>,
        count: Option<usize>,
    ) -> LogoResult<Vec<GeneratedLogo>> {
        let count = self.check_count(count.unwrap_or(self.config.more_default_count))?;
        let batch_count = oversampled(count, self.config.more_oversample)?;

        let logos = self
            .run_batch(
                preferences,
                batch_count,
                self.config.more_diversity,
                self.config.default_batch_size,
            )
            .await?;
        let fresh: Vec<GeneratedLogo> = logos
            .into_iter()
            .filter(|logo| !seen_ids.contains(&logo.id))
            .take(count)
            .collect();

        debug!(
            seen = seen_ids.len(),
            returned = fresh.len(),
            "generated additional logos"
        );
        Ok(fresh)
    }

    /// Generate variations around an existing logo.
    ///
    /// The base logo's own icon, font and palette head each pool, so `similar`
    /// mode (low diversity) keeps returning to them while `diverse` mode
    /// samples the related assets uniformly.
    pub async fn generate_variations(
        &self,
        base: &GeneratedLogo,
        mode: VariationMode,
        count: Option<usize>,
    ) -> LogoResult<Vec<GeneratedLogo>> {
        let run_id = Uuid::new_v4();
        let count = self.check_count(count.unwrap_or(self.config.variation_default_count))?;
        let target_count = oversampled(count, self.config.variation_oversample)?;
        let diversity = match mode {
            VariationMode::Similar => self.config.similar_diversity,
            VariationMode::Diverse => self.config.diverse_diversity,
        };

        info!(%run_id, base_id = %base.id, %mode, count, "starting variation generation");

        let (related_icons, related_fonts, related_palettes) = tokio::try_join!(
            self.provider.fetch_related_icons(&base.icon, diversity),
            self.provider.fetch_related_fonts(&base.font, diversity),
            self.provider.fetch_related_palettes(&base.palette, diversity),
        )?;
        let pools = AssetPools {
            icons: prepend(base.icon.clone(), related_icons),
            fonts: prepend(base.font.clone(), related_fonts),
            palettes: prepend(base.palette.clone(), related_palettes),
        };

        let slogan = Some(base.slogan.as_str()).filter(|s| !s.is_empty());
        let combinations = self.draw(&CombinationRequest {
            pools: &pools,
            layouts: &LogoLayout::ALL,
            company_name: &base.company_name,
            slogan,
            diversity,
            target_count,
        })?;
        let top = self.rank(combinations, count)?;
        let logos = self
            .finalize(top, VARIATION_PREFIX, self.config.default_batch_size)
            .await?;

        info!(%run_id, returned = logos.len(), "variation generation complete");
        Ok(logos)
    }

    /// Sample combinations while holding the RNG. No await happens under the lock.
    fn draw(&self, request: &CombinationRequest<'_>) -> LogoResult<Vec<Combination>> {
        let mut rng = self.rng.lock();
        self.generator.generate(request, &mut *rng)
    }

    /// Score every combination, sort descending (stable, so ties keep draw
    /// order) and keep the first `count`.
    fn rank(&self, combinations: Vec<Combination>, count: usize) -> LogoResult<Vec<ScoredCombination>> {
        let mut scored = combinations
            .into_iter()
            .map(|combination| {
                let score = self.scorer.score(&combination)?;
                if !score.is_finite() {
                    return Err(LogoError::scorer(format!(
                        "non-finite score {score} for icon {}",
                        combination.icon.id
                    )));
                }
                Ok(ScoredCombination { combination, score })
            })
            .collect::<LogoResult<Vec<_>>>()?;

        let total = scored.len();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(count);

        debug!(scored = total, kept = scored.len(), "ranked combinations");
        Ok(scored)
    }

    fn check_count(&self, count: usize) -> LogoResult<usize> {
        if count > self.config.max_count {
            return Err(LogoError::InvalidInput(format!(
                "count {count} exceeds the maximum of {}",
                self.config.max_count
            )));
        }
        Ok(count)
    }

    /// Render and stamp ranked combinations, `batch_size` at a time.
    async fn finalize(
        &self,
        ranked: Vec<ScoredCombination>,
        prefix: &str,
        batch_size: usize,
    ) -> LogoResult<Vec<GeneratedLogo>> {
        let mut logos = Vec::with_capacity(ranked.len());

        for (batch, chunk) in ranked.chunks(batch_size).enumerate() {
            for scored in chunk {
                let svg = self.renderer.render(&scored.combination).await?;
                logos.push(stamp((self.mint)(prefix), svg, scored));
            }
            debug!(batch, rendered = logos.len(), "rendered logo batch");
            tokio::task::yield_now().await;
        }

        Ok(logos)
    }
}

fn stamp(id: String, svg: String, scored: &ScoredCombination) -> GeneratedLogo {
    let c = &scored.combination;
    GeneratedLogo {
        id,
        svg,
        company_name: c.company_name.clone(),
        slogan: c.slogan.clone().unwrap_or_default(),
        icon: c.icon.clone(),
        font: c.font.clone(),
        palette: c.palette.clone(),
        layout: c.layout,
        score: scored.score,
        fingerprint: fingerprint(c),
        created_at: Utc::now(),
    }
}

fn prepend<T>(head: T, tail: Vec<T>) -> Vec<T> {
    let mut pool = Vec::with_capacity(tail.len() + 1);
    pool.push(head);
    pool.extend(tail);
    pool
}

fn oversampled(count: usize, factor: usize) -> LogoResult<usize> {
    count.checked_mul(factor).ok_or_else(|| {
        LogoError::InvalidInput(format!("count {count} overflows when oversampled {factor}x"))
    })
}

fn check_diversity(diversity: f64) -> LogoResult<f64> {
    if (0.0..=1.0).contains(&diversity) {
        Ok(diversity)
    } else {
        Err(LogoError::InvalidInput(format!(
            "diversity factor must be within [0, 1], got {diversity}"
        )))
    }
}

fn check_batch_size(batch_size: usize) -> LogoResult<usize> {
    if batch_size == 0 {
        Err(LogoError::InvalidInput("batch size must be at least 1".to_string()))
    } else {
        Ok(batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ConstantScorer, IconIndexScorer, RecordingRenderer, StaticProvider};
    use logo_core::{Collaborator, PoolKind};
    use std::sync::atomic::Ordering;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn engine_with(
        provider: StaticProvider,
        scorer: Arc<dyn DesignScorer>,
        renderer: Arc<RecordingRenderer>,
    ) -> LogoEngine {
        LogoEngine::new(Arc::new(provider), scorer, renderer, seeded(42)).unwrap()
    }

    fn preferences() -> LogoPreferences {
        LogoPreferences {
            industry: "Technology".to_string(),
            company_name: "Acme".to_string(),
            slogan: Some("Build fast".to_string()),
            preferred_styles: vec!["modern".to_string()],
            preferred_colors: vec!["Blue".to_string()],
            symbol_tags: vec!["Innovation".to_string()],
        }
    }

    #[tokio::test]
    async fn test_generate_returns_ranked_unique_logos() {
        let renderer = Arc::new(RecordingRenderer::default());
        let engine = engine_with(
            StaticProvider::with_pool_size(6),
            Arc::new(IconIndexScorer),
            renderer.clone(),
        );

        let logos = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(10))
            .await
            .unwrap();

        assert_eq!(logos.len(), 10);
        assert!(logos.windows(2).all(|w| w[0].score >= w[1].score));
        let ids: HashSet<_> = logos.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), 10);
        assert!(logos.iter().all(|l| l.id.starts_with("logo-")));
        // Only the kept combinations are rendered.
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_logo_fields_match_their_combination() {
        let renderer = Arc::new(RecordingRenderer::default());
        let engine = engine_with(
            StaticProvider::with_pool_size(3),
            Arc::new(ConstantScorer(0.5)),
            renderer,
        );

        let logos = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(8))
            .await
            .unwrap();

        for logo in &logos {
            // The recording renderer echoes the ids it was handed.
            let expected = format!(
                "{}|{}|{}|{}",
                logo.icon.id,
                logo.font.id,
                logo.palette.id,
                logo.layout.id()
            );
            assert_eq!(logo.svg, expected);
            assert_eq!(logo.company_name, "Acme");
            assert_eq!(logo.slogan, "Build fast");
            assert_eq!(logo.score, 0.5);
            assert_eq!(logo.fingerprint.len(), 64);
        }
    }

    #[tokio::test]
    async fn test_missing_slogan_becomes_empty_string() {
        let engine = engine_with(
            StaticProvider::with_pool_size(2),
            Arc::new(ConstantScorer(1.0)),
            Arc::new(RecordingRenderer::default()),
        );
        let mut prefs = preferences();
        prefs.slogan = None;
        let logos = engine
            .generate(&prefs, &GenerationOptions::default().with_count(3))
            .await
            .unwrap();
        assert!(logos.iter().all(|l| l.slogan.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_pool_fails_whole_call() {
        let mut provider = StaticProvider::with_pool_size(3);
        provider.palettes.clear();
        let renderer = Arc::new(RecordingRenderer::default());
        let engine = engine_with(provider, Arc::new(ConstantScorer(1.0)), renderer.clone());

        let err = engine
            .generate(&preferences(), &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LogoError::EmptyPool { pool: PoolKind::Palettes }));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut provider = StaticProvider::with_pool_size(3);
        provider.fail = true;
        let engine = engine_with(
            provider,
            Arc::new(ConstantScorer(1.0)),
            Arc::new(RecordingRenderer::default()),
        );
        let err = engine
            .generate(&preferences(), &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogoError::Collaborator {
                collaborator: Collaborator::AssetProvider,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_non_finite_score_is_rejected() {
        let engine = engine_with(
            StaticProvider::with_pool_size(3),
            Arc::new(ConstantScorer(f64::NAN)),
            Arc::new(RecordingRenderer::default()),
        );
        let err = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogoError::Collaborator {
                collaborator: Collaborator::Scorer,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_render_failure_returns_no_partial_result() {
        let renderer = Arc::new(RecordingRenderer {
            fail_after: Some(4),
            ..Default::default()
        });
        let engine = engine_with(
            StaticProvider::with_pool_size(3),
            Arc::new(ConstantScorer(1.0)),
            renderer,
        );
        let result = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(12))
            .await;
        assert!(matches!(
            result,
            Err(LogoError::Collaborator {
                collaborator: Collaborator::Renderer,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let engine = engine_with(
            StaticProvider::with_pool_size(3),
            Arc::new(ConstantScorer(1.0)),
            Arc::new(RecordingRenderer::default()),
        );
        for options in [
            GenerationOptions::default().with_diversity(1.2),
            GenerationOptions::default().with_diversity(f64::NAN),
            GenerationOptions::default().with_batch_size(0),
        ] {
            let err = engine.generate(&preferences(), &options).await.unwrap_err();
            assert!(matches!(err, LogoError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_ties_keep_draw_order() {
        // With a constant score, ranking must not reorder the draws. The same
        // seed drawn directly reproduces the kept prefix.
        let engine = engine_with(
            StaticProvider::with_pool_size(4),
            Arc::new(ConstantScorer(0.3)),
            Arc::new(RecordingRenderer::default()),
        );
        let logos = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(5))
            .await
            .unwrap();

        let provider = StaticProvider::with_pool_size(4);
        let pools = AssetPools {
            icons: provider.icons.clone(),
            fonts: provider.fonts.clone(),
            palettes: provider.palettes.clone(),
        };
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = CombinationGenerator::new()
            .generate(
                &CombinationRequest {
                    pools: &pools,
                    layouts: &LogoLayout::ALL,
                    company_name: "Acme",
                    slogan: Some("Build fast"),
                    diversity: 0.5,
                    target_count: 15,
                },
                &mut rng,
            )
            .unwrap();

        for (logo, combo) in logos.iter().zip(&drawn) {
            assert_eq!(logo.icon, combo.icon);
            assert_eq!(logo.font, combo.font);
            assert_eq!(logo.palette, combo.palette);
            assert_eq!(logo.layout, combo.layout);
        }
    }

    #[tokio::test]
    async fn test_generate_more_respects_exclusions() {
        let engine = engine_with(
            StaticProvider::with_pool_size(5),
            Arc::new(IconIndexScorer),
            Arc::new(RecordingRenderer::default()),
        );
        let first = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(12))
            .await
            .unwrap();
        let seen: HashSet<String> = first.iter().map(|l| l.id.clone()).collect();

        let more = engine.generate_more(&preferences(), &seen, None).await.unwrap();
        assert_eq!(more.len(), 12);
        assert!(more.iter().all(|l| !seen.contains(&l.id)));
        assert!(more.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_generate_more_drops_seen_ids_and_truncates() {
        // A counting minter makes the next call's ids predictable: asking for
        // 5 mints logo-0 through logo-9 from a 10-logo batch.
        let next = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&next);
        let engine = engine_with(
            StaticProvider::with_pool_size(5),
            Arc::new(IconIndexScorer),
            Arc::new(RecordingRenderer::default()),
        )
        .with_id_minter(move |prefix| {
            format!("{prefix}-{}", counter.fetch_add(1, Ordering::SeqCst))
        });

        let seen: HashSet<String> = (0..7).map(|i| format!("logo-{i}")).collect();
        let more = engine
            .generate_more(&preferences(), &seen, Some(5))
            .await
            .unwrap();
        let ids: Vec<&str> = more.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["logo-7", "logo-8", "logo-9"]);

        // Only one collision: the survivors still exceed count and are cut back.
        next.store(0, Ordering::SeqCst);
        let seen: HashSet<String> = ["logo-1".to_string()].into();
        let more = engine
            .generate_more(&preferences(), &seen, Some(5))
            .await
            .unwrap();
        let ids: Vec<&str> = more.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["logo-0", "logo-2", "logo-3", "logo-4", "logo-5"]);
        assert!(more.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_oversized_counts_are_rejected() {
        let renderer = Arc::new(RecordingRenderer::default());
        let engine = engine_with(
            StaticProvider::with_pool_size(3),
            Arc::new(ConstantScorer(1.0)),
            Arc::clone(&renderer),
        );
        let huge = usize::MAX / 2;

        let err = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(huge))
            .await
            .unwrap_err();
        assert!(matches!(err, LogoError::InvalidInput(_)));

        let err = engine
            .generate_more(&preferences(), &HashSet::new(), Some(huge))
            .await
            .unwrap_err();
        assert!(matches!(err, LogoError::InvalidInput(_)));

        let base = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(1))
            .await
            .unwrap()
            .remove(0);
        let err = engine
            .generate_variations(&base, VariationMode::Similar, Some(huge))
            .await
            .unwrap_err();
        assert!(matches!(err, LogoError::InvalidInput(_)));

        // One past the configured ceiling is rejected as well.
        let over = engine.config().max_count + 1;
        let err = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(over))
            .await
            .unwrap_err();
        assert!(matches!(err, LogoError::InvalidInput(_)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_oversampling_overflow_is_invalid_input() {
        assert_eq!(oversampled(4, 3).unwrap(), 12);
        assert!(matches!(
            oversampled(usize::MAX / 2, 3),
            Err(LogoError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_variations_use_base_text_and_prefix() {
        let engine = engine_with(
            StaticProvider::with_pool_size(5),
            Arc::new(ConstantScorer(1.0)),
            Arc::new(RecordingRenderer::default()),
        );
        let base = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(1))
            .await
            .unwrap()
            .remove(0);

        for mode in [VariationMode::Similar, VariationMode::Diverse] {
            let variations = engine.generate_variations(&base, mode, None).await.unwrap();
            assert_eq!(variations.len(), 8);
            for v in &variations {
                assert!(v.id.starts_with("var-"));
                assert_ne!(v.id, base.id);
                assert_eq!(v.company_name, base.company_name);
                assert_eq!(v.slogan, base.slogan);
            }
        }
    }

    #[tokio::test]
    async fn test_zero_count_is_an_empty_success() {
        let engine = engine_with(
            StaticProvider::with_pool_size(2),
            Arc::new(ConstantScorer(1.0)),
            Arc::new(RecordingRenderer::default()),
        );
        let logos = engine
            .generate(&preferences(), &GenerationOptions::default().with_count(0))
            .await
            .unwrap();
        assert!(logos.is_empty());
    }
}
