use logo_core::{Combination, LogoLayout, LogoResult};

/// Assigns a design-quality score to a combination. Implementations must be
/// pure: the same combination always scores the same.
pub trait DesignScorer: Send + Sync {
    fn score(&self, combination: &Combination) -> LogoResult<f64>;
}

/// Icon tags and industries that pair naturally with each font style.
const STYLE_AFFINITY: [(&str, &[&str]); 6] = [
    ("modern", &["Technology", "Digital", "Innovation", "Speed", "Data"]),
    ("classic", &["Finance", "Education", "Trust", "Knowledge", "Security"]),
    ("playful", &["Food & Drink", "Creative", "Creativity", "Community", "Warmth"]),
    ("elegant", &["Real Estate", "Home", "Care", "Nature"]),
    ("bold", &["Retail", "Commerce", "Growth", "Speed"]),
    ("minimal", &["Abstract", "Technology", "Digital"]),
];

/// Scores combinations on a weighted blend of:
///   - style harmony between the icon's subject and the font's style family
///   - how well the layout suits the company name and slogan
///   - how many distinct colors the palette binds to its roles
#[derive(Debug, Clone)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Create a new scorer instance.
    pub fn new() -> Self {
        Self
    }

    fn style_harmony(&self, combination: &Combination) -> f64 {
        let Some(icon) = combination.displayed_icon() else {
            // Wordmarks live or die by the font alone.
            return 0.8;
        };
        let subjects = STYLE_AFFINITY
            .iter()
            .find(|(style, _)| combination.font.style.eq_ignore_ascii_case(style))
            .map(|(_, subjects)| *subjects)
            .unwrap_or(&[]);

        let matches = std::iter::once(&icon.industry)
            .chain(icon.tags.iter())
            .filter(|s| subjects.iter().any(|subject| subject.eq_ignore_ascii_case(s)))
            .count();

        match matches {
            0 => 0.5,
            1 => 0.8,
            _ => 1.0,
        }
    }

    fn layout_fit(&self, combination: &Combination) -> f64 {
        let name_len = combination.company_name.chars().count();
        let has_slogan = combination
            .slogan
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());

        match combination.layout {
            LogoLayout::IconLeft | LogoLayout::IconRight => 0.9,
            LogoLayout::IconTop => 0.85,
            LogoLayout::TextOnly | LogoLayout::IconIntegrated => {
                if name_len <= 10 {
                    1.0
                } else {
                    0.6
                }
            }
            LogoLayout::IconOnly => 0.7,
            LogoLayout::Stacked => {
                if has_slogan {
                    1.0
                } else {
                    0.6
                }
            }
            LogoLayout::Badge => {
                if name_len <= 12 {
                    0.95
                } else {
                    0.5
                }
            }
        }
    }

    fn palette_richness(&self, combination: &Combination) -> f64 {
        let p = &combination.palette;
        let mut roles = vec![&p.primary, &p.secondary, &p.accent, &p.background, &p.text];
        roles.sort();
        roles.dedup();
        roles.len() as f64 / 5.0
    }
}

impl DesignScorer for HeuristicScorer {
    fn score(&self, combination: &Combination) -> LogoResult<f64> {
        // Weighted blend: harmony 40%, layout fit 35%, palette 25%
        Ok(self.style_harmony(combination) * 0.4
            + self.layout_fit(combination) * 0.35
            + self.palette_richness(combination) * 0.25)
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}
