//! Logo generation engine — draws icon/font/palette/layout combinations from
//! relevance-ordered asset pools, scores and ranks them, and renders the best.

pub mod catalog;
pub mod combiner;
pub mod engine;
pub mod ids;
pub mod provider;
pub mod renderer;
pub mod sampler;
pub mod scorer;

#[cfg(test)]
mod testing;

pub use catalog::InMemoryAssetCatalog;
pub use combiner::{AssetPools, CombinationGenerator, CombinationRequest};
pub use engine::{IdMinter, LogoEngine};
pub use provider::AssetProvider;
pub use renderer::{LogoRenderer, SvgRenderer};
pub use sampler::{sample, EmptyPoolError};
pub use scorer::{DesignScorer, HeuristicScorer};
