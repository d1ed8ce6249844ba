//! Shared configuration, error taxonomy, and domain types for the logo builder.

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use config::{AppConfig, CatalogConfig, GeneratorConfig, LogFormat};
pub use error::{Collaborator, LogoError, LogoResult, PoolKind};
pub use layout::{IconPosition, LogoLayout, TextAlign};
pub use types::{
    ColorPalette, Combination, FontAsset, GeneratedLogo, GenerationOptions, IconAsset,
    LogoPreferences, ScoredCombination, VariationMode,
};
