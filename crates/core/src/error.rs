use std::fmt;

use thiserror::Error;

pub type LogoResult<T> = Result<T, LogoError>;

/// Which asset pool a failed draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Icons,
    Fonts,
    Palettes,
    Layouts,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolKind::Icons => "icon",
            PoolKind::Fonts => "font",
            PoolKind::Palettes => "palette",
            PoolKind::Layouts => "layout",
        };
        f.write_str(name)
    }
}

/// The external component that failed during a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    AssetProvider,
    Scorer,
    Renderer,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::AssetProvider => "asset provider",
            Collaborator::Scorer => "scorer",
            Collaborator::Renderer => "renderer",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Cannot select from an empty {pool} pool")]
    EmptyPool { pool: PoolKind },

    #[error("{collaborator} error: {message}")]
    Collaborator {
        collaborator: Collaborator,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LogoError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: Collaborator::AssetProvider,
            message: message.into(),
        }
    }

    pub fn scorer(message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: Collaborator::Scorer,
            message: message.into(),
        }
    }

    pub fn renderer(message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: Collaborator::Renderer,
            message: message.into(),
        }
    }
}
