//! Construction-time errors for the lane simulation.
//!
//! Only invariant violations end up here. Cooldowns that are not ready,
//! failed rolls, unaffordable deployments and missing targets are ordinary
//! outcomes and are reported as `false`/`None` instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A numeric stat was NaN, infinite, or outside its allowed range.
    #[error("{owner}: {stat} must be {requirement}, got {value}")]
    InvalidStat {
        owner: String,
        stat: &'static str,
        requirement: &'static str,
        value: f32,
    },

    #[error("skill '{skill}': activation chance must be within 0.0..=1.0, got {chance}")]
    InvalidChance { skill: String, chance: f32 },

    #[error("invalid lane configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Rejects NaN, infinities and negative values.
pub(crate) fn check_non_negative(owner: &str, stat: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidStat {
            owner: owner.to_string(),
            stat,
            requirement: "finite and non-negative",
            value,
        })
    }
}

/// Rejects NaN, infinities, zero and negative values.
pub(crate) fn check_positive(owner: &str, stat: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidStat {
            owner: owner.to_string(),
            stat,
            requirement: "finite and positive",
            value,
        })
    }
}
