//! Error types for the edges of the engine.
//!
//! Recognition itself never fails: a gesture that does not happen is not an
//! error. Errors only surface while loading configuration or while resolving
//! gesture and phase names supplied by the composition layer.

use crate::gesture::{GestureKind, Phase};
use thiserror::Error;

/// Errors raised while loading a [`GestureConfig`](crate::GestureConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid YAML gesture config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The TOML document could not be parsed.
    #[error("invalid TOML gesture config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON document could not be parsed.
    #[error("invalid JSON gesture config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while resolving gesture names and phases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    /// The name does not match any supported gesture kind.
    #[error("unknown gesture: {0:?}")]
    UnknownGesture(String),

    /// The name does not match any phase.
    #[error("unknown gesture phase: {0:?}")]
    UnknownPhase(String),

    /// The phase exists but the gesture kind never emits it.
    #[error("gesture {kind} has no {phase} phase")]
    PhaseNotSupported {
        /// Gesture kind the callback was registered for
        kind: GestureKind,
        /// Rejected phase
        phase: Phase,
    },
}
