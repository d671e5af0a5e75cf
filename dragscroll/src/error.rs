use thiserror::Error;

/// Rejected drag-scroll configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sensitivity must be a finite number above zero, got {0}")]
    InvalidSensitivity(f32),
    #[error("unknown modifier key {0:?} (expected ctrl, shift or alt)")]
    UnknownModifier(String),
}
