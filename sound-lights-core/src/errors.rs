use thiserror::Error;

use crate::lights::PatternId;

/// Everything that can go wrong here is a setup mistake. All of these are
/// raised before the frame loop starts; the per-frame paths stay infallible.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("gain {0} is outside (0, 1)")]
    GainOutOfRange(f32),
    #[error("sensitivity span must be positive")]
    NonPositiveSpan,
    #[error("initial level {0} is above max level {1}")]
    InitialLevelOutOfRange(u8, u8),
    #[error("thresholds must strictly increase: boundary {0}")]
    NonMonotonicThresholds(usize),
    #[error("hysteresis must be non-negative: boundary {0}")]
    NegativeHysteresis(usize),
    #[error("hysteresis bands overlap between boundaries {0} and {1}")]
    OverlappingHysteresis(usize, usize),
    #[error("at least one pattern set is required")]
    NoPatternSets,
    #[error("pattern set for level {0} is empty")]
    EmptyPatternSet(u8),
    #[error("frames_per_pattern must be nonzero")]
    ZeroFramesPerPattern,
    #[error("transition_frames must be nonzero")]
    ZeroTransitionFrames,
    #[error("pattern {0:?} is not registered")]
    UnknownPattern(PatternId),
    #[error("pattern {0:?} is already registered")]
    DuplicatePattern(PatternId),
    #[error("pattern registry is full")]
    RegistryFull,
    #[error("scheduler has {levels} pattern sets but the classifier has {boundaries} boundaries")]
    LevelTableMismatch { levels: usize, boundaries: usize },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
