//! Startup configuration for the classifier and the scheduler.
//!
//! Everything here is filled in by the caller before the frame loop starts and
//! checked up front. Dwell times are integer milliseconds and pattern timing is
//! frame counts, so the two clocks stay visibly separate.

use heapless::Vec;

use crate::errors::{ConfigError, ConfigResult};
use crate::lights::PatternId;

/// B = number of level boundaries. Levels run 0..=B.
#[derive(Debug, Clone)]
pub struct ClassifierConfig<const B: usize> {
    /// base gain applied when a sample is louder than the envelope. the
    /// effective gain rises toward 1.0 as the envelope nears `floor`, so quiet
    /// rooms stay sensitive
    pub fast_gain: f32,
    /// fixed gain applied when a sample is quieter than the envelope. much
    /// smaller than `fast_gain`, so the envelope lets go of loudness slowly
    pub slow_gain: f32,
    /// envelope value treated as silence by the sensitivity boost
    pub floor: f32,
    /// distance above `floor` over which the attack gain relaxes back to `fast_gain`
    pub sensitivity_span: f32,
    /// lower clamp on the span denominator so the exponent never blows up
    pub sensitivity_span_min: f32,
    pub initial_envelope: f32,
    pub initial_level: u8,
    /// envelope value separating level k from level k+1
    pub thresholds: [f32; B],
    /// widens boundary k against upward moves
    pub upward_hysteresis: [f32; B],
    /// widens boundary k against downward moves
    pub downward_hysteresis: [f32; B],
    /// dwell before an upward move commits, indexed by the boundary being
    /// crossed: an upward move from level k reads index k
    pub min_upward_ms: [u32; B],
    /// dwell before a downward move commits, indexed by the boundary being
    /// crossed: a downward move from level k reads index k-1
    pub min_downward_ms: [u32; B],
}

impl<const B: usize> ClassifierConfig<B> {
    pub const fn max_level(&self) -> u8 {
        B as u8
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for gain in [self.fast_gain, self.slow_gain] {
            if !(gain > 0.0 && gain < 1.0) {
                return Err(ConfigError::GainOutOfRange(gain));
            }
        }

        if !(self.sensitivity_span > 0.0) || !(self.sensitivity_span_min > 0.0) {
            return Err(ConfigError::NonPositiveSpan);
        }

        if self.initial_level > self.max_level() {
            return Err(ConfigError::InitialLevelOutOfRange(
                self.initial_level,
                self.max_level(),
            ));
        }

        for k in 0..B {
            if self.upward_hysteresis[k] < 0.0 || self.downward_hysteresis[k] < 0.0 {
                return Err(ConfigError::NegativeHysteresis(k));
            }

            if k > 0 {
                if self.thresholds[k] <= self.thresholds[k - 1] {
                    return Err(ConfigError::NonMonotonicThresholds(k));
                }

                // the widened band of each boundary has to sit fully above the
                // widened band below it, or a single envelope value could ask
                // for both a downward and an upward move
                let lower_top = self.thresholds[k - 1] + self.upward_hysteresis[k - 1];
                let upper_bottom = self.thresholds[k] - self.downward_hysteresis[k];
                if upper_bottom <= lower_top {
                    return Err(ConfigError::OverlappingHysteresis(k - 1, k));
                }
            }
        }

        Ok(())
    }
}

/// the values the installation shipped with: three levels, slow to admit the
/// room went quiet (30s), quicker to admit it got loud (0s/10s)
impl Default for ClassifierConfig<2> {
    fn default() -> Self {
        Self {
            fast_gain: 0.015,
            slow_gain: 0.003,
            floor: 30.0,
            sensitivity_span: 5.0,
            sensitivity_span_min: 5.0,
            initial_envelope: 70.0,
            initial_level: 1,
            thresholds: [43.0, 70.0],
            upward_hysteresis: [0.0, 5.0],
            downward_hysteresis: [3.0, 0.0],
            min_upward_ms: [0, 10_000],
            min_downward_ms: [30_000, 30_000],
        }
    }
}

/// L = number of levels, S = max patterns per set.
#[derive(Debug, Clone)]
pub struct SchedulerConfig<const L: usize, const S: usize> {
    /// how many frames each pattern in a set is shown before rotating on
    pub frames_per_pattern: u32,
    /// crossfade length in frames
    pub transition_frames: u32,
    /// ordered pattern rotation for each level. rotation wraps, so a single
    /// entry means that pattern runs until the level changes
    pub pattern_sets: [Vec<PatternId, S>; L],
}

impl<const L: usize, const S: usize> SchedulerConfig<L, S> {
    pub fn validate(&self) -> ConfigResult<()> {
        if L == 0 {
            return Err(ConfigError::NoPatternSets);
        }

        if self.frames_per_pattern == 0 {
            return Err(ConfigError::ZeroFramesPerPattern);
        }

        if self.transition_frames == 0 {
            return Err(ConfigError::ZeroTransitionFrames);
        }

        for (level, set) in self.pattern_sets.iter().enumerate() {
            if set.is_empty() {
                return Err(ConfigError::EmptyPatternSet(level as u8));
            }
        }

        Ok(())
    }
}
