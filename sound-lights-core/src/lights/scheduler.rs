use smart_leds::RGB8;
use smart_leds::colors::BLACK;

use super::crossfade;
use super::pattern::{PatternId, PatternRegistry};
use crate::config::SchedulerConfig;
use crate::errors::{ConfigError, ConfigResult};
use crate::logging::{debug, info};

/// Runs the per-level pattern rotation and crossfades between patterns.
///
/// N pixels, L levels, S max patterns per set, P registry capacity.
///
/// Rotation is paced purely by frame counts; the wall clock never enters this
/// struct. `fbuf` is the frame callers see, `spare` is the fade-in render
/// target while a transition is in flight (`pending` is `Some` exactly then).
///
/// Transitions are not interruptible: once a crossfade starts it runs its full
/// length, and whatever the level or rotation wants next is picked up by the
/// frame after the commit.
pub struct PatternScheduler<'p, const N: usize, const L: usize, const S: usize, const P: usize> {
    config: SchedulerConfig<L, S>,
    registry: PatternRegistry<'p, N, P>,
    level: u8,
    frames_since_level_change: u32,
    active: PatternId,
    pending: Option<PatternId>,
    transition_progress: u32,
    fbuf: [RGB8; N],
    spare: [RGB8; N],
}

impl<'p, const N: usize, const L: usize, const S: usize, const P: usize>
    PatternScheduler<'p, N, L, S, P>
{
    /// checks the whole config against the registry up front so `tick` can
    /// stay infallible
    pub fn new(
        config: SchedulerConfig<L, S>,
        mut registry: PatternRegistry<'p, N, P>,
        initial_level: u8,
    ) -> ConfigResult<Self> {
        config.validate()?;

        for set in config.pattern_sets.iter() {
            for &id in set.iter() {
                if !registry.contains(id) {
                    return Err(ConfigError::UnknownPattern(id));
                }
            }
        }

        let level = initial_level.min(L as u8 - 1);
        let active = config.pattern_sets[level as usize][0];

        // the starting pattern is an activation like any other
        if let Some(pattern) = registry.get_mut(active) {
            pattern.setup();
        }

        Ok(Self {
            config,
            registry,
            level,
            frames_since_level_change: 0,
            active,
            pending: None,
            transition_progress: 0,
            fbuf: [BLACK; N],
            spare: [BLACK; N],
        })
    }

    /// called by the driver when the classified level changes.
    ///
    /// only swaps the set and restarts the rotation clock. whether that means
    /// a crossfade is [Self::tick]'s decision.
    pub fn set_level(&mut self, level: u8) {
        let level = level.min(L as u8 - 1);

        if level != self.level {
            info!("pattern set {} -> {}", self.level, level);
            self.level = level;
            self.frames_since_level_change = 0;
        }
    }

    /// render one display frame
    pub fn tick(&mut self) -> &[RGB8; N] {
        let set = &self.config.pattern_sets[self.level as usize];
        let index =
            (self.frames_since_level_change / self.config.frames_per_pattern) as usize % set.len();
        let desired = set[index];

        if self.pending.is_none() && desired != self.active {
            debug!("transition {:?} -> {:?}", self.active, desired);

            // exactly one setup per activation, the moment it becomes pending
            if let Some(pattern) = self.registry.get_mut(desired) {
                pattern.setup();
            }

            self.pending = Some(desired);
            self.transition_progress = 0;
        }

        // patterns only own the pixels they touch; everything else is black
        self.fbuf.fill(BLACK);
        if let Some(pattern) = self.registry.get_mut(self.active) {
            pattern.update(&mut self.fbuf);
        }

        if let Some(pending) = self.pending {
            self.transition_progress += 1;

            self.spare.fill(BLACK);
            if let Some(pattern) = self.registry.get_mut(pending) {
                pattern.update(&mut self.spare);
            }

            let weight =
                crossfade::blend_weight(self.transition_progress, self.config.transition_frames);
            crossfade::blend(&mut self.fbuf, &self.spare, weight);

            if self.transition_progress >= self.config.transition_frames {
                debug!("transition to {:?} complete", pending);
                self.active = pending;
                self.pending = None;
                self.transition_progress = 0;
            }
        }

        self.frames_since_level_change += 1;

        &self.fbuf
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn active(&self) -> PatternId {
        self.active
    }

    pub fn pending(&self) -> Option<PatternId> {
        self.pending
    }

    pub fn frame_buffer(&self) -> &[RGB8; N] {
        &self.fbuf
    }
}
