//! The frame-tick entry point.
//!
//! Everything mutable lives in one owned [LightShow] instead of process
//! globals. The outer frame loop (hardware specific, not this crate's problem)
//! calls [LightShow::tick] once per display frame and pushes the returned
//! buffer to the LEDs.

use smart_leds::RGB8;

use crate::audio::LevelClassifier;
use crate::config::{ClassifierConfig, SchedulerConfig};
use crate::errors::{ConfigError, ConfigResult};
use crate::lights::{PatternRegistry, PatternScheduler};

/// Owns the classifier and the scheduler and wires the level between them.
///
/// N pixels, B level boundaries, L = B + 1 levels, S max patterns per set,
/// P registry capacity.
pub struct LightShow<
    'p,
    const N: usize,
    const B: usize,
    const L: usize,
    const S: usize,
    const P: usize,
> {
    classifier: LevelClassifier<B>,
    scheduler: PatternScheduler<'p, N, L, S, P>,
    frame: u32,
}

impl<'p, const N: usize, const B: usize, const L: usize, const S: usize, const P: usize>
    LightShow<'p, N, B, L, S, P>
{
    /// fails fast on any configuration mistake, before the frame loop starts
    pub fn new(
        classifier_config: ClassifierConfig<B>,
        scheduler_config: SchedulerConfig<L, S>,
        registry: PatternRegistry<'p, N, P>,
    ) -> ConfigResult<Self> {
        if L != B + 1 {
            return Err(ConfigError::LevelTableMismatch {
                levels: L,
                boundaries: B,
            });
        }

        let classifier = LevelClassifier::new(classifier_config)?;
        let scheduler = PatternScheduler::new(scheduler_config, registry, classifier.level())?;

        Ok(Self {
            classifier,
            scheduler,
            frame: 0,
        })
    }

    /// one display frame.
    ///
    /// `sample` is the latest sensor reading; `now_ms` is the caller's
    /// monotonic wall clock. The clock only feeds the classifier's dwell
    /// timers; everything visual is paced by this function being called.
    pub fn tick(&mut self, sample: f32, now_ms: u64) -> &[RGB8; N] {
        self.classifier.update(sample, now_ms);
        self.scheduler.set_level(self.classifier.level());

        self.frame = self.frame.wrapping_add(1);

        self.scheduler.tick()
    }

    pub fn level(&self) -> u8 {
        self.classifier.level()
    }

    pub fn envelope(&self) -> f32 {
        self.classifier.envelope()
    }

    pub fn last_sample(&self) -> f32 {
        self.classifier.last_sample()
    }

    /// frames rendered so far. wraps; only meant for blink overlays and logs.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_buffer(&self) -> &[RGB8; N] {
        self.scheduler.frame_buffer()
    }
}

#[cfg(test)]
mod tests {
    use heapless::Vec;
    use smart_leds::colors::{BLUE, GREEN, RED};

    use super::*;
    use crate::lights::{PatternId, Solid};

    fn scheduler_config() -> SchedulerConfig<3, 4> {
        SchedulerConfig {
            frames_per_pattern: 10,
            transition_frames: 4,
            pattern_sets: [
                Vec::from_slice(&[PatternId(0)]).unwrap(),
                Vec::from_slice(&[PatternId(1)]).unwrap(),
                Vec::from_slice(&[PatternId(2)]).unwrap(),
            ],
        }
    }

    #[test]
    fn mismatched_level_table_is_rejected() {
        let mut quiet = Solid { color: BLUE };

        let mut registry: PatternRegistry<4, 8> = PatternRegistry::new();
        registry.register(PatternId(0), &mut quiet).unwrap();

        let config = SchedulerConfig::<2, 4> {
            frames_per_pattern: 10,
            transition_frames: 4,
            pattern_sets: [
                Vec::from_slice(&[PatternId(0)]).unwrap(),
                Vec::from_slice(&[PatternId(0)]).unwrap(),
            ],
        };

        let show = LightShow::<4, 2, 2, 4, 8>::new(ClassifierConfig::default(), config, registry);

        assert!(matches!(
            show,
            Err(ConfigError::LevelTableMismatch {
                levels: 2,
                boundaries: 2
            })
        ));
    }

    #[test]
    fn quiet_room_fades_down_to_the_quiet_set() {
        let mut quiet = Solid { color: BLUE };
        let mut medium = Solid { color: GREEN };
        let mut loud = Solid { color: RED };

        let mut registry: PatternRegistry<4, 8> = PatternRegistry::new();
        registry.register(PatternId(0), &mut quiet).unwrap();
        registry.register(PatternId(1), &mut medium).unwrap();
        registry.register(PatternId(2), &mut loud).unwrap();

        let mut show = LightShow::<4, 2, 3, 4, 8>::new(
            ClassifierConfig::default(),
            scheduler_config(),
            registry,
        )
        .unwrap();

        assert_eq!(show.level(), 1);

        // silence while the envelope decays below the widened boundary
        let mut now_ms = 0;
        while show.envelope() >= 40.0 {
            show.tick(0.0, now_ms);
            now_ms += 20;
        }
        assert_eq!(show.level(), 1);

        // half a minute of silence commits the move down
        now_ms += 30_000;
        show.tick(0.0, now_ms);
        assert_eq!(show.level(), 0);

        // the scheduler crossfades over to the quiet set
        for _ in 0..4 {
            show.tick(0.0, now_ms);
            now_ms += 20;
        }
        assert_eq!(show.frame_buffer(), &[BLUE; 4]);
    }

    #[test]
    fn diagnostics_flow_through() {
        let mut quiet = Solid { color: BLUE };
        let mut medium = Solid { color: GREEN };
        let mut loud = Solid { color: RED };

        let mut registry: PatternRegistry<4, 8> = PatternRegistry::new();
        registry.register(PatternId(0), &mut quiet).unwrap();
        registry.register(PatternId(1), &mut medium).unwrap();
        registry.register(PatternId(2), &mut loud).unwrap();

        let mut show = LightShow::<4, 2, 3, 4, 8>::new(
            ClassifierConfig::default(),
            scheduler_config(),
            registry,
        )
        .unwrap();

        show.tick(55.0, 0);
        show.tick(60.0, 20);

        assert_eq!(show.last_sample(), 60.0);
        assert!(show.envelope() > 0.0);
        assert_eq!(show.frame(), 2);
    }
}
