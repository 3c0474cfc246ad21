use crate::audio::EnvelopeFollower;
use crate::config::ClassifierConfig;
use crate::errors::ConfigResult;
use crate::logging::{debug, info, trace};

/// Turns the smoothed envelope into a stable discrete level 0..=B.
///
/// A move to a neighboring level is only committed after the envelope has held
/// past the hysteresis-widened boundary for that boundary's dwell time. Any
/// reversal before the commit restarts the dwell from zero. Levels move one
/// step at a time.
///
/// `now_ms` is the caller's monotonic wall clock. It drives the dwell timers
/// and nothing else; the display frame clock is a separate concern and lives
/// in the scheduler.
pub struct LevelClassifier<const B: usize> {
    config: ClassifierConfig<B>,
    envelope: EnvelopeFollower,
    last_sample: f32,
    current_level: u8,
    prospective_level: u8,
    prospective_since_ms: u64,
}

impl<const B: usize> LevelClassifier<B> {
    pub fn new(config: ClassifierConfig<B>) -> ConfigResult<Self> {
        config.validate()?;

        let envelope = EnvelopeFollower::new(
            config.initial_envelope,
            config.fast_gain,
            config.slow_gain,
            config.floor,
            config.sensitivity_span,
            config.sensitivity_span_min,
        );

        Ok(Self {
            envelope,
            last_sample: 0.0,
            current_level: config.initial_level,
            prospective_level: config.initial_level,
            prospective_since_ms: 0,
            config,
        })
    }

    /// feed one sensor sample
    pub fn update(&mut self, sample: f32, now_ms: u64) {
        self.last_sample = sample;

        let value = self.envelope.update(sample);
        trace!("sample {} envelope {}", sample, value);

        self.classify(now_ms);
    }

    fn classify(&mut self, now_ms: u64) {
        let cur = self.current_level as usize;
        let value = self.envelope.value();

        // level 0 never looks down, level B never looks up
        let candidate = if cur > 0
            && value < self.config.thresholds[cur - 1] - self.config.downward_hysteresis[cur - 1]
        {
            self.current_level - 1
        } else if cur < B
            && value > self.config.thresholds[cur] + self.config.upward_hysteresis[cur]
        {
            self.current_level + 1
        } else {
            // back inside the band. abandons any pending move.
            self.current_level
        };

        if candidate != self.prospective_level {
            debug!(
                "prospective level {} -> {}",
                self.prospective_level, candidate
            );
            self.prospective_level = candidate;
            self.prospective_since_ms = now_ms;
        }

        let held_ms = now_ms.saturating_sub(self.prospective_since_ms);

        // dwell tables are indexed by the boundary being crossed: down from
        // `cur` crosses boundary cur-1, up from `cur` crosses boundary cur
        if self.prospective_level < self.current_level
            && held_ms >= u64::from(self.config.min_downward_ms[cur - 1])
        {
            info!("level {} -> {}", self.current_level, self.prospective_level);
            self.current_level = self.prospective_level;
        } else if self.prospective_level > self.current_level
            && held_ms >= u64::from(self.config.min_upward_ms[cur])
        {
            info!("level {} -> {}", self.current_level, self.prospective_level);
            self.current_level = self.prospective_level;
        }
    }

    pub fn level(&self) -> u8 {
        self.current_level
    }

    pub const fn max_level(&self) -> u8 {
        B as u8
    }

    /// the smoothed envelope, exposed for diagnostic overlays
    pub fn envelope(&self) -> f32 {
        self.envelope.value()
    }

    /// the raw sample from the most recent update, exposed for diagnostic overlays
    pub fn last_sample(&self) -> f32 {
        self.last_sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LevelClassifier<2> {
        LevelClassifier::new(ClassifierConfig::default()).unwrap()
    }

    /// silence until the envelope drops below the widened 1->0 boundary (43 - 3)
    fn drive_below_negative_threshold(classifier: &mut LevelClassifier<2>, now_ms: u64) {
        while classifier.envelope() >= 40.0 {
            classifier.update(0.0, now_ms);
        }
    }

    #[test_log::test]
    fn downward_move_commits_only_after_the_dwell() {
        let mut classifier = classifier();

        drive_below_negative_threshold(&mut classifier, 0);
        assert_eq!(classifier.level(), 1);

        // 29.9s of sustained quiet is not enough for the 30s dwell
        classifier.update(0.0, 29_900);
        assert_eq!(classifier.level(), 1);

        classifier.update(0.0, 30_000);
        assert_eq!(classifier.level(), 0);
    }

    #[test]
    fn recovery_before_the_dwell_cancels_the_move() {
        let mut classifier = classifier();

        drive_below_negative_threshold(&mut classifier, 0);
        assert_eq!(classifier.level(), 1);

        // the room gets going again before the 30s are up. 60 sits inside the
        // level 1 band (40..75), so the pending move is abandoned.
        classifier.update(60.0, 15_000);

        // quiet returning much later starts a fresh dwell; nothing committed
        classifier.update(0.0, 31_000);
        assert_eq!(classifier.level(), 1);

        drive_below_negative_threshold(&mut classifier, 40_000);
        classifier.update(0.0, 69_000);
        assert_eq!(classifier.level(), 1);

        classifier.update(0.0, 70_000);
        assert_eq!(classifier.level(), 0);
    }

    #[test_log::test]
    fn upward_moves_take_one_step_at_a_time() {
        let mut config = ClassifierConfig::<2>::default();
        config.initial_level = 0;
        config.initial_envelope = 20.0;
        let mut classifier = LevelClassifier::new(config).unwrap();

        // a blast of sound from silence. boundary 0 has no upward dwell, so
        // level 1 commits immediately, but level 2 is not reachable in the
        // same update.
        classifier.update(1000.0, 0);
        assert_eq!(classifier.level(), 1);
        assert!(classifier.envelope() > 75.0);

        // boundary 1 wants 10s of sustained loudness
        classifier.update(1000.0, 1);
        assert_eq!(classifier.level(), 1);

        classifier.update(1000.0, 10_000);
        assert_eq!(classifier.level(), 1);

        classifier.update(1000.0, 10_001);
        assert_eq!(classifier.level(), 2);
    }

    #[test]
    fn top_level_never_looks_up_and_bottom_never_looks_down() {
        let mut config = ClassifierConfig::<2>::default();
        config.initial_level = 2;
        config.initial_envelope = 200.0;
        let mut classifier = LevelClassifier::new(config).unwrap();

        classifier.update(1000.0, 0);
        classifier.update(1000.0, 60_000);
        assert_eq!(classifier.level(), 2);

        let mut config = ClassifierConfig::<2>::default();
        config.initial_level = 0;
        config.initial_envelope = 5.0;
        let mut classifier = LevelClassifier::new(config).unwrap();

        classifier.update(0.0, 0);
        classifier.update(0.0, 120_000);
        assert_eq!(classifier.level(), 0);
    }

    #[test]
    fn diagnostics_expose_envelope_and_raw_sample() {
        let mut classifier = classifier();

        classifier.update(55.0, 0);

        assert_eq!(classifier.last_sample(), 55.0);
        assert!(classifier.envelope() > 0.0);
        assert_eq!(classifier.max_level(), 2);
    }
}
