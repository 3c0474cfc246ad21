#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use micromath::F32Ext;

/// Asymmetric smoothing of the instantaneous loudness.
///
/// Rises fast, and faster still while the envelope sits near the configured
/// floor, so the first sounds in a quiet room register immediately. Falls with
/// a much smaller fixed gain, biasing the whole system toward reporting loud
/// rather than quiet.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    value: f32,
    fast_gain: f32,
    slow_gain: f32,
    floor: f32,
    span: f32,
    span_min: f32,
}

impl EnvelopeFollower {
    pub const fn new(
        initial: f32,
        fast_gain: f32,
        slow_gain: f32,
        floor: f32,
        span: f32,
        span_min: f32,
    ) -> Self {
        Self {
            value: initial,
            fast_gain,
            slow_gain,
            floor,
            span,
            span_min,
        }
    }

    /// feed one sample, get the new envelope back.
    ///
    /// the upward step is `fast_gain ^ (1 - span / headroom) * error`: the
    /// exponent runs from 0 right at the floor (gain 1, the envelope snaps to
    /// the sample) toward 1 far above it (gain `fast_gain`).
    pub fn update(&mut self, sample: f32) -> f32 {
        // sensor samples are non-negative. clamp instead of trusting the wire.
        let sample = sample.max(0.0);

        let error = sample - self.value;

        if error > 0.0 {
            let headroom = (self.value - self.floor).max(self.span_min);
            let gain = self.fast_gain.powf(1.0 - self.span / headroom);

            self.value += gain * error;
        } else {
            self.value += self.slow_gain * error;
        }

        // a wild sample can't drag the envelope below the sensor range
        self.value = self.value.max(0.0);

        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
