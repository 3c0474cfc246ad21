use heapless::Vec;
use smart_leds::RGB8;

use crate::errors::{ConfigError, ConfigResult};

/// Identifies a registered pattern. Plain data, so per-level pattern lists can
/// live in configuration instead of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternId(pub u8);

/// One visual pattern over an N pixel strip.
///
/// `setup` runs exactly once each time the scheduler activates the pattern.
/// `update` runs once per frame while the pattern is active or fading in. The
/// buffer arrives already cleared to black; pixels a pattern does not touch
/// stay black.
pub trait Pattern<const N: usize> {
    fn setup(&mut self) {}

    fn update(&mut self, fbuf: &mut [RGB8; N]);
}

/// id -> pattern instance. P = registry capacity.
///
/// This replaces a hardcoded dispatch over every pattern variant: the
/// scheduler only ever sees ids, and which instance an id means is decided at
/// registration time.
pub struct PatternRegistry<'p, const N: usize, const P: usize> {
    slots: Vec<(PatternId, &'p mut dyn Pattern<N>), P>,
}

impl<'p, const N: usize, const P: usize> PatternRegistry<'p, N, P> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// wiring the same id up twice is a programmer error. catch it here, not
    /// at frame time.
    pub fn register(
        &mut self,
        id: PatternId,
        pattern: &'p mut dyn Pattern<N>,
    ) -> ConfigResult<()> {
        if self.contains(id) {
            return Err(ConfigError::DuplicatePattern(id));
        }

        self.slots
            .push((id, pattern))
            .map_err(|_| ConfigError::RegistryFull)?;

        Ok(())
    }

    pub fn contains(&self, id: PatternId) -> bool {
        self.slots.iter().any(|(slot, _)| *slot == id)
    }

    pub fn get_mut(&mut self, id: PatternId) -> Option<&mut (dyn Pattern<N> + 'p)> {
        self.slots
            .iter_mut()
            .find(|(slot, _)| *slot == id)
            .map(|(_, pattern)| &mut **pattern)
    }
}

impl<const N: usize, const P: usize> Default for PatternRegistry<'_, N, P> {
    fn default() -> Self {
        Self::new()
    }
}

/// all pixels off. the scheduler's buffer clear does the actual work.
#[derive(Default)]
pub struct Blank;

impl<const N: usize> Pattern<N> for Blank {
    fn update(&mut self, _fbuf: &mut [RGB8; N]) {}
}

/// every pixel the same color
pub struct Solid {
    pub color: RGB8,
}

impl<const N: usize> Pattern<N> for Solid {
    fn update(&mut self, fbuf: &mut [RGB8; N]) {
        fbuf.fill(self.color);
    }
}
