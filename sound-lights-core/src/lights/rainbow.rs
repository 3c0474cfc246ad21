use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

use super::Pattern;

/// hue walk along the strip, drifting one hue step per frame
pub struct Rainbow {
    hsv: Hsv,
    /// how many neighboring pixels share one hue step
    spread: usize,
}

impl Rainbow {
    pub const fn new(sat: u8, val: u8, spread: usize) -> Self {
        Self {
            hsv: Hsv { hue: 0, sat, val },
            spread,
        }
    }
}

impl<const N: usize> Pattern<N> for Rainbow {
    fn setup(&mut self) {
        self.hsv.hue = 0;
    }

    fn update(&mut self, fbuf: &mut [RGB8; N]) {
        let spread = self.spread.max(1);

        for (i, x) in fbuf.iter_mut().enumerate() {
            let mut pixel = self.hsv;
            pixel.hue = pixel.hue.wrapping_add((i / spread) as u8);

            *x = hsv2rgb(pixel);
        }

        self.hsv.hue = self.hsv.hue.wrapping_add(1);
    }
}
