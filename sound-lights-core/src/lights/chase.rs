use smart_leds::RGB8;

use super::matrix::xy_to_n;
use super::pattern::Pattern;

/// a short lit run climbing every row, staggered so the runners spiral around
/// the strip instead of marching in step
pub struct Chase<const ROWS: usize, const WIDTH: usize> {
    frame: u32,
    color: RGB8,
    /// trailing pixels behind the head, each one dimmer
    tail: usize,
}

impl<const ROWS: usize, const WIDTH: usize> Chase<ROWS, WIDTH> {
    pub const fn new(color: RGB8, tail: usize) -> Self {
        Self {
            frame: 0,
            color,
            tail,
        }
    }
}

impl<const ROWS: usize, const WIDTH: usize, const N: usize> Pattern<N> for Chase<ROWS, WIDTH> {
    fn setup(&mut self) {
        self.frame = 0;
    }

    fn update(&mut self, fbuf: &mut [RGB8; N]) {
        // each halving is one right shift. more than 7 would just be black.
        let tail = self.tail.min(7);

        for row in 0..ROWS {
            let head = (self.frame as usize + row * 2) % WIDTH;

            for offset in 0..=tail {
                let Some(x) = head.checked_sub(offset) else {
                    break;
                };

                let n = xy_to_n(x, row, WIDTH);

                // geometry is checked by the constructor users pick, but a
                // mismatched N must not take down the frame loop
                if let Some(pixel) = fbuf.get_mut(n) {
                    pixel.r = self.color.r >> offset;
                    pixel.g = self.color.g >> offset;
                    pixel.b = self.color.b >> offset;
                }
            }
        }

        self.frame = self.frame.wrapping_add(1);
    }
}
