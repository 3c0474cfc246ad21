//! Diagnostic overlays painted over the finished frame.
//!
//! These read the classifier's public state. How they look is informal bring-up
//! helper territory, not part of any pattern set.

use smart_leds::RGB8;
use smart_leds::colors::{BLACK, RED, WHITE};

/// bright band at both ends of every row while the room is peaking.
///
/// a peak is a raw sample at least twice the smoothed envelope.
pub fn sound_peak<const N: usize>(
    last_sample: f32,
    envelope: f32,
    rows: usize,
    width: usize,
    fbuf: &mut [RGB8; N],
) {
    if width == 0 || last_sample <= envelope * 2.0 {
        return;
    }

    for row in 0..rows {
        let start = row * width;

        if let Some(pixel) = fbuf.get_mut(start) {
            *pixel = WHITE;
        }
        if let Some(pixel) = fbuf.get_mut(start + width - 1) {
            *pixel = WHITE;
        }
    }
}

/// one red dot per level, counting from the start of the strip
pub fn level_status<const N: usize>(level: u8, fbuf: &mut [RGB8; N]) {
    let count = (level as usize + 1).min(N);

    for pixel in fbuf[..count].iter_mut() {
        *pixel = RED;
    }
}

/// blink a single pixel on odd frames. proof the loop is alive.
pub fn frame_blink<const N: usize>(frame: u32, pixel: usize, fbuf: &mut [RGB8; N]) {
    let Some(pixel) = fbuf.get_mut(pixel) else {
        return;
    };

    *pixel = if frame % 2 == 1 {
        RGB8::new(64, 64, 64)
    } else {
        BLACK
    };
}
