//! Eased blending between the outgoing and incoming pattern buffers.

use core::f32::consts::PI;

use smart_leds::RGB8;

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use micromath::F32Ext;

/// weight of the outgoing pattern after `progress` of `total` frames, 255..=0.
///
/// cosine half period, so the fade idles at both ends and moves through the
/// middle. `progress = 0` keeps the old pattern untouched; `progress = total`
/// hands the frame fully to the new one.
pub fn blend_weight(progress: u32, total: u32) -> u8 {
    debug_assert!(total > 0);

    let t = (progress as f32 / total as f32).clamp(0.0, 1.0);
    let eased = (1.0 + (PI * t).cos()) / 2.0;

    (eased * 255.0 + 0.5) as u8
}

/// `main = main * weight + secondary * (255 - weight)`, saturating per channel.
///
/// the two weights always sum to the full channel range, so the crossfade
/// neither dims nor blows out a frame on the way through.
pub fn blend<const N: usize>(main: &mut [RGB8; N], secondary: &[RGB8; N], weight: u8) {
    let inverse = 255 - weight;

    for (main, secondary) in main.iter_mut().zip(secondary.iter()) {
        main.r = scale8(main.r, weight).saturating_add(scale8(secondary.r, inverse));
        main.g = scale8(main.g, weight).saturating_add(scale8(secondary.g, inverse));
        main.b = scale8(main.b, weight).saturating_add(scale8(secondary.b, inverse));
    }
}

/// scale a channel by weight/255
#[inline]
fn scale8(channel: u8, weight: u8) -> u8 {
    ((channel as u16 * weight as u16) / 255) as u8
}
