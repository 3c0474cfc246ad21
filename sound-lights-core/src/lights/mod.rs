//! LED pattern capability, scheduling, and crossfading.
//!
//! level -> PatternScheduler -> Pattern::update -> crossfade -> [RGB8; N]

mod chase;
mod crossfade;
mod matrix;
mod overlays;
mod pattern;
mod rainbow;
mod scheduler;

pub use chase::Chase;
pub use crossfade::{blend, blend_weight};
pub use matrix::{n_to_xy, xy_to_n, xy_to_n_wrapped};
pub use overlays::{frame_blink, level_status, sound_peak};
pub use pattern::{Blank, Pattern, PatternId, PatternRegistry, Solid};
pub use rainbow::Rainbow;
pub use scheduler::PatternScheduler;
