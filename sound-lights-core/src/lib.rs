#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod audio;
pub mod config;
pub mod driver;
pub mod errors;
pub mod lights;
pub mod logging;
