//! Driver library for a pair of LTP305 5x7 LED dot matrix modules behind an ISSI IS31FL3730
//! matrix LED driver, as found on the Pimoroni "LED dot matrix breakout".

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;

pub mod buffer;
pub mod command;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;
pub mod surface;

// Re-exports for primary API.
pub use buffer::FrameBuffer;
pub use command::consts;
pub use config::Config;
pub use controller::{Controller, Pollable};
pub use display::{Display, State};
pub use error::Error;
pub use font::Glyph;
pub use interface::i2c::I2cInterface;
pub use surface::PixelSurface;
