//! Software rasterizer for a rotating torus.
//!
//! [`render`] sweeps the surface of a [`Torus`], projects every sample into a
//! [`Scene`], resolves visibility with a [`DepthBuffer`] and hands lit pixels
//! to a [`Sink`]. [`TextFrame`] and [`PaletteFrame`] are the two sinks shipped
//! with the crate.

pub mod animation;
mod buffer;
mod error;
pub mod frame;
pub mod geometry;
mod render;
mod text;

pub use animation::Animation;
pub use buffer::*;
pub use error::{Error, Result};
pub use frame::{PaletteFrame, TextFrame};
pub use geometry::{Sample, Scene, Torus};
pub use render::*;
pub use text::*;

use frame::{PALETTE_SIZE, TRANSPARENT};

fn dither_2(val: usize, x: usize, y: usize) -> bool
{
    val > (2*y + 3*(x%2)) % 4
}

/// Maps a palette index onto the xterm 256-colour grayscale ramp, dithering
/// between neighbouring steps. The background maps to black.
pub fn to_256_color(index: u8, x: usize, y: usize) -> u8
{
    if index == TRANSPARENT {
        return 0;
    }
    let level = index as f32 / (PALETTE_SIZE - 1) as f32;
    let val = (level * 24.25).max(0.0).min(24.24);
    let res = 0xE8 + if dither_2(((val - val.floor()) * 4.0) as usize, x, y) {
        val as usize + 1
    } else {
        val as usize
    };
    if res > 255 {
        0xf
    } else {
        res as u8
    }
}
