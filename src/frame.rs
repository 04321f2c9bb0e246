//! The two reference sinks: a text grid and a gray palette-indexed grid.

use std::fmt;
use std::io::{self, Write};

use crate::buffer::Buffer;
use crate::geometry::Scene;
use crate::render::Sink;
use crate::text::{make_colorstring, ColorChar};
use crate::to_256_color;

/// Glyphs in order of increasing density.
pub const GLYPHS: [char; 12] = ['.', ',', '-', '~', ':', ';', '=', '!', '*', '#', '$', '@'];

pub const BLANK: char = ' ';

/// Glyph for a luminance, or `None` if the sample faces away from the light.
/// Luminance up to `sqrt(2)` spreads linearly over the glyphs.
pub fn glyph_index(luminance: f64) -> Option<usize>
{
    if luminance > 0.0 {
        Some(((luminance * 8.0) as usize).min(GLYPHS.len() - 1))
    } else {
        None
    }
}

/// Text rendering of a frame.
pub struct TextFrame
{
    buf: Buffer<char>
}

impl TextFrame
{
    pub fn new(width: usize, height: usize) -> TextFrame
    {
        TextFrame { buf: Buffer::new(width, height, BLANK) }
    }
    pub fn for_scene(scene: &Scene) -> TextFrame
    {
        TextFrame::new(scene.width, scene.height)
    }
    pub fn width(&self) -> usize
    {
        self.buf.width
    }
    pub fn height(&self) -> usize
    {
        self.buf.height
    }
    pub fn get(&self, x: usize, y: usize) -> char
    {
        *self.buf.get(x, y)
    }
    pub fn reset(&mut self)
    {
        self.buf.fill(BLANK);
    }
    /// Writes one line per row.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()>
    {
        for row in self.buf.rows() {
            let line: String = row.iter().collect();
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

impl Sink for TextFrame
{
    fn accept(&mut self, x: usize, y: usize, luminance: f64) -> bool
    {
        match glyph_index(luminance) {
            Some(index) => {
                self.buf.set(x, y, GLYPHS[index]);
                true
            },
            None => false
        }
    }
}

impl fmt::Display for TextFrame
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for row in self.buf.rows() {
            for ch in row {
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Background index, drawn as transparent.
pub const TRANSPARENT: u8 = 0;

pub const PALETTE_SIZE: usize = 16;

/// Palette index for a luminance. Never the background, so surfaces facing
/// away from the light still show at the dim end of the ramp.
pub fn palette_index(luminance: f64) -> u8
{
    ((luminance * 5.0).floor() + 8.0).max(1.0).min((PALETTE_SIZE - 1) as f64) as u8
}

/// RGBA colour of a palette index: transparent, then an even gray ramp up to
/// white.
pub fn rgba(index: u8) -> [u8; 4]
{
    match index {
        TRANSPARENT => [0, 0, 0, 0],
        i => {
            let v = (i.min(PALETTE_SIZE as u8 - 1) as u32 * 255 / (PALETTE_SIZE as u32 - 1)) as u8;
            [v, v, v, 0xff]
        }
    }
}

/// The whole palette, for handing to an image encoder.
pub fn palette() -> [[u8; 4]; PALETTE_SIZE]
{
    let mut table = [[0; 4]; PALETTE_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = rgba(i as u8);
    }
    table
}

/// Palette-indexed rendering of a frame.
pub struct PaletteFrame
{
    buf: Buffer<u8>
}

impl PaletteFrame
{
    pub fn new(width: usize, height: usize) -> PaletteFrame
    {
        PaletteFrame { buf: Buffer::new(width, height, TRANSPARENT) }
    }
    pub fn for_scene(scene: &Scene) -> PaletteFrame
    {
        PaletteFrame::new(scene.width, scene.height)
    }
    pub fn width(&self) -> usize
    {
        self.buf.width
    }
    pub fn height(&self) -> usize
    {
        self.buf.height
    }
    pub fn get(&self, x: usize, y: usize) -> u8
    {
        *self.buf.get(x, y)
    }
    pub fn reset(&mut self)
    {
        self.buf.fill(TRANSPARENT);
    }
    /// Row-major indices, one byte per pixel.
    pub fn indices(&self) -> Vec<u8>
    {
        self.buf.rows().flatten().copied().collect()
    }
    /// Draws the frame as background-coloured cells on a 256-colour
    /// terminal, one line per row.
    pub fn print_ansi<W: Write>(&self, out: &mut W) -> io::Result<()>
    {
        for y in 0..self.buf.height {
            let line = make_colorstring(self.buf.row_iter(y).enumerate().map(|(x, &index)| {
                ColorChar(7, to_256_color(index, x, y), ' ')
            }));
            writeln!(out, "{}\x1B[0m", line)?;
        }
        Ok(())
    }
}

impl Sink for PaletteFrame
{
    fn accept(&mut self, x: usize, y: usize, luminance: f64) -> bool
    {
        self.buf.set(x, y, palette_index(luminance));
        true
    }
}
