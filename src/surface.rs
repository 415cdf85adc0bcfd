//! Static background surface: a 2-bit indexed bitmap plus a 3-slot palette.
//!
//! The bitmap stores palette indices, not colors. It is written once while
//! the gauge is built (arc outlines and the closing edge) and only read
//! afterwards. Drawing the [`Surface`] resolves every index through the
//! [`Palette`] into `Rgb565`.
//!
//! # Pixel Packing
//!
//! Four pixels per byte, row-major, lowest bits first:
//! ```text
//! byte:  [ p3 p3 | p2 p2 | p1 p1 | p0 p0 ]
//! ```
//!
//! The bitmap is an `embedded_graphics` draw target with `Gray2` color, where
//! the luma value *is* the palette index. That lets stock primitives such as
//! `Line` draw straight into it.

use core::ops::Index;

use embedded_graphics::pixelcolor::{Gray2, GrayColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::{BITMAP_CAPACITY, PIXELS_PER_BYTE};
use crate::error::GaugeError;

// =============================================================================
// Palette Indices
// =============================================================================

/// Unmarked surface pixels.
pub const BACKGROUND_INDEX: u8 = 0;

/// Arc outlines and the needle fill.
pub const FILL_INDEX: u8 = 1;

/// The radial segment closing the arc at the end of the sweep.
pub const EDGE_INDEX: u8 = 2;

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 3;

const INDEX_MASK: u8 = 0b11;

// =============================================================================
// Palette
// =============================================================================

/// Maps bitmap indices to display colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb565; PALETTE_SIZE],
}

impl Palette {
    pub const fn new(
        background: Rgb565,
        fill: Rgb565,
        edge: Rgb565,
    ) -> Self {
        Self {
            colors: [background, fill, edge],
        }
    }

    /// Color for `index`, or `None` past the last slot.
    pub fn get(
        &self,
        index: u8,
    ) -> Option<Rgb565> {
        self.colors.get(usize::from(index)).copied()
    }
}

impl Index<u8> for Palette {
    type Output = Rgb565;

    fn index(
        &self,
        index: u8,
    ) -> &Rgb565 {
        &self.colors[usize::from(index)]
    }
}

// =============================================================================
// Bitmap
// =============================================================================

/// Fixed-capacity 2-bit indexed pixel buffer.
#[derive(Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8, BITMAP_CAPACITY>,
}

impl Bitmap {
    /// Allocate a cleared bitmap (every pixel at [`BACKGROUND_INDEX`]).
    ///
    /// Fails with `OutOfBounds` when the requested size exceeds the store;
    /// the reported coordinate is the bottom-right pixel that would not fit.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Result<Self, GaugeError> {
        let bytes = ((width * height) as usize).div_ceil(PIXELS_PER_BYTE);
        let mut data = Vec::new();
        data.resize(bytes, 0).map_err(|_| GaugeError::OutOfBounds {
            x: width as i32 - 1,
            y: height as i32 - 1,
        })?;
        Ok(Self { width, height, data })
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    #[inline]
    fn contains(
        &self,
        x: i32,
        y: i32,
    ) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Byte offset and bit shift of pixel `(x, y)`. Caller checks bounds.
    #[inline]
    fn locate(
        &self,
        x: u32,
        y: u32,
    ) -> (usize, u8) {
        let i = (y * self.width + x) as usize;
        (i / PIXELS_PER_BYTE, ((i % PIXELS_PER_BYTE) * 2) as u8)
    }

    /// Palette index at `(x, y)`, or `None` outside the bitmap.
    pub fn get(
        &self,
        x: i32,
        y: i32,
    ) -> Option<u8> {
        if !self.contains(x, y) {
            return None;
        }
        let (byte, shift) = self.locate(x as u32, y as u32);
        Some((self.data[byte] >> shift) & INDEX_MASK)
    }

    /// Write a palette index. Only the low two bits of `index` are stored.
    pub fn set(
        &mut self,
        x: i32,
        y: i32,
        index: u8,
    ) -> Result<(), GaugeError> {
        if !self.contains(x, y) {
            return Err(GaugeError::OutOfBounds { x, y });
        }
        let (byte, shift) = self.locate(x as u32, y as u32);
        let cell = &mut self.data[byte];
        *cell = (*cell & !(INDEX_MASK << shift)) | ((index & INDEX_MASK) << shift);
        Ok(())
    }

    /// Every palette index in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        let count = (self.width * self.height) as usize;
        (0..count).map(move |i| (self.data[i / PIXELS_PER_BYTE] >> ((i % PIXELS_PER_BYTE) * 2)) & INDEX_MASK)
    }

    /// Number of pixels holding `index`.
    pub fn count(
        &self,
        index: u8,
    ) -> usize {
        self.indices().filter(|&i| i == index).count()
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for Bitmap {
    type Color = Gray2;
    type Error = GaugeError;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.luma())?;
        }
        Ok(())
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Bitmap paired with its palette; the gauge's static background layer.
#[derive(Clone)]
pub struct Surface {
    bitmap: Bitmap,
    palette: Palette,
}

impl Surface {
    pub const fn new(
        bitmap: Bitmap,
        palette: Palette,
    ) -> Self {
        Self { bitmap, palette }
    }

    #[inline]
    pub const fn bitmap(&self) -> &Bitmap { &self.bitmap }

    #[inline]
    pub const fn palette(&self) -> &Palette { &self.palette }

    /// Resolved color at `(x, y)` in surface coordinates.
    pub fn color_at(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        self.bitmap.get(x, y).and_then(|i| self.palette.get(i))
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size { self.bitmap.size() }
}

impl Drawable for Surface {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        // Index 3 never gets written; fall back to background if it ever does.
        let background = self.palette[BACKGROUND_INDEX];
        let colors = self
            .bitmap
            .indices()
            .map(|i| self.palette.get(i).unwrap_or(background));
        target.fill_contiguous(&Rectangle::new(Point::zero(), self.bitmap.size()), colors)
    }
}
