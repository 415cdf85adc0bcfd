//! Color constants and packed-RGB conversion.
//!
//! Gauge colors are configured as packed `0xRRGGBB` integers and converted to
//! `Rgb565`, the native format of most SPI panels (ST7789, ILI9341), when the
//! palette is built.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

// =============================================================================
// Packed Defaults
// =============================================================================

/// Default fill color (pure green).
pub const DEFAULT_FILL_RGB: u32 = 0x00FF00;

/// Default background color (black).
pub const DEFAULT_BACKGROUND_RGB: u32 = 0x000000;

// =============================================================================
// Rgb565 Constants
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure green (0, 63, 0).
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Conversion
// =============================================================================

/// Convert a packed `0xRRGGBB` value to `Rgb565`. Bits above 24 are ignored.
pub fn rgb565_from_packed(rgb: u32) -> Rgb565 {
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Rgb565::from(Rgb888::new(r, g, b))
}
