//! Numeric readout printed inside the dial.
//!
//! The text is re-rendered into a fixed `heapless::String` on every accepted
//! update, so drawing never formats. Whole values print without a fraction
//! (`42`), anything else with one decimal (`42.5`). A value whose plain form
//! does not fit [`LABEL_CAPACITY`] switches to scientific notation (`1.23e14`).

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use heapless::String;
use profont::PROFONT_12_POINT;

/// Longest readout kept. Wider values fall back to scientific notation.
pub const LABEL_CAPACITY: usize = 16;

/// Font used when a label is requested without one.
pub const DEFAULT_LABEL_FONT: &MonoFont<'static> = &PROFONT_12_POINT;

/// Centered horizontally, sitting on the anchor point.
const ANCHOR_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Bottom)
    .build();

/// Value text anchored at a fixed point.
#[derive(Clone, Debug)]
pub struct ValueLabel {
    text: String<LABEL_CAPACITY>,
    anchor: Point,
    style: MonoTextStyle<'static, Rgb565>,
}

impl ValueLabel {
    /// Empty label whose text bottom-center sits at `anchor`.
    pub fn new(
        anchor: Point,
        font: &'static MonoFont<'static>,
        color: Rgb565,
    ) -> Self {
        Self {
            text: String::new(),
            anchor,
            style: MonoTextStyle::new(font, color),
        }
    }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    #[inline]
    pub const fn anchor(&self) -> Point { self.anchor }

    /// Re-render the readout for `value`.
    pub fn set_value(
        &mut self,
        value: f64,
    ) {
        // Folds -0.0 into 0.0
        let value = value + 0.0;
        self.text.clear();
        let plain = if libm::trunc(value) == value {
            write!(self.text, "{value:.0}")
        } else {
            write!(self.text, "{value:.1}")
        };
        if plain.is_err() {
            // At most 10 chars ("-1.23e-308"), always fits
            self.text.clear();
            let _ = write!(self.text, "{value:.2e}");
        }
    }
}

impl Drawable for ValueLabel {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if self.text.is_empty() {
            return Ok(());
        }
        Text::with_text_style(&self.text, self.anchor, self.style, ANCHOR_STYLE).draw(target)?;
        Ok(())
    }
}
