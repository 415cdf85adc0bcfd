//! Gauge configuration and fixed geometry constants.
//!
//! The sweep is fixed: the arc always runs from 180° (left) through 270°
//! (top, since display Y grows downward) to 360° (right), sampled once per
//! degree. Everything sized from the sweep (point tables, contours) is a
//! compile-time constant so the widget never allocates.
//!
//! # Surface Capacity
//!
//! The background bitmap is `(2 * r_ext + 3) x (r_ext + 3)` pixels at 2 bits
//! per pixel. Its backing store is sized for [`MAX_OUTER_RADIUS`], so any
//! configuration passing [`GaugeConfig::validate`] is guaranteed to fit.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::Point;

use crate::colors::{DEFAULT_BACKGROUND_RGB, DEFAULT_FILL_RGB};
use crate::error::GaugeError;

// =============================================================================
// Sweep Geometry
// =============================================================================

/// First angle of the sweep, in degrees.
pub const START_ANGLE: i32 = 180;

/// Last angle of the sweep, in degrees.
pub const END_ANGLE: i32 = 360;

/// Number of one-degree samples per arc (one point per degree of sweep).
pub const SAMPLE_COUNT: usize = (END_ANGLE - START_ANGLE) as usize;

/// Maximum number of vertices in a gauge contour (outer arc + inner arc).
pub const CONTOUR_CAPACITY: usize = SAMPLE_COUNT * 2;

/// Minimum angular extent kept above `START_ANGLE` when mapping values.
/// Keeps the minimum-value contour from collapsing to nothing.
pub const CLAMP_MARGIN: i32 = 2;

const _: () = assert!(START_ANGLE < END_ANGLE);
const _: () = assert!(START_ANGLE + CLAMP_MARGIN < END_ANGLE);

// =============================================================================
// Surface Limits
// =============================================================================

/// Largest supported outer radius in pixels.
pub const MAX_OUTER_RADIUS: u32 = 120;

/// Extra pixels around the outer circle's bounding box.
/// `ceil()` rounding can land one pixel past `2 * r_ext`.
pub const SURFACE_MARGIN: u32 = 3;

/// Widest background surface the bitmap store can hold.
pub const MAX_SURFACE_WIDTH: u32 = MAX_OUTER_RADIUS * 2 + SURFACE_MARGIN;

/// Tallest background surface the bitmap store can hold.
pub const MAX_SURFACE_HEIGHT: u32 = MAX_OUTER_RADIUS + SURFACE_MARGIN;

/// Palette indices packed into one bitmap byte (2 bits each).
pub const PIXELS_PER_BYTE: usize = 4;

/// Bitmap backing store size in bytes.
pub const BITMAP_CAPACITY: usize =
    ((MAX_SURFACE_WIDTH * MAX_SURFACE_HEIGHT) as usize).div_ceil(PIXELS_PER_BYTE);

// =============================================================================
// Defaults
// =============================================================================

/// Default lower bound of the value range.
pub const DEFAULT_RANGE_MIN: f64 = 0.0;

/// Default upper bound of the value range.
pub const DEFAULT_RANGE_MAX: f64 = 100.0;

// =============================================================================
// Out-of-range Handling
// =============================================================================

/// What `update` does with a value outside `[range_min, range_max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutOfRangePolicy {
    /// Pin the value to the nearest range bound.
    #[default]
    Clamp,
    /// Refuse the update with [`GaugeError::ValueOutOfRange`].
    Reject,
}

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Construction parameters for a [`DialGauge`](crate::DialGauge).
///
/// Immutable once the gauge is built. Colors are packed `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeConfig {
    /// Top-left X of the gauge on the display.
    pub x: i32,
    /// Top-left Y of the gauge on the display.
    pub y: i32,
    /// Outer arc radius in pixels.
    pub r_ext: u32,
    /// Inner arc radius in pixels.
    pub r_int: u32,
    /// Value mapped to the empty end of the sweep.
    pub range_min: f64,
    /// Value mapped to the full sweep.
    pub range_max: f64,
    /// Fill and outline color.
    pub color: u32,
    /// Surface background color.
    pub background_color: u32,
    /// Font for the numeric readout. `None` disables the label.
    pub label_font: Option<&'static MonoFont<'static>>,
    /// Handling of values outside the range.
    pub out_of_range: OutOfRangePolicy,
}

impl GaugeConfig {
    /// Create a configuration with default range `[0, 100]`, green fill and
    /// black background.
    pub const fn new(
        x: i32,
        y: i32,
        r_ext: u32,
        r_int: u32,
    ) -> Self {
        Self {
            x,
            y,
            r_ext,
            r_int,
            range_min: DEFAULT_RANGE_MIN,
            range_max: DEFAULT_RANGE_MAX,
            color: DEFAULT_FILL_RGB,
            background_color: DEFAULT_BACKGROUND_RGB,
            label_font: None,
            out_of_range: OutOfRangePolicy::Clamp,
        }
    }

    #[must_use]
    pub const fn with_range(
        mut self,
        min: f64,
        max: f64,
    ) -> Self {
        self.range_min = min;
        self.range_max = max;
        self
    }

    #[must_use]
    pub const fn with_color(
        mut self,
        color: u32,
    ) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn with_background_color(
        mut self,
        color: u32,
    ) -> Self {
        self.background_color = color;
        self
    }

    #[must_use]
    pub const fn with_label_font(
        mut self,
        font: &'static MonoFont<'static>,
    ) -> Self {
        self.label_font = Some(font);
        self
    }

    #[must_use]
    pub const fn with_out_of_range_policy(
        mut self,
        policy: OutOfRangePolicy,
    ) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Check every construction precondition.
    ///
    /// Runs before any table or surface is built so a bad configuration never
    /// reaches the first `update`.
    pub fn validate(&self) -> Result<(), GaugeError> {
        if !self.range_min.is_finite() || !self.range_max.is_finite() || self.range_min >= self.range_max {
            return Err(GaugeError::InvalidRange);
        }
        if self.r_ext == 0 || self.r_int == 0 {
            return Err(GaugeError::NonPositiveRadius);
        }
        if self.r_int >= self.r_ext {
            return Err(GaugeError::InnerRadiusTooLarge);
        }
        if self.r_ext > MAX_OUTER_RADIUS {
            return Err(GaugeError::OuterRadiusTooLarge);
        }
        Ok(())
    }

    /// Display position of the surface's top-left corner.
    pub const fn position(&self) -> Point { Point::new(self.x, self.y) }

    /// Shared center of both arcs, in surface coordinates.
    pub const fn center(&self) -> Point { Point::new(self.r_ext as i32, self.r_ext as i32) }

    /// Background surface width in pixels.
    pub const fn surface_width(&self) -> u32 { self.r_ext * 2 + SURFACE_MARGIN }

    /// Background surface height in pixels.
    pub const fn surface_height(&self) -> u32 { self.r_ext + SURFACE_MARGIN }

    /// Width of the value range.
    pub fn span(&self) -> f64 { self.range_max - self.range_min }

    /// Apply the out-of-range policy to an incoming value.
    ///
    /// Returns the value the gauge should display.
    pub fn admit(
        &self,
        value: f64,
    ) -> Result<f64, GaugeError> {
        if value.is_nan() {
            return Err(GaugeError::InvalidValue);
        }
        if value >= self.range_min && value <= self.range_max {
            return Ok(value);
        }
        match self.out_of_range {
            OutOfRangePolicy::Clamp => {
                log::warn!(
                    "value {} outside [{}, {}], clamping",
                    value,
                    self.range_min,
                    self.range_max
                );
                Ok(value.clamp(self.range_min, self.range_max))
            }
            OutOfRangePolicy::Reject => {
                log::warn!(
                    "value {} outside [{}, {}], rejected",
                    value,
                    self.range_min,
                    self.range_max
                );
                Err(GaugeError::ValueOutOfRange)
            }
        }
    }
}

impl Default for GaugeConfig {
    fn default() -> Self { Self::new(0, 0, 50, 40) }
}

// =============================================================================
// Tests
// =============================================================================
