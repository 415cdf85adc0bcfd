//! The dial gauge widget.
//!
//! [`DialGauge`] ties the pieces together. Construction validates the
//! configuration, traces both arcs into the background surface and installs
//! the full-sweep contour. After that, [`DialGauge::update`] is pure slicing:
//! a value maps to an angle, the angle to a trim count, and the trim count to
//! a fresh contour cut from the stored tables.
//!
//! # Value Mapping
//!
//! ```text
//! t     = trunc((value - min) * 180 / (max - min) + 180)
//! t     = clamp(t, 182, 360)
//! trim  = 360 - t
//! ```
//!
//! The lower floor keeps a sliver of the wedge visible at the range minimum.
//!
//! # Drawing
//!
//! The gauge is a plain [`Drawable`]. It draws, in order, the background
//! surface, the fill polygon and the optional label, all offset by the
//! configured position. It holds no reference to any display.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::rgb565_from_packed;
use crate::config::{CLAMP_MARGIN, END_ANGLE, GaugeConfig, START_ANGLE};
use crate::error::GaugeError;
use crate::label::{DEFAULT_LABEL_FONT, ValueLabel};
use crate::polygon::{Contour, FillPolygon};
use crate::surface::{Bitmap, Palette, Surface};
use crate::tables::PointTables;

// =============================================================================
// Value Mapping
// =============================================================================

/// Map a value in `[min, max]` onto the sweep, truncating to whole degrees.
///
/// The result is floored at `START_ANGLE + CLAMP_MARGIN` and capped at
/// `END_ANGLE`. Caller guarantees `min < max`.
pub fn map_value_to_angle(
    value: f64,
    min: f64,
    max: f64,
) -> i32 {
    let sweep = f64::from(END_ANGLE - START_ANGLE);
    let t = ((value - min) * sweep / (max - min) + f64::from(START_ANGLE)) as i32;
    t.clamp(START_ANGLE + CLAMP_MARGIN, END_ANGLE)
}

/// Number of samples to drop from each arc for a mapped angle.
pub fn trim_index(angle: i32) -> usize { (END_ANGLE - angle.clamp(START_ANGLE, END_ANGLE)) as usize }

// =============================================================================
// Dial Gauge
// =============================================================================

/// Half-ring gauge whose filled wedge tracks a value.
#[derive(Clone)]
pub struct DialGauge {
    config: GaugeConfig,
    tables: PointTables,
    surface: Surface,
    polygon: FillPolygon,
    label: Option<ValueLabel>,
    value: f64,
    angle: i32,
}

impl DialGauge {
    /// Build the gauge, showing the full range.
    ///
    /// # Errors
    ///
    /// Any [`GaugeConfig::validate`] failure, or `OutOfBounds` if an arc pixel
    /// misses the background surface.
    pub fn new(config: GaugeConfig) -> Result<Self, GaugeError> {
        config.validate()?;

        let fill = rgb565_from_packed(config.color);
        let background = rgb565_from_packed(config.background_color);

        let mut bitmap = Bitmap::new(config.surface_width(), config.surface_height())?;
        let tables = PointTables::build(config.r_ext, config.r_int, config.center(), &mut bitmap)?;
        let surface = Surface::new(bitmap, Palette::new(background, fill, fill));
        let polygon = FillPolygon::new(tables.assemble(), fill);

        let label = config.label_font.map(|font| {
            let mut label = ValueLabel::new(config.center(), font, fill);
            label.set_value(config.range_max);
            label
        });

        log::debug!(
            "dial gauge at ({}, {}): r_ext={} r_int={} surface={}x{} range=[{}, {}]",
            config.x,
            config.y,
            config.r_ext,
            config.r_int,
            config.surface_width(),
            config.surface_height(),
            config.range_min,
            config.range_max
        );

        Ok(Self {
            config,
            tables,
            surface,
            polygon,
            label,
            value: config.range_max,
            angle: END_ANGLE,
        })
    }

    /// Like [`new`](Self::new), forcing a label in the default font when the
    /// configuration names none.
    pub fn with_default_label(config: GaugeConfig) -> Result<Self, GaugeError> {
        let config = match config.label_font {
            Some(_) => config,
            None => config.with_label_font(DEFAULT_LABEL_FONT),
        };
        Self::new(config)
    }

    /// Move the needle to `value`.
    ///
    /// Out-of-range values follow the configured
    /// [`OutOfRangePolicy`](crate::OutOfRangePolicy). On error nothing
    /// changes: the previous contour, label and value stay in place.
    pub fn update(
        &mut self,
        value: f64,
    ) -> Result<(), GaugeError> {
        let value = self.config.admit(value)?;
        let angle = map_value_to_angle(value, self.config.range_min, self.config.range_max);
        let trim = trim_index(angle);

        self.polygon.replace_points(self.tables.trimmed(trim));
        if let Some(label) = self.label.as_mut() {
            label.set_value(value);
        }
        self.value = value;
        self.angle = angle;

        log::trace!("gauge value={} angle={} trim={}", value, angle, trim);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Last accepted value (after clamping).
    #[inline]
    pub const fn value(&self) -> f64 { self.value }

    /// Sweep angle of the last accepted value, in whole degrees.
    #[inline]
    pub const fn angle(&self) -> i32 { self.angle }

    /// Contour currently filled.
    #[inline]
    pub fn contour(&self) -> &[Point] { self.polygon.points() }

    #[inline]
    pub fn outer_table(&self) -> &[Point] { self.tables.outer() }

    /// Inner arc table, stored end -> start.
    #[inline]
    pub fn inner_table(&self) -> &[Point] { self.tables.inner() }

    /// Full-sweep contour, as installed at construction.
    pub fn full_contour(&self) -> Contour { self.tables.assemble() }

    #[inline]
    pub const fn surface(&self) -> &Surface { &self.surface }

    #[inline]
    pub const fn polygon(&self) -> &FillPolygon { &self.polygon }

    #[inline]
    pub const fn label(&self) -> Option<&ValueLabel> { self.label.as_ref() }

    #[inline]
    pub const fn config(&self) -> &GaugeConfig { &self.config }

    /// Footprint on the display (the background surface size).
    #[inline]
    pub fn size(&self) -> Size { self.surface.size() }
}

impl Dimensions for DialGauge {
    fn bounding_box(&self) -> Rectangle { Rectangle::new(self.config.position(), self.size()) }
}

impl Drawable for DialGauge {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut target = target.translated(self.config.position());
        self.surface.draw(&mut target)?;
        self.polygon.draw(&mut target)?;
        if let Some(label) = &self.label {
            label.draw(&mut target)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use profont::PROFONT_12_POINT;

    use super::*;
    use crate::colors::{BLACK, GREEN};
    use crate::config::{MAX_OUTER_RADIUS, OutOfRangePolicy, SAMPLE_COUNT};

    fn reference_gauge() -> DialGauge { DialGauge::new(GaugeConfig::new(10, 10, 50, 40)).unwrap() }

    #[test]
    fn test_map_value_to_angle() {
        assert_eq!(map_value_to_angle(0.0, 0.0, 100.0), 182);
        assert_eq!(map_value_to_angle(1.0, 0.0, 100.0), 182);
        assert_eq!(map_value_to_angle(2.0, 0.0, 100.0), 183);
        assert_eq!(map_value_to_angle(50.0, 0.0, 100.0), 270);
        assert_eq!(map_value_to_angle(99.9, 0.0, 100.0), 359);
        assert_eq!(map_value_to_angle(100.0, 0.0, 100.0), 360);
        // Offset range maps the same way
        assert_eq!(map_value_to_angle(-20.0, -40.0, 0.0), 270);
    }

    #[test]
    fn test_map_value_to_angle_caps_both_ends() {
        assert_eq!(map_value_to_angle(-1000.0, 0.0, 100.0), 182);
        assert_eq!(map_value_to_angle(1000.0, 0.0, 100.0), 360);
    }

    #[test]
    fn test_trim_index() {
        assert_eq!(trim_index(182), 178);
        assert_eq!(trim_index(270), 90);
        assert_eq!(trim_index(360), 0);
        assert_eq!(trim_index(400), 0);
    }

    #[test]
    fn test_new_installs_full_contour() {
        let gauge = reference_gauge();
        assert_eq!(gauge.contour().len(), 2 * SAMPLE_COUNT);
        assert_eq!(gauge.contour(), gauge.full_contour().as_slice());
        assert_eq!(gauge.value(), 100.0);
        assert_eq!(gauge.angle(), 360);
        assert_eq!(gauge.size(), Size::new(103, 53));
        assert!(gauge.label().is_none());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bad = GaugeConfig::new(0, 0, 40, 50);
        assert!(matches!(DialGauge::new(bad), Err(GaugeError::InnerRadiusTooLarge)));

        let bad = GaugeConfig::new(0, 0, 50, 40).with_range(5.0, 5.0);
        assert!(matches!(DialGauge::new(bad), Err(GaugeError::InvalidRange)));
    }

    #[test]
    fn test_update_minimum_keeps_two_samples_per_arc() {
        let mut gauge = reference_gauge();
        gauge.update(0.0).unwrap();

        let outer = gauge.outer_table();
        let inner = gauge.inner_table();
        assert_eq!(gauge.angle(), 182);
        assert_eq!(gauge.contour().len(), 4);
        assert_eq!(&gauge.contour()[..2], &outer[..2]);
        assert_eq!(&gauge.contour()[2..], &inner[178..180]);
    }

    #[test]
    fn test_update_maximum_restores_full_contour() {
        let mut gauge = reference_gauge();
        gauge.update(30.0).unwrap();
        gauge.update(100.0).unwrap();
        assert_eq!(gauge.angle(), 360);
        assert_eq!(gauge.contour(), gauge.full_contour().as_slice());
    }

    #[test]
    fn test_update_midpoint() {
        let mut gauge = reference_gauge();
        gauge.update(50.0).unwrap();

        let contour = gauge.contour();
        assert_eq!(contour.len(), 180);
        // Wedge ends at the top of the dial on both arcs
        assert_eq!(contour[89], gauge.outer_table()[89]);
        assert_eq!(contour[90], gauge.inner_table()[90]);
        assert_eq!(contour[179], Point::new(10, 51));
    }

    #[test]
    fn test_update_is_monotonic() {
        let mut gauge = reference_gauge();
        let mut previous = 0;
        for v in 0..=100 {
            gauge.update(f64::from(v)).unwrap();
            let len = gauge.contour().len();
            assert!(len >= previous, "coverage shrank at {v}");
            // Outer half of a smaller wedge is a prefix of the larger one
            assert_eq!(&gauge.contour()[..len / 2], &gauge.outer_table()[..len / 2]);
            previous = len;
        }
        assert_eq!(previous, 2 * SAMPLE_COUNT);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut gauge = reference_gauge();
        gauge.update(37.5).unwrap();
        let first: Contour = gauge.contour().iter().copied().collect();
        gauge.update(37.5).unwrap();
        assert_eq!(gauge.contour(), first.as_slice());
    }

    #[test]
    fn test_update_below_range_clamps_by_default() {
        let mut clamped = reference_gauge();
        let mut minimum = reference_gauge();
        clamped.update(-10.0).unwrap();
        minimum.update(0.0).unwrap();
        assert_eq!(clamped.contour(), minimum.contour());
        assert_eq!(clamped.value(), 0.0);
    }

    #[test]
    fn test_update_above_range_clamps_by_default() {
        let mut gauge = reference_gauge();
        gauge.update(20.0).unwrap();
        gauge.update(250.0).unwrap();
        assert_eq!(gauge.value(), 100.0);
        assert_eq!(gauge.contour(), gauge.full_contour().as_slice());
    }

    #[test]
    fn test_update_reject_policy_leaves_state() {
        let cfg = GaugeConfig::new(10, 10, 50, 40).with_out_of_range_policy(OutOfRangePolicy::Reject);
        let mut gauge = DialGauge::new(cfg).unwrap();
        gauge.update(40.0).unwrap();
        let before: Contour = gauge.contour().iter().copied().collect();

        assert_eq!(gauge.update(-10.0), Err(GaugeError::ValueOutOfRange));
        assert_eq!(gauge.update(100.1), Err(GaugeError::ValueOutOfRange));
        assert_eq!(gauge.contour(), before.as_slice());
        assert_eq!(gauge.value(), 40.0);
    }

    #[test]
    fn test_update_nan_rejected() {
        let mut gauge = reference_gauge();
        assert_eq!(gauge.update(f64::NAN), Err(GaugeError::InvalidValue));
        assert_eq!(gauge.contour().len(), 2 * SAMPLE_COUNT);
    }

    #[test]
    fn test_label_tracks_value() {
        let cfg = GaugeConfig::new(0, 0, 50, 40).with_label_font(&PROFONT_12_POINT);
        let mut gauge = DialGauge::new(cfg).unwrap();
        assert_eq!(gauge.label().map(ValueLabel::text), Some("100"));

        gauge.update(42.0).unwrap();
        assert_eq!(gauge.label().map(ValueLabel::text), Some("42"));

        // Clamped values print as shown, not as passed
        gauge.update(-3.0).unwrap();
        assert_eq!(gauge.label().map(ValueLabel::text), Some("0"));
    }

    #[test]
    fn test_tables_full_length_at_radius_extremes() {
        let extremes = [(2, 1), (MAX_OUTER_RADIUS, 1), (MAX_OUTER_RADIUS, MAX_OUTER_RADIUS - 1)];
        for (r_ext, r_int) in extremes {
            let gauge = DialGauge::new(GaugeConfig::new(0, 0, r_ext, r_int))
                .unwrap_or_else(|e| panic!("r_ext={r_ext} r_int={r_int}: {e}"));
            assert_eq!(gauge.outer_table().len(), SAMPLE_COUNT);
            assert_eq!(gauge.inner_table().len(), SAMPLE_COUNT);
            assert_eq!(gauge.contour().len(), 2 * SAMPLE_COUNT);
        }
    }

    #[test]
    fn test_label_readable_for_wide_range() {
        let cfg = GaugeConfig::new(0, 0, 50, 40)
            .with_range(0.0, 1e20)
            .with_label_font(&PROFONT_12_POINT);
        let mut gauge = DialGauge::new(cfg).unwrap();
        assert_eq!(gauge.label().map(ValueLabel::text), Some("1.00e20"));

        gauge.update(123_456_789_012_345.5).unwrap();
        assert_eq!(gauge.label().map(ValueLabel::text), Some("1.23e14"));
    }

    #[test]
    fn test_polygon_uses_configured_color() {
        let gauge = DialGauge::new(GaugeConfig::new(0, 0, 50, 40).with_color(0x44_00_44)).unwrap();
        assert_eq!(gauge.polygon().color(), Rgb565::new(8, 0, 8));
        assert_eq!(gauge.polygon().color(), gauge.surface().palette()[crate::surface::FILL_INDEX]);
    }

    #[test]
    fn test_with_default_label() {
        let gauge = DialGauge::with_default_label(GaugeConfig::new(0, 0, 50, 40)).unwrap();
        let label = gauge.label().unwrap();
        assert_eq!(label.anchor(), Point::new(50, 50));
    }

    #[test]
    fn test_bounding_box_at_position() {
        let gauge = reference_gauge();
        let bbox = gauge.bounding_box();
        assert_eq!(bbox.top_left, Point::new(10, 10));
        assert_eq!(bbox.size, Size::new(103, 53));
    }

    #[test]
    fn test_draw_full_and_minimum() {
        let mut gauge = DialGauge::new(GaugeConfig::new(2, 2, 20, 12)).unwrap();
        let offset = Point::new(2, 2);
        // Between the arcs at the top of the dial, in surface coordinates
        let band = Point::new(20, 4);
        // Inside the inner arc
        let hole = Point::new(20, 18);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(band + offset), Some(GREEN));
        assert_eq!(display.get_pixel(hole + offset), Some(BLACK));
        assert_eq!(display.get_pixel(Point::new(20, 0) + offset), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);

        gauge.update(0.0).unwrap();
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(band + offset), Some(BLACK));
        // Arc outline stays on the surface
        assert_eq!(display.get_pixel(Point::new(20, 0) + offset), Some(GREEN));
    }
}
