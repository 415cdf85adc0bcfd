//! Filled polygon primitive with replace-on-write point ownership.
//!
//! [`FillPolygon`] owns its contour outright. Callers hand over a freshly
//! built [`Contour`] through [`FillPolygon::replace_points`]; the previous one
//! is dropped in the same step, so no stale vertex list is ever shared.
//!
//! # Rasterization
//!
//! Even-odd scanline fill sampled at pixel centers. For every row the edge
//! crossings at `y + 0.5` are sorted and the spans between pairs are filled
//! with `fill_solid`, so targets with fast rectangle fills benefit directly.

use core::cmp::Ordering;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::CONTOUR_CAPACITY;

/// Closed polygon outline; the last vertex implicitly joins the first.
pub type Contour = Vec<Point, CONTOUR_CAPACITY>;

/// Polygon rendered as a solid fill in a single color.
#[derive(Clone, Debug)]
pub struct FillPolygon {
    points: Contour,
    color: Rgb565,
}

impl FillPolygon {
    pub const fn new(
        points: Contour,
        color: Rgb565,
    ) -> Self {
        Self { points, color }
    }

    /// Current vertex list.
    #[inline]
    pub fn points(&self) -> &[Point] { &self.points }

    #[inline]
    pub const fn color(&self) -> Rgb565 { self.color }

    /// Swap in a new contour wholesale.
    pub fn replace_points(
        &mut self,
        points: Contour,
    ) {
        self.points = points;
    }

    /// Smallest rectangle containing every vertex.
    pub fn bounding_box(&self) -> Rectangle {
        let Some(first) = self.points.first() else {
            return Rectangle::zero();
        };
        let (min, max) = self
            .points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.component_min(*p), max.component_max(*p)));
        Rectangle::with_corners(min, max)
    }

    /// Sorted X coordinates where the outline crosses the horizontal line `sy`.
    fn crossings(
        &self,
        sy: f32,
    ) -> Vec<f32, CONTOUR_CAPACITY> {
        let mut xs: Vec<f32, CONTOUR_CAPACITY> = Vec::new();
        let n = self.points.len();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let (ay, by) = (a.y as f32, b.y as f32);
            if (ay <= sy) == (by <= sy) {
                continue;
            }
            let t = (sy - ay) / (by - ay);
            let x = a.x as f32 + t * (b.x - a.x) as f32;
            // One crossing per edge and at most CONTOUR_CAPACITY edges
            xs.push(x).ok();
        }
        xs.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        xs
    }
}

impl Drawable for FillPolygon {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if self.points.len() < 3 {
            return Ok(());
        }
        let bbox = self.bounding_box();
        let Some(bottom_right) = bbox.bottom_right() else {
            return Ok(());
        };

        for y in bbox.top_left.y..=bottom_right.y {
            let xs = self.crossings(y as f32 + 0.5);
            for span in xs.chunks_exact(2) {
                let start = libm::ceilf(span[0] - 0.5) as i32;
                let end = libm::floorf(span[1] - 0.5) as i32;
                if end < start {
                    continue;
                }
                let run = Rectangle::new(Point::new(start, y), Size::new((end - start + 1) as u32, 1));
                target.fill_solid(&run, self.color)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::GREEN;

    fn contour(points: &[(i32, i32)]) -> Contour {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn filled(display: &MockDisplay<Rgb565>) -> usize {
        let mut n = 0;
        for y in 0..64 {
            for x in 0..64 {
                if display.get_pixel(Point::new(x, y)).is_some() {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_square_fill() {
        let poly = FillPolygon::new(contour(&[(2, 2), (6, 2), (6, 6), (2, 6)]), GREEN);
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        poly.draw(&mut display).unwrap();

        // Pixel centers 2.5..=5.5 lie inside [2, 6] on both axes
        assert_eq!(filled(&display), 16);
        assert_eq!(display.get_pixel(Point::new(2, 2)), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(5, 5)), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(6, 6)), None);
    }

    #[test]
    fn test_even_odd_hole() {
        // Outer square, then inner square traversed back to the seam
        let poly = FillPolygon::new(
            contour(&[(0, 0), (10, 0), (10, 10), (0, 10), (0, 0), (3, 3), (3, 7), (7, 7), (7, 3), (3, 3)]),
            GREEN,
        );
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        // The seam edges meet the outer span at a shared pixel
        display.set_allow_overdraw(true);
        poly.draw(&mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(GREEN));
        assert_eq!(display.get_pixel(Point::new(5, 5)), None);
        assert_eq!(filled(&display), 100 - 16);
    }

    #[test]
    fn test_degenerate_contours_draw_nothing() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        FillPolygon::new(Contour::new(), GREEN).draw(&mut display).unwrap();
        FillPolygon::new(contour(&[(1, 1), (5, 5)]), GREEN)
            .draw(&mut display)
            .unwrap();
        assert_eq!(filled(&display), 0);
    }

    #[test]
    fn test_replace_points_swaps_whole_contour() {
        let mut poly = FillPolygon::new(contour(&[(0, 0), (4, 0), (4, 4)]), GREEN);
        poly.replace_points(contour(&[(1, 1), (2, 1), (2, 2), (1, 2)]));
        assert_eq!(poly.color(), GREEN);
        assert_eq!(poly.points().len(), 4);
        assert_eq!(poly.points()[0], Point::new(1, 1));
        assert_eq!(poly.bounding_box(), Rectangle::with_corners(Point::new(1, 1), Point::new(2, 2)));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert_eq!(FillPolygon::new(Contour::new(), GREEN).bounding_box(), Rectangle::zero());
    }
}
