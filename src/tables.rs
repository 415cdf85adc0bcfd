//! Precomputed arc point tables and contour assembly.
//!
//! Built once per gauge. The outer table runs start -> end of the sweep; the
//! inner table is stored reversed (end -> start) so that concatenating the two
//! walks the annular wedge as one closed, non-self-intersecting outline.
//!
//! ```text
//!        outer[0] ---> outer[n-1]
//!          |  ·  ·  ·  ·  ·  ·  |
//!       inner[n-1] <--- inner[0]        (inner stored reversed)
//! ```
//!
//! Every later value update reslices these tables; nothing here is recomputed.

use embedded_graphics::Drawable;
use embedded_graphics::pixelcolor::Gray2;
use embedded_graphics::prelude::{Point, Primitive};
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use heapless::Vec;

use crate::config::SAMPLE_COUNT;
use crate::error::GaugeError;
use crate::geometry::{project, sweep_angles};
use crate::polygon::Contour;
use crate::surface::{Bitmap, EDGE_INDEX, FILL_INDEX};

/// One pixel per degree of sweep for a single radius.
pub type PointTable = Vec<Point, SAMPLE_COUNT>;

/// Outer and (reversed) inner arc tables of one gauge.
#[derive(Clone, Debug)]
pub struct PointTables {
    outer: PointTable,
    inner: PointTable,
}

impl PointTables {
    /// Trace both arcs into `bitmap` and keep their pixels.
    ///
    /// Marks each arc pixel at [`FILL_INDEX`], draws the closing radial edge
    /// between the two arcs' last points at [`EDGE_INDEX`], then reverses the
    /// inner table.
    pub fn build(
        r_ext: u32,
        r_int: u32,
        center: Point,
        bitmap: &mut Bitmap,
    ) -> Result<Self, GaugeError> {
        let outer = trace_arc(r_ext, center, bitmap)?;
        let mut inner = trace_arc(r_int, center, bitmap)?;

        if let (Some(&outer_end), Some(&inner_end)) = (outer.last(), inner.last()) {
            Line::new(outer_end, inner_end)
                .into_styled(PrimitiveStyle::with_stroke(Gray2::new(EDGE_INDEX), 1))
                .draw(bitmap)?;
        }

        inner.reverse();
        Ok(Self { outer, inner })
    }

    /// Outer arc, sweep start -> end.
    #[inline]
    pub fn outer(&self) -> &[Point] { &self.outer }

    /// Inner arc, sweep end -> start.
    #[inline]
    pub fn inner(&self) -> &[Point] { &self.inner }

    /// Full-sweep contour: outer (start -> end) followed by inner (end -> start).
    pub fn assemble(&self) -> Contour { self.trimmed(0) }

    /// Contour with the last `trim` outer points and the first `trim` inner
    /// points dropped, shortening the wedge from the sweep's far end.
    ///
    /// `trim` is capped at the table length, which yields an empty contour.
    pub fn trimmed(
        &self,
        trim: usize,
    ) -> Contour {
        let trim = trim.min(SAMPLE_COUNT);
        let mut contour = Contour::new();
        // Both halves together never exceed CONTOUR_CAPACITY
        contour.extend_from_slice(&self.outer[..self.outer.len() - trim]).ok();
        contour.extend_from_slice(&self.inner[trim..]).ok();
        contour
    }
}

/// Project every sweep angle at `radius`, marking each pixel in the bitmap.
fn trace_arc(
    radius: u32,
    center: Point,
    bitmap: &mut Bitmap,
) -> Result<PointTable, GaugeError> {
    let mut table = PointTable::new();
    for angle in sweep_angles() {
        let p = project(angle, radius, center);
        bitmap.set(p.x, p.y, FILL_INDEX)?;
        // sweep_angles() yields exactly SAMPLE_COUNT values
        table.push(p).ok();
    }
    Ok(table)
}
