//! Background grid and reference-frame markers.

use nalgebra::{Point2, Point3};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::canvas::{Canvas, Rgba};
use crate::projection::Viewport;
use crate::quantize::quantize_up;
use crate::transform::Transform;

/// Grid spacing and axis arrow length, in scene pixels
pub const REF_SIZE: f32 = 100.0;

pub const GRID_ALPHA: u8 = 10;

/// How far the grid reaches along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    /// Lines on each side of the centre line
    pub lines_per_side: usize,
    /// Distance from the centre to the outermost line
    pub half_extent: f32,
}

impl GridAxis {
    /// Cover `dimension` (a full viewport side) centred on the origin
    pub fn covering(dimension: f32, step: f32) -> Self {
        let half_extent = quantize_up(dimension / 2.0 + step, step);
        Self {
            lines_per_side: (half_extent / step).round() as usize,
            half_extent,
        }
    }

    /// Lines drawn off the centre line, both sides together
    pub fn offset_line_count(&self) -> usize {
        2 * self.lines_per_side
    }
}

/// Square lattice centred on the transform's origin, large enough for the viewport
pub fn draw_grid<C: Canvas + ?Sized>(canvas: &mut C, transform: &Transform, viewport: &Viewport, step: f32) {
    let color = Rgba::WHITE.with_alpha(GRID_ALPHA);
    let columns = GridAxis::covering(viewport.width(), step);
    let rows = GridAxis::covering(viewport.height(), step);
    let (w, h) = (columns.half_extent, rows.half_extent);

    let vertical = |x: f32| (Point3::new(x, -h, 0.0), Point3::new(x, h, 0.0));
    let horizontal = |y: f32| (Point3::new(-w, y, 0.0), Point3::new(w, y, 0.0));

    let (from, to) = vertical(0.0);
    canvas.line(transform, from, to, color);
    for i in 1..=columns.lines_per_side {
        let x = step * i as f32;
        for (from, to) in [vertical(x), vertical(-x)] {
            canvas.line(transform, from, to, color);
        }
    }

    let (from, to) = horizontal(0.0);
    canvas.line(transform, from, to, color);
    for i in 1..=rows.lines_per_side {
        let y = step * i as f32;
        for (from, to) in [horizontal(y), horizontal(-y)] {
            canvas.line(transform, from, to, color);
        }
    }
}

/// Red, green and blue arrows along the transform's X, Y and Z axes.
///
/// Arrow heads are shrunk by the transform's scale so they keep the same
/// apparent size wherever the marker is drawn.
pub fn draw_reference_frame<C: Canvas + ?Sized>(canvas: &mut C, transform: &Transform, alpha: u8) {
    let length = REF_SIZE;
    let head = (length * 0.1) * transform.marker_scale();
    let tip = Point3::new(0.0, -length, 0.0);
    let origin = Point3::origin();

    let x_color = Rgba::RED.with_alpha(alpha);
    canvas.line(transform, origin, Point3::new(length, 0.0, 0.0), x_color);
    canvas.cone(&transform.rotate_z(FRAC_PI_2), tip, head, head * 2.0, x_color);

    let y_color = Rgba::GREEN.with_alpha(alpha);
    canvas.line(transform, origin, Point3::new(0.0, length, 0.0), y_color);
    canvas.cone(&transform.rotate_z(PI), tip, head, head * 2.0, y_color);

    let z_color = Rgba::BLUE.with_alpha(alpha);
    canvas.line(transform, origin, Point3::new(0.0, 0.0, length), z_color);
    canvas.cone(&transform.rotate_x(-FRAC_PI_2), tip, head, head * 2.0, z_color);
}

/// Where the mode title goes, in screen pixels
pub fn title_position() -> Point2<f32> {
    Point2::new(50.0, 50.0)
}

/// Where the mode subtitle goes, in screen pixels
pub fn subtitle_position() -> Point2<f32> {
    Point2::new(50.0, 100.0)
}
