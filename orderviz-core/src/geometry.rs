/// Wireframe primitives built from line segments
use nalgebra::Point3;
use std::f32::consts::TAU;

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point3<f32>,
    pub to: Point3<f32>,
}

impl Segment {
    pub fn new(from: Point3<f32>, to: Point3<f32>) -> Self {
        Self { from, to }
    }
}

/// An outline composed of segments
#[derive(Debug, Clone, Default)]
pub struct WireFrame {
    pub segments: Vec<Segment>,
}

impl WireFrame {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub fn add_segment(&mut self, from: Point3<f32>, to: Point3<f32>) {
        self.segments.push(Segment::new(from, to));
    }

    /// Connect the points in order and back to the first one
    pub fn add_loop(&mut self, points: &[Point3<f32>]) {
        for (i, from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.add_segment(*from, to);
        }
    }

    /// Axis-aligned rectangle in the z = 0 plane, `(x, y)` being its top-left corner
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        let mut frame = Self::with_capacity(4);
        frame.add_loop(&[
            Point3::new(x, y, 0.0),
            Point3::new(x + width, y, 0.0),
            Point3::new(x + width, y + height, 0.0),
            Point3::new(x, y + height, 0.0),
        ]);
        frame
    }

    /// The twelve edges of a cube centred on `center`
    pub fn cube(center: Point3<f32>, size: f32) -> Self {
        let half = size / 2.0;
        let corner = |sx: f32, sy: f32, sz: f32| {
            Point3::new(center.x + sx * half, center.y + sy * half, center.z + sz * half)
        };
        let mut frame = Self::with_capacity(12);

        // Front and back faces
        for &sz in &[1.0, -1.0] {
            frame.add_loop(&[
                corner(-1.0, -1.0, sz),
                corner(1.0, -1.0, sz),
                corner(1.0, 1.0, sz),
                corner(-1.0, 1.0, sz),
            ]);
        }

        // Edges joining them
        for &(sx, sy) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            frame.add_segment(corner(sx, sy, 1.0), corner(sx, sy, -1.0));
        }

        frame
    }

    /// Cone centred on `center` along the Y axis with its tip towards -Y
    pub fn cone(center: Point3<f32>, radius: f32, height: f32, sides: usize) -> Self {
        let sides = sides.max(3);
        let apex = Point3::new(center.x, center.y - height / 2.0, center.z);
        let base_y = center.y + height / 2.0;
        let rim: Vec<Point3<f32>> = (0..sides)
            .map(|i| {
                let angle = TAU * i as f32 / sides as f32;
                Point3::new(
                    center.x + radius * angle.cos(),
                    base_y,
                    center.z + radius * angle.sin(),
                )
            })
            .collect();

        let mut frame = Self::with_capacity(sides * 2);
        frame.add_loop(&rim);
        for point in &rim {
            frame.add_segment(*point, apex);
        }
        frame
    }
}
