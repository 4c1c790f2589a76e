//! Drawing surface seam.
//!
//! Scene code issues primitives through [`Canvas`] together with the ambient
//! [`Transform`]; a backend decides what a line looks like. [`DrawList`]
//! records the primitives with their transforms already applied, which is
//! what the terminal rasterizer consumes and what tests inspect.

use nalgebra::{Point2, Point3};

use crate::geometry::{Segment, WireFrame};
use crate::transform::Transform;

/// Sides used when outlining cones
const CONE_SIDES: usize = 8;

/// 8-bit colour with opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const SKY: Rgba = Rgba::rgb(0, 128, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Label sizes, standing in for the two loaded font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Large,
    Medium,
}

/// A primitive drawer working under an ambient transform
pub trait Canvas {
    /// Draw a segment between two local points
    fn line(&mut self, transform: &Transform, from: Point3<f32>, to: Point3<f32>, color: Rgba);

    /// Screen-space text, unaffected by any transform
    fn label(&mut self, text: &str, position: Point2<f32>, size: TextSize, color: Rgba);

    fn wireframe(&mut self, transform: &Transform, frame: &WireFrame, color: Rgba) {
        for segment in &frame.segments {
            self.line(transform, segment.from, segment.to, color);
        }
    }

    /// Unfilled rectangle with its top-left corner at `(x, y)`
    fn rect(&mut self, transform: &Transform, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.wireframe(transform, &WireFrame::rectangle(x, y, width, height), color);
    }

    fn cube(&mut self, transform: &Transform, center: Point3<f32>, size: f32, color: Rgba) {
        self.wireframe(transform, &WireFrame::cube(center, size), color);
    }

    /// Cone centred on `center`, tip towards local -Y
    fn cone(&mut self, transform: &Transform, center: Point3<f32>, radius: f32, height: f32, color: Rgba) {
        self.wireframe(
            transform,
            &WireFrame::cone(center, radius, height, CONE_SIDES),
            color,
        );
    }
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A segment in scene space (ambient transform applied)
    Line { segment: Segment, color: Rgba },
    Label {
        text: String,
        position: Point2<f32>,
        size: TextSize,
        color: Rgba,
    },
}

/// A [`Canvas`] that records everything drawn in one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Segment, Rgba)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { segment, color } => Some((segment, *color)),
            DrawCommand::Label { .. } => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, Point2<f32>, TextSize, Rgba)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Label {
                text,
                position,
                size,
                color,
            } => Some((text.as_str(), *position, *size, *color)),
            DrawCommand::Line { .. } => None,
        })
    }
}

impl Canvas for DrawList {
    fn line(&mut self, transform: &Transform, from: Point3<f32>, to: Point3<f32>, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            segment: Segment::new(transform.apply(&from), transform.apply(&to)),
            color,
        });
    }

    fn label(&mut self, text: &str, position: Point2<f32>, size: TextSize, color: Rgba) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_recorded_in_scene_space() {
        let mut list = DrawList::new();
        let xf = Transform::identity().translate(10.0, 20.0).scale(2.0, 2.0);
        list.rect(&xf, 0.0, 0.0, 5.0, 5.0, Rgba::WHITE);

        assert_eq!(list.len(), 4);
        let (first, color) = list.lines().next().map(|(s, c)| (*s, c)).unwrap();
        assert_eq!(color, Rgba::WHITE);
        assert_eq!(first.from, Point3::new(10.0, 20.0, 0.0));
        assert_eq!(first.to, Point3::new(20.0, 20.0, 0.0));
    }

    #[test]
    fn test_labels_are_separate_from_lines() {
        let mut list = DrawList::new();
        list.label("hello", Point2::new(50.0, 50.0), TextSize::Large, Rgba::WHITE);
        assert_eq!(list.lines().count(), 0);
        assert_eq!(list.labels().map(|l| l.0).collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Rgba::RED.with_alpha(50), Rgba { r: 255, g: 0, b: 0, a: 50 });
    }
}
