//! The object gallery: shapes the composition modes place in the scene.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector2};

use crate::canvas::{Canvas, Rgba};
use crate::error::SketchError;
use crate::grid::draw_reference_frame;
use crate::params::{enforce_uniform, SCALE_RANGE};
use crate::transform::Transform;
use crate::ui::Ui;

/// Edge length shared by the rectangles and boxes
const OBJECT_SIZE: f32 = 100.0;

/// Orbiting squares in [`ObjectKind::RotatingRectangles`]
const RING_COUNT: usize = 7;
const RING_SQUARE: f32 = 20.0;
const RING_RADIUS: f32 = 100.0;

/// A drawable object variant, selected by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    Rectangle,
    RotatingRectangles,
    #[default]
    SideRectangle,
    Box3d,
    RotatingBox3d,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Rectangle,
        ObjectKind::RotatingRectangles,
        ObjectKind::SideRectangle,
        ObjectKind::Box3d,
        ObjectKind::RotatingBox3d,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn names() -> [&'static str; 5] {
        Self::ALL.map(ObjectKind::name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Rectangle => "Rectangle",
            ObjectKind::RotatingRectangles => "Rotating rectangles",
            ObjectKind::SideRectangle => "Side rectangle",
            ObjectKind::Box3d => "Box 3d",
            ObjectKind::RotatingBox3d => "Rotating box 3d",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ObjectKind::Rectangle | ObjectKind::SideRectangle => "A rectangle",
            ObjectKind::RotatingRectangles => "Rotating rectangle",
            ObjectKind::Box3d | ObjectKind::RotatingBox3d => "A 3d box",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            ObjectKind::Rectangle => "rect",
            ObjectKind::RotatingRectangles => "rotating-rects",
            ObjectKind::SideRectangle => "side-rect",
            ObjectKind::Box3d => "box",
            ObjectKind::RotatingBox3d => "rotating-box",
        }
    }

    /// Draw the object with `transform` as its origin, `time` in seconds
    pub fn draw<C: Canvas + ?Sized>(self, canvas: &mut C, transform: &Transform, time: f32) {
        let color = Rgba::WHITE;
        match self {
            ObjectKind::Rectangle => {
                let half = OBJECT_SIZE * 0.5;
                canvas.rect(transform, -half, -half, OBJECT_SIZE, OBJECT_SIZE, color);
            }
            ObjectKind::SideRectangle => {
                canvas.rect(
                    transform,
                    0.0,
                    -OBJECT_SIZE * 0.25,
                    OBJECT_SIZE,
                    OBJECT_SIZE * 0.5,
                    color,
                );
            }
            ObjectKind::RotatingRectangles => {
                let step = TAU / RING_COUNT as f32;
                for i in 0..RING_COUNT {
                    let square = transform.rotate(step * i as f32 + time * 0.5);
                    canvas.rect(
                        &square,
                        RING_RADIUS,
                        -RING_SQUARE * 0.5,
                        RING_SQUARE,
                        RING_SQUARE,
                        color,
                    );
                }
            }
            ObjectKind::Box3d => {
                canvas.cube(transform, Point3::origin(), OBJECT_SIZE, color);
            }
            ObjectKind::RotatingBox3d => {
                let spinning = transform.rotate_x(time * 0.1).rotate_z(time * 0.21);
                canvas.cube(&spinning, Point3::origin(), OBJECT_SIZE, color);
            }
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.name().to_lowercase() == wanted)
            .ok_or_else(|| SketchError::UnknownObject(s.to_string()))
    }
}

/// The selected object plus the placement applied to it wherever a mode draws it
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStage {
    pub kind: ObjectKind,
    pub position: Vector2<f32>,
    pub scale: Vector2<f32>,
    pub uniform_scale: bool,
    /// Mark the frame each object is drawn in
    pub show_reference: bool,
}

impl ObjectStage {
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.slider2("Object pos", &mut self.position, -100.0..=100.0);
        ui.slider2("Object scale", &mut self.scale, SCALE_RANGE);
        ui.checkbox("Uniform", &mut self.uniform_scale);
        enforce_uniform(&mut self.scale, self.uniform_scale);
    }

    /// Draw the selected object at `transform`
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, transform: &Transform, time: f32) {
        if self.show_reference {
            draw_reference_frame(canvas, transform, 255);
        }
        let placed = transform
            .translate(self.position.x, self.position.y)
            .scale(self.scale.x, self.scale.y);
        self.kind.draw(canvas, &placed, time);
    }
}

impl Default for ObjectStage {
    fn default() -> Self {
        Self {
            kind: ObjectKind::default(),
            position: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            uniform_scale: true,
            show_reference: false,
        }
    }
}
