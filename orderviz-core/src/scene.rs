//! Frame orchestration: the control panel layout, projection choice and
//! the order in which the scene is drawn.

use log::debug;

use crate::canvas::{Canvas, Rgba, TextSize};
use crate::grid::{draw_grid, draw_reference_frame, subtitle_position, title_position, REF_SIZE};
use crate::modes::{ModeGallery, ModeKind};
use crate::objects::{ObjectKind, ObjectStage};
use crate::params::ROTATION_RANGE;
use crate::projection::{Camera, Viewport};
use crate::transform::{RotationState, Transform};
use crate::ui::Ui;

/// Opacity of the world reference frame
pub const WORLD_FRAME_ALPHA: u8 = 90;

/// Scene-wide toggles
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub show_grid: bool,
    pub three_d: bool,
    /// Whole-scene rotation, only used in 3D
    pub rotation: RotationState,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            three_d: false,
            rotation: RotationState::new(1.0, 0.0, 0.5),
        }
    }
}

/// Everything the sketch remembers between frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sketch {
    pub settings: SceneSettings,
    pub stage: ObjectStage,
    pub modes: ModeGallery,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ModeKind {
        self.modes.current
    }

    pub fn object(&self) -> ObjectKind {
        self.stage.kind
    }

    /// Switch mode, applying the mode's object override if it has one
    pub fn select_mode(&mut self, mode: ModeKind) {
        debug!("mode selected: {}", mode.slug());
        self.modes.current = mode;
        if let Some(object) = mode.forced_object() {
            if object != self.stage.kind {
                debug!("{} forces object {}", mode.slug(), object.slug());
            }
            self.stage.kind = object;
        }
    }

    pub fn select_object(&mut self, object: ObjectKind) {
        debug!("object selected: {}", object.slug());
        self.stage.kind = object;
    }

    /// Lay out and bind every control for this frame
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.checkbox("Show reference frame", &mut self.stage.show_reference);
        ui.checkbox("Show grid", &mut self.settings.show_grid);
        ui.checkbox("3D", &mut self.settings.three_d);

        let mut object = self.stage.kind.index();
        if ui.combo("Object:", &mut object, &ObjectKind::names()) {
            if let Some(kind) = ObjectKind::from_index(object) {
                self.select_object(kind);
            }
        }

        let mut rotation = self.settings.rotation.to_array();
        if ui.slider3("Rotation 3d", &mut rotation, ROTATION_RANGE) {
            self.settings.rotation = RotationState::from(rotation);
        }
        self.stage.controls(ui);

        let mut mode = self.modes.current.index();
        if ui.combo("Mode:", &mut mode, &ModeKind::names()) {
            if let Some(kind) = ModeKind::from_index(mode) {
                self.select_mode(kind);
            }
        }

        self.modes.controls(ui);
    }

    pub fn camera(&self, viewport: Viewport) -> Camera {
        if self.settings.three_d {
            Camera::perspective(viewport)
        } else {
            Camera::orthographic(viewport)
        }
    }

    /// Origin at the viewport centre, tilted by the scene rotation in 3D
    pub fn root_transform(&self, viewport: &Viewport) -> Transform {
        let center = viewport.center();
        let root = Transform::identity().translate(center.x, center.y);
        if self.settings.three_d {
            root.rotate_scene(&self.settings.rotation)
        } else {
            root
        }
    }

    /// Draw one frame at `time` seconds
    pub fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C, viewport: &Viewport, time: f32) {
        let mode = self.modes.current;
        canvas.label(mode.name(), title_position(), TextSize::Large, Rgba::WHITE);
        canvas.label(mode.subtitle(), subtitle_position(), TextSize::Medium, Rgba::SKY);

        let root = self.root_transform(viewport);
        if self.settings.show_grid {
            draw_grid(canvas, &root, viewport, REF_SIZE);
        }
        draw_reference_frame(canvas, &root, WORLD_FRAME_ALPHA);

        self.modes.render(canvas, &root, &self.stage, time);
    }
}
