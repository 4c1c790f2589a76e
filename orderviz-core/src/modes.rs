//! The mode gallery: fixed orderings of translate, rotate and scale.
//!
//! Every mode owns its parameters for the whole run. Each frame the
//! orchestrator binds them to the control panel ([`ModeGallery::controls`])
//! and then renders the selected mode ([`ModeGallery::render`]), which
//! composes its transforms on top of the ambient one and hands the result
//! to the object stage.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::Vector2;

use crate::canvas::Canvas;
use crate::error::SketchError;
use crate::grid::{draw_reference_frame, REF_SIZE};
use crate::objects::{ObjectKind, ObjectStage};
use crate::params::{enforce_uniform, ROTATION_RANGE, SCALE_RANGE};
use crate::quantize::quantize_vec2;
use crate::transform::Transform;
use crate::ui::Ui;

/// Opacity of the intermediate markers drawn by "Show steps"
pub const STEP_ALPHA: u8 = 50;

/// Snap size for quantized scales
pub const SCALE_STEP: f32 = 0.25;

/// Snap size for quantized translations
pub const TRANSLATION_STEP: f32 = REF_SIZE * 0.5;

/// A composition mode, selected by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeKind {
    #[default]
    Tentacle,
    Trs,
    Tsr,
    Rts,
}

impl ModeKind {
    pub const ALL: [ModeKind; 4] = [ModeKind::Tentacle, ModeKind::Trs, ModeKind::Tsr, ModeKind::Rts];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn names() -> [&'static str; 4] {
        Self::ALL.map(ModeKind::name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Tentacle => "A tentacle",
            ModeKind::Trs => "Transformations",
            ModeKind::Tsr | ModeKind::Rts => "Order matters!",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            ModeKind::Tentacle => "Composition of transformations and animation",
            ModeKind::Trs => "Translate -> Rotate -> Scale",
            ModeKind::Tsr => "Translate -> Scale -> Rotate",
            ModeKind::Rts => "Rotate -> Translate -> Scale",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            ModeKind::Tentacle => "tentacle",
            ModeKind::Trs => "trs",
            ModeKind::Tsr => "tsr",
            ModeKind::Rts => "rts",
        }
    }

    /// Object this mode switches to whenever it is selected
    pub fn forced_object(self) -> Option<ObjectKind> {
        match self {
            ModeKind::Tentacle => Some(ObjectKind::SideRectangle),
            ModeKind::Trs | ModeKind::Tsr | ModeKind::Rts => None,
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.subtitle())
    }
}

impl FromStr for ModeKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| SketchError::UnknownMode(s.to_string()))
    }
}

/// Translate, then rotate, then scale
#[derive(Debug, Clone, PartialEq)]
pub struct TrsParams {
    pub rotation: f32,
    pub translation: Vector2<f32>,
    pub scale: Vector2<f32>,
    pub uniform_scale: bool,
}

impl Default for TrsParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            translation: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            uniform_scale: true,
        }
    }
}

impl TrsParams {
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.slider("Rot radians", &mut self.rotation, ROTATION_RANGE);
        ui.slider2("Position", &mut self.translation, -700.0..=700.0);
        ui.slider2("Scale", &mut self.scale, SCALE_RANGE);
        ui.checkbox("Uniform", &mut self.uniform_scale);
    }

    pub fn normalize(&mut self) {
        enforce_uniform(&mut self.scale, self.uniform_scale);
    }

    pub fn compose(&self, ambient: &Transform) -> Transform {
        ambient
            .translate(self.translation.x, self.translation.y)
            .rotate(self.rotation)
            .scale(self.scale.x, self.scale.y)
    }
}

/// Translate, then scale, then rotate
#[derive(Debug, Clone, PartialEq)]
pub struct TsrParams {
    pub rotation: f32,
    pub translation: Vector2<f32>,
    pub scale: Vector2<f32>,
    pub uniform_scale: bool,
}

impl Default for TsrParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            translation: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            uniform_scale: false,
        }
    }
}

impl TsrParams {
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.slider("Rot radians", &mut self.rotation, ROTATION_RANGE);
        ui.slider2("Pos", &mut self.translation, -700.0..=700.0);
        ui.slider2("Scale", &mut self.scale, SCALE_RANGE);
        ui.checkbox("Uniform", &mut self.uniform_scale);
    }

    pub fn normalize(&mut self) {
        enforce_uniform(&mut self.scale, self.uniform_scale);
    }

    pub fn compose(&self, ambient: &Transform) -> Transform {
        ambient
            .translate(self.translation.x, self.translation.y)
            .scale(self.scale.x, self.scale.y)
            .rotate(self.rotation)
    }
}

/// Rotate, translate, scale, then translate again
#[derive(Debug, Clone, PartialEq)]
pub struct RtsParams {
    pub rotation: f32,
    pub translation: Vector2<f32>,
    pub scale: Vector2<f32>,
    pub uniform_scale: bool,
    pub translation2: Vector2<f32>,
    /// Snap scale and translations to grid steps
    pub quantize: bool,
    /// Mark the frame after each stage
    pub show_steps: bool,
}

impl Default for RtsParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            translation: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            uniform_scale: true,
            translation2: Vector2::zeros(),
            quantize: false,
            show_steps: false,
        }
    }
}

/// The ambient transform after each RTS stage
#[derive(Debug, Clone, Copy)]
pub struct RtsStages {
    pub rotated: Transform,
    pub translated: Transform,
    pub scaled: Transform,
    pub placed: Transform,
}

impl RtsParams {
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.checkbox("Quantize", &mut self.quantize);
        ui.checkbox("Show steps", &mut self.show_steps);
        ui.slider("Rotation (radians)", &mut self.rotation, ROTATION_RANGE);
        ui.slider2("Translation", &mut self.translation, 0.0..=700.0);
        ui.slider2("Scale", &mut self.scale, SCALE_RANGE);
        ui.checkbox("Uniform", &mut self.uniform_scale);
        ui.slider2("Translation2", &mut self.translation2, 0.0..=700.0);
    }

    /// Apply the uniform toggle, then snap values when quantizing.
    ///
    /// Snapped values are kept, so the controls show them too.
    pub fn normalize(&mut self) {
        enforce_uniform(&mut self.scale, self.uniform_scale);
        let pass = !self.quantize;
        self.scale = quantize_vec2(&self.scale, SCALE_STEP, pass);
        self.translation = quantize_vec2(&self.translation, TRANSLATION_STEP, pass);
        self.translation2 = quantize_vec2(&self.translation2, TRANSLATION_STEP, pass);
    }

    pub fn stages(&self, ambient: &Transform) -> RtsStages {
        let rotated = ambient.rotate(self.rotation);
        let translated = rotated.translate(self.translation.x, self.translation.y);
        let scaled = translated.scale(self.scale.x, self.scale.y);
        let placed = scaled.translate(self.translation2.x, self.translation2.y);
        RtsStages {
            rotated,
            translated,
            scaled,
            placed,
        }
    }

    pub fn compose(&self, ambient: &Transform) -> Transform {
        self.stages(ambient).placed
    }
}

/// Rings of animated joint chains
#[derive(Debug, Clone, PartialEq)]
pub struct TentacleParams {
    pub num_joints: u32,
    pub num_tentacles: u32,
    /// Rotation added at every joint
    pub base_rotation: f32,
    /// Amplitude of the wiggle
    pub rotation_range: f32,
    /// Distance between joints
    pub dist: f32,
    /// Wiggle phase shift per joint
    pub phase: f32,
    pub anim_speed: f32,
    /// Spin of the whole assembly, radians per second
    pub rot_speed: f32,
    pub scale_factor: f32,
}

impl Default for TentacleParams {
    fn default() -> Self {
        Self {
            num_joints: 7,
            num_tentacles: 9,
            base_rotation: 0.0,
            rotation_range: 1.0,
            dist: 100.0,
            phase: 0.9,
            anim_speed: 1.0,
            rot_speed: 0.0,
            scale_factor: 0.9,
        }
    }
}

impl TentacleParams {
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.slider_int("Num joints", &mut self.num_joints, 1..=10);
        ui.slider_int("Num tentacles", &mut self.num_tentacles, 1..=40);
        ui.slider("Base rotation", &mut self.base_rotation, ROTATION_RANGE);
        ui.slider("Rot range", &mut self.rotation_range, ROTATION_RANGE);
        ui.slider("Joint distance", &mut self.dist, 10.0..=200.0);
        ui.slider("Phase", &mut self.phase, 0.0..=PI);
        ui.slider("Wiggle speed", &mut self.anim_speed, 0.0..=1.0);
        ui.slider("Rot speed", &mut self.rot_speed, -1.0..=1.0);
        ui.slider("Scale factor", &mut self.scale_factor, 0.5..=1.0);
    }

    /// Angular offset of an arm around the centre
    pub fn arm_angle(&self, arm: u32) -> f32 {
        TAU / self.num_tentacles.max(1) as f32 * arm as f32
    }

    /// Scale applied at a joint, on top of the joints before it
    pub fn joint_scale(&self, joint: u32) -> f32 {
        self.scale_factor.powi(joint as i32)
    }

    /// Rotation applied at a joint at `time` seconds
    pub fn joint_rotation(&self, joint: u32, time: f32) -> f32 {
        let wave = (time * self.anim_speed + self.phase * joint as f32 + FRAC_PI_2).sin();
        self.base_rotation + wave * self.rotation_range
    }

    /// Transforms the object is drawn at, arm by arm, joint by joint
    pub fn joint_transforms(&self, ambient: &Transform, time: f32) -> Vec<Transform> {
        let assembly = ambient.rotate(time * self.rot_speed);
        let mut placements = Vec::with_capacity((self.num_tentacles * self.num_joints) as usize);

        for arm in 0..self.num_tentacles {
            let mut current = assembly.rotate(self.arm_angle(arm));
            for joint in 0..self.num_joints {
                let at_joint = current
                    .rotate(self.joint_rotation(joint, time))
                    .scale_uniform(self.joint_scale(joint));
                placements.push(at_joint);
                current = at_joint.translate(self.dist, 0.0);
            }
        }

        placements
    }
}

/// The selected mode plus every mode's parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeGallery {
    pub current: ModeKind,
    pub trs: TrsParams,
    pub tsr: TsrParams,
    pub rts: RtsParams,
    pub tentacle: TentacleParams,
}

impl ModeGallery {
    /// Bind the selected mode's parameters to the panel
    pub fn controls<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.heading(self.current.subtitle());
        match self.current {
            ModeKind::Tentacle => self.tentacle.controls(ui),
            ModeKind::Trs => self.trs.controls(ui),
            ModeKind::Tsr => self.tsr.controls(ui),
            ModeKind::Rts => self.rts.controls(ui),
        }
    }

    /// Compose the selected mode on `ambient` and draw the stage's object
    pub fn render<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        ambient: &Transform,
        stage: &ObjectStage,
        time: f32,
    ) {
        match self.current {
            ModeKind::Trs => {
                self.trs.normalize();
                stage.draw(canvas, &self.trs.compose(ambient), time);
            }
            ModeKind::Tsr => {
                self.tsr.normalize();
                stage.draw(canvas, &self.tsr.compose(ambient), time);
            }
            ModeKind::Rts => {
                self.rts.normalize();
                let stages = self.rts.stages(ambient);
                if self.rts.show_steps {
                    for step in [stages.rotated, stages.translated, stages.scaled] {
                        draw_reference_frame(canvas, &step, STEP_ALPHA);
                    }
                }
                stage.draw(canvas, &stages.placed, time);
            }
            ModeKind::Tentacle => {
                let placements = self.tentacle.joint_transforms(ambient, time);
                debug!("tentacle: {} joints placed", placements.len());
                for placement in &placements {
                    stage.draw(canvas, placement, time);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawList;
    use crate::ui::testing::ScriptedUi;
    use nalgebra::Point3;

    fn close(a: &Transform, b: &Transform) -> bool {
        (a.matrix() - b.matrix()).norm() < 1e-3
    }

    #[test]
    fn test_registry() {
        assert_eq!(ModeKind::default(), ModeKind::Tentacle);
        assert_eq!(ModeKind::from_index(3), Some(ModeKind::Rts));
        assert_eq!(ModeKind::from_index(4), None);
        assert_eq!(ModeKind::Rts.subtitle(), "Rotate -> Translate -> Scale");
        assert_eq!("TSR".parse::<ModeKind>(), Ok(ModeKind::Tsr));
        assert!("srt".parse::<ModeKind>().is_err());
    }

    #[test]
    fn test_only_tentacle_forces_an_object() {
        assert_eq!(ModeKind::Tentacle.forced_object(), Some(ObjectKind::SideRectangle));
        for kind in [ModeKind::Trs, ModeKind::Tsr, ModeKind::Rts] {
            assert_eq!(kind.forced_object(), None);
        }
    }

    #[test]
    fn test_uniform_defaults() {
        assert!(TrsParams::default().uniform_scale);
        assert!(!TsrParams::default().uniform_scale);
        assert!(RtsParams::default().uniform_scale);
    }

    #[test]
    fn test_uniform_applies_before_composing() {
        let mut gallery = ModeGallery {
            current: ModeKind::Trs,
            ..ModeGallery::default()
        };
        gallery.trs.scale = Vector2::new(2.0, 7.0);
        gallery.tsr.scale = Vector2::new(2.0, 7.0);
        gallery.tsr.uniform_scale = true;
        gallery.rts.scale = Vector2::new(2.0, 7.0);

        let stage = ObjectStage::default();
        for kind in [ModeKind::Trs, ModeKind::Tsr, ModeKind::Rts] {
            gallery.current = kind;
            gallery.render(&mut DrawList::new(), &Transform::identity(), &stage, 0.0);
        }
        assert_eq!(gallery.trs.scale, Vector2::new(2.0, 2.0));
        assert_eq!(gallery.tsr.scale, Vector2::new(2.0, 2.0));
        assert_eq!(gallery.rts.scale, Vector2::new(2.0, 2.0));
    }

    #[test]
    fn test_rts_is_rotate_translate_scale_translate() {
        let params = RtsParams {
            rotation: 0.8,
            translation: Vector2::new(120.0, 40.0),
            scale: Vector2::new(2.0, 0.5),
            uniform_scale: false,
            translation2: Vector2::new(30.0, 60.0),
            ..RtsParams::default()
        };
        let stepwise = Transform::identity()
            .rotate(0.8)
            .translate(120.0, 40.0)
            .scale(2.0, 0.5)
            .translate(30.0, 60.0);
        assert!(close(&params.compose(&Transform::identity()), &stepwise));

        // Point by point: the last operation touches the point first
        let p = Point3::new(5.0, -3.0, 0.0);
        let moved = Point3::new(p.x + 30.0, p.y + 60.0, 0.0);
        let scaled = Point3::new(moved.x * 2.0, moved.y * 0.5, 0.0);
        let shifted = Point3::new(scaled.x + 120.0, scaled.y + 40.0, 0.0);
        let (s, c) = 0.8_f32.sin_cos();
        let rotated = Point3::new(c * shifted.x - s * shifted.y, s * shifted.x + c * shifted.y, 0.0);
        let composed = params.compose(&Transform::identity()).apply(&p);
        assert!((composed - rotated).norm() < 1e-3);
    }

    #[test]
    fn test_rts_quantize_writes_back() {
        let mut params = RtsParams {
            quantize: true,
            uniform_scale: false,
            translation: Vector2::new(130.0, 20.0),
            translation2: Vector2::new(74.0, 76.0),
            scale: Vector2::new(1.1, 2.9),
            ..RtsParams::default()
        };
        params.normalize();
        assert_eq!(params.translation, Vector2::new(150.0, 0.0));
        assert_eq!(params.translation2, Vector2::new(50.0, 100.0));
        assert_eq!(params.scale, Vector2::new(1.0, 3.0));

        let snapped = params.clone();
        params.normalize();
        assert_eq!(params, snapped);
    }

    #[test]
    fn test_rts_show_steps_draws_ghost_markers() {
        let stage = ObjectStage::default();
        let mut gallery = ModeGallery {
            current: ModeKind::Rts,
            ..ModeGallery::default()
        };
        let mut plain = DrawList::new();
        gallery.render(&mut plain, &Transform::identity(), &stage, 0.0);

        gallery.rts.show_steps = true;
        let mut stepped = DrawList::new();
        gallery.render(&mut stepped, &Transform::identity(), &stage, 0.0);

        let ghosts = stepped.lines().filter(|(_, c)| c.a == STEP_ALPHA).count();
        let mut one_marker = DrawList::new();
        draw_reference_frame(&mut one_marker, &Transform::identity(), STEP_ALPHA);
        assert_eq!(ghosts, 3 * one_marker.len());
        assert_eq!(stepped.len(), plain.len() + ghosts);
    }

    #[test]
    fn test_orders_differ() {
        let rotation = 0.9;
        let translation = Vector2::new(200.0, 50.0);
        let scale = Vector2::new(3.0, 0.5);
        let trs = TrsParams {
            rotation,
            translation,
            scale,
            uniform_scale: false,
        };
        let tsr = TsrParams {
            rotation,
            translation,
            scale,
            uniform_scale: false,
        };
        let rts = RtsParams {
            rotation,
            translation,
            scale,
            uniform_scale: false,
            ..RtsParams::default()
        };
        let ambient = Transform::identity();
        let results = [trs.compose(&ambient), tsr.compose(&ambient), rts.compose(&ambient)];
        for i in 0..results.len() {
            for j in (i + 1)..results.len() {
                assert!(!close(&results[i], &results[j]), "orders {} and {} agree", i, j);
            }
        }
    }

    #[test]
    fn test_tentacle_scale_and_spacing() {
        let params = TentacleParams {
            num_joints: 5,
            num_tentacles: 6,
            scale_factor: 0.8,
            ..TentacleParams::default()
        };
        for joint in 0..params.num_joints {
            let expected = 0.8_f32.powi(joint as i32);
            assert!((params.joint_scale(joint) - expected).abs() < 1e-6);
        }
        assert_eq!(params.joint_scale(0), 1.0);

        let angles: Vec<f32> = (0..params.num_tentacles).map(|arm| params.arm_angle(arm)).collect();
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - TAU / 6.0).abs() < 1e-5);
        }
        // The gap from the last arm back to the first closes the circle
        assert!((angles[0] + TAU - angles[5] - TAU / 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_tentacle_chain() {
        let params = TentacleParams {
            num_joints: 3,
            num_tentacles: 4,
            rotation_range: 0.0,
            base_rotation: 0.0,
            scale_factor: 0.5,
            ..TentacleParams::default()
        };
        let placements = params.joint_transforms(&Transform::identity(), 0.0);
        assert_eq!(placements.len(), 12);

        // With no wiggle, the first arm runs straight along +X
        let origins: Vec<Point3<f32>> = placements[..3].iter().map(|t| t.origin()).collect();
        assert!((origins[0] - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-3);
        assert!((origins[1] - Point3::new(100.0, 0.0, 0.0)).norm() < 1e-3);
        // Scales accumulate: the second step is walked at scale 0.5
        assert!((origins[2] - Point3::new(150.0, 0.0, 0.0)).norm() < 1e-3);

        // Second arm is a quarter turn around
        let second = placements[3 + 1].origin();
        assert!((second - Point3::new(0.0, 100.0, 0.0)).norm() < 1e-3);
    }

    #[test]
    fn test_tentacle_draws_each_joint() {
        let mut gallery = ModeGallery::default();
        gallery.tentacle.num_joints = 2;
        gallery.tentacle.num_tentacles = 3;
        let stage = ObjectStage::default();
        let mut list = DrawList::new();
        gallery.render(&mut list, &Transform::identity(), &stage, 1.5);
        assert_eq!(list.len(), 2 * 3 * 4);
    }

    #[test]
    fn test_controls_follow_the_selected_mode() {
        let mut gallery = ModeGallery::default();
        let mut ui = ScriptedUi::new();
        ui.ints.insert("Num joints".into(), 99);
        gallery.controls(&mut ui);
        assert_eq!(gallery.tentacle.num_joints, 10);
        assert!(ui.shown.contains(&"Scale factor".to_string()));

        gallery.current = ModeKind::Rts;
        let mut ui = ScriptedUi::new();
        ui.bools.insert("Quantize".into(), true);
        gallery.controls(&mut ui);
        assert!(gallery.rts.quantize);
        assert_eq!(ui.shown.first().map(String::as_str), Some("Quantize"));
    }
}
