/// Camera and projection utilities
use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};
use std::f32::consts::PI;

use crate::error::{Result, SketchError};
use crate::geometry::Segment;

/// Size of the drawing area in scene pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SketchError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// A point on screen: pixel coordinates plus normalized depth
pub type ScreenPoint = (f32, f32, f32);

/// Camera mapping scene pixels to the screen.
///
/// Both modes keep the z = 0 plane at one scene pixel per screen pixel with
/// Y pointing down, so the 2D and 3D views line up.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub viewport: Viewport,
    pub mode: ProjectionMode,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub const ORTHO_NEAR: f32 = -2.0;
    pub const ORTHO_FAR: f32 = 100.0;
    pub const PERSPECTIVE_FOV: f32 = PI / 3.0; // 60 degrees

    pub fn orthographic(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: ProjectionMode::Orthographic,
            fov: Self::PERSPECTIVE_FOV,
            near: Self::ORTHO_NEAR,
            far: Self::ORTHO_FAR,
        }
    }

    pub fn perspective(viewport: Viewport) -> Self {
        let distance = Self::eye_distance_for(&viewport, Self::PERSPECTIVE_FOV);
        Self {
            viewport,
            mode: ProjectionMode::Perspective,
            fov: Self::PERSPECTIVE_FOV,
            near: distance / 10.0,
            far: distance * 10.0,
        }
    }

    fn eye_distance_for(viewport: &Viewport, fov: f32) -> f32 {
        (viewport.height() / 2.0) / (fov / 2.0).tan()
    }

    /// Distance from the eye to the z = 0 plane in perspective mode
    pub fn eye_distance(&self) -> f32 {
        Self::eye_distance_for(&self.viewport, self.fov)
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Orthographic => Matrix4::identity(),
            ProjectionMode::Perspective => {
                let center = self.viewport.center();
                // +Z points at the viewer, as in the orthographic view
                let eye = Point3::new(center.x, center.y, self.eye_distance());
                let target = Point3::new(center.x, center.y, 0.0);
                Matrix4::look_at_rh(&eye, &target, &Vector3::y())
            }
        }
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        match self.mode {
            ProjectionMode::Perspective => {
                // Screen Y grows downwards
                let flip_y = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, -1.0, 1.0));
                flip_y * Matrix4::new_perspective(width / height, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                Matrix4::new_orthographic(0.0, width, height, 0.0, self.near, self.far)
            }
        }
    }

    fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn to_screen(&self, clip: &Vector4<f32>) -> ScreenPoint {
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * self.viewport.width();
        let screen_y = (1.0 - ndc_y) * 0.5 * self.viewport.height();

        (screen_x, screen_y, depth)
    }

    /// Project a scene point to screen space, `None` outside the depth range
    pub fn project_to_screen(&self, point: &Point3<f32>) -> Option<ScreenPoint> {
        let clip = self.view_projection() * point.to_homogeneous();
        if clip.w <= 0.0 || clip.z < -clip.w || clip.z > clip.w {
            return None;
        }
        Some(self.to_screen(&clip))
    }

    /// Project a segment, cutting it at the near and far planes
    pub fn project_segment(&self, segment: &Segment) -> Option<(ScreenPoint, ScreenPoint)> {
        let view_projection = self.view_projection();
        let a = view_projection * segment.from.to_homogeneous();
        let b = view_projection * segment.to.to_homogeneous();

        // Signed distances to the near (z >= -w) and far (z <= w) planes
        let planes = [(a.z + a.w, b.z + b.w), (a.w - a.z, b.w - b.z)];

        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        for (da, db) in planes {
            if da < 0.0 && db < 0.0 {
                return None;
            }
            if da < 0.0 {
                t0 = t0.max(da / (da - db));
            } else if db < 0.0 {
                t1 = t1.min(da / (da - db));
            }
        }
        if t0 > t1 {
            return None;
        }

        let start = a + (b - a) * t0;
        let end = a + (b - a) * t1;
        if start.w <= 0.0 || end.w <= 0.0 {
            return None;
        }
        Some((self.to_screen(&start), self.to_screen(&end)))
    }
}
