use glam::{Mat4, Vec2, Vec3};
use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl PanDirection {
    /// World-space unit offset for this direction
    pub fn offset(self) -> Vec3 {
        match self {
            PanDirection::Forward => Vec3::NEG_Z,
            PanDirection::Backward => Vec3::Z,
            PanDirection::Left => Vec3::NEG_X,
            PanDirection::Right => Vec3::X,
        }
    }
}

pub struct Camera {
    pub eye: Vec3,
    /// Point the camera orbits and stays aimed at
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(cfg: &CameraConfig, width: u32, height: u32) -> Self {
        let mut cam = Self {
            eye: cfg.eye,
            focus: cfg.target,
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            fov_y: cfg.fov_y_deg.to_radians(),
            aspect: 1.0,
            z_near: cfg.z_near,
            z_far: cfg.z_far,
        };
        cam.set_aspect(width, height);
        cam.set_look_at(cfg.target);
        cam
    }

    pub fn forward(&self) -> Vec3 {
        let cy = self.yaw;
        let cp = self.pitch.clamp(-1.5533, 1.5533); // just short of π/2
        Vec3::new(cy.cos() * cp.cos(), cp.sin(), cy.sin() * cp.cos()).normalize()
    }

    pub fn target(&self) -> Vec3 { self.eye + self.forward() }

    /// Zero-sized viewports keep the previous aspect
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target(), self.up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }

    pub fn set_look_at(&mut self, target: Vec3) {
        let dir = (target - self.eye).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.asin().clamp(-1.4, 1.4);
    }

    /// Translate the eye, then re-aim at the focus point
    pub fn pan(&mut self, direction: PanDirection, step: f32) {
        self.eye += direction.offset() * step;
        self.set_look_at(self.focus);
    }

    /// Screen position of a world point in NDC, `None` behind the camera
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_behind_origin_looking_at_it() {
        let cam = Camera::new(&CameraConfig::default(), 800, 600);
        assert_eq!(cam.eye, Vec3::new(0.0, 2.0, 5.0));
        let expected = (Vec3::ZERO - cam.eye).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-5));
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn pan_moves_eye_by_step() {
        let mut cam = Camera::new(&CameraConfig::default(), 800, 600);
        cam.pan(PanDirection::Forward, 0.1);
        cam.pan(PanDirection::Right, 0.1);
        cam.pan(PanDirection::Right, 0.1);
        assert!(cam.eye.abs_diff_eq(Vec3::new(0.2, 2.0, 4.9), 1e-5));
        cam.pan(PanDirection::Backward, 0.1);
        cam.pan(PanDirection::Left, 0.2);
        assert!(cam.eye.abs_diff_eq(Vec3::new(0.0, 2.0, 5.0), 1e-5));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::new(&CameraConfig::default(), 1024, 768);
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }

    #[test]
    fn panning_keeps_focus_centered() {
        let mut cam = Camera::new(&CameraConfig::default(), 1024, 768);
        for _ in 0..20 {
            cam.pan(PanDirection::Right, 0.1);
        }
        assert!(cam.eye.abs_diff_eq(Vec3::new(2.0, 2.0, 5.0), 1e-4));
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3, "origin drifted to {ndc:?}");

        for _ in 0..30 {
            cam.pan(PanDirection::Forward, 0.1);
        }
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3, "origin drifted to {ndc:?}");
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let cam = Camera::new(&CameraConfig::default(), 800, 600);
        assert!(cam.project(Vec3::new(0.0, 2.0, 50.0)).is_none());
    }

    #[test]
    fn zero_sized_viewport_keeps_aspect() {
        let mut cam = Camera::new(&CameraConfig::default(), 200, 100);
        cam.set_aspect(0, 100);
        assert_eq!(cam.aspect, 2.0);
    }
}
