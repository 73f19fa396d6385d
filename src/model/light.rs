use glam::{Vec2, Vec3};
use crate::config::LightConfig;

/// Directional (shadow casting) light plus a flat ambient term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub sun_position: Vec3,
    pub sun_intensity: f32,
    pub casts_shadow: bool,
    pub ambient: f32,
}

impl Lighting {
    pub fn new(cfg: &LightConfig) -> Self {
        Self {
            sun_position: cfg.position,
            sun_intensity: cfg.intensity,
            casts_shadow: true,
            ambient: cfg.ambient,
        }
    }

    /// Move the sun over the ground plane following a pointer in NDC.
    /// Height is left untouched.
    pub fn sway(&mut self, ndc: Vec2, extent: f32) {
        self.sun_position.x = ndc.x * extent;
        self.sun_position.z = ndc.y * extent;
    }
}
