use glam::{Vec2, Vec3};
use crate::model::{Lighting, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Loading,
    Ready,
    Failed,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub dt: f32,
    pub asset: AssetStatus,
    pub speed: f32,
    pub heading: f32,
    /// Absent until the car has been attached
    pub car: Option<Transform>,
    pub wheels: Vec<Transform>,
    pub camera_eye: Vec3,
    /// Car position in NDC, `None` without a car or when it is behind the camera
    pub car_screen: Option<Vec2>,
    pub lighting: Lighting,
}

/// Presentation backend implemented by each host
pub trait View {
    fn present(&mut self, frame: &FrameSnapshot);
}
