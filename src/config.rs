use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be finite and greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("wheel name pattern must not be empty")]
    EmptyWheelPattern,
}

/// Tuning for the car's speed and steering.
///
/// Speeds are in world units per second. The defaults reproduce a car that
/// moves 0.1 units per frame at 60 Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    /// Heading change per turn key event, radians
    pub turn_step: f32,
}

impl Default for DrivingConfig {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            acceleration: 0.6,
            turn_step: 0.02,
        }
    }
}

impl DrivingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_speed", self.max_speed)?;
        positive("acceleration", self.acceleration)?;
        positive("turn_step", self.turn_step)
    }
}

/// Local axis of a wheel mesh that it spins around.
///
/// Depends on how the car asset was modelled, so it is configuration rather
/// than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    pub radius: f32,
    pub spin_axis: SpinAxis,
    /// Nodes whose name contains this (ignoring ASCII case) are wheels
    pub name_pattern: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            spin_axis: SpinAxis::Z,
            name_pattern: "wheel".to_string(),
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("radius", self.radius)?;
        if self.name_pattern.is_empty() {
            return Err(ConfigError::EmptyWheelPattern);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Eye displacement per pan key event
    pub pan_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::ZERO,
            fov_y_deg: 75.0,
            z_near: 0.1,
            z_far: 1000.0,
            pan_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightConfig {
    pub position: Vec3,
    pub intensity: f32,
    pub ambient: f32,
    /// Distance the light travels from the origin when the pointer reaches a viewport edge
    pub sway_extent: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 10.0, 5.0),
            intensity: 1.0,
            ambient: 0.5,
            sway_extent: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoConfig {
    pub driving: DrivingConfig,
    pub wheels: WheelConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.driving.validate()?;
        self.wheels.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
