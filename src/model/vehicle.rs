use crate::config::DrivingConfig;

/// Speed and heading of the car.
///
/// Negative speed drives the car forward, positive speed reverses it. The
/// heading accumulates without being wrapped into `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleState {
    pub speed: f32,
    pub heading: f32,
}

impl VehicleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accelerate_forward(&mut self, cfg: &DrivingConfig) {
        self.speed = (self.speed - cfg.acceleration).max(-cfg.max_speed);
    }

    pub fn accelerate_backward(&mut self, cfg: &DrivingConfig) {
        self.speed = (self.speed + cfg.acceleration).min(cfg.max_speed);
    }

    pub fn brake(&mut self) {
        self.speed = 0.0;
    }

    pub fn turn_left(&mut self, cfg: &DrivingConfig) {
        self.heading += cfg.turn_step;
    }

    pub fn turn_right(&mut self, cfg: &DrivingConfig) {
        self.heading -= cfg.turn_step;
    }

    /// Wheel angular velocity (rad/s) for a wheel of the given radius rolling at the current speed
    pub fn wheel_rate(&self, wheel_radius: f32) -> f32 {
        let circumference = 2.0 * std::f32::consts::PI * wheel_radius;
        (self.speed / circumference) * 2.0 * std::f32::consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_never_exceeds_max_speed() {
        let cfg = DrivingConfig::default();
        let mut state = VehicleState::new();
        for _ in 0..100 {
            state.accelerate_forward(&cfg);
            assert!(state.speed >= -cfg.max_speed);
        }
        assert_eq!(state.speed, -cfg.max_speed);
    }

    #[test]
    fn backward_never_exceeds_max_speed() {
        let cfg = DrivingConfig::default();
        let mut state = VehicleState::new();
        for _ in 0..100 {
            state.accelerate_backward(&cfg);
            assert!(state.speed <= cfg.max_speed);
        }
        assert_eq!(state.speed, cfg.max_speed);
    }

    #[test]
    fn forward_steps_by_acceleration() {
        let cfg = DrivingConfig { max_speed: 1.0, acceleration: 0.25, turn_step: 0.1 };
        let mut state = VehicleState::new();
        state.accelerate_forward(&cfg);
        assert_eq!(state.speed, -0.25);
        state.accelerate_backward(&cfg);
        state.accelerate_backward(&cfg);
        assert_eq!(state.speed, 0.25);
    }

    #[test]
    fn brake_zeroes_any_speed() {
        let cfg = DrivingConfig::default();
        let mut state = VehicleState { speed: -cfg.max_speed, heading: 1.0 };
        state.brake();
        assert_eq!(state.speed, 0.0);
        state.speed = 3.3;
        state.brake();
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.heading, 1.0);
    }

    #[test]
    fn heading_is_not_wrapped() {
        let cfg = DrivingConfig::default();
        let mut state = VehicleState::new();
        for _ in 0..1000 {
            state.turn_left(&cfg);
        }
        assert!((state.heading - 1000.0 * cfg.turn_step).abs() < 1e-2);
        assert!(state.heading > std::f32::consts::TAU);
    }

    #[test]
    fn wheel_rate_is_speed_over_radius() {
        let state = VehicleState { speed: 0.1, heading: 0.0 };
        assert!((state.wheel_rate(0.3) - 0.1 / 0.3).abs() < 1e-6);
    }
}
