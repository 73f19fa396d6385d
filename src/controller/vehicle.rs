use tracing::{debug, info, trace};

use crate::config::{DrivingConfig, SpinAxis, WheelConfig};
use crate::model::{NodeId, Scene, VehicleState};

/// Turns driving intents into motion of the car and its wheels.
///
/// Holds handles into a [`Scene`] but never creates or removes nodes. Until
/// [`attach`](Self::attach) is called every per-frame update is a no-op.
pub struct VehicleController {
    pub state: VehicleState,
    driving: DrivingConfig,
    wheel_cfg: WheelConfig,
    car: Option<NodeId>,
    wheels: Vec<NodeId>,
}

impl VehicleController {
    pub fn new(driving: DrivingConfig, wheel_cfg: WheelConfig) -> Self {
        Self {
            state: VehicleState::new(),
            driving,
            wheel_cfg,
            car: None,
            wheels: Vec::new(),
        }
    }

    pub fn car(&self) -> Option<NodeId> {
        self.car
    }

    pub fn wheels(&self) -> &[NodeId] {
        &self.wheels
    }

    /// Take control of the car rooted at `root`.
    ///
    /// Wheels are the nodes below `root` whose name contains the configured
    /// pattern, ignoring ASCII case. Calling this again is ignored.
    pub fn attach(&mut self, scene: &Scene, root: NodeId) {
        if self.car.is_some() {
            debug!("car already attached, ignoring {:?}", root);
            return;
        }
        let pattern = self.wheel_cfg.name_pattern.to_ascii_lowercase();
        for id in scene.subtree(root).into_iter().skip(1) {
            let Some(node) = scene.node(id) else { continue };
            if node.name.to_ascii_lowercase().contains(&pattern) {
                debug!(wheel = %node.name, "wheel detected");
                self.wheels.push(id);
            }
        }
        self.car = Some(root);
        info!(wheels = self.wheels.len(), "car attached");
    }

    pub fn on_accelerate_forward(&mut self) {
        self.state.accelerate_forward(&self.driving);
    }

    pub fn on_accelerate_backward(&mut self) {
        self.state.accelerate_backward(&self.driving);
    }

    pub fn on_brake(&mut self) {
        self.state.brake();
    }

    pub fn on_turn_left(&mut self) {
        self.state.turn_left(&self.driving);
    }

    pub fn on_turn_right(&mut self) {
        self.state.turn_right(&self.driving);
    }

    /// Move the car along its heading and face it that way
    pub fn integrate(&self, scene: &mut Scene, dt: f32) {
        let Some(car) = self.car else { return };
        let Some(t) = scene.transform_mut(car) else { return };
        let VehicleState { speed, heading } = self.state;
        t.position.x -= heading.sin() * speed * dt;
        t.position.z -= heading.cos() * speed * dt;
        t.rotation.y = heading;
    }

    /// Roll every wheel about its spin axis at the rate matching the car's speed
    pub fn spin_wheels(&self, scene: &mut Scene, dt: f32) {
        if self.wheels.is_empty() {
            return;
        }
        let rate = self.state.wheel_rate(self.wheel_cfg.radius);
        let delta = rate * dt;
        for &id in &self.wheels {
            if let Some(t) = scene.transform_mut(id) {
                match self.wheel_cfg.spin_axis {
                    SpinAxis::X => t.rotation.x += delta,
                    SpinAxis::Y => t.rotation.y += delta,
                    SpinAxis::Z => t.rotation.z += delta,
                }
            }
        }
        trace!(rate, wheels = self.wheels.len(), "wheels spun");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transform;
    use glam::Vec3;

    fn rig(scene: &mut Scene) -> NodeId {
        let root = scene.add("car", None, Transform::default());
        scene.add("Body", Some(root), Transform::default());
        scene.add("Wheel_FL", Some(root), Transform::default());
        scene.add("rear_WHEEL_left", Some(root), Transform::default());
        scene.add("Spoiler", Some(root), Transform::default());
        root
    }

    fn controller() -> VehicleController {
        VehicleController::new(DrivingConfig::default(), WheelConfig::default())
    }

    #[test]
    fn attach_matches_wheels_by_substring() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let mut ctl = controller();
        ctl.attach(&scene, root);
        assert_eq!(ctl.car(), Some(root));
        let names: Vec<_> = ctl
            .wheels()
            .iter()
            .map(|id| scene.node(*id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["Wheel_FL", "rear_WHEEL_left"]);

        // wheel list is fixed once attached
        ctl.attach(&scene, root);
        assert_eq!(ctl.wheels().len(), 2);
    }

    #[test]
    fn no_matching_nodes_means_no_wheels() {
        let mut scene = Scene::new();
        let root = scene.add("car", None, Transform::default());
        scene.add("chassis", Some(root), Transform::default());
        let mut ctl = controller();
        ctl.attach(&scene, root);
        assert!(ctl.wheels().is_empty());
        ctl.state.speed = 1.0;
        ctl.spin_wheels(&mut scene, 1.0);
    }

    #[test]
    fn integrate_without_car_is_noop() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let mut ctl = controller();
        ctl.state.speed = -0.1;
        ctl.integrate(&mut scene, 1.0);
        assert_eq!(scene.transform(root).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn integrate_forward_along_heading_zero() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let mut ctl = controller();
        ctl.attach(&scene, root);
        ctl.state.speed = -0.1;
        ctl.integrate(&mut scene, 1.0);
        let t = scene.transform(root).unwrap();
        assert_eq!(t.position.x, 0.0);
        assert!((t.position.z - 0.1).abs() < 1e-6);
        assert_eq!(t.rotation.y, 0.0);
    }

    #[test]
    fn integrate_follows_heading_and_sets_yaw() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let mut ctl = controller();
        ctl.attach(&scene, root);
        ctl.state = VehicleState { speed: -2.0, heading: std::f32::consts::FRAC_PI_2 };
        ctl.integrate(&mut scene, 0.5);
        let t = scene.transform(root).unwrap();
        assert!(t.position.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
        assert_eq!(t.rotation.y, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn spin_wheels_uses_speed_over_radius() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let mut ctl = controller();
        ctl.attach(&scene, root);
        ctl.state.speed = 0.1;
        ctl.spin_wheels(&mut scene, 1.0);
        for &w in ctl.wheels() {
            let r = scene.transform(w).unwrap().rotation;
            assert!((r.z - 0.1 / 0.3).abs() < 1e-5);
            assert_eq!(r.x, 0.0);
        }
        // body does not spin
        let body = scene.subtree(root)[1];
        assert_eq!(scene.transform(body).unwrap().rotation, Vec3::ZERO);
    }

    #[test]
    fn spin_axis_is_configurable() {
        let mut scene = Scene::new();
        let root = rig(&mut scene);
        let wheels = WheelConfig { spin_axis: SpinAxis::X, ..WheelConfig::default() };
        let mut ctl = VehicleController::new(DrivingConfig::default(), wheels);
        ctl.attach(&scene, root);
        ctl.state.speed = -0.3;
        ctl.spin_wheels(&mut scene, 0.5);
        let r = scene.transform(ctl.wheels()[0]).unwrap().rotation;
        assert!((r.x + 0.5).abs() < 1e-5);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn key_intents_drive_state() {
        let mut ctl = controller();
        ctl.on_accelerate_forward();
        ctl.on_turn_right();
        assert!(ctl.state.speed < 0.0);
        assert!(ctl.state.heading < 0.0);
        ctl.on_brake();
        assert_eq!(ctl.state.speed, 0.0);
        ctl.on_accelerate_backward();
        ctl.on_turn_left();
        assert!(ctl.state.speed > 0.0);
        assert_eq!(ctl.state.heading, 0.0);
    }
}
