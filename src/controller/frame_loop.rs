use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};

use crate::assets::LoadState;
use crate::config::{ConfigError, DemoConfig};
use crate::controller::input::{Action, InputEvent, InputProcessor, InputState, KeyBindings};
use crate::controller::vehicle::VehicleController;
use crate::model::{Camera, Lighting, Scene};
use crate::view::{AssetStatus, FrameSnapshot};

/// Measures the time between frames from a millisecond timestamp
/// (`performance.now()` on the web, `Instant` natively).
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick. Zero on the first tick and if the
    /// timestamp goes backwards.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

/// Owns all demo state and advances it one frame at a time.
///
/// Input events may arrive at any point between frames; they are queued and
/// applied at the start of the next [`update`](Self::update), before the car
/// moves.
pub struct FrameLoop {
    pub scene: Scene,
    pub camera: Camera,
    pub lighting: Lighting,
    pub input: InputState,
    pub vehicle: VehicleController,
    load: Rc<RefCell<LoadState>>,
    asset: AssetStatus,
    pan_step: f32,
    sway_extent: f32,
}

impl FrameLoop {
    pub fn new(cfg: DemoConfig, bindings: KeyBindings, width: u32, height: u32) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            scene: Scene::new(),
            camera: Camera::new(&cfg.camera, width, height),
            lighting: Lighting::new(&cfg.light),
            input: InputState::new(InputProcessor::new(bindings), width, height),
            vehicle: VehicleController::new(cfg.driving, cfg.wheels),
            load: Rc::new(RefCell::new(LoadState::Pending)),
            asset: AssetStatus::Loading,
            pan_step: cfg.camera.pan_step,
            sway_extent: cfg.light.sway_extent,
        })
    }

    /// Slot the asset loader writes its outcome into
    pub fn load_slot(&self) -> Rc<RefCell<LoadState>> {
        self.load.clone()
    }

    pub fn asset_status(&self) -> AssetStatus {
        self.asset
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.process_event(event);
    }

    /// Advance one frame by `dt` seconds
    pub fn update(&mut self, dt: f32) -> FrameSnapshot {
        self.poll_asset();

        for action in self.input.drain_actions() {
            self.apply(action);
        }

        if let Some(ndc) = self.input.consume_pointer() {
            self.lighting.sway(ndc, self.sway_extent);
        }
        let (w, h) = self.input.viewport;
        self.camera.set_aspect(w, h);

        // same dt for both so wheel spin matches distance travelled
        self.vehicle.spin_wheels(&mut self.scene, dt);
        self.vehicle.integrate(&mut self.scene, dt);

        self.snapshot(dt)
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::AccelerateForward => self.vehicle.on_accelerate_forward(),
            Action::AccelerateBackward => self.vehicle.on_accelerate_backward(),
            Action::Brake => self.vehicle.on_brake(),
            Action::TurnLeft => self.vehicle.on_turn_left(),
            Action::TurnRight => self.vehicle.on_turn_right(),
            Action::PanCamera(dir) => self.camera.pan(dir, self.pan_step),
        }
    }

    fn poll_asset(&mut self) {
        if self.asset != AssetStatus::Loading {
            return;
        }
        let state = std::mem::take(&mut *self.load.borrow_mut());
        match state {
            LoadState::Pending => {}
            LoadState::Ready(asset) => {
                let root = asset.spawn(&mut self.scene);
                self.vehicle.attach(&self.scene, root);
                self.asset = AssetStatus::Ready;
                info!(car = %asset.name, "car ready");
            }
            LoadState::Failed(e) => {
                // camera and light keep working without a car
                error!(error = %e, "error loading car model");
                self.asset = AssetStatus::Failed;
            }
        }
    }

    fn snapshot(&self, dt: f32) -> FrameSnapshot {
        let car = self.vehicle.car().and_then(|id| self.scene.transform(id)).copied();
        let wheels = self
            .vehicle
            .wheels()
            .iter()
            .filter_map(|id| self.scene.transform(*id).copied())
            .collect();
        FrameSnapshot {
            dt,
            asset: self.asset,
            speed: self.vehicle.state.speed,
            heading: self.vehicle.state.heading,
            car,
            wheels,
            camera_eye: self.camera.eye,
            car_screen: car.and_then(|c| self.camera.project(c.position)),
            lighting: self.lighting,
        }
    }
}
