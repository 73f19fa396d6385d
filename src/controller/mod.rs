// CONTROLLER: Input, vehicle motion and the per-frame update
pub mod input;
pub mod vehicle;
pub mod frame_loop;

pub use input::{Action, InputEvent, InputProcessor, InputState, KeyBindings};
pub use vehicle::VehicleController;
pub use frame_loop::{FrameClock, FrameLoop};
