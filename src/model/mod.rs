// MODEL: Scene nodes, vehicle, camera and light state
pub mod scene;
pub mod vehicle;
pub mod camera;
pub mod light;

pub use scene::{Node, NodeId, Scene, Transform};
pub use vehicle::VehicleState;
pub use camera::{Camera, PanDirection};
pub use light::Lighting;
