// VIEW: What the host presents each frame
pub mod frame;
pub mod hud;

pub use frame::{AssetStatus, FrameSnapshot, View};
pub use hud::status_line;
