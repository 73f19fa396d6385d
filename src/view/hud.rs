use std::fmt::Write;
use super::frame::{AssetStatus, FrameSnapshot};

pub const CONTROLS: &str = "Arrows - Drive | Space - Brake | WASD - Pan camera | Mouse - Move light";

/// One-line summary of the frame, shown as overlay text or window title
pub fn status_line(frame: &FrameSnapshot) -> String {
    let mut line = String::new();
    match (frame.asset, frame.car) {
        (AssetStatus::Ready, Some(car)) => {
            let _ = write!(
                line,
                "speed {:.2} | heading {:.2} rad | car x {:.2} z {:.2} | wheels {}",
                0.0 - frame.speed, // forward reads positive, and never as -0.00
                frame.heading,
                car.position.x,
                car.position.z,
                frame.wheels.len(),
            );
            let visible = frame
                .car_screen
                .is_some_and(|p| p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
            if !visible {
                line.push_str(" (off screen)");
            }
        }
        (AssetStatus::Failed, _) => line.push_str("car unavailable"),
        _ => line.push_str("loading car..."),
    }
    let eye = frame.camera_eye;
    let sun = frame.lighting.sun_position;
    let fps = if frame.dt > 0.0 { 1.0 / frame.dt } else { 0.0 };
    let _ = write!(
        line,
        " | cam x {:.1} z {:.1} | light x {:.1} z {:.1} | {:.0} fps",
        eye.x, eye.z, sun.x, sun.z, fps
    );
    line
}
