use std::collections::HashSet;
use std::future::Future;

use glam::Vec3;
use thiserror::Error;

use crate::model::{NodeId, Scene, Transform};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    #[error("asset `{0}` contains no parts")]
    Empty(String),
    #[error("asset `{asset}` has more than one part named `{part}`")]
    DuplicatePart { asset: String, part: String },
    #[error("failed to load asset `{asset}`: {reason}")]
    Load { asset: String, reason: String },
}

/// A named piece of a car, positioned relative to the car's origin
#[derive(Debug, Clone, PartialEq)]
pub struct CarPart {
    pub name: String,
    pub offset: Vec3,
}

/// A car as delivered by a loader: a root name and its parts
#[derive(Debug, Clone, PartialEq)]
pub struct CarAsset {
    pub name: String,
    pub parts: Vec<CarPart>,
}

impl CarAsset {
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.parts.is_empty() {
            return Err(AssetError::Empty(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.name.as_str()) {
                return Err(AssetError::DuplicatePart {
                    asset: self.name.clone(),
                    part: part.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add the car to the scene at the origin and return the root handle
    pub fn spawn(&self, scene: &mut Scene) -> NodeId {
        let root = scene.add(self.name.clone(), None, Transform::default());
        for part in &self.parts {
            scene.add(part.name.clone(), Some(root), Transform::at(part.offset));
        }
        root
    }
}

/// Source of the car model.
///
/// Completion may happen on a later frame; the frame loop only sees the
/// outcome through [`LoadState`].
pub trait CarLoader {
    fn load(&self) -> impl Future<Output = Result<CarAsset, AssetError>>;
}

/// Builds a boxy car out of a body and four wheels, no files involved
#[derive(Debug, Clone)]
pub struct ProceduralCar {
    pub name: String,
    pub wheelbase: f32,
    pub track: f32,
    pub wheel_radius: f32,
}

impl Default for ProceduralCar {
    fn default() -> Self {
        Self {
            name: "car".to_string(),
            wheelbase: 2.4,
            track: 1.5,
            wheel_radius: 0.3,
        }
    }
}

impl ProceduralCar {
    pub fn build(&self) -> Result<CarAsset, AssetError> {
        let hx = self.track / 2.0;
        let hz = self.wheelbase / 2.0;
        let r = self.wheel_radius;
        let asset = CarAsset {
            name: self.name.clone(),
            parts: vec![
                CarPart { name: "Body".into(), offset: Vec3::new(0.0, r + 0.35, 0.0) },
                CarPart { name: "Wheel_FL".into(), offset: Vec3::new(-hx, r, -hz) },
                CarPart { name: "Wheel_FR".into(), offset: Vec3::new(hx, r, -hz) },
                CarPart { name: "Wheel_RL".into(), offset: Vec3::new(-hx, r, hz) },
                CarPart { name: "Wheel_RR".into(), offset: Vec3::new(hx, r, hz) },
            ],
        };
        asset.validate()?;
        Ok(asset)
    }
}

impl CarLoader for ProceduralCar {
    async fn load(&self) -> Result<CarAsset, AssetError> {
        self.build()
    }
}

/// Progress of the car asset as seen by the frame loop
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(CarAsset),
    Failed(AssetError),
}

impl From<Result<CarAsset, AssetError>> for LoadState {
    fn from(result: Result<CarAsset, AssetError>) -> Self {
        match result {
            Ok(asset) => LoadState::Ready(asset),
            Err(e) => LoadState::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_car_has_body_and_four_wheels() {
        let asset = ProceduralCar::default().build().unwrap();
        assert_eq!(asset.parts.len(), 5);
        let wheels = asset
            .parts
            .iter()
            .filter(|p| p.name.to_lowercase().contains("wheel"))
            .count();
        assert_eq!(wheels, 4);
    }

    #[test]
    fn loader_resolves_to_the_built_asset() {
        let car = ProceduralCar::default();
        let loaded = pollster::block_on(car.load()).unwrap();
        assert_eq!(loaded, car.build().unwrap());
    }

    #[test]
    fn validation_rejects_empty_and_duplicates() {
        let empty = CarAsset { name: "ghost".into(), parts: vec![] };
        assert_eq!(empty.validate(), Err(AssetError::Empty("ghost".into())));

        let part = CarPart { name: "Wheel".into(), offset: Vec3::ZERO };
        let dup = CarAsset { name: "twin".into(), parts: vec![part.clone(), part] };
        assert!(matches!(dup.validate(), Err(AssetError::DuplicatePart { .. })));
    }

    #[test]
    fn spawn_parents_parts_under_root() {
        let mut scene = Scene::new();
        let asset = ProceduralCar::default().build().unwrap();
        let root = asset.spawn(&mut scene);
        let subtree = scene.subtree(root);
        assert_eq!(subtree.len(), 6);
        assert_eq!(scene.node(root).unwrap().name, "car");
        assert_eq!(scene.node(subtree[1]).unwrap().parent, Some(root));
    }

    #[test]
    fn load_state_from_result() {
        assert!(matches!(LoadState::default(), LoadState::Pending));
        let failed = LoadState::from(Err(AssetError::Empty("x".into())));
        assert!(matches!(failed, LoadState::Failed(_)));
    }
}
