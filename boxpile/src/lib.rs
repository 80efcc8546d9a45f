//! A stack of boxes falling onto a row of platforms.
//!
//! The physics is all [`rapier2d`]; this crate just lays out the bodies,
//! remembers which texture goes with which body, and answers where each
//! texture should be drawn.  It knows nothing about the GPU, so a renderer
//! (see the `boxpile-game` crate) only needs to call [`Scene::advance`] once
//! per frame and draw every [`Entity`] at its [`Entity::draw_pose`].

pub mod entity;
pub mod scene;
pub mod units;
pub mod world;

pub use entity::{DrawPose, Entity, TextureId, TextureInfo};
pub use glam::Vec2;
pub use scene::{Scene, SceneConfig};
pub use units::LengthUnits;
pub use world::{BodyHandle, BodyKind, PhysicsWorld};
