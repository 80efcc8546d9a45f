use glam::Vec2;

use crate::world::{BodyHandle, PhysicsWorld};

/// Refers to a texture loaded by whoever is drawing the scene.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextureId(pub usize);

/// The pixel dimensions of a loaded texture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextureInfo {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl TextureInfo {
    /// Textures exactly cover their physics box, so the box is half the image in each direction.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(0.5 * self.width as f32, 0.5 * self.height as f32)
    }
}

/// Binds a body in the physics world to the texture drawn over it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Entity {
    pub body: BodyHandle,
    pub extent: Vec2,
    pub texture: TextureId,
}

/// Where to put a texture's top-left corner and how far to turn it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DrawPose {
    pub corner: Vec2,
    /// Radians
    pub angle: f32,
}

impl DrawPose {
    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

impl Entity {
    /// Boxes are centered on their bodies but textures are placed by their
    /// top-left corner, so this asks the body where its local top-left
    /// corner currently sits (rotation included).
    pub fn draw_pose(&self, world: &PhysicsWorld) -> DrawPose {
        DrawPose {
            corner: world.world_point(self.body, -self.extent),
            angle: world.angle(self.body),
        }
    }
}
