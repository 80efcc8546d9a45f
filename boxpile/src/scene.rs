use glam::Vec2;

use crate::entity::{Entity, TextureId, TextureInfo};
use crate::units::LengthUnits;
use crate::world::{BodyKind, PhysicsWorld};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SceneConfig {
    /// Screen size in pixels; the world shares these coordinates.
    pub width: f32,
    pub height: f32,
    pub ground_count: usize,
    /// How many boxes the pyramid is expected to produce.
    pub box_count: usize,
    pub pyramid_rows: usize,
    /// Gap between the bottom of the screen and the bottom of the ground row.
    pub ground_margin: f32,
    /// Extra height the lowest boxes start above the ground.
    pub drop_gap: f32,
    pub units: LengthUnits,
    pub substeps: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            ground_count: 14,
            box_count: 10,
            pyramid_rows: 4,
            ground_margin: 100.0,
            drop_gap: 20.0,
            units: LengthUnits::default(),
            substeps: 4,
        }
    }
}

pub struct Scene {
    config: SceneConfig,
    world: PhysicsWorld,
    grounds: Vec<Entity>,
    boxes: Vec<Entity>,
    paused: bool,
}

impl Scene {
    /// Lays out the ground row and the box pyramid.
    ///
    /// Panics if the pyramid doesn't produce exactly `config.box_count` boxes.
    pub fn build(config: SceneConfig, ground: TextureInfo, block: TextureInfo) -> Self {
        let mut world = PhysicsWorld::new(config.units.gravity(), config.units);
        let ground_extent = ground.half_extent();
        let box_extent = block.half_extent();
        let ground_y = config.height - ground_extent.y - config.ground_margin;

        let grounds: Vec<Entity> = (0..config.ground_count)
            .map(|i| {
                let position = Vec2::new((2.0 * i as f32 + 2.0) * ground_extent.x, ground_y);
                Entity {
                    body: world.create_body(BodyKind::Static, position, ground_extent),
                    extent: ground_extent,
                    texture: ground.id,
                }
            })
            .collect();

        let mut boxes = Vec::with_capacity(config.box_count);
        let rows = config.pyramid_rows;
        for i in 0..rows {
            let y = ground_y - (2.5 * i as f32 + 2.0) * box_extent.y - config.drop_gap;
            for j in i..rows {
                let x = 0.5 * config.width + (3.0 * j as f32 - i as f32 - 3.0) * box_extent.x;
                assert!(
                    boxes.len() < config.box_count,
                    "box index ({}) >= box count ({})",
                    boxes.len(),
                    config.box_count
                );
                boxes.push(Entity {
                    body: world.create_body(BodyKind::Dynamic, Vec2::new(x, y), box_extent),
                    extent: box_extent,
                    texture: block.id,
                });
            }
        }
        assert_eq!(
            boxes.len(),
            config.box_count,
            "pyramid of {rows} rows left box slots unfilled"
        );
        log::debug!(
            "built scene: {} ground platforms of {:?}, {} boxes of {:?}",
            grounds.len(),
            ground_extent,
            boxes.len(),
            box_extent
        );
        Self {
            config,
            world,
            grounds,
            boxes,
            paused: false,
        }
    }
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
    pub fn grounds(&self) -> &[Entity] {
        &self.grounds
    }
    pub fn boxes(&self) -> &[Entity] {
        &self.boxes
    }
    /// Ground platforms first, then boxes.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.grounds.iter().chain(self.boxes.iter())
    }
    pub fn entities_with(&self, texture: TextureId) -> impl Iterator<Item = &Entity> + '_ {
        self.entities().filter(move |e| e.texture == texture)
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    /// Returns whether the simulation is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
    /// Runs one physics step of `dt` seconds unless paused.  Returns whether a step happened.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        self.world.step(dt, self.config.substeps);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: TextureInfo = TextureInfo {
        id: TextureId(0),
        width: 128,
        height: 128,
    };
    const BOX: TextureInfo = TextureInfo {
        id: TextureId(1),
        width: 128,
        height: 128,
    };
    const DT: f32 = 1.0 / 60.0;

    fn scene() -> Scene {
        Scene::build(SceneConfig::default(), GROUND, BOX)
    }

    fn snapshot(scene: &Scene) -> Vec<(Vec2, f32)> {
        scene
            .entities()
            .map(|e| (scene.world().position(e.body), scene.world().angle(e.body)))
            .collect()
    }

    #[test]
    fn ground_shape_matches_drawn_extent() {
        let scene = scene();
        assert_eq!(scene.grounds().len(), 14);
        for ground in scene.grounds() {
            assert_eq!(scene.world().half_extent(ground.body), Some(ground.extent));
            assert_eq!(ground.extent, GROUND.half_extent());
            assert!(!scene.world().is_dynamic(ground.body));
        }
    }

    #[test]
    fn ground_row_layout() {
        let scene = scene();
        let first = scene.world().position(scene.grounds()[0].body);
        let second = scene.world().position(scene.grounds()[1].body);
        assert_eq!(first, Vec2::new(128.0, 1080.0 - 64.0 - 100.0));
        assert_eq!(second.x - first.x, 128.0);
    }

    #[test]
    fn exactly_box_count_boxes() {
        let scene = scene();
        assert_eq!(scene.boxes().len(), 10);
        assert!(scene.boxes().iter().all(|b| scene.world().is_dynamic(b.body)));
        assert_eq!(scene.world().body_count(), 14 + 10);
        assert_eq!(scene.entities_with(BOX.id).count(), 10);
        assert_eq!(scene.entities_with(GROUND.id).count(), 14);
    }

    #[test]
    #[should_panic(expected = "box index (9) >= box count (9)")]
    fn one_box_over_budget_stops() {
        Scene::build(
            SceneConfig {
                box_count: 9,
                ..SceneConfig::default()
            },
            GROUND,
            BOX,
        );
    }

    #[test]
    #[should_panic]
    fn unfilled_budget_stops() {
        Scene::build(
            SceneConfig {
                box_count: 11,
                ..SceneConfig::default()
            },
            GROUND,
            BOX,
        );
    }

    #[test]
    fn paused_frames_change_nothing() {
        let mut scene = scene();
        assert!(scene.toggle_pause());
        let before = snapshot(&scene);
        for _ in 0..30 {
            assert!(!scene.advance(DT));
        }
        assert_eq!(before, snapshot(&scene));
        assert!(!scene.toggle_pause());
        assert!(!scene.is_paused());
    }

    #[test]
    fn running_frame_moves_boxes_not_ground() {
        let mut scene = scene();
        let grounds_before: Vec<Vec2> = scene
            .grounds()
            .iter()
            .map(|g| scene.world().position(g.body))
            .collect();
        let boxes_before: Vec<Vec2> = scene
            .boxes()
            .iter()
            .map(|b| scene.world().position(b.body))
            .collect();
        assert!(scene.advance(DT));
        let grounds_after: Vec<Vec2> = scene
            .grounds()
            .iter()
            .map(|g| scene.world().position(g.body))
            .collect();
        assert_eq!(grounds_before, grounds_after);
        assert!(scene
            .boxes()
            .iter()
            .zip(boxes_before)
            .any(|(b, before)| scene.world().position(b.body) != before));
    }

    #[test]
    fn boxes_settle_above_ground() {
        let mut scene = scene();
        for _ in 0..600 {
            scene.advance(DT);
        }
        let ground_top = 1080.0 - 100.0 - 128.0;
        for b in scene.boxes() {
            let y = scene.world().position(b.body).y;
            assert!(y < ground_top, "box sank into the ground: {y}");
        }
    }

    #[test]
    fn unrotated_draw_corner() {
        let scene = scene();
        for e in scene.entities() {
            let pose = e.draw_pose(scene.world());
            let expected = scene.world().position(e.body) - e.extent;
            assert!((pose.corner - expected).length() < 1e-3);
        }
    }
}
