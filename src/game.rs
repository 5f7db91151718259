use std::time::Instant;

use glam::{IVec3, Vec3};
use log::{debug, info};

use crate::{
    camera::Camera,
    collision::{Aabb, CollisionField},
    input::InputIntent,
    player::{MovementConfig, Player, step_movement},
    raycast::{MAX_TARGET_DISTANCE, RAY_STEP, RayTarget, ray_target},
    render::{DrawSurface, Rasterizer},
    settings::Settings,
    voxels::{
        Block, VoxelGrid,
        generators::{WorldGenerator, heightmap::HeightmapGenerator},
    },
};

/// Upper bound on the timestep fed to integration. Bounds per-frame
/// displacement when the host hitches, which also limits collision tunneling.
pub const MAX_FRAME_DT: f32 = 0.03;

/// Owns the world grid and the per-frame simulation step. One `tick` is one
/// atomic logical frame: clamp dt, integrate movement, retarget, render.
pub struct Game {
    grid: VoxelGrid,
    player: Player,
    movement: MovementConfig,
    rasterizer: Rasterizer,
    target: Option<RayTarget>,
}

impl Game {
    pub fn new(settings: &Settings) -> Game {
        let mut generator = HeightmapGenerator::new(settings.seed, settings.tree_frequency);
        Self::with_generator(settings, &mut generator)
    }

    pub fn with_generator(settings: &Settings, generator: &mut dyn WorldGenerator) -> Game {
        let mut grid = VoxelGrid::new(
            settings.world_width,
            settings.world_height,
            settings.world_depth,
        );
        let start = Instant::now();
        generator.generate(&mut grid);
        info!(
            "Generated {}x{}x{} world (seed {}): {} solid cells in {:.2}ms",
            grid.width(),
            grid.height(),
            grid.depth(),
            settings.seed,
            grid.solid_count(),
            start.elapsed().as_secs_f32() * 1000.0,
        );

        // Spawn centered, above the tallest terrain, and let gravity settle.
        let spawn = Vec3::new(
            grid.width() as f32 / 2.0,
            (grid.height() - 12).max(1) as f32,
            grid.depth() as f32 / 2.0,
        );
        Self {
            grid,
            player: Player::new(spawn),
            movement: settings.movement,
            rasterizer: Rasterizer::new(settings.render_radius),
            target: None,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn target(&self) -> Option<&RayTarget> {
        self.target.as_ref()
    }

    /// Advances one frame and draws it. The caller owns scheduling; dt is
    /// whatever elapsed since the previous tick, clamped here.
    pub fn tick(&mut self, intent: &InputIntent, dt: f32, surface: &mut dyn DrawSurface) {
        let dt = dt.min(MAX_FRAME_DT);

        self.player.apply_look(intent);
        let field = CollisionField::new(&self.grid);
        step_movement(&mut self.player, intent, &self.movement, &field, dt);

        let camera = Camera::from_player(&self.player);
        self.target = ray_target(&self.grid, &camera, MAX_TARGET_DISTANCE, RAY_STEP);
        self.rasterizer
            .render(&self.grid, &camera, self.target.as_ref(), surface);
    }

    /// Converts the currently targeted solid cell to Air.
    pub fn break_block(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        if !self.cell_clear_of_player(target.hit) {
            return;
        }
        self.grid.set(target.hit.x, target.hit.y, target.hit.z, Block::Air);
        debug!("Broke block at {}", target.hit);
    }

    /// Fills the current placement anchor with the default solid material,
    /// unless that would trap the player inside it.
    pub fn place_block(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        if !self.cell_clear_of_player(target.anchor) {
            return;
        }
        self.grid
            .set(target.anchor.x, target.anchor.y, target.anchor.z, Block::Grass);
        debug!("Placed block at {}", target.anchor);
    }

    fn cell_clear_of_player(&self, cell: IVec3) -> bool {
        !self.player.collider().intersects(&Aabb::cell(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::RecordingSurface, voxels::generators::flat::FlatGenerator};
    use approx::assert_relative_eq;

    fn flat_game() -> Game {
        let settings = Settings {
            world_width: 16,
            world_height: 16,
            world_depth: 16,
            ..Default::default()
        };
        // Surface cells at y = 3, player spawns at y = 4 standing on them.
        Game::with_generator(&settings, &mut FlatGenerator::new(3))
    }

    #[test]
    fn tick_clamps_large_timesteps() {
        let mut game = flat_game();
        game.player.grounded = true;
        let intent = InputIntent {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        let before = game.player.position;
        let mut surface = RecordingSurface::new(320.0, 240.0);
        // A 10 second hitch still only advances one clamped step.
        game.tick(&intent, 10.0, &mut surface);
        let moved = (game.player.position - before).length();
        assert!(moved <= game.movement.sprint_speed * MAX_FRAME_DT + 1e-3);
    }

    #[test]
    fn tick_reports_target_when_looking_at_ground() {
        let mut game = flat_game();
        game.player.pitch = -1.2; // looking down
        let mut surface = RecordingSurface::new(320.0, 240.0);
        game.tick(&InputIntent::default(), 0.016, &mut surface);
        let target = game.target().expect("ground is within reach");
        assert_eq!(game.grid.get(target.hit.x, target.hit.y, target.hit.z), Block::Grass);
        assert!(game
            .grid
            .get(target.anchor.x, target.anchor.y, target.anchor.z)
            .is_air());
    }

    #[test]
    fn break_removes_the_targeted_cell() {
        let mut game = flat_game();
        let hit = IVec3::new(8, 3, 10);
        game.target = Some(RayTarget {
            hit,
            anchor: IVec3::new(8, 4, 10),
        });
        game.break_block();
        assert_eq!(game.grid.get(8, 3, 10), Block::Air);
    }

    #[test]
    fn place_fills_the_anchor_cell() {
        let mut game = flat_game();
        let anchor = IVec3::new(8, 4, 10);
        game.target = Some(RayTarget {
            hit: IVec3::new(8, 3, 10),
            anchor,
        });
        game.place_block();
        assert_eq!(game.grid.get(8, 4, 10), Block::Grass);
    }

    #[test]
    fn place_into_own_collision_box_is_rejected() {
        let mut game = flat_game();
        let feet = game.player.position.floor().as_ivec3();
        game.target = Some(RayTarget {
            hit: feet - IVec3::new(0, 1, 0),
            anchor: feet,
        });
        game.place_block();
        assert!(game.grid.get(feet.x, feet.y, feet.z).is_air());
    }

    #[test]
    fn edits_without_a_target_are_no_ops() {
        let mut game = flat_game();
        let solid_before = game.grid.solid_count();
        game.break_block();
        game.place_block();
        assert_eq!(game.grid.solid_count(), solid_before);
    }

    #[test]
    fn player_settles_onto_the_surface() {
        let mut game = flat_game();
        let mut surface = RecordingSurface::new(320.0, 240.0);
        for _ in 0..120 {
            game.tick(&InputIntent::default(), 0.016, &mut surface);
            surface.clear();
        }
        assert!(game.player.grounded);
        assert_relative_eq!(game.player.position.y, 4.0, epsilon = 0.1);
    }
}
