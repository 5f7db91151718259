use glam::Vec3;
use serde::Deserialize;

use crate::{
    collision::{Aabb, CollisionField},
    input::InputIntent,
};

const YAW_SENSITIVITY: f32 = 0.0028;
const PITCH_SENSITIVITY: f32 = 0.0022;
const PITCH_LIMIT: f32 = 1.45;

/// Fraction of the player height at which the eye sits above the feet.
const EYE_HEIGHT_FACTOR: f32 = 0.9;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.8,
            sprint_speed: 8.5,
            gravity: 20.0,
            jump_speed: 7.2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    /// Feet position in world units.
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub half_width: f32,
    pub height: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(position: Vec3) -> Player {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            half_width: 0.35,
            height: 1.8,
            grounded: false,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.height * EYE_HEIGHT_FACTOR, 0.0)
    }

    pub fn collider(&self) -> Aabb {
        self.collider_at(self.position)
    }

    fn collider_at(&self, feet: Vec3) -> Aabb {
        Aabb::player_box(feet, self.half_width, self.height)
    }

    /// Applies one frame of pointer motion to yaw/pitch. Deltas are ignored
    /// unless the pointer is exclusively captured.
    pub fn apply_look(&mut self, intent: &InputIntent) {
        if !intent.pointer_captured {
            return;
        }
        let (dx, dy) = intent.look_delta;
        self.yaw += dx * YAW_SENSITIVITY;
        self.pitch = (self.pitch - dy * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Advances the player one timestep: input-driven horizontal velocity,
/// gravity, jumping, then axis-separated collision response in X, Z, Y order.
/// Resolving each axis alone keeps the player from sticking on corners where
/// only one axis is actually blocked.
pub fn step_movement(
    player: &mut Player,
    intent: &InputIntent,
    config: &MovementConfig,
    field: &CollisionField,
    dt: f32,
) {
    let (forward, right) = intent.axes();
    let speed = if intent.sprint {
        config.sprint_speed
    } else {
        config.walk_speed
    };

    // Rotate intent into world space by yaw. The norm is floored at 1 so a
    // zero intent divides safely and diagonals are not faster.
    let norm = (forward * forward + right * right).sqrt().max(1.0);
    let (sin_yaw, cos_yaw) = player.yaw.sin_cos();
    player.velocity.x = (sin_yaw * forward + cos_yaw * right) / norm * speed;
    player.velocity.z = (cos_yaw * forward - sin_yaw * right) / norm * speed;

    // Gravity applies every step, grounded or not.
    player.velocity.y -= config.gravity * dt;
    if player.grounded && intent.jump {
        player.velocity.y = config.jump_speed;
        player.grounded = false;
    }

    let step_x = player.position + Vec3::new(player.velocity.x * dt, 0.0, 0.0);
    if !field.is_solid_region(&player.collider_at(step_x)) {
        player.position.x = step_x.x;
    }

    let step_z = player.position + Vec3::new(0.0, 0.0, player.velocity.z * dt);
    if !field.is_solid_region(&player.collider_at(step_z)) {
        player.position.z = step_z.z;
    }

    let step_y = player.position + Vec3::new(0.0, player.velocity.y * dt, 0.0);
    if !field.is_solid_region(&player.collider_at(step_y)) {
        player.position.y = step_y.y;
        player.grounded = false;
    } else {
        // Landed if we were falling; a ceiling hit just kills the velocity.
        if player.velocity.y < 0.0 {
            player.grounded = true;
        }
        player.velocity.y = 0.0;
    }

    let grid = field.grid();
    player.position.x = player.position.x.clamp(1.0, (grid.width() - 2) as f32);
    player.position.z = player.position.z.clamp(1.0, (grid.depth() - 2) as f32);
}
