use glam::{Vec2, Vec3};

use crate::player::Player;

/// Corners with a camera-space depth at or below this are too close to the
/// projection plane to divide by safely.
pub const NEAR_EPSILON: f32 = 0.05;

/// Projection scale as a fraction of the viewport height.
const FOV_FACTOR: f32 = 0.9;

/// Yaw/pitch eye transform shared by the rasterizer and the ray caster.
///
/// World-to-camera is translate-to-eye, rotate -yaw about the vertical axis,
/// then -pitch about the resulting horizontal axis. +z in camera space is
/// "into the screen".
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

pub struct Projected {
    pub screen: Vec2,
    pub depth: f32,
}

impl Camera {
    pub fn from_player(player: &Player) -> Camera {
        Self {
            position: player.eye_position(),
            yaw: player.yaw,
            pitch: player.pitch,
        }
    }

    /// Unit view direction: yaw 0 / pitch 0 looks along +z.
    pub fn view_dir(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            self.yaw.cos() * cos_pitch,
        )
    }

    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        let d = world - self.position;

        // Undo the camera yaw: a point along the view direction lands on the
        // camera-space +z axis.
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x1 = d.x * cos_yaw - d.z * sin_yaw;
        let z1 = d.x * sin_yaw + d.z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y2 = d.y * cos_pitch - z1 * sin_pitch;
        let z2 = d.y * sin_pitch + z1 * cos_pitch;

        Vec3::new(x1, y2, z2)
    }

    /// Perspective-projects a world point onto the viewport. Returns None for
    /// points at or behind the near epsilon.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Projected> {
        let cam = self.to_camera_space(world);
        if cam.z <= NEAR_EPSILON {
            return None;
        }
        let fov = fov_scale(viewport.y);
        let screen = Vec2::new(
            viewport.x / 2.0 + cam.x / cam.z * fov,
            viewport.y / 2.0 - cam.y / cam.z * fov,
        );
        Some(Projected {
            screen,
            depth: cam.z,
        })
    }
}

pub fn fov_scale(viewport_height: f32) -> f32 {
    viewport_height * FOV_FACTOR
}
