use glam::IVec3;

use crate::{camera::Camera, voxels::VoxelGrid};

pub const MAX_TARGET_DISTANCE: f32 = 6.0;
pub const RAY_STEP: f32 = 0.05;

/// Outcome of a successful targeting march.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayTarget {
    /// First solid cell along the view ray; the cell a "break" edit removes.
    pub hit: IVec3,
    /// Last empty cell sampled before the hit; where a "place" edit lands.
    pub anchor: IVec3,
}

/// Marches a point from the eye along the view direction in fixed increments,
/// flooring to cell coordinates at each sample. Pure query, no side effects.
/// Leaving the grid or running out of distance means no target.
pub fn ray_target(
    grid: &VoxelGrid,
    camera: &Camera,
    max_distance: f32,
    step: f32,
) -> Option<RayTarget> {
    let dir = camera.view_dir();
    let mut anchor = camera.position.floor().as_ivec3();

    let mut t = 0.0;
    while t <= max_distance {
        let point = camera.position + dir * t;
        let cell = point.floor().as_ivec3();
        if !grid.in_bounds(cell.x, cell.y, cell.z) {
            return None;
        }
        if grid.get(cell.x, cell.y, cell.z).is_solid() {
            return Some(RayTarget { hit: cell, anchor });
        }
        anchor = cell;
        t += step;
    }
    None
}
