use glam::{IVec3, Vec3};

use crate::voxels::VoxelGrid;

#[derive(Copy, Clone, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Aabb {
        Self { min, max }
    }

    /// The player's collision box: half-width around x/z, full height above
    /// the feet position.
    pub fn player_box(feet: Vec3, half_width: f32, height: f32) -> Aabb {
        Self {
            min: Vec3::new(feet.x - half_width, feet.y, feet.z - half_width),
            max: Vec3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
        }
    }

    /// The unit cube occupied by a single grid cell.
    pub fn cell(cell: IVec3) -> Aabb {
        let min = cell.as_vec3();
        Self {
            min,
            max: min + Vec3::ONE,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Answers solidity queries for candidate bounding boxes against the grid.
///
/// The test is discrete: the box corners are floored to cell coordinates and
/// every covered cell is checked. A fast box can tunnel through a one-cell
/// obstacle within a single step; the frame dt clamp bounds how far that can
/// go.
pub struct CollisionField<'a> {
    grid: &'a VoxelGrid,
}

impl<'a> CollisionField<'a> {
    pub fn new(grid: &'a VoxelGrid) -> CollisionField<'a> {
        Self { grid }
    }

    pub fn grid(&self) -> &VoxelGrid {
        self.grid
    }

    /// Returns true if any cell covered by the region is non-Air.
    pub fn is_solid_region(&self, region: &Aabb) -> bool {
        let min_x = region.min.x.floor() as i32;
        let max_x = region.max.x.floor() as i32;
        let min_y = region.min.y.floor() as i32;
        let max_y = region.max.y.floor() as i32;
        let min_z = region.min.z.floor() as i32;
        let max_z = region.max.z.floor() as i32;

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                for z in min_z..=max_z {
                    if self.grid.get(x, y, z).is_solid() {
                        return true;
                    }
                }
            }
        }
        false
    }
}
