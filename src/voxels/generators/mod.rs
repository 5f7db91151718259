use crate::voxels::VoxelGrid;

pub mod flat;
pub mod heightmap;

pub trait WorldGenerator {
    /// Populates the grid in place. Runs once at startup, before the frame
    /// loop; not re-entrant.
    fn generate(&mut self, grid: &mut VoxelGrid);
}
