use crate::voxels::{Block, VoxelGrid};

use super::WorldGenerator;

/// Used mainly for testing purposes. Fills every column with Stone up to a
/// fixed surface height, topped with a single Grass cell.
pub struct FlatGenerator {
    surface_height: i32,
}

impl FlatGenerator {
    pub fn new(surface_height: i32) -> FlatGenerator {
        Self { surface_height }
    }
}

impl WorldGenerator for FlatGenerator {
    fn generate(&mut self, grid: &mut VoxelGrid) {
        for x in 0..grid.width() {
            for z in 0..grid.depth() {
                for y in 0..self.surface_height {
                    grid.set(x, y, z, Block::Stone);
                }
                grid.set(x, self.surface_height, z, Block::Grass);
            }
        }
    }
}
