pub mod block;
pub mod generators;
pub mod grid;

pub use crate::voxels::block::Block;
pub use crate::voxels::grid::VoxelGrid;
