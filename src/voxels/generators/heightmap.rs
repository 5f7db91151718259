use fastrand::Rng;
use noise::{NoiseFn, Perlin};

use crate::voxels::{Block, VoxelGrid};

use super::WorldGenerator;

/// Columns below this surface height never grow trees.
const MIN_TREE_ELEVATION: i32 = 7;

/// Sinusoidal rolling terrain with a bounded Perlin perturbation, layered as
/// Grass over two cells of Dirt over Stone, plus scattered trees.
///
/// Fully deterministic for a fixed seed: the perturbation samples seeded
/// Perlin noise and tree placement draws from a seeded RNG, so worlds are
/// reproducible bit for bit.
pub struct HeightmapGenerator {
    perlin: Perlin,
    rng: Rng,
    tree_frequency: f32,
}

impl HeightmapGenerator {
    pub fn new(seed: u32, tree_frequency: f32) -> HeightmapGenerator {
        Self {
            perlin: Perlin::new(seed),
            rng: Rng::with_seed(seed as u64),
            tree_frequency,
        }
    }

    fn surface_height(&self, grid: &VoxelGrid, x: i32, z: i32) -> i32 {
        let hill = 8.0
            + (x as f32 * 0.15).sin() * 2.8
            + (z as f32 * 0.17).cos() * 3.2
            + ((x + z) as f32 * 0.08).sin() * 2.2
            + self.perturbation(x, z);
        (hill.floor() as i32).clamp(3, (grid.height() - 6).max(3))
    }

    /// Deterministic stand-in for per-column jitter, bounded to [0, 1.8).
    fn perturbation(&self, x: i32, z: i32) -> f32 {
        let sample = self.perlin.get([x as f64 * 0.35, z as f64 * 0.35]);
        ((sample + 1.0) * 0.9) as f32
    }

    /// Writes a trunk of Wood and a Manhattan-distance canopy of Leaf cells.
    /// Writes are unconditional, so the canopy overwrites the trunk top and
    /// later columns may overwrite earlier canopies. That ordering quirk is
    /// part of the terrain shape; the fixed column scan keeps it reproducible.
    pub fn grow_tree(grid: &mut VoxelGrid, x: i32, z: i32, surface_y: i32, trunk_height: i32) {
        for t in 1..=trunk_height {
            grid.set(x, surface_y + t, z, Block::Wood);
        }
        for lx in -2i32..=2 {
            for lz in -2i32..=2 {
                for ly in trunk_height - 1..=trunk_height + 1 {
                    let dist = lx.abs() + lz.abs() + (ly - trunk_height).abs();
                    if dist <= 3 {
                        grid.set(x + lx, surface_y + ly, z + lz, Block::Leaf);
                    }
                }
            }
        }
    }
}

impl WorldGenerator for HeightmapGenerator {
    fn generate(&mut self, grid: &mut VoxelGrid) {
        // Scan order x outer, z inner is load-bearing for canopy overwrites.
        for x in 0..grid.width() {
            for z in 0..grid.depth() {
                let h = self.surface_height(grid, x, z);
                for y in 0..=h {
                    let block = if y == h {
                        Block::Grass
                    } else if y > h - 3 {
                        Block::Dirt
                    } else {
                        Block::Stone
                    };
                    grid.set(x, y, z, block);
                }

                if self.rng.f32() < self.tree_frequency && h > MIN_TREE_ELEVATION {
                    let trunk_height = 3 + self.rng.i32(0..=1);
                    Self::grow_tree(grid, x, z, h, trunk_height);
                }
            }
        }
    }
}
