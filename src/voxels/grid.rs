use super::Block;

/// Dense block storage for a fixed W x H x D world.
///
/// Blocks live in a flat buffer; the index layout is an internal detail kept
/// cache-friendly for the renderer's windowed scan. All access goes through
/// `get`/`set`, which treat every out-of-bounds coordinate as Air: reads
/// return Air, writes are silently dropped.
pub struct VoxelGrid {
    width: i32,
    height: i32,
    depth: i32,
    blocks: Vec<Block>,
}

impl VoxelGrid {
    pub fn new(width: i32, height: i32, depth: i32) -> VoxelGrid {
        debug_assert!(width > 0 && height > 0 && depth > 0);
        let blocks = vec![Block::Air; (width * height * depth) as usize];
        Self {
            width,
            height,
            depth,
            blocks,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.depth
    }

    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        (x + z * self.width + y * self.width * self.depth) as usize
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Block {
        if !self.in_bounds(x, y, z) {
            return Block::Air;
        }
        self.blocks[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, block: Block) {
        if !self.in_bounds(x, y, z) {
            return;
        }
        let idx = self.index(x, y, z);
        self.blocks[idx] = block;
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }
}
