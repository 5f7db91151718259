#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Wood = 4,
    Leaf = 5,
}

impl Block {
    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Block::Air)
    }

    /// Every non-air block is solid for collision and opaque for rendering.
    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Base color before per-face shading.
    pub fn color(self) -> [u8; 3] {
        match self {
            Block::Air => [0, 0, 0],
            Block::Grass => [95, 184, 77],
            Block::Dirt => [138, 90, 56],
            Block::Stone => [163, 173, 186],
            Block::Wood => [143, 99, 63],
            Block::Leaf => [65, 147, 71],
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::Air
    }
}
