use glam::IVec3;

/// One of the six canonical unit-cube faces.
///
/// Corners are listed in a consistent winding so the emitted quad outlines a
/// convex polygon; shade is the fixed brightness multiplier applied to the
/// block's base color (top brightest, bottom darkest).
pub struct Face {
    pub normal: IVec3,
    pub shade: f32,
    pub corners: [IVec3; 4],
}

pub const FACES: [Face; 6] = [
    Face {
        normal: IVec3::new(0, 0, 1),
        shade: 1.0,
        corners: [
            IVec3::new(0, 0, 1),
            IVec3::new(1, 0, 1),
            IVec3::new(1, 1, 1),
            IVec3::new(0, 1, 1),
        ],
    },
    Face {
        normal: IVec3::new(0, 0, -1),
        shade: 0.65,
        corners: [
            IVec3::new(1, 0, 0),
            IVec3::new(0, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(1, 1, 0),
        ],
    },
    Face {
        normal: IVec3::new(1, 0, 0),
        shade: 0.8,
        corners: [
            IVec3::new(1, 0, 1),
            IVec3::new(1, 0, 0),
            IVec3::new(1, 1, 0),
            IVec3::new(1, 1, 1),
        ],
    },
    Face {
        normal: IVec3::new(-1, 0, 0),
        shade: 0.75,
        corners: [
            IVec3::new(0, 0, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 1, 1),
            IVec3::new(0, 1, 0),
        ],
    },
    Face {
        normal: IVec3::new(0, 1, 0),
        shade: 1.15,
        corners: [
            IVec3::new(0, 1, 0),
            IVec3::new(0, 1, 1),
            IVec3::new(1, 1, 1),
            IVec3::new(1, 1, 0),
        ],
    },
    Face {
        normal: IVec3::new(0, -1, 0),
        shade: 0.55,
        corners: [
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(1, 0, 1),
        ],
    },
];
