use glam::{IVec3, Vec2};
use log::trace;

use crate::{camera::Camera, raycast::RayTarget, voxels::VoxelGrid};

mod face;
mod surface;

pub use face::{FACES, Face};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Rgb};

const SKY_COLOR: Rgb = Rgb(134, 197, 255);
const GROUND_COLOR: Rgb = Rgb(159, 207, 107);
const CROSSHAIR_COLOR: Rgb = Rgb(17, 17, 17);
const OUTLINE_COLOR: Rgb = Rgb(255, 255, 255);

const CROSSHAIR_HALF: f32 = 8.0;
const OUTLINE_HALF: f32 = 8.0;

/// A face that survived culling and projection: four screen-space corners,
/// the average camera-space depth used for ordering, and the shaded color.
pub struct VisibleFace {
    pub points: [Vec2; 4],
    pub depth: f32,
    pub color: Rgb,
}

/// Painter's-algorithm renderer: cull, project, sort back to front, fill.
/// There is no depth buffer; occlusion is correct only because opaque faces
/// are filled farthest first.
pub struct Rasterizer {
    /// Horizontal scan radius around the player, in cells.
    pub radius: i32,
    /// Vertical scan band below/above the player, in cells.
    pub band_below: i32,
    pub band_above: i32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            radius: 18,
            band_below: 8,
            band_above: 16,
        }
    }
}

impl Rasterizer {
    pub fn new(radius: i32) -> Rasterizer {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Scans the camera-centered window and returns every face that passes
    /// hidden-face culling and the near-plane test, unsorted.
    pub fn collect_faces(
        &self,
        grid: &VoxelGrid,
        camera: &Camera,
        viewport: Vec2,
    ) -> Vec<VisibleFace> {
        let center = camera.position.floor().as_ivec3();
        let min_x = (center.x - self.radius).clamp(0, grid.width() - 1);
        let max_x = (center.x + self.radius).clamp(0, grid.width() - 1);
        let min_y = (center.y - self.band_below).clamp(0, grid.height() - 1);
        let max_y = (center.y + self.band_above).clamp(0, grid.height() - 1);
        let min_z = (center.z - self.radius).clamp(0, grid.depth() - 1);
        let max_z = (center.z + self.radius).clamp(0, grid.depth() - 1);

        let mut faces = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                for z in min_z..=max_z {
                    let block = grid.get(x, y, z);
                    if block.is_air() {
                        continue;
                    }
                    let cell = IVec3::new(x, y, z);
                    let base = Rgb::from(block.color());

                    'faces: for face in &FACES {
                        if !is_face_exposed(grid, cell, face) {
                            continue;
                        }

                        let mut points = [Vec2::ZERO; 4];
                        let mut depth = 0.0;
                        for (i, corner) in face.corners.iter().enumerate() {
                            let world = (cell + corner).as_vec3();
                            // A single corner behind the near plane discards
                            // the whole face.
                            let Some(p) = camera.project(world, viewport) else {
                                continue 'faces;
                            };
                            points[i] = p.screen;
                            depth += p.depth;
                        }

                        faces.push(VisibleFace {
                            points,
                            depth: depth / 4.0,
                            color: base.shade(face.shade),
                        });
                    }
                }
            }
        }
        faces
    }

    /// Draws one complete frame: background halves, depth-sorted block faces,
    /// crosshair, and the current target outline if there is one.
    pub fn render(
        &self,
        grid: &VoxelGrid,
        camera: &Camera,
        target: Option<&RayTarget>,
        surface: &mut dyn DrawSurface,
    ) {
        let viewport = surface.viewport();
        let half = Vec2::new(viewport.x, viewport.y / 2.0);
        surface.fill_rect(Vec2::ZERO, half, SKY_COLOR);
        surface.fill_rect(Vec2::new(0.0, viewport.y / 2.0), half, GROUND_COLOR);

        let mut faces = self.collect_faces(grid, camera, viewport);
        // Stable sort: coplanar faces keep their collection order.
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        trace!("Filling {} visible faces", faces.len());
        for face in &faces {
            surface.fill_polygon(&face.points, face.color);
        }

        draw_crosshair(surface, viewport);
        if let Some(target) = target {
            draw_target_outline(camera, target, surface, viewport);
        }
    }
}

fn is_face_exposed(grid: &VoxelGrid, cell: IVec3, face: &Face) -> bool {
    let neighbor = cell + face.normal;
    grid.get(neighbor.x, neighbor.y, neighbor.z).is_air()
}

fn draw_crosshair(surface: &mut dyn DrawSurface, viewport: Vec2) {
    let center = viewport / 2.0;
    surface.draw_line(
        center - Vec2::new(CROSSHAIR_HALF, 0.0),
        center + Vec2::new(CROSSHAIR_HALF, 0.0),
        CROSSHAIR_COLOR,
    );
    surface.draw_line(
        center - Vec2::new(0.0, CROSSHAIR_HALF),
        center + Vec2::new(0.0, CROSSHAIR_HALF),
        CROSSHAIR_COLOR,
    );
}

fn draw_target_outline(
    camera: &Camera,
    target: &RayTarget,
    surface: &mut dyn DrawSurface,
    viewport: Vec2,
) {
    let center = target.hit.as_vec3() + 0.5;
    if let Some(p) = camera.project(center, viewport) {
        surface.stroke_rect(
            p.screen - Vec2::splat(OUTLINE_HALF),
            Vec2::splat(OUTLINE_HALF * 2.0),
            OUTLINE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::Block;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn camera_at(position: Vec3, yaw: f32, pitch: f32) -> Camera {
        Camera {
            position,
            yaw,
            pitch,
        }
    }

    fn viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn exposed_count(grid: &VoxelGrid, cell: IVec3) -> usize {
        FACES
            .iter()
            .filter(|f| is_face_exposed(grid, cell, f))
            .count()
    }

    #[test]
    fn enclosed_cell_has_no_exposed_faces() {
        let mut grid = VoxelGrid::new(5, 5, 5);
        for x in 1..4 {
            for y in 1..4 {
                for z in 1..4 {
                    grid.set(x, y, z, Block::Stone);
                }
            }
        }
        assert_eq!(exposed_count(&grid, IVec3::new(2, 2, 2)), 0);
    }

    #[test]
    fn single_air_neighbor_exposes_one_face() {
        let mut grid = VoxelGrid::new(5, 5, 5);
        for x in 1..4 {
            for y in 1..4 {
                for z in 1..4 {
                    grid.set(x, y, z, Block::Stone);
                }
            }
        }
        // Open exactly one side of the center cell.
        grid.set(2, 3, 2, Block::Air);
        assert_eq!(exposed_count(&grid, IVec3::new(2, 2, 2)), 1);

        let up = IVec3::new(0, 1, 0);
        let exposed: Vec<&Face> = FACES
            .iter()
            .filter(|f| is_face_exposed(&grid, IVec3::new(2, 2, 2), f))
            .collect();
        assert_eq!(exposed[0].normal, up);
    }

    #[test]
    fn lone_block_exposes_all_six_faces() {
        let mut grid = VoxelGrid::new(5, 5, 5);
        grid.set(2, 2, 2, Block::Stone);
        assert_eq!(exposed_count(&grid, IVec3::new(2, 2, 2)), 6);
    }

    #[test]
    fn faces_are_filled_back_to_front() {
        let mut grid = VoxelGrid::new(16, 16, 16);
        grid.set(8, 8, 10, Block::Stone);
        grid.set(8, 8, 13, Block::Stone);
        let camera = camera_at(Vec3::new(8.5, 8.5, 8.5), 0.0, 0.0);

        let rasterizer = Rasterizer::default();
        let mut faces = rasterizer.collect_faces(&grid, &camera, viewport());
        assert!(!faces.is_empty());
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for pair in faces.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
        }
        // The nearest face of the nearer block is filled last.
        let last = faces.last().unwrap();
        assert_relative_eq!(last.depth, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn hollow_cube_viewed_from_center_shows_one_near_face() {
        // 3x3x3 stone grid with the center cell removed; the eye sits in the
        // middle of the cavity looking along +z. Every other candidate face
        // either fails hidden-face culling or has a corner behind the eye;
        // the only face fully in front closer than the far wall is the
        // cavity's +z boundary at depth 0.5.
        let mut grid = VoxelGrid::new(3, 3, 3);
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    grid.set(x, y, z, Block::Stone);
                }
            }
        }
        grid.set(1, 1, 1, Block::Air);
        let camera = camera_at(Vec3::new(1.5, 1.5, 1.5), 0.0, 0.0);

        let faces = Rasterizer::default().collect_faces(&grid, &camera, viewport());
        let near: Vec<&VisibleFace> = faces.iter().filter(|f| f.depth < 1.0).collect();
        assert_eq!(near.len(), 1);
        // Analytic distance from the eye to the face centroid.
        assert_relative_eq!(near[0].depth, 0.5, epsilon = 1e-5);
        // Shaded stone at the -z face factor.
        assert_eq!(near[0].color, Rgb::from(Block::Stone.color()).shade(0.65));
    }

    #[test]
    fn frame_emits_background_crosshair_and_outline() {
        let mut grid = VoxelGrid::new(16, 16, 16);
        grid.set(8, 8, 12, Block::Stone);
        let camera = camera_at(Vec3::new(8.5, 8.5, 8.5), 0.0, 0.0);
        let target = RayTarget {
            hit: IVec3::new(8, 8, 12),
            anchor: IVec3::new(8, 8, 11),
        };

        let mut surface = RecordingSurface::new(800.0, 600.0);
        Rasterizer::default().render(&grid, &camera, Some(&target), &mut surface);

        let rects = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count();
        let lines = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        let outlines = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(rects, 2);
        assert_eq!(lines, 2);
        assert_eq!(outlines, 1);
        assert!(surface.polygon_count() > 0);

        // Without a target there is no outline.
        surface.clear();
        Rasterizer::default().render(&grid, &camera, None, &mut surface);
        let outlines = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(outlines, 0);
    }

    #[test]
    fn scan_window_limits_the_visible_set() {
        let mut grid = VoxelGrid::new(64, 32, 64);
        // One block inside the radius, one far outside it.
        grid.set(34, 16, 34, Block::Stone);
        grid.set(60, 16, 60, Block::Stone);
        let camera = camera_at(Vec3::new(32.5, 16.5, 32.5), 0.0, 0.0);

        let faces = Rasterizer::default().collect_faces(&grid, &camera, viewport());
        // Only the near block contributes; its faces all sit within a couple
        // of cells of the eye.
        assert!(!faces.is_empty());
        assert!(faces.iter().all(|f| f.depth < 8.0));
    }
}
