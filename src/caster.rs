//! Fixed-step ray marching against the occupancy grid.
//!
//! The ray is sampled at `max(|dx|, |dy|)` evenly spaced points along its
//! full length, so neither axis advances by more than one world unit per
//! step. This is not a DDA: a ray can clip the corner of a cell between two
//! samples, bounded by the one-unit step.

use crate::camera::CameraPose;
use crate::world::GridMap;

/// One column's ray and what it hit
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    pub column: usize,
    /// Degrees from the camera's forward axis, positive toward column 0
    pub offset: f32,
    /// Absolute ray angle in degrees
    pub angle: f32,
    /// Distance to the hit, or the pose's max ray length on a miss
    pub distance: f32,
    /// Continuous hit point; the far end of the ray on a miss
    pub hit_point: [f32; 2],
    pub hit: bool,
}

impl Ray {
    fn miss(pose: &CameraPose, angle: f32, end: [f32; 2]) -> Self {
        Self {
            column: 0,
            offset: angle - pose.yaw,
            angle,
            distance: pose.max_ray_length,
            hit_point: end,
            hit: false,
        }
    }
}

/// March a ray from `pose.position` at `angle` degrees until the first wall
/// cell or the end of `pose.max_ray_length`.
pub fn cast_ray(grid: &GridMap, pose: &CameraPose, block_size: f32, angle: f32) -> Ray {
    let [px, py] = pose.position;
    let (sin, cos) = angle.to_radians().sin_cos();
    let delta_x = cos * pose.max_ray_length;
    let delta_y = sin * pose.max_ray_length;
    let end = [px + delta_x, py + delta_y];

    let steps = delta_x.abs().max(delta_y.abs());
    // Zero-length direction or a NaN pose: nothing to march
    if !(steps >= 1.0 && steps.is_finite()) || !(block_size > 0.0) {
        return Ray::miss(pose, angle, end);
    }
    let steps = steps as u32;

    let x_inc = delta_x / steps as f32;
    let y_inc = delta_y / steps as f32;
    let inv_block = 1.0 / block_size;

    let mut prev_cell: Option<(i32, i32)> = None;
    for k in 1..=steps {
        let x = px + x_inc * k as f32;
        let y = py + y_inc * k as f32;

        let cell = ((x * inv_block).floor() as i32, (y * inv_block).floor() as i32);
        if prev_cell == Some(cell) {
            continue;
        }
        prev_cell = Some(cell);

        if grid.is_wall(cell.0, cell.1) {
            let dx = x - px;
            let dy = y - py;
            return Ray {
                column: 0,
                offset: angle - pose.yaw,
                angle,
                distance: (dx * dx + dy * dy).sqrt(),
                hit_point: [x, y],
                hit: true,
            };
        }
    }

    Ray::miss(pose, angle, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BLOCK: f32 = 64.0;

    fn room() -> GridMap {
        GridMap::new(10, 10).unwrap()
    }

    fn pose(x: f32, y: f32, yaw: f32, len: f32) -> CameraPose {
        CameraPose::new([x, y], yaw, 60.0, len)
    }

    #[test]
    fn test_hits_east_wall() {
        let p = pose(160.0, 160.0, 0.0, 1000.0);
        let ray = cast_ray(&room(), &p, BLOCK, 0.0);
        assert!(ray.hit);
        // east border cell starts at x = 9 * 64
        assert_relative_eq!(ray.distance, 576.0 - 160.0, epsilon = 1.0);
        assert!(ray.hit_point[0] >= 576.0);
        assert_relative_eq!(ray.hit_point[1], 160.0, epsilon = 1e-3);
    }

    #[test]
    fn test_hits_north_wall() {
        let p = pose(160.0, 160.0, 270.0, 1000.0);
        let ray = cast_ray(&room(), &p, BLOCK, 270.0);
        assert!(ray.hit);
        // north border cell ends at y = 64
        assert_relative_eq!(ray.distance, 160.0 - 64.0, epsilon = 1.5);
    }

    #[test]
    fn test_miss_returns_sentinel() {
        let p = pose(160.0, 160.0, 0.0, 100.0);
        let ray = cast_ray(&room(), &p, BLOCK, 0.0);
        assert!(!ray.hit);
        assert_eq!(ray.distance, 100.0);
        assert_relative_eq!(ray.hit_point[0], 260.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_length_is_miss() {
        let p = pose(160.0, 160.0, 0.0, 0.0);
        let ray = cast_ray(&room(), &p, BLOCK, 45.0);
        assert!(!ray.hit);
        assert_eq!(ray.distance, 0.0);
    }

    #[test]
    fn test_bad_block_size_is_miss() {
        let p = pose(160.0, 160.0, 0.0, 500.0);
        assert!(!cast_ray(&room(), &p, 0.0, 0.0).hit);
        assert!(!cast_ray(&room(), &p, f32::NAN, 0.0).hit);
    }

    #[test]
    fn test_obstacle_blocks_before_border() {
        let mut grid = room();
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        // StepRng(0, 0) samples the lowest interior cell (1, 1)
        assert_eq!(grid.add_obstacles(1, &mut rng), 1);
        assert!(grid.is_wall(1, 1));

        // from cell (4, 1) looking west, the obstacle at (1, 1) is hit first
        let p = pose(4.5 * BLOCK, 1.5 * BLOCK, 180.0, 1000.0);
        let ray = cast_ray(&grid, &p, BLOCK, 180.0);
        assert!(ray.hit);
        assert_relative_eq!(ray.distance, 4.5 * BLOCK - 2.0 * BLOCK, epsilon = 1.5);
    }

    #[test]
    fn test_outside_grid_never_hits() {
        let p = pose(-500.0, -500.0, 180.0, 300.0);
        let ray = cast_ray(&room(), &p, BLOCK, 180.0);
        assert!(!ray.hit);
        assert_eq!(ray.distance, 300.0);
    }

    #[test]
    fn test_repeat_cast_is_identical() {
        let p = pose(200.0, 300.0, 33.0, 900.0);
        let a = cast_ray(&room(), &p, BLOCK, 47.3);
        let b = cast_ray(&room(), &p, BLOCK, 47.3);
        assert_eq!(a.distance.to_bits(), b.distance.to_bits());
        assert_eq!(a.hit_point[0].to_bits(), b.hit_point[0].to_bits());
        assert_eq!(a.hit_point[1].to_bits(), b.hit_point[1].to_bits());
    }
}
