use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use crate::camera::CameraPose;
use crate::caster::{Ray, cast_ray};
use crate::world::GridMap;

/// One ray per column, column 0 at the left edge of the field of view.
/// Rebuilt in full every frame.
#[derive(Clone, Debug, Default)]
pub struct DistanceBuffer {
    pub rays: Vec<Ray>,
}

impl DistanceBuffer {
    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    pub fn distances(&self) -> impl Iterator<Item = f32> + '_ {
        self.rays.iter().map(|r| r.distance)
    }
}

/// Angle of column `i` relative to yaw, in degrees
#[inline]
pub fn column_offset(fov: f32, ray_count: usize, i: usize) -> f32 {
    fov / 2.0 - i as f32 * (fov / ray_count as f32)
}

/// Cast `ray_count` rays sweeping the pose's field of view
pub fn project(grid: &GridMap, pose: &CameraPose, block_size: f32, ray_count: usize) -> DistanceBuffer {
    let rays = (0..ray_count)
        .map(|i| {
            let offset = column_offset(pose.fov, ray_count, i);
            cast_column(grid, pose, block_size, i, offset)
        })
        .collect();
    DistanceBuffer { rays }
}

#[inline]
fn cast_column(grid: &GridMap, pose: &CameraPose, block_size: f32, column: usize, offset: f32) -> Ray {
    let mut ray = cast_ray(grid, pose, block_size, pose.yaw + offset);
    ray.column = column;
    ray.offset = offset;
    ray
}

/// Frame-to-frame projector.
///
/// Keeps the buffer allocation and a table of per-column offsets, rebuilt
/// only when the field of view or ray count changes.
pub struct Projector {
    block_size: f32,
    parallel: bool,
    table_fov: f32,
    offsets: Vec<f32>,
    buffer: DistanceBuffer,
}

impl Projector {
    pub fn new(block_size: f32, parallel: bool) -> Self {
        Self {
            block_size,
            parallel,
            table_fov: f32::NAN,
            offsets: Vec::new(),
            buffer: DistanceBuffer::default(),
        }
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    pub fn buffer(&self) -> &DistanceBuffer {
        &self.buffer
    }

    /// Per-column offsets from the last projection
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    fn rebuild_table(&mut self, fov: f32, ray_count: usize) {
        if self.table_fov == fov && self.offsets.len() == ray_count {
            return;
        }
        self.offsets = (0..ray_count).map(|i| column_offset(fov, ray_count, i)).collect();
        self.table_fov = fov;
        self.buffer.rays.resize(ray_count, Ray::default());
    }

    pub fn project(&mut self, grid: &GridMap, pose: &CameraPose, ray_count: usize) -> &DistanceBuffer {
        self.rebuild_table(pose.fov, ray_count);

        let block_size = self.block_size;
        let offsets = &self.offsets;
        let rays = &mut self.buffer.rays;

        if self.parallel {
            // Columns are independent; each task writes only its own slot
            rays.par_iter_mut().enumerate().for_each(|(i, slot)| {
                *slot = cast_column(grid, pose, block_size, i, offsets[i]);
            });
        } else {
            for (i, slot) in rays.iter_mut().enumerate() {
                *slot = cast_column(grid, pose, block_size, i, offsets[i]);
            }
        }

        &self.buffer
    }
}
