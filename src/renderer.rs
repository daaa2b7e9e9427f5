use crate::camera::{CameraPose, PITCH_LIMIT};
use crate::caster::Ray;
use crate::config::{ColorScheme, MinimapConfig, RenderConfig};
use crate::projector::DistanceBuffer;
use crate::surface::{RenderTarget, Rgb};
use crate::world::GridMap;

/// Floor for the corrected distance so the height divide stays finite
pub const MIN_DISTANCE: f32 = 1.0;

const MINIMAP_WALL: Rgb = Rgb::new(200, 200, 200);
const MINIMAP_CAMERA: Rgb = Rgb::new(0, 255, 0);
const RAY_NEAR: Rgb = Rgb::new(255, 0, 0);
const RAY_FAR: Rgb = Rgb::new(255, 200, 0);

/// Screen-space parameters a slice is computed against
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub ray_count: usize,
    pub wall_height_factor: f32,
}

/// Distance-to-brightness mapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub min: f32,
    pub max: f32,
    pub scheme: ColorScheme,
}

impl Shading {
    /// Linear falloff over `[0, max_ray_length]`, never below `min`
    pub fn level(&self, corrected: f32, max_ray_length: f32) -> f32 {
        let t = if max_ray_length > 0.0 {
            corrected / max_ray_length
        } else {
            1.0
        };
        let v = self.max - t * (self.max - self.min);
        if v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }

    pub fn color(&self, corrected: f32, max_ray_length: f32) -> Rgb {
        let v = self.level(corrected, max_ray_length).clamp(0.0, 255.0);
        match self.scheme {
            ColorScheme::Blue => Rgb::new(0, 0, v as u8),
            ColorScheme::Tinted => Rgb::new((v * 0.35) as u8, (v * 0.6) as u8, v as u8),
        }
    }
}

/// Screen-space wall column derived from one ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlice {
    pub column: usize,
    pub x: f32,
    pub width: f32,
    pub y: f32,
    pub height: f32,
    pub corrected_distance: f32,
    pub color: Rgb,
}

/// Perpendicular distance: the raw Euclidean distance projected on the
/// forward axis.
#[inline]
pub fn corrected_distance(ray: &Ray) -> f32 {
    ray.distance * ray.offset.to_radians().cos()
}

/// Slice height for a corrected distance, clamped at `MIN_DISTANCE`
#[inline]
pub fn slice_height(corrected: f32, viewport: &Viewport) -> f32 {
    (viewport.wall_height_factor / corrected.max(MIN_DISTANCE)) * viewport.height
}

/// Top edge of a slice with pitch applied, kept overlapping the screen
pub fn slice_top(height: f32, pitch: f32, screen_height: f32) -> f32 {
    let half = screen_height / 2.0;
    let mut y = half - height / 2.0 + pitch * half / PITCH_LIMIT;
    if y > screen_height {
        y = screen_height - height;
    }
    if y + height < 0.0 {
        y = 0.0;
    }
    y
}

pub fn slice_for(ray: &Ray, pose: &CameraPose, viewport: &Viewport, shading: &Shading) -> WallSlice {
    let corrected = corrected_distance(ray).max(MIN_DISTANCE);
    let width = viewport.width / viewport.ray_count.max(1) as f32;
    let height = slice_height(corrected, viewport);
    WallSlice {
        column: ray.column,
        x: ray.column as f32 * width,
        width,
        y: slice_top(height, pose.pitch, viewport.height),
        height,
        corrected_distance: corrected,
        color: shading.color(corrected, pose.max_ray_length),
    }
}

/// Top-down overlay of the grid and the current rays
#[derive(Clone, Copy, Debug)]
pub struct Minimap {
    pub enabled: bool,
    pub scale: f32,
    pub max_rays: usize,
}

impl Minimap {
    pub fn from_config(config: &MinimapConfig) -> Self {
        Self {
            enabled: config.enabled,
            scale: config.scale,
            max_rays: config.max_rays,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn draw(
        &self,
        target: &mut dyn RenderTarget,
        grid: &GridMap,
        block_size: f32,
        buffer: &DistanceBuffer,
        pose: &CameraPose,
    ) {
        if !self.enabled || !(self.scale > 0.0) {
            return;
        }
        let s = self.scale;
        let cell = block_size * s;

        for (x, y) in grid.walls() {
            target.fill_rect(x as f32 * cell, y as f32 * cell, cell, cell, MINIMAP_WALL);
        }

        let origin = [pose.position[0] * s, pose.position[1] * s];
        if self.max_rays > 0 && !buffer.is_empty() {
            let stride = buffer.len().div_ceil(self.max_rays);
            for ray in buffer.rays.iter().step_by(stride) {
                let end = [ray.hit_point[0] * s, ray.hit_point[1] * s];
                target.draw_line(origin, RAY_NEAR, end, RAY_FAR);
            }
        }

        target.fill_rect(origin[0] - 2.0, origin[1] - 2.0, 5.0, 5.0, MINIMAP_CAMERA);
    }
}

pub struct Renderer {
    pub wall_height_factor: f32,
    pub shading: Shading,
    pub background: Rgb,
}

impl Renderer {
    pub fn from_config(config: &RenderConfig) -> Self {
        let [r, g, b] = config.background;
        Self {
            wall_height_factor: config.wall_height_factor,
            shading: Shading {
                min: config.shade_min,
                max: config.shade_max,
                scheme: config.color_scheme,
            },
            background: Rgb::new(r, g, b),
        }
    }

    pub fn viewport(&self, target: &dyn RenderTarget, ray_count: usize) -> Viewport {
        let (w, h) = target.size();
        Viewport {
            width: w as f32,
            height: h as f32,
            ray_count,
            wall_height_factor: self.wall_height_factor,
        }
    }

    /// Clear, then draw one slice per ray, left to right
    pub fn render(&self, target: &mut dyn RenderTarget, buffer: &DistanceBuffer, pose: &CameraPose) {
        target.clear(self.background);
        if buffer.is_empty() {
            return;
        }

        let viewport = self.viewport(target, buffer.len());
        for ray in &buffer.rays {
            let slice = slice_for(ray, pose, &viewport, &self.shading);
            target.fill_rect(slice.x, slice.y, slice.width, slice.height, slice.color);
        }
    }
}
