use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::{CameraController, InputDeltas};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::projector::Projector;
use crate::renderer::{Minimap, Renderer};
use crate::surface::RenderTarget;
use crate::world::GridMap;

/// Everything one frame needs, independent of the window
pub struct Engine {
    pub grid: GridMap,
    pub controller: CameraController,
    pub projector: Projector,
    pub renderer: Renderer,
    pub minimap: Minimap,
    ray_count: Option<usize>,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let world = &config.world;
        let mut rng = match world.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = GridMap::generate(world.width, world.height, world.obstacles, &mut rng)?;

        log::info!(
            "World {}x{} cells, block {} units, {} wall cells",
            grid.width(),
            grid.height(),
            world.block_size,
            grid.wall_count()
        );

        Ok(Self {
            grid,
            controller: CameraController::from_config(&config.camera),
            projector: Projector::new(world.block_size, config.render.parallel_columns),
            renderer: Renderer::from_config(&config.render),
            minimap: Minimap::from_config(&config.minimap),
            ray_count: config.render.ray_count.map(|n| n as usize),
        })
    }

    /// Configured ray count, or one ray per pixel column
    pub fn ray_count(&self, screen_width: usize) -> usize {
        self.ray_count.unwrap_or(screen_width)
    }

    /// Pose update, full ray pass, then draw
    pub fn frame(&mut self, input: &InputDeltas, dt_s: f32, target: &mut dyn RenderTarget) {
        self.controller.advance(input, dt_s);

        let pose = self.controller.pose;
        let (width, _) = target.size();
        let ray_count = self.ray_count(width);
        let block_size = self.projector.block_size();
        let buffer = self.projector.project(&self.grid, &pose, ray_count);

        self.renderer.render(target, buffer, &pose);
        self.minimap.draw(target, &self.grid, block_size, buffer, &pose);
    }
}
