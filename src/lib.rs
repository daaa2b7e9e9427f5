//! Grid raycaster: one ray per screen column against an occupancy grid,
//! turned into shaded wall slices.

pub mod camera;
pub mod caster;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod projector;
pub mod renderer;
pub mod surface;
pub mod world;

pub use camera::{CameraController, CameraPose, InputDeltas};
pub use caster::{Ray, cast_ray};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use projector::{DistanceBuffer, Projector, project};
pub use renderer::{Renderer, WallSlice, slice_for};
pub use surface::{Frame, RenderTarget, Rgb};
pub use world::GridMap;
