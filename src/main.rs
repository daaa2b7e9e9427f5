use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_raycaster::input::InputState;
use grid_raycaster::{Engine, EngineConfig, Error, Frame, Result};

/// First-person raycaster over a random grid world
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of obstacle samples
    #[arg(long)]
    obstacles: Option<usize>,

    /// Keep the cursor free instead of using it to look around
    #[arg(long)]
    no_mouse_look: bool,
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    config: EngineConfig,
    engine: Engine,
    input: InputState,
    mouse_look: bool,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,
    last_tick: Instant,

    error: Option<Error>,
}

impl App {
    fn new(config: EngineConfig) -> Result<Self> {
        let engine = Engine::new(&config)?;
        Ok(Self {
            window: None,
            surface: None,
            mouse_look: config.camera.mouse_look,
            config,
            engine,
            input: InputState::default(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            last_tick: Instant::now(),
            error: None,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        if self.mouse_look {
            window.set_cursor_visible(false);
        }

        let size = window.inner_size();
        log::info!("Window created at {}x{}", size.width, size.height);

        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
        Ok(())
    }

    fn center(window: &Window) -> PhysicalPosition<f64> {
        let size = window.inner_size();
        PhysicalPosition::new(size.width as f64 / 2.0, size.height as f64 / 2.0)
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
        self.last_tick = now;

        let center = Self::center(window);
        let look_center = self.mouse_look.then_some([center.x, center.y]);
        let deltas = self.input.deltas(look_center);

        if self.mouse_look {
            // Warp back so the next offset is relative to this frame
            match window.set_cursor_position(center) {
                Ok(()) => self.input.recenter([center.x, center.y]),
                Err(e) => log::debug!("Cursor warp failed: {}", e),
            }
        }

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized window, still advance the camera
            self.engine.controller.advance(&deltas, dt.as_secs_f32());
            return Ok(());
        };

        surface.resize(w, h)?;
        let mut buf = surface.buffer_mut()?;
        {
            let mut frame = Frame::new(&mut buf, w.get() as usize, h.get() as usize);
            self.engine.frame(&deltas, dt.as_secs_f32(), &mut frame);
        }
        buf.present()?;

        // Print FPS
        self.frame_counter += 1;
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let pose = self.engine.controller.pose;
            log::info!(
                "FPS: {:.1} pos=({:.0}, {:.0}) yaw={:.1} pitch={:.1}",
                self.frame_counter as f32 / elapsed,
                pose.position[0],
                pose.position[1],
                pose.yaw,
                pose.pitch
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }

    fn key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                self.input.press(code);
                if repeat {
                    return;
                }
                match code {
                    KeyCode::Escape => {
                        log::info!("Escape pressed; stopping");
                        event_loop.exit();
                    }
                    KeyCode::KeyM => self.engine.minimap.toggle(),
                    _ => (),
                }
            }
            ElementState::Released => self.input.release(code),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok(()) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.key(event_loop, code, state, repeat),

            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => self.input.cursor_left(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("Resized to {}x{}", new_size.width, new_size.height);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(obstacles) = args.obstacles {
        config.world.obstacles = obstacles;
    }
    if args.no_mouse_look {
        config.camera.mouse_look = false;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let event_loop = EventLoop::new()?;
    // Redraws are requested every frame, so Poll keeps the loop spinning
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
