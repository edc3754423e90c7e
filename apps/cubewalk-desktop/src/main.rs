use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cubewalk_assets::load_texture_or_fallback;
use cubewalk_camera::{CameraController, CameraState};
use cubewalk_common::DemoConfig;
use cubewalk_input::{Action, InputState, KeyBindings};
use cubewalk_render_wgpu::{ShaderSet, WgpuRenderer};
use cubewalk_scene::{FramePlan, MazeLayout, Scene};
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

/// Longest frame step fed to the camera, in seconds.
const MAX_FRAME_DT: f32 = 0.1;
/// Trackpad pixels per scroll line.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SceneChoice {
    Cubes,
    Maze,
}

#[derive(Parser)]
#[command(name = "cubewalk-desktop", about = "Walk around textured cube scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = SceneChoice::Cubes)]
    scene: SceneChoice,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Texture image, overriding the config
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Maze layout file for the maze scene
    #[arg(long)]
    maze: Option<PathBuf>,
}

/// Where look deltas come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookSource {
    /// Relative device motion. Unbounded, used whenever the cursor is grabbed.
    RawMotion,
    /// Absolute cursor positions through the first-sample latch. Stops at the
    /// window edge, so only used when no grab is available.
    Cursor,
}

/// Everything that changes from frame to frame, independent of the GPU.
struct AppState {
    scene: Scene,
    camera: CameraState,
    controller: CameraController,
    bindings: KeyBindings,
    input: InputState,
    aspect: f32,
    show_hud: bool,
    quit_requested: bool,
    look_source: LookSource,
    last_frame: Instant,
    fps: f32,
}

impl AppState {
    fn new(scene: Scene, config: &DemoConfig) -> Result<Self> {
        let mut camera = scene.camera();
        camera.speed = config.move_speed;
        camera.sensitivity = config.mouse_sensitivity;
        let bindings = KeyBindings::with_overrides(&config.key_bindings)
            .context("invalid key_bindings in config")?;

        Ok(Self {
            scene,
            camera,
            controller: CameraController::new(config.sprint_multiplier),
            bindings,
            input: InputState::new(),
            aspect: config.aspect(),
            show_hud: true,
            quit_requested: false,
            look_source: LookSource::Cursor,
            last_frame: Instant::now(),
            fps: 0.0,
        })
    }

    fn update(&mut self, dt: f32) {
        let frame = self.input.take_frame();
        self.controller.apply(&mut self.camera, &frame, dt);
        if dt > 0.0 {
            self.fps = self.fps * 0.9 + (1.0 / dt) * 0.1;
        }
    }

    /// `key` is a winit key code name such as `KeyW`.
    fn handle_key(&mut self, key: &str, pressed: bool) {
        let Some(action) = self.bindings.lookup(key) else {
            return;
        };
        if !pressed {
            self.input.release(action);
            return;
        }
        if !self.input.press(action) {
            return;
        }
        match action {
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::Quit => self.quit_requested = true,
            _ => {}
        }
    }

    fn set_cursor_grabbed(&mut self, grabbed: bool) {
        let source = if grabbed {
            LookSource::RawMotion
        } else {
            LookSource::Cursor
        };
        if source != self.look_source {
            tracing::debug!("look input from {source:?}");
            self.look_source = source;
            self.input.reset_cursor();
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        if self.look_source == LookSource::Cursor {
            self.input.cursor_moved(x, y);
        }
    }

    fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.look_source == LookSource::RawMotion {
            self.input.raw_motion(dx, dy);
        }
    }

    fn set_surface_size(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// One-line control summary from the live bindings.
    fn controls_hint(&self) -> String {
        let keys = |action| {
            let keys: Vec<&str> = self
                .bindings
                .keys_for(action)
                .into_iter()
                .map(|k| k.strip_prefix("Key").unwrap_or(k))
                .collect();
            if keys.is_empty() {
                "-".to_string()
            } else {
                keys.join("/")
            }
        };
        format!(
            "Move: {} {} {} {} | Sprint: {} | Wheel: Zoom | HUD: {} | Quit: {}",
            keys(Action::MoveForward),
            keys(Action::StrafeLeft),
            keys(Action::MoveBackward),
            keys(Action::StrafeRight),
            keys(Action::Sprint),
            keys(Action::ToggleHud),
            keys(Action::Quit),
        )
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let p = self.camera.position;
        egui::Window::new("cubewalk")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Scene: {} ({} instances)",
                    self.scene.name,
                    self.scene.instances.len()
                ));
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!(
                    "Yaw {:.1}  Pitch {:.1}  FOV {:.1}",
                    self.camera.yaw(),
                    self.camera.pitch(),
                    self.camera.fov()
                ));
                ui.label(format!("Mode: {:?}", self.camera.mode));
                ui.label(format!("{:.0} fps", self.fps));
                ui.separator();
                ui.small(self.controls_hint());
            });
    }
}

/// GPU and window objects, created once in `resumed`.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    settings: DemoConfig,
    texture_path: Option<PathBuf>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState, settings: DemoConfig, texture_path: Option<PathBuf>) -> Self {
        Self {
            state,
            settings,
            texture_path,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title(format!("cubewalk - {}", self.state.scene.name))
            .with_inner_size(PhysicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubewalk_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let texture = load_texture_or_fallback(
            self.texture_path.as_deref(),
            device.limits().max_texture_dimension_2d,
        );
        let shaders = ShaderSet::load(self.settings.shader_dir.as_deref());
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.state.scene,
            &texture,
            &shaders,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    /// Hide and grab the cursor, locked if the platform allows it, else
    /// confined. Either way look follows raw device motion.
    fn grab_cursor(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        gpu.window.set_cursor_visible(false);
        for mode in [CursorGrabMode::Locked, CursorGrabMode::Confined] {
            match gpu.window.set_cursor_grab(mode) {
                Ok(()) => {
                    tracing::debug!("cursor grabbed ({mode:?})");
                    self.state.set_cursor_grabbed(true);
                    return;
                }
                Err(e) => tracing::debug!("cursor grab {mode:?} unavailable: {e}"),
            }
        }
        tracing::warn!("could not grab the cursor; look may stop at the window edge");
        self.state.set_cursor_grabbed(false);
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.state.last_frame = now;
        self.state.update(dt);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let state = &self.state;

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let plan = FramePlan::build(&state.scene, &state.camera, state.aspect);
        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &plan);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                self.state.set_surface_size(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
                self.grab_cursor();
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state
                        .set_surface_size(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    self.grab_cursor();
                } else {
                    self.state.input.focus_lost();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(&format!("{key:?}"), key_state == ElementState::Pressed);
                if self.state.quit_requested {
                    tracing::info!("quit requested");
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
                };
                self.state.input.scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn load_scene(choice: SceneChoice, maze: Option<&PathBuf>) -> Result<Scene> {
    Ok(match choice {
        SceneChoice::Cubes => Scene::floating_cubes(),
        SceneChoice::Maze => {
            let layout = match maze {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("reading maze {}", path.display()))?;
                    MazeLayout::parse(&text)
                        .with_context(|| format!("parsing maze {}", path.display()))?
                }
                None => MazeLayout::default(),
            };
            Scene::maze(&layout)
        }
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubewalk-desktop starting");

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DemoConfig::default(),
    };
    let texture_path = cli.texture.clone().or_else(|| config.texture_path.clone());

    let scene = load_scene(cli.scene, cli.maze.as_ref())?;
    tracing::info!(
        "scene '{}' with {} instances ({})",
        scene.name,
        scene.instances.len(),
        if scene.is_lit() { "lit" } else { "unlit" }
    );
    let state = AppState::new(scene, &config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, config, texture_path);
    event_loop.run_app(&mut app)?;

    Ok(())
}
