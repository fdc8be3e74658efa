//! Arbor - Procedural tree viewer

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

use arbor::core::{
    camera::Camera,
    camera_controller::OrbitCameraController,
    input::InputState,
    logging,
    time::FrameTimer,
};
use arbor::render::{
    buffer::{CameraBuffer, LightBuffer, MeshBuffer},
    context::GpuContext,
    pipeline::MeshPipeline,
    texture::DepthTexture,
};
use arbor::render::buffer::light_buffer::LightUniform;
use arbor::scene::{self, Scene, SceneConfig};

struct RenderResources {
    camera_buffer: CameraBuffer,
    light_buffer: LightBuffer,
    mesh_pipeline: MeshPipeline,
    depth: DepthTexture,
    bark: MeshBuffer,
    foliage: MeshBuffer,
    ground: MeshBuffer,
    grid: MeshBuffer,
}

impl RenderResources {
    fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: &Scene,
    ) -> Self {
        let camera_buffer = CameraBuffer::new(device);
        let light_buffer = LightBuffer::new(device);
        light_buffer.update(queue, &LightUniform::default());

        let mesh_pipeline = MeshPipeline::new(
            device,
            surface_format,
            camera_buffer.bind_group_layout(),
            light_buffer.bind_group_layout(),
        );
        let depth = DepthTexture::new(device, width, height);

        let (bark, foliage, ground, grid) = Self::upload_scene(device, scene);

        Self {
            camera_buffer,
            light_buffer,
            mesh_pipeline,
            depth,
            bark,
            foliage,
            ground,
            grid,
        }
    }

    fn upload_scene(
        device: &wgpu::Device,
        scene: &Scene,
    ) -> (MeshBuffer, MeshBuffer, MeshBuffer, MeshBuffer) {
        (
            MeshBuffer::from_mesh(device, "bark_vertices", &scene.bark, scene::BARK_COLOR),
            MeshBuffer::from_mesh(device, "foliage_vertices", &scene.foliage, scene::FOLIAGE_COLOR),
            MeshBuffer::from_mesh(device, "ground_vertices", &scene.ground, scene::GROUND_COLOR),
            MeshBuffer::from_line_points(device, "grid_vertices", &scene.grid_lines, scene::GRID_COLOR),
        )
    }

    fn replace_scene(&mut self, device: &wgpu::Device, scene: &Scene) {
        let (bark, foliage, ground, grid) = Self::upload_scene(device, scene);
        self.bark = bark;
        self.foliage = foliage;
        self.ground = ground;
        self.grid = grid;
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    resources: Option<RenderResources>,
    config: SceneConfig,
    scene: Scene,
    camera: Camera,
    controller: OrbitCameraController,
    input: InputState,
    timer: FrameTimer,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        let scene = scene::assemble(&config);
        log_scene(&config, &scene);

        Self {
            window: None,
            gpu: None,
            resources: None,
            config,
            scene,
            camera: Camera::new(glam::Vec3::new(0.0, 10.0, 20.0), 45.0, 16.0 / 9.0),
            controller: OrbitCameraController::new(glam::Vec3::ZERO, 22.0),
            input: InputState::new(),
            timer: FrameTimer::new(),
        }
    }

    /// Rebuild the scene from a fresh time-derived seed
    fn regenerate(&mut self) {
        self.config.seed = time_seed();
        self.scene = scene::assemble(&self.config);
        log_scene(&self.config, &self.scene);

        if let (Some(gpu), Some(resources)) = (&self.gpu, &mut self.resources) {
            resources.replace_scene(&gpu.device, &self.scene);
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(resources)) = (&self.gpu, &self.resources) else {
            return;
        };

        resources.camera_buffer.update(&gpu.queue, &self.camera);

        let frame = match gpu.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Surface texture unavailable: {}, reconfiguring", e);
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        resources.mesh_pipeline.render(
            &mut encoder,
            &view,
            &resources.depth.view,
            scene::SKY_COLOR,
            resources.camera_buffer.bind_group(),
            resources.light_buffer.bind_group(),
            &[&resources.bark, &resources.foliage, &resources.ground],
            &[&resources.grid],
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Arbor - Procedural Trees")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs).expect("Failed to create window"));

        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .expect("Failed to create GPU context");

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);
        self.controller.apply(&mut self.camera);

        log::info!("Window created: {}x{}", size.width, size.height);

        let resources = RenderResources::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            size.width,
            size.height,
            &self.scene,
        );

        self.window = Some(window);
        self.resources = Some(resources);
        self.gpu = Some(gpu);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                        self.camera.set_aspect(size.width as f32, size.height as f32);

                        if let Some(resources) = &mut self.resources {
                            resources.resize(&gpu.device, size.width, size.height);
                        }
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key {
                        match code {
                            KeyCode::Escape => event_loop.exit(),
                            KeyCode::KeyR => self.regenerate(),
                            _ => {}
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.timer.tick();
                let dt = self.timer.delta_secs();

                self.controller.update(&mut self.camera, &self.input, dt);

                self.render();

                if let Some(window) = &self.window {
                    window.set_title(&format!(
                        "Arbor - {:.1} FPS | drag=orbit, scroll=zoom, R=new tree",
                        self.timer.fps()
                    ));
                }

                self.input.end_frame();

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn log_scene(config: &SceneConfig, scene: &Scene) {
    log::info!(
        "Scene assembled: seed={}, level={}, trees={}, branches={}, leaf clusters={}, depth={}",
        config.seed,
        config.level,
        scene.stats.tree_count,
        scene.stats.branch_count,
        scene.stats.leaf_cluster_count,
        scene.stats.max_depth,
    );
}

fn main() {
    logging::init();
    log::info!("Arbor starting...");

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let mut config = SceneConfig::new(parse_seed_arg(&args).unwrap_or_else(time_seed));
    if let Some(level) = parse_level_arg(&args) {
        config.level = level;
    }
    if let Some(n) = parse_grid_arg(&args) {
        config = config.with_grid(n);
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(config);

    event_loop.run_app(&mut app).expect("Event loop error");
}

/// Seed derived from the wall clock, for runs without an explicit --seed
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Parse --seed argument from command line
fn parse_seed_arg(args: &[String]) -> Option<u64> {
    for i in 0..args.len() {
        if args[i] == "--seed" || args[i] == "-s" {
            if let Some(seed_str) = args.get(i + 1) {
                return seed_str.parse().ok();
            }
        }
    }
    None
}

/// Parse --level argument from command line (tree recursion depth)
fn parse_level_arg(args: &[String]) -> Option<i32> {
    for i in 0..args.len() {
        if args[i] == "--level" || args[i] == "-l" {
            if let Some(level_str) = args.get(i + 1) {
                return level_str.parse().ok();
            }
        }
    }
    None
}

/// Parse --grid argument from command line (plant an NxN grid of trees)
fn parse_grid_arg(args: &[String]) -> Option<u32> {
    for i in 0..args.len() {
        if args[i] == "--grid" || args[i] == "-g" {
            if let Some(grid_str) = args.get(i + 1) {
                return grid_str.parse().ok();
            }
        }
    }
    None
}

fn print_help() {
    println!("Arbor - procedural tree viewer");
    println!();
    println!("Usage: arbor [options]");
    println!("  --seed, -s <N>    seed for tree generation (default: from clock)");
    println!("  --level, -l <N>   tree recursion depth (default: 6)");
    println!("  --grid, -g <N>    plant an NxN grid of trees instead of one");
    println!("  --help, -h        show this help");
    println!();
    println!("Controls: left-drag orbits, right-drag pans, scroll zooms,");
    println!("R regenerates the tree, Escape quits.");
}
