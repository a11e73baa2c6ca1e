//! Application event loop.
//!
//! Everything happens on the single winit event loop thread:
//!
//! 1. `resumed` creates the window and initialises the GPU (blocking on a
//!    tokio runtime natively, `spawn_local` + [`FanEvent::Initialized`] in the
//!    browser)
//! 2. speed buttons and keys arrive as [`FanEvent::SetSpeed`]
//! 3. every `RedrawRequested` re-requests the next redraw while the
//!    [`FrameLoop`] runs, advances it and renders the posed fan
//!
//! Updates are per frame. Frame pacing is whatever the platform presents at
//! (vsync natively, `requestAnimationFrame` in the browser).

use std::{iter, sync::Arc};

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::Key,
    window::Window,
};

use crate::{
    animation::FrameLoop,
    config::SceneConfig,
    context::Context,
    controls::Speed,
    render::Renderer,
    scene::{Fan, build_fan},
};

/// User events delivered through the winit event loop.
pub enum FanEvent {
    /// GPU initialisation finished (browser only, natively it is awaited in place).
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    SetSpeed(Speed),
}

impl std::fmt::Debug for FanEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::SetSpeed(speed) => f.debug_tuple("SetSpeed").field(speed).finish(),
        }
    }
}

pub struct AppState {
    pub(crate) ctx: Context,
    renderer: Renderer,
    fan: Fan,
    frame_loop: FrameLoop,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, &config)
            .await
            .context("App initialization failed. Cannot create the main context")?;
        let renderer = Renderer::new(
            &ctx.device,
            &ctx.config,
            &ctx.camera.bind_group_layout,
            &ctx.light.bind_group_layout,
        );
        let fan = build_fan(&config);
        let frame_loop = FrameLoop::new(&config.animation);
        Ok(Self {
            ctx,
            renderer,
            fan,
            frame_loop,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        } else {
            log::debug!("ignoring resize to {}x{}", width, height);
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        if !self.is_surface_configured {
            return Ok(());
        }

        let (output, reconfigure) = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output) => (output, false),
            wgpu::CurrentSurfaceTexture::Suboptimal(output) => (output, true),
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                log::warn!("surface outdated, reconfiguring");
                self.ctx.configure_surface();
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => {
                log::warn!("skipping frame, surface texture unavailable");
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Validation => {
                anyhow::bail!("validation error while acquiring the surface texture");
            }
        };

        self.renderer
            .prepare(&self.ctx.device, &self.ctx.queue, &self.fan.scene.root);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.renderer.draw(
                &mut render_pass,
                &self.ctx.camera.bind_group,
                &self.ctx.light.bind_group,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        if reconfigure {
            self.ctx.configure_surface();
        }
        Ok(())
    }
}

/// Averages frame times over a fixed window for debug logging.
struct FrameStats {
    frames: u32,
    since: Instant,
}

impl FrameStats {
    const WINDOW: Duration = Duration::from_secs(5);

    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Self::WINDOW {
            log::debug!(
                "{} frames in {:.1}s ({:.1} fps)",
                self.frames,
                elapsed.as_secs_f64(),
                self.frames as f64 / elapsed.as_secs_f64()
            );
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FanEvent>,
    config: SceneConfig,
    state: Option<AppState>,
    // Speed chosen before the GPU was ready.
    pending_speed: Option<Speed>,
    stats: FrameStats,
}

impl App {
    fn new(event_loop: &EventLoop<FanEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the async runtime")?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
            pending_speed: None,
            stats: FrameStats::new(),
        })
    }

    fn on_initialized(&mut self, mut state: AppState) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        if let Some(speed) = self.pending_speed.take() {
            state.frame_loop.set_speed(speed);
        }
        state.frame_loop.start();
        state.ctx.window.request_redraw();
        self.state = Some(state);
    }

    fn send(&self, event: FanEvent) {
        if self.proxy.send_event(event).is_err() {
            log::warn!("event loop closed, dropping event");
        }
    }
}

impl ApplicationHandler<FanEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("fan-flow");
        #[cfg(target_arch = "wasm32")]
        {
            window_attributes = crate::web::window_attributes(window_attributes);
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        crate::web::attach(&window, &self.proxy);

        let init_future = AppState::new(window, self.config.clone());

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => self.on_initialized(state),
                Err(e) => {
                    log::error!("{:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok(state) => {
                        if proxy
                            .send_event(FanEvent::Initialized(Box::new(state)))
                            .is_err()
                        {
                            log::error!("event loop closed before initialization finished");
                        }
                    }
                    Err(e) => log::error!("{:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FanEvent) {
        match event {
            FanEvent::Initialized(state) => self.on_initialized(*state),
            FanEvent::SetSpeed(speed) => match &mut self.state {
                Some(state) => state.frame_loop.set_speed(speed),
                None => self.pending_speed = Some(speed),
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Character(key),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = &event
        {
            if let Some(speed) = Speed::from_key(key.as_str()) {
                self.send(FanEvent::SetSpeed(speed));
            }
        }

        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if state.frame_loop.is_running() {
                    state.ctx.window.request_redraw();
                }
                state.frame_loop.advance(&mut state.fan);
                if let Err(e) = state.render() {
                    log::error!("render failed: {:#}", e);
                }
                self.stats.tick();
            }
            _ => {}
        }
    }
}

/// Runs the fan until its window is closed.
pub fn run() -> anyhow::Result<()> {
    run_with_config(SceneConfig::default())
}

pub fn run_with_config(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // Fails only if a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Info);
    }

    let event_loop: EventLoop<FanEvent> = EventLoop::with_user_event()
        .build()
        .context("failed to create the event loop")?;
    let mut app = App::new(&event_loop, config)?;

    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    Ok(())
}
