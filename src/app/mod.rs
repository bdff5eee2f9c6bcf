mod egui_host;
mod input;
mod script;
mod timing;

use crate::config::{AppConfig, ConfigError};
use crate::interaction::{FrameOutput, ModeController};
use crate::placement::PlacementOutcome;
use crate::render::{OverlayPainter, RenderError};
use crate::tracking::SimulatedDevice;
use crate::ui::SliderState;
use egui_host::EguiHost;
use input::InputState;
use script::ScriptError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use timing::FrameTiming;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

const WINDOW_TITLE: &str = "arplace";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("renderer error: {0}")]
    Render(#[from] RenderError),
    #[error("{0}\nusage: arplace [--config <path>] [--script <path>]")]
    Usage(String),
}

/// Command line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl Options {
    pub fn parse<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut options.config,
                "--script" => &mut options.script,
                other => return Err(AppError::Usage(format!("unexpected argument `{other}`"))),
            };
            let value = args
                .next()
                .ok_or_else(|| AppError::Usage(format!("{arg} needs a path")))?;
            *slot = Some(PathBuf::from(value));
        }
        Ok(options)
    }
}

struct App {
    window: Option<Arc<Window>>,
    viewport: [u32; 2],
    controller: ModeController,
    device: SimulatedDevice,
    input: InputState,
    sliders: SliderState,
    egui: Option<EguiHost>,
    painter: Option<OverlayPainter>,
    last_frame: Option<FrameOutput>,
    timing: FrameTiming,
    target_frame_duration: Duration,
    next_frame_time: Instant,
    startup_error: Option<AppError>,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        Self {
            window: None,
            viewport: config.viewport,
            controller: new_controller(config),
            device: SimulatedDevice::new(config.camera_controller(), config.detected_planes()),
            input: InputState::default(),
            sliders: SliderState::new(
                config.default_scale,
                config.scale_bounds(),
                config.rotation_bounds(),
                config.scale_step,
                config.rotation_step,
            ),
            egui: None,
            painter: None,
            last_frame: None,
            timing: FrameTiming::new(WINDOW_TITLE.to_string()),
            target_frame_duration: Duration::from_millis(16),
            next_frame_time: Instant::now(),
            startup_error: None,
        }
    }

    fn update_target_frame_duration(&mut self, window: &Window) {
        let mut target = Duration::from_millis(16);
        if let Some(monitor) = window.current_monitor() {
            if let Some(millihz) = monitor.refresh_rate_millihertz() {
                let hz = millihz as f32 / 1000.0;
                if hz > 1.0 {
                    target = Duration::from_secs_f32(1.0 / hz);
                }
            }
        }
        self.target_frame_duration = target;
        self.next_frame_time = Instant::now() + self.target_frame_duration;
    }

    fn frame(&mut self) {
        let now = Instant::now();
        self.timing.update(self.window.as_deref(), now);
        self.device
            .camera
            .update_movement(&self.input.movement, self.timing.frame_dt);

        let (mut commands, tap) = self.input.take_frame();
        let mut overlay = None;
        if let (Some(egui), Some(window), Some(last)) =
            (&mut self.egui, &self.window, &self.last_frame)
        {
            let (mut panel_commands, painted) = egui.run_panel(window, last, &mut self.sliders);
            panel_commands.append(&mut commands);
            commands = panel_commands;
            overlay = Some(painted);
        }
        for command in commands {
            self.controller.handle_command(command);
        }
        let frame = self.controller.tick(&self.device, tap);
        self.report(&frame);
        self.last_frame = Some(frame);

        if let (Some(painter), Some(overlay)) = (&mut self.painter, overlay) {
            painter.paint(overlay);
        }
    }

    fn report(&mut self, frame: &FrameOutput) {
        if let Some(outcome) = frame.outcome {
            let index = match outcome {
                PlacementOutcome::Spawned(index) | PlacementOutcome::Relocated(index) => index,
            };
            if let Some(object) = self.controller.registry().get(index) {
                let t = &object.transform;
                log::debug!(
                    "{} at ({:.2}, {:.2}, {:.2}) yaw {:.0}",
                    object.display_name(self.controller.labels().noun()),
                    t.position.x,
                    t.position.y,
                    t.position.z,
                    t.yaw_degrees()
                );
            }
        }

        let mut status = frame.mode.name().to_string();
        if let Some(label) = &frame.label {
            status.push_str(" | ");
            status.push_str(label);
        }
        status.push_str(if frame.indicator.is_some() {
            " | surface"
        } else {
            " | no surface"
        });
        if frame.visibility.scale_slider {
            status.push_str(&format!(
                " | scale {:.2} rot {:.0}",
                self.sliders.scale(),
                self.sliders.rotation()
            ));
        }
        status.push_str(&format!(" | {} placed", self.controller.registry().len()));
        self.timing.set_status(status);
    }
}

fn new_controller(config: &AppConfig) -> ModeController {
    ModeController::new(config.plane_filter, config.default_scale, &config.object_noun)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.viewport[0], self.viewport[1]))
            .with_resizable(true);

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                let painter = match OverlayPainter::new(window.clone()) {
                    Ok(painter) => painter,
                    Err(err) => {
                        log::error!("Failed to initialise renderer: {err}");
                        self.startup_error = Some(err.into());
                        event_loop.exit();
                        return;
                    }
                };
                let size = window.inner_size();
                self.device.camera.set_viewport(size.width, size.height);
                self.update_target_frame_duration(&window);
                self.egui = Some(EguiHost::new(&window));
                self.painter = Some(painter);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Failed to create window: {err}");
                self.startup_error = Some(winit::error::EventLoopError::Os(err).into());
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
        let consumed = match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                let pressed = event.state == ElementState::Pressed;
                // Releases always pass through so held movement keys cannot stick.
                if !consumed || !pressed {
                    self.input
                        .handle_key(event.physical_key, pressed, &mut self.sliders);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !consumed => self.input.handle_tap(),
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started && !consumed => {
                self.input.handle_tap()
            }
            WindowEvent::Resized(new_size) => {
                self.device.camera.set_viewport(new_size.width, new_size.height);
                if let Some(painter) = &mut self.painter {
                    painter.resize(new_size);
                }
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::Moved(_) => {
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame_time {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame_time = now + self.target_frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame_time));
    }
}

pub fn run() -> Result<(), AppError> {
    let options = Options::parse(std::env::args().skip(1))?;
    let config = AppConfig::load_or_default(options.config.as_deref())?;

    if let Some(path) = &options.script {
        let steps = script::load(path)?;
        let mut controller = new_controller(&config);
        let mut device = SimulatedDevice::new(config.camera_controller(), config.detected_planes());
        let report = script::replay(&mut controller, &mut device, &steps);
        if controller.registry().is_empty() {
            log::info!("No {} placed", config.object_noun);
        }
        for object in controller.registry().iter() {
            let t = &object.transform;
            log::info!(
                "{} at ({:.2}, {:.2}, {:.2}) yaw {:.0} scale {:.2}",
                object.display_name(&config.object_noun),
                t.position.x,
                t.position.y,
                t.position.z,
                t.yaw_degrees(),
                t.scale.x
            );
        }
        if let Some(frame) = report.last_frame {
            log::info!("Final mode: {}", frame.mode.name());
        }
        return Ok(());
    }

    log::info!("arplace simulator: click to place, M/P switch modes, Esc quits");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&config);
    log::info!("Simulating {} detected planes", app.device.planes().len());
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.startup_error {
        return Err(err);
    }
    log::info!("Placed {} objects", app.controller.registry().len());
    Ok(())
}
