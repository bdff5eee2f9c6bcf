use crate::interaction::{Command, FrameOutput};
use crate::render::OverlayFrame;
use crate::ui::{self, SliderState};
use winit::event::WindowEvent;
use winit::window::Window;

/// Routes window events into egui and runs the control panel each frame.
pub struct EguiHost {
    context: egui::Context,
    winit_state: egui_winit::State,
}

impl EguiHost {
    pub fn new(window: &Window) -> Self {
        let context = egui::Context::default();
        let viewport_id = egui::ViewportId::ROOT;
        let winit_state = egui_winit::State::new(
            context.clone(),
            viewport_id,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );

        Self {
            context,
            winit_state,
        }
    }

    /// True when egui claimed the event (pointer over the panel, focused slider).
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Runs the panel for `frame` and tessellates what it drew.
    pub fn run_panel(
        &mut self,
        window: &Window,
        frame: &FrameOutput,
        sliders: &mut SliderState,
    ) -> (Vec<Command>, OverlayFrame) {
        let raw_input = self.winit_state.take_egui_input(window);
        let panel = ui::run_frame(&self.context, raw_input, frame, sliders);
        let output = panel.output;
        self.winit_state
            .handle_platform_output(window, output.platform_output);

        let pixels_per_point = output.pixels_per_point;
        let overlay = OverlayFrame {
            primitives: self.context.tessellate(output.shapes, pixels_per_point),
            textures_delta: output.textures_delta,
            pixels_per_point,
        };
        (panel.commands, overlay)
    }
}
