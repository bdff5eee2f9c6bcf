//! egui adapter for the on-screen controls.
//!
//! The panel only draws the controls a [`FrameOutput`] marks visible and turns
//! widget responses into [`Command`]s; it never touches the interaction state.

use crate::interaction::{Command, FrameOutput};
use std::ops::RangeInclusive;

/// Widget responses gathered during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelResponse {
    pub placement_clicked: bool,
    pub manipulation_clicked: bool,
    pub prev_clicked: bool,
    pub next_clicked: bool,
    pub move_clicked: bool,
    pub scale_changed: bool,
    pub rotation_changed: bool,
}

impl PanelResponse {
    /// Commands in the order the controls are laid out.
    pub fn into_commands(self, scale: f32, rotation: f32) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.placement_clicked {
            commands.push(Command::EnterPlacement);
        }
        if self.manipulation_clicked {
            commands.push(Command::EnterManipulation);
        }
        if self.prev_clicked {
            commands.push(Command::SelectPrevious);
        }
        if self.next_clicked {
            commands.push(Command::SelectNext);
        }
        if self.scale_changed {
            commands.push(Command::SetScale(scale));
        }
        if self.rotation_changed {
            commands.push(Command::SetRotation(rotation));
        }
        if self.move_clicked {
            commands.push(Command::BeginMove);
        }
        commands
    }
}

/// Scale and rotation values shared by the sliders and the keyboard steps.
///
/// Values persist across selections, like the on-screen sliders they back.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    scale: f32,
    rotation: f32,
    scale_range: RangeInclusive<f32>,
    rotation_range: RangeInclusive<f32>,
    scale_step: f32,
    rotation_step: f32,
}

impl SliderState {
    pub fn new(
        initial_scale: f32,
        scale_range: RangeInclusive<f32>,
        rotation_range: RangeInclusive<f32>,
        scale_step: f32,
        rotation_step: f32,
    ) -> Self {
        Self {
            scale: clamp_to(initial_scale, &scale_range),
            rotation: *rotation_range.start(),
            scale_range,
            rotation_range,
            scale_step,
            rotation_step,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Moves the scale by `steps` increments and returns the matching command.
    pub fn step_scale(&mut self, steps: f32) -> Command {
        self.scale = clamp_to(self.scale + steps * self.scale_step, &self.scale_range);
        Command::SetScale(self.scale)
    }

    pub fn step_rotation(&mut self, steps: f32) -> Command {
        self.rotation = clamp_to(
            self.rotation + steps * self.rotation_step,
            &self.rotation_range,
        );
        Command::SetRotation(self.rotation)
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// Everything one egui pass produced: the commands and the shapes to paint.
pub struct PanelFrame {
    pub commands: Vec<Command>,
    pub output: egui::FullOutput,
}

/// Runs one egui pass over `raw_input` and draws the controls for `frame`.
pub fn run_frame(
    ctx: &egui::Context,
    raw_input: egui::RawInput,
    frame: &FrameOutput,
    sliders: &mut SliderState,
) -> PanelFrame {
    let mut commands = Vec::new();
    let output = ctx.run(raw_input, |ctx| {
        commands = show(ctx, frame, sliders);
    });
    PanelFrame { commands, output }
}

/// Draws the bottom control strip and the centre reticle.
pub fn show(ctx: &egui::Context, frame: &FrameOutput, sliders: &mut SliderState) -> Vec<Command> {
    draw_reticle(ctx, frame.indicator.is_some());

    let vis = frame.visibility;
    let mut response = PanelResponse::default();

    egui::TopBottomPanel::bottom("placement_controls").show(ctx, |ui| {
        if vis.selection_label {
            if let Some(label) = &frame.label {
                ui.label(label.as_str());
            }
        }

        if vis.scale_slider {
            let range = sliders.scale_range.clone();
            response.scale_changed = ui
                .add(egui::Slider::new(&mut sliders.scale, range).text("Scale"))
                .changed();
        }
        if vis.rotation_slider {
            let range = sliders.rotation_range.clone();
            response.rotation_changed = ui
                .add(
                    egui::Slider::new(&mut sliders.rotation, range)
                        .text("Rotation")
                        .suffix("°"),
                )
                .changed();
        }

        ui.horizontal(|ui| {
            if vis.prev_button {
                response.prev_clicked = ui.button("Prev").clicked();
            }
            if vis.next_button {
                response.next_clicked = ui.button("Next").clicked();
            }
            if vis.move_button {
                let caption = frame.move_button_caption.as_deref().unwrap_or("Move");
                response.move_clicked = ui.button(caption).clicked();
            }
            if vis.placement_mode_button {
                response.placement_clicked = ui.button("Placement").clicked();
            }
            if vis.manipulation_mode_button {
                response.manipulation_clicked = ui.button("Manipulation").clicked();
            }
        });
    });

    response.into_commands(sliders.scale, sliders.rotation)
}

/// Crosshair at the raycast origin; green while a surface is under it.
fn draw_reticle(ctx: &egui::Context, on_surface: bool) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let center = painter.clip_rect().center();
    let color = if on_surface {
        egui::Color32::from_rgb(96, 220, 120)
    } else {
        egui::Color32::from_gray(160)
    };
    let stroke = egui::Stroke::new(2.0, color);
    painter.circle_stroke(center, 12.0, stroke);
    painter.line_segment([center - egui::vec2(20.0, 0.0), center + egui::vec2(20.0, 0.0)], stroke);
    painter.line_segment([center - egui::vec2(0.0, 20.0), center + egui::vec2(0.0, 20.0)], stroke);
}
