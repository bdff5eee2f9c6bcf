use crate::interaction::Command;
use crate::tracking::CameraMovement;
use crate::ui::SliderState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard/pointer state for the desktop simulator.
///
/// Held keys drive the camera; key presses and taps are queued until the
/// next frame drains them. Scale and rotation keys step the same
/// [`SliderState`] the on-screen sliders edit.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub movement: CameraMovement,
    commands: Vec<Command>,
    tap: bool,
}

impl InputState {
    pub fn handle_key(&mut self, key: PhysicalKey, pressed: bool, sliders: &mut SliderState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match code {
            KeyCode::ArrowLeft => self.movement.aim_left = pressed,
            KeyCode::ArrowRight => self.movement.aim_right = pressed,
            KeyCode::ArrowUp => self.movement.aim_up = pressed,
            KeyCode::ArrowDown => self.movement.aim_down = pressed,
            KeyCode::KeyW => self.movement.move_forward = pressed,
            KeyCode::KeyS => self.movement.move_backward = pressed,
            KeyCode::KeyA => self.movement.move_left = pressed,
            KeyCode::KeyD => self.movement.move_right = pressed,
            KeyCode::KeyR => self.movement.move_up = pressed,
            KeyCode::KeyF => self.movement.move_down = pressed,
            _ if pressed => {
                if let Some(command) = command_for(code, sliders) {
                    self.commands.push(command);
                }
            }
            _ => {}
        }
    }

    pub fn handle_tap(&mut self) {
        self.tap = true;
    }

    /// Drains this frame's commands and tap.
    pub fn take_frame(&mut self) -> (Vec<Command>, bool) {
        (std::mem::take(&mut self.commands), std::mem::take(&mut self.tap))
    }
}

fn command_for(code: KeyCode, sliders: &mut SliderState) -> Option<Command> {
    let command = match code {
        KeyCode::KeyP => Command::EnterPlacement,
        KeyCode::KeyM => Command::EnterManipulation,
        KeyCode::KeyN | KeyCode::BracketRight => Command::SelectNext,
        KeyCode::KeyB | KeyCode::BracketLeft => Command::SelectPrevious,
        KeyCode::KeyG => Command::BeginMove,
        KeyCode::Equal => sliders.step_scale(1.0),
        KeyCode::Minus => sliders.step_scale(-1.0),
        KeyCode::KeyE => sliders.step_rotation(1.0),
        KeyCode::KeyQ => sliders.step_rotation(-1.0),
        _ => return None,
    };
    Some(command)
}
