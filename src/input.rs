use winit::event::{ElementState, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode};

/// Pixels scrolled per wheel notch.
const LINE_SCROLL_PIXELS: f64 = 35.0;

/// Tracks pointer state between window events and turns raw events into
/// editor-level actions. Positions are physical window pixels.
pub struct InputHandler {
    cursor: Option<(f64, f64)>,
    primary_down: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    None,
    Press { x: f64, y: f64 },
    Release,
    Moved { x: f64, y: f64, dragging: bool },
    Left,
    /// Positive `delta` moves the content up (towards later entries).
    Scroll { x: f64, y: f64, delta: f64 },
    Char(char),
    Backspace,
    Tab,
    Submit,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            cursor: None,
            primary_down: false,
        }
    }

    pub fn primary_down(&self) -> bool {
        self.primary_down
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) -> InputAction {
        self.cursor = Some((x, y));
        InputAction::Moved {
            x,
            y,
            dragging: self.primary_down,
        }
    }

    pub fn handle_cursor_left(&mut self) -> InputAction {
        self.cursor = None;
        InputAction::Left
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) -> InputAction {
        if button != MouseButton::Left {
            return InputAction::None;
        }
        match state {
            ElementState::Pressed => {
                self.primary_down = true;
                match self.cursor {
                    Some((x, y)) => InputAction::Press { x, y },
                    None => InputAction::None,
                }
            }
            ElementState::Released => {
                let was_down = self.primary_down;
                self.primary_down = false;
                if was_down {
                    InputAction::Release
                } else {
                    InputAction::None
                }
            }
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) -> InputAction {
        let Some((x, y)) = self.cursor else {
            return InputAction::None;
        };
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, lines) => -(lines as f64) * LINE_SCROLL_PIXELS,
            MouseScrollDelta::PixelDelta(position) => -position.y,
        };
        if delta == 0.0 {
            return InputAction::None;
        }
        InputAction::Scroll { x, y, delta }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> InputAction {
        self.handle_key(input.virtual_keycode, input.state)
    }

    pub fn handle_key(&mut self, key_code: Option<VirtualKeyCode>, state: ElementState) -> InputAction {
        if state != ElementState::Pressed {
            return InputAction::None;
        }
        match key_code {
            Some(VirtualKeyCode::Back) => InputAction::Backspace,
            Some(VirtualKeyCode::Tab) => InputAction::Tab,
            Some(VirtualKeyCode::Return) | Some(VirtualKeyCode::NumpadEnter) => InputAction::Submit,
            _ => InputAction::None,
        }
    }

    /// Text input. Control characters arrive as key presses instead.
    pub fn handle_received_character(&mut self, ch: char) -> InputAction {
        if ch.is_control() {
            InputAction::None
        } else {
            InputAction::Char(ch)
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_press_uses_last_cursor_position() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_mouse_button(MouseButton::Left, ElementState::Pressed), InputAction::None);
        input.handle_mouse_button(MouseButton::Left, ElementState::Released);

        input.handle_cursor_moved(12.0, 34.0);
        assert_eq!(
            input.handle_mouse_button(MouseButton::Left, ElementState::Pressed),
            InputAction::Press { x: 12.0, y: 34.0 }
        );
        assert!(input.primary_down());
    }

    #[test]
    fn test_motion_reports_drag_while_held() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_cursor_moved(1.0, 2.0),
            InputAction::Moved { x: 1.0, y: 2.0, dragging: false }
        );
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            input.handle_cursor_moved(3.0, 4.0),
            InputAction::Moved { x: 3.0, y: 4.0, dragging: true }
        );
        assert_eq!(input.handle_mouse_button(MouseButton::Left, ElementState::Released), InputAction::Release);
        assert_eq!(
            input.handle_cursor_moved(5.0, 6.0),
            InputAction::Moved { x: 5.0, y: 6.0, dragging: false }
        );
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let mut input = InputHandler::new();
        input.handle_cursor_moved(1.0, 1.0);
        assert_eq!(input.handle_mouse_button(MouseButton::Right, ElementState::Pressed), InputAction::None);
        assert!(!input.primary_down());
    }

    #[test]
    fn test_cursor_left_forgets_position() {
        let mut input = InputHandler::new();
        input.handle_cursor_moved(1.0, 1.0);
        assert_eq!(input.handle_cursor_left(), InputAction::Left);
        assert_eq!(input.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)), InputAction::None);
    }

    #[test]
    fn test_wheel_deltas() {
        let mut input = InputHandler::new();
        input.handle_cursor_moved(10.0, 20.0);
        assert_eq!(
            input.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -2.0)),
            InputAction::Scroll { x: 10.0, y: 20.0, delta: 70.0 }
        );
        assert_eq!(
            input.handle_mouse_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 15.0))),
            InputAction::Scroll { x: 10.0, y: 20.0, delta: -15.0 }
        );
        assert_eq!(input.handle_mouse_wheel(MouseScrollDelta::LineDelta(3.0, 0.0)), InputAction::None);
    }

    #[test]
    fn test_keys_and_characters() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key(Some(VirtualKeyCode::Back), ElementState::Pressed), InputAction::Backspace);
        assert_eq!(input.handle_key(Some(VirtualKeyCode::Tab), ElementState::Pressed), InputAction::Tab);
        assert_eq!(input.handle_key(Some(VirtualKeyCode::Return), ElementState::Pressed), InputAction::Submit);
        assert_eq!(input.handle_key(Some(VirtualKeyCode::Return), ElementState::Released), InputAction::None);
        assert_eq!(input.handle_key(None, ElementState::Pressed), InputAction::None);
        assert_eq!(input.handle_received_character('7'), InputAction::Char('7'));
        assert_eq!(input.handle_received_character('\u{8}'), InputAction::None);
        assert_eq!(input.handle_received_character('\r'), InputAction::None);
    }
}
