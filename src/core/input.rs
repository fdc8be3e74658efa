//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse input state
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Mouse movement delta since last frame
    mouse_delta: (f32, f32),
    /// Current mouse position
    mouse_position: (f32, f32),
    /// Scroll delta accumulated this frame (positive = zoom in)
    scroll_delta: f32,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            mouse_position: (0.0, 0.0),
            scroll_delta: 0.0,
            mouse_buttons: HashSet::new(),
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        if !self.keys_pressed.contains(key_code) {
                            self.keys_just_pressed.insert(*key_code);
                        }
                        self.keys_pressed.insert(*key_code);
                    }
                    ElementState::Released => {
                        self.keys_pressed.remove(key_code);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                self.mouse_delta.0 += new_pos.0 - self.mouse_position.0;
                self.mouse_delta.1 += new_pos.1 - self.mouse_position.1;
                self.mouse_position = new_pos;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    // Touchpads report pixels; a line is roughly 50px
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match state {
                    ElementState::Pressed => {
                        self.mouse_buttons.insert(*button);
                    }
                    ElementState::Released => {
                        self.mouse_buttons.remove(button);
                    }
                }
            }
            _ => {}
        }
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Get mouse delta since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Get current mouse position
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Get scroll delta for this frame
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(KeyCode::KeyR));

        input.keys_pressed.insert(KeyCode::KeyR);
        input.keys_just_pressed.insert(KeyCode::KeyR);

        assert!(input.is_key_pressed(KeyCode::KeyR));
        assert!(input.is_key_just_pressed(KeyCode::KeyR));

        input.end_frame();

        assert!(input.is_key_pressed(KeyCode::KeyR));
        assert!(!input.is_key_just_pressed(KeyCode::KeyR));
    }

    #[test]
    fn test_end_frame_clears_deltas() {
        let mut input = InputState::new();
        input.mouse_delta = (3.0, -2.0);
        input.scroll_delta = 1.5;

        input.end_frame();

        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.scroll_delta(), 0.0);
    }
}
