//! Orbit camera controller

use glam::Vec3;
use winit::event::MouseButton;

use crate::core::camera::Camera;
use crate::core::input::InputState;

/// Orbit-style camera controller: left-drag orbits, right/middle-drag pans,
/// scroll zooms, and the view slowly auto-rotates while idle.
pub struct OrbitCameraController {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from the target
    pub distance: f32,
    /// Mouse sensitivity for orbiting
    pub orbit_sensitivity: f32,
    /// Mouse sensitivity for panning
    pub pan_sensitivity: f32,
    /// Zoom factor applied per scroll line
    pub zoom_speed: f32,
    /// Idle auto-rotation speed in radians per second
    pub auto_rotate_speed: f32,
    /// Current yaw (rotation around Y axis) in radians
    yaw: f32,
    /// Current elevation angle in radians
    pitch: f32,
}

impl OrbitCameraController {
    /// Minimum/maximum orbit distance
    const DISTANCE_RANGE: (f32, f32) = (1.0, 200.0);

    /// Create a controller orbiting `target` from `distance` away
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            orbit_sensitivity: 5.0,
            pan_sensitivity: 1.0,
            zoom_speed: 0.1,
            auto_rotate_speed: 0.25,
            yaw: 0.0,
            pitch: 0.45,
        }
    }

    /// Update camera based on input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, dt: f32) {
        let (dx, dy) = input.mouse_delta();

        if input.is_mouse_button_pressed(MouseButton::Left) {
            self.yaw -= dx * self.orbit_sensitivity * 0.001;
            self.pitch += dy * self.orbit_sensitivity * 0.001;

            // Clamp pitch to keep the camera off the poles
            self.pitch = self.pitch.clamp(-1.5, 1.5);
        } else if input.is_mouse_button_pressed(MouseButton::Right)
            || input.is_mouse_button_pressed(MouseButton::Middle)
        {
            // Pan in the camera plane, scaled so a full drag covers the view
            let pan_scale = self.pan_sensitivity * self.distance * 0.001;
            self.target -= camera.right() * dx * pan_scale;
            self.target += camera.up() * dy * pan_scale;
        } else {
            self.yaw += self.auto_rotate_speed * dt;
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.distance *= 1.0 - scroll * self.zoom_speed;
            self.distance = self
                .distance
                .clamp(Self::DISTANCE_RANGE.0, Self::DISTANCE_RANGE.1);
        }

        self.apply(camera);
    }

    /// Position and orient the camera from the current orbit state
    pub fn apply(&self, camera: &mut Camera) {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;

        camera.position = self.target + offset;
        camera.face(self.target, Vec3::Y);
    }

    /// Set orbit angles directly (in radians)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-1.5, 1.5);
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
