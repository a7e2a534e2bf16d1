use glam::Vec2;

use crate::camera::{Camera, OrbitControls};
use crate::options::Options;

/// Camera, orbit controls, and render surface size: everything the
/// session mutates to move the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Perspective camera.
    pub camera: Camera,
    /// Orbit controller driving the camera between transitions.
    pub controls: OrbitControls,
    /// Render surface width in physical pixels.
    pub width: u32,
    /// Render surface height in physical pixels.
    pub height: u32,
}

impl Viewport {
    /// Default camera and controls for a `width` x `height` surface.
    #[must_use]
    pub fn new(options: &Options, width: u32, height: u32) -> Self {
        Self {
            camera: Camera::from_options(
                &options.camera,
                aspect_ratio(width, height),
            ),
            controls: OrbitControls::new(&options.controls),
            width,
            height,
        }
    }

    /// Record a new surface size and update the camera aspect. A zero
    /// dimension keeps the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if width > 0 && height > 0 {
            self.camera.aspect = aspect_ratio(width, height);
        }
    }

    /// Surface pixel position to normalized device coordinates (`x` right,
    /// `y` up). `None` while the surface has zero area.
    #[must_use]
    pub fn screen_to_ndc(&self, screen: Vec2) -> Option<Vec2> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let w = self.width as f32;
        let h = self.height as f32;
        Some(Vec2::new(screen.x / w * 2.0 - 1.0, -(screen.y / h) * 2.0 + 1.0))
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
