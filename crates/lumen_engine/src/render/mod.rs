//! Rendering collaborator contracts
//!
//! The engine core never talks to a graphics API. Render systems invoke
//! these narrow trait contracts once per matching entity per frame; the
//! backing implementation (a real GPU renderer, or the headless ones in
//! [`headless`]) is injected at game construction. Failures are surfaced
//! as [`RenderError`] and propagate into the frame loop rather than being
//! swallowed.

pub mod headless;

use thiserror::Error;

use crate::ecs::components::{Mesh, Sprite, Text, Transform};
use crate::foundation::math::{Mat4, Vec3};

pub use headless::{NullRenderer, RecordingRenderer, RenderEvent};

/// An RGBA color with components in the 0.0 to 1.0 range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Opaque black
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Create an opaque color from red, green, and blue components
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from red, green, blue, and alpha components
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// This color scaled by an intensity factor, alpha untouched
    pub fn scaled(self, intensity: f32) -> Self {
        Self {
            r: self.r * intensity,
            g: self.g * intensity,
            b: self.b * intensity,
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A directional light resolved to world space for one frame
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLightData {
    /// Normalized world-space direction the light travels in
    pub direction: Vec3,
    /// Light color
    pub color: Color,
    /// Intensity multiplier
    pub intensity: f32,
}

/// The lighting environment gathered for one frame
///
/// Built by the mesh render system from the light components in the scene
/// and handed to [`MeshRenderer::draw`] for every draw call of the frame.
#[derive(Debug, Clone)]
pub struct FrameLights {
    /// Directional lights active this frame
    pub directional: Vec<DirectionalLightData>,
    /// Accumulated ambient contribution
    pub ambient: Color,
}

impl Default for FrameLights {
    fn default() -> Self {
        Self { directional: Vec::new(), ambient: Color::BLACK }
    }
}

/// Errors raised by renderer collaborators
#[derive(Error, Debug)]
pub enum RenderError {
    /// A draw call failed
    #[error("draw call failed: {0}")]
    Draw(String),

    /// The renderer was used outside a valid frame or view
    #[error("invalid renderer state: {0}")]
    InvalidState(String),
}

/// Draws mesh components
///
/// `set_view` is called once per frame, before any `draw`, with the active
/// camera's matrices; `draw` is then called once per visible mesh entity.
pub trait MeshRenderer {
    /// Set the camera matrices for the coming draw calls
    fn set_view(&mut self, view: &Mat4, projection: &Mat4);

    /// Draw one mesh with its world transform under the given lighting
    fn draw(
        &mut self,
        mesh: &Mesh,
        transform: &Transform,
        lights: &FrameLights,
    ) -> Result<(), RenderError>;
}

/// Draws sprite components
pub trait SpriteRenderer {
    /// Draw one sprite with its world transform
    fn draw(&mut self, sprite: &Sprite, transform: &Transform) -> Result<(), RenderError>;
}

/// Draws text components
pub trait TextRenderer {
    /// Draw one text block with its world transform
    fn draw(&mut self, text: &Text, transform: &Transform) -> Result<(), RenderError>;
}

/// The renderer collaborators a game draws through
///
/// Defaults to the no-op [`NullRenderer`] for every slot, which keeps the
/// engine runnable without a GPU; real backends replace individual slots.
pub struct RendererSet {
    /// Mesh renderer collaborator
    pub mesh: Box<dyn MeshRenderer>,
    /// Sprite renderer collaborator
    pub sprite: Box<dyn SpriteRenderer>,
    /// Text renderer collaborator
    pub text: Box<dyn TextRenderer>,
}

impl Default for RendererSet {
    fn default() -> Self {
        Self {
            mesh: Box::new(NullRenderer::new()),
            sprite: Box::new(NullRenderer::new()),
            text: Box::new(NullRenderer::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scaling() {
        let color = Color::rgb(0.5, 1.0, 0.25).scaled(2.0);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 2.0);
        assert_eq!(color.b, 0.5);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_frame_lights_default_is_dark() {
        let lights = FrameLights::default();
        assert!(lights.directional.is_empty());
        assert_eq!(lights.ambient, Color::BLACK);
    }
}
