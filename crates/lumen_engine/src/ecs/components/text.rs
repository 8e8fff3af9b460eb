//! Text component

use crate::ecs::Anchor;
use crate::impl_component;
use crate::render::Color;

/// A block of text attached to an entity
#[derive(Debug, Clone)]
pub struct Text {
    /// The string to display
    pub content: String,

    /// Glyph height in world units
    pub size: f32,

    /// Text color
    pub color: Color,

    anchor: Anchor,
}

impl_component!(Text);

impl Text {
    /// Create a text block with default size and color
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), size: 1.0, color: Color::WHITE, anchor: Anchor::new() }
    }

    /// Builder pattern: set the glyph height
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Builder pattern: set the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
