//! Sprite component

use std::path::PathBuf;

use crate::ecs::Anchor;
use crate::impl_component;
use crate::render::Color;

/// A 2D image attached to an entity
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Path of the texture source
    pub source: PathBuf,

    /// Tint multiplied over the texture
    pub tint: Color,

    anchor: Anchor,
}

impl_component!(Sprite);

impl Sprite {
    /// Create a sprite from a texture source path
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self { source: source.into(), tint: Color::WHITE, anchor: Anchor::new() }
    }

    /// Builder pattern: set the tint color
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}
