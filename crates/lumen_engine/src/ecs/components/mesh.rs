//! Mesh component

use std::path::PathBuf;

use crate::ecs::Anchor;
use crate::impl_component;
use crate::render::Color;

/// A 3D model attached to an entity
///
/// The source path is opaque data to the engine core; loading and parsing
/// belong to the renderer collaborator.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Path of the model source
    pub source: PathBuf,

    /// Base surface color
    pub albedo: Color,

    anchor: Anchor,
}

impl_component!(Mesh);

impl Mesh {
    /// Create a mesh from a model source path
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self { source: source.into(), albedo: Color::WHITE, anchor: Anchor::new() }
    }

    /// Builder pattern: set the base surface color
    pub fn with_albedo(mut self, albedo: Color) -> Self {
        self.albedo = albedo;
        self
    }
}
