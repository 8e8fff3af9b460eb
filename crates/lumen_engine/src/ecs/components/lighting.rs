//! Light component

use crate::ecs::Anchor;
use crate::impl_component;
use crate::render::Color;

/// Kinds of light the renderer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel rays along the owning entity's forward direction
    Directional,
    /// Uniform contribution to every surface, no direction
    Ambient,
}

/// A light source
///
/// Directional lights take their direction from the owning entity's
/// [`super::Transform`] (the light travels along the transform's forward
/// axis); an entity without a transform lights straight down. Multiple
/// lights per scene are valid.
#[derive(Debug, Clone)]
pub struct Light {
    /// The kind of light
    pub kind: LightKind,

    /// Light color
    pub color: Color,

    /// Intensity multiplier (0.0 = off, 1.0 = full)
    pub intensity: f32,

    anchor: Anchor,
}

impl_component!(Light);

impl Light {
    /// Create a directional light
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self { kind: LightKind::Directional, color, intensity, anchor: Anchor::new() }
    }

    /// Create an ambient light
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self { kind: LightKind::Ambient, color, intensity, anchor: Anchor::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_the_kind() {
        let sun = Light::directional(Color::WHITE, 1.5);
        assert_eq!(sun.kind, LightKind::Directional);
        assert_eq!(sun.intensity, 1.5);

        let fill = Light::ambient(Color::rgb(0.2, 0.2, 0.3), 1.0);
        assert_eq!(fill.kind, LightKind::Ambient);
    }
}
