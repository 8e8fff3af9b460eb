//! Built-in systems
//!
//! The game assembles these into its root pipeline: input first, then
//! physics, then user systems, then rendering.

pub mod input;
pub mod physics;
pub mod rendering;

pub use input::{InputSystem, KeyboardSystem};
pub use physics::PhysicsSystem;
pub use rendering::{
    BufferSwapSystem, MeshRenderSystem, RenderingSystem, SpriteRenderSystem, TextRenderSystem,
    WindowClearSystem,
};
