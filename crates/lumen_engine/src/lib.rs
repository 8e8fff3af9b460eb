//! # Lumen Engine
//!
//! A small entity-component-system game engine. Entities are typed
//! containers of components; systems declare the component set they
//! require and run once per frame over the entities that match; a
//! [`game::Game`] owns the scene and a root pipeline of systems and
//! drives the frame loop.
//!
//! Rendering, windowing, and input are external collaborators behind
//! narrow trait contracts ([`render`], [`window`]); headless
//! implementations ship in-tree, so games run and test without a GPU.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lumen_engine::prelude::*;
//!
//! fn main() -> Result<(), GameError> {
//!     lumen_engine::foundation::logging::init();
//!
//!     let mut game = Game::new("Simple Demo");
//!
//!     game.add(
//!         Entity::new()
//!             .with(Transform::from_position(Vec3::new(0.0, 2.0, 10.0)))?
//!             .with(Camera::perspective(45.0))?,
//!     );
//!
//!     game.add(
//!         Entity::new()
//!             .with(Transform::identity())?
//!             .with(Mesh::new("models/cow.obj"))?
//!             .with(Motion::with_angular_velocity(Vec3::new(0.0, 1.0, 0.0)))?,
//!     );
//!
//!     game.add(
//!         Entity::new()
//!             .with(Transform::identity().with_rotation_euler(-0.8, 0.0, 0.0))?
//!             .with(Light::directional(Color::WHITE, 1.5))?,
//!     );
//!
//!     game.run(800, 600)
//! }
//! ```

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod game;
pub mod input;
pub mod render;
pub mod window;

pub use game::{Game, GameError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{Config, ConfigurationError, GameConfig, WindowConfig};
    pub use crate::ecs::components::{
        Camera, Light, LightKind, Mesh, Motion, Projection, Sprite, Text, Transform,
    };
    pub use crate::ecs::{
        Anchor, Component, ComponentError, Entity, EntityFilter, EntityId, FrameError, Scene,
        SequentialSystem, System,
    };
    pub use crate::foundation::math::{Mat4, Quat, Vec2, Vec3};
    pub use crate::game::{Game, GameError};
    pub use crate::impl_component;
    pub use crate::input::{Key, KeyboardHandle};
    pub use crate::render::{Color, FrameLights, RendererSet};
    pub use crate::window::{HeadlessWindow, WindowHandle};
}
