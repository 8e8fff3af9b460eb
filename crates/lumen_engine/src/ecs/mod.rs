//! Entity-Component-System core
//!
//! Entities are typed containers of components; systems declare the
//! component set they require and iterate the entities that match.
//! A [`SequentialSystem`] composes child systems into a fixed-order
//! pipeline that the [`crate::game::Game`] loop steps once per frame.

pub mod component;
pub mod components;
pub mod entity;
pub mod pipeline;
pub mod scene;
pub mod system;
pub mod systems;

pub use component::{Anchor, Component, ComponentError};
pub use entity::{Entity, EntityId};
pub use pipeline::SequentialSystem;
pub use scene::Scene;
pub use system::{EntityFilter, FrameError, System};
