//! System trait and entity filtering

use std::any::TypeId;

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::render::RenderError;
use crate::window::ResourceInitError;

use super::component::{Component, ComponentError};
use super::entity::{Entity, EntityId};
use super::scene::Scene;

/// Any error raised inside a system's `start` or `step`
///
/// Frame errors propagate to the game loop and terminate it; partial-frame
/// state is not well defined, so nothing is swallowed or retried here.
#[derive(Error, Debug)]
pub enum FrameError {
    /// A renderer collaborator failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The pipeline was assembled inconsistently
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    /// A tracked entity no longer satisfies the system's component contract
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// An external resource failed after startup
    #[error(transparent)]
    Resource(#[from] ResourceInitError),

    /// Any other system-specific failure
    #[error("{0}")]
    Other(String),
}

/// Per-frame logic over entities matching a declared component set
///
/// Systems are constructed once, at pipeline-assembly time. `start` runs
/// exactly once before the first frame; `step` runs once per frame; `add`
/// and `remove` fire whenever entities enter or leave the game.
///
/// Entity membership is evaluated at `add`/`remove` time only: attaching
/// or detaching components after an entity was added does not retroactively
/// update any system's tracked set. Callers that change an entity's
/// component set must remove and re-add it.
pub trait System {
    /// The component types this system requires
    ///
    /// The default empty set means the system matches every entity (or,
    /// more commonly, tracks none and operates on external collaborators,
    /// like a buffer-swap system).
    fn required_components(&self) -> &[TypeId] {
        &[]
    }

    /// One-time initialization, invoked before the first `step`
    ///
    /// A failure here aborts game startup.
    fn start(&mut self) -> Result<(), FrameError> {
        Ok(())
    }

    /// Per-frame work; `delta` is the elapsed time since the previous frame
    /// in seconds
    fn step(&mut self, scene: &mut Scene, delta: f32) -> Result<(), FrameError>;

    /// Offer an entity to this system
    ///
    /// Called for every entity entering the game, regardless of its
    /// component set; the system decides relevance itself (usually through
    /// an [`EntityFilter`]). The default implementation tracks nothing.
    fn add(&mut self, entity: &Entity) {
        let _ = entity;
    }

    /// Withdraw an entity from this system
    ///
    /// Removing an entity the system never tracked is a no-op, which lets
    /// the pipeline broadcast removals unconditionally.
    fn remove(&mut self, id: EntityId) {
        let _ = id;
    }
}

/// A system's filtered view of the entities matching its required set
///
/// The required component types are fixed at construction; entities are
/// tracked from the moment they are offered via [`EntityFilter::insert`]
/// while holding every required type. Tracking preserves offer order.
#[derive(Default)]
pub struct EntityFilter {
    required: Vec<TypeId>,
    tracked: Vec<EntityId>,
}

impl EntityFilter {
    /// Create a filter with an empty required set (matches every entity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required component type, builder style
    pub fn with<C: Component>(mut self) -> Self {
        let ty = TypeId::of::<C>();
        if !self.required.contains(&ty) {
            self.required.push(ty);
        }
        self
    }

    /// The required component types
    pub fn required(&self) -> &[TypeId] {
        &self.required
    }

    /// Whether the entity holds every required component type
    pub fn matches(&self, entity: &Entity) -> bool {
        entity.contains_all(&self.required)
    }

    /// Track the entity if it matches the required set
    ///
    /// Returns whether the entity is tracked after the call. Offering an
    /// already-tracked entity is a no-op; offering a non-matching entity
    /// leaves the filter unchanged.
    pub fn insert(&mut self, entity: &Entity) -> bool {
        if !self.matches(entity) {
            return false;
        }
        if !self.tracked.contains(&entity.id()) {
            self.tracked.push(entity.id());
        }
        true
    }

    /// Stop tracking the entity; a no-op if it was never tracked
    pub fn remove(&mut self, id: EntityId) {
        self.tracked.retain(|tracked| *tracked != id);
    }

    /// Whether the entity is currently tracked
    pub fn contains(&self, id: EntityId) -> bool {
        self.tracked.contains(&id)
    }

    /// The tracked entities, in offer order
    pub fn ids(&self) -> &[EntityId] {
        &self.tracked
    }

    /// The first tracked entity, if any
    pub fn first(&self) -> Option<EntityId> {
        self.tracked.first().copied()
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Whether no entities are tracked
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}
