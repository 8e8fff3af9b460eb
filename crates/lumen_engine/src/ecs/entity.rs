//! Entity implementation: a typed container of components

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::component::{short_type_name, Component, ComponentError};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of an [`Entity`]
///
/// Ids are minted from a process-wide counter when the entity is created,
/// so components can record their owner at attach time, before the entity
/// joins a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Per-frame user hook invoked by [`super::Scene::update`]
pub type UpdateHook = Box<dyn FnMut(&mut Entity, f32)>;

/// A game object: a registry of components keyed by concrete type
///
/// An entity holds at most one component instance per concrete type.
/// Components are attached explicitly and looked up by type; attached
/// components carry a back-reference to the owning entity through their
/// [`super::Anchor`].
///
/// Entities own their components exclusively: dropping the entity drops
/// everything attached to it.
pub struct Entity {
    id: EntityId,
    components: HashMap<TypeId, Box<dyn Component>>,
    update: Option<UpdateHook>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Create an empty entity
    pub fn new() -> Self {
        Self {
            id: EntityId::next(),
            components: HashMap::new(),
            update: None,
        }
    }

    /// Get the entity id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attach a component, indexing it under its concrete type
    ///
    /// Fails with [`ComponentError::Duplicate`] if the entity already holds
    /// a component of this type, and with [`ComponentError::AlreadyAttached`]
    /// if the component is still bound to another entity. On success the
    /// component's anchor is bound to this entity.
    pub fn attach<C: Component>(&mut self, mut component: C) -> Result<(), ComponentError> {
        let key = TypeId::of::<C>();
        if self.components.contains_key(&key) {
            return Err(ComponentError::Duplicate { component: short_type_name::<C>() });
        }
        if component.anchor().is_bound() {
            return Err(ComponentError::AlreadyAttached { component: short_type_name::<C>() });
        }
        component.anchor_mut().bind(self.id);
        self.components.insert(key, Box::new(component));
        Ok(())
    }

    /// Builder form of [`Entity::attach`]
    pub fn with<C: Component>(mut self, component: C) -> Result<Self, ComponentError> {
        self.attach(component)?;
        Ok(self)
    }

    /// Install the per-frame update hook, builder style
    ///
    /// The hook runs once per frame with the entity and the frame delta,
    /// before the system pipeline steps.
    pub fn with_update(mut self, hook: impl FnMut(&mut Entity, f32) + 'static) -> Self {
        self.update = Some(Box::new(hook));
        self
    }

    /// Remove and return the component of the given type
    ///
    /// The component's anchor is released, so it may be attached to another
    /// entity afterwards. Fails with [`ComponentError::Missing`] if the
    /// entity holds no such component.
    pub fn detach<C: Component>(&mut self) -> Result<C, ComponentError> {
        let boxed = self
            .components
            .remove(&TypeId::of::<C>())
            .ok_or(ComponentError::Missing { component: short_type_name::<C>() })?;
        match boxed.into_any().downcast::<C>() {
            Ok(mut component) => {
                component.anchor_mut().release();
                Ok(*component)
            }
            // The registry is keyed by TypeId, so the downcast cannot fail.
            Err(_) => Err(ComponentError::Missing { component: short_type_name::<C>() }),
        }
    }

    /// Get the component of the given type
    pub fn get<C: Component>(&self) -> Result<&C, ComponentError> {
        self.components
            .get(&TypeId::of::<C>())
            .and_then(|component| component.as_any().downcast_ref::<C>())
            .ok_or(ComponentError::Missing { component: short_type_name::<C>() })
    }

    /// Get the component of the given type, mutably
    pub fn get_mut<C: Component>(&mut self) -> Result<&mut C, ComponentError> {
        self.components
            .get_mut(&TypeId::of::<C>())
            .and_then(|component| component.as_any_mut().downcast_mut::<C>())
            .ok_or(ComponentError::Missing { component: short_type_name::<C>() })
    }

    /// Whether the entity holds a component of the given type
    pub fn contains<C: Component>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<C>())
    }

    /// Whether the entity holds every one of the given component types
    pub fn contains_all(&self, types: &[TypeId]) -> bool {
        types.iter().all(|ty| self.components.contains_key(ty))
    }

    /// Iterate the attached components, in unspecified order
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.values().map(|component| component.as_ref())
    }

    /// Iterate the attached component types, in unspecified order
    pub fn component_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.components.keys().copied()
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the entity has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Run the entity's update hook, if one is installed
    pub fn update(&mut self, delta: f32) {
        // Take the hook out so it can borrow the entity mutably.
        if let Some(mut hook) = self.update.take() {
            hook(self, delta);
            if self.update.is_none() {
                self.update = Some(hook);
            }
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("components", &self.components.len())
            .field("has_update_hook", &self.update.is_some())
            .finish()
    }
}
