//! Component trait and attachment bookkeeping

use std::any::Any;

use thiserror::Error;

use super::entity::EntityId;

/// Return the unqualified name of a type, for error messages and logs.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Raw data for one aspect of an entity.
///
/// Components are plain data holders. They are constructed independently of
/// any entity and become live once attached via [`super::Entity::attach`],
/// which binds their [`Anchor`] to the owning entity. All per-frame logic
/// lives in systems, never in components.
///
/// Implementors embed an [`Anchor`] field named `anchor` and use
/// [`crate::impl_component!`] to derive the trait plumbing:
///
/// ```
/// use lumen_engine::ecs::Anchor;
/// use lumen_engine::impl_component;
///
/// pub struct Health {
///     pub points: u32,
///     anchor: Anchor,
/// }
///
/// impl Health {
///     pub fn new(points: u32) -> Self {
///         Self { points, anchor: Anchor::new() }
///     }
/// }
///
/// impl_component!(Health);
/// ```
pub trait Component: Any {
    /// The attachment record binding this component to its owning entity
    fn anchor(&self) -> &Anchor;

    /// Mutable access to the attachment record
    fn anchor_mut(&mut self) -> &mut Anchor;

    /// Whether at most one entity in a scene may hold this component type
    ///
    /// Unique components (the camera, for example) are rejected at
    /// [`super::Scene::insert`] time when another entity in the scene
    /// already holds one.
    fn is_unique(&self) -> bool {
        false
    }

    /// The entity this component is attached to, if any
    fn owner(&self) -> Option<EntityId> {
        self.anchor().entity()
    }

    /// The unqualified type name, for diagnostics
    fn type_name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Upcast to [`Any`] for typed downcasting
    fn as_any(&self) -> &dyn Any;

    /// Upcast to [`Any`] for typed mutable downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert a boxed component into a boxed [`Any`] for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Records which entity a component is attached to.
///
/// The anchor is bound exactly once, at attach time, and stays immutable
/// while the component remains attached; [`super::Entity::detach`] releases
/// it so the component may be attached elsewhere. Cloning an anchor yields
/// an unbound one: a copied component starts life unattached.
#[derive(Debug, Default, PartialEq)]
pub struct Anchor {
    owner: Option<EntityId>,
}

impl Clone for Anchor {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Anchor {
    /// Create an unbound anchor
    pub fn new() -> Self {
        Self { owner: None }
    }

    /// The entity this anchor is bound to, if any
    pub fn entity(&self) -> Option<EntityId> {
        self.owner
    }

    /// Whether the anchor is currently bound to an entity
    pub fn is_bound(&self) -> bool {
        self.owner.is_some()
    }

    pub(crate) fn bind(&mut self, owner: EntityId) {
        debug_assert!(self.owner.is_none(), "anchor bound twice");
        self.owner = Some(owner);
    }

    pub(crate) fn release(&mut self) {
        self.owner = None;
    }
}

/// Errors raised by the typed component registry inside an entity
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentError {
    /// A lookup or detach named a component type the entity does not hold
    #[error("entity has no {component} component")]
    Missing {
        /// Name of the requested component type
        component: &'static str,
    },

    /// An attach named a component type the entity already holds
    #[error("entity already has a {component} component")]
    Duplicate {
        /// Name of the offending component type
        component: &'static str,
    },

    /// The component being attached is still bound to another entity
    #[error("{component} component is already attached to another entity")]
    AlreadyAttached {
        /// Name of the offending component type
        component: &'static str,
    },
}

/// Implement [`Component`] for a type with an [`Anchor`] field named `anchor`.
///
/// Pass `unique` as a second argument to mark the component as
/// single-instance per scene:
///
/// ```ignore
/// impl_component!(Camera, unique);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($ty:ty) => {
        impl $crate::ecs::Component for $ty {
            fn anchor(&self) -> &$crate::ecs::Anchor {
                &self.anchor
            }

            fn anchor_mut(&mut self) -> &mut $crate::ecs::Anchor {
                &mut self.anchor
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
    ($ty:ty, unique) => {
        impl $crate::ecs::Component for $ty {
            fn anchor(&self) -> &$crate::ecs::Anchor {
                &self.anchor
            }

            fn anchor_mut(&mut self) -> &mut $crate::ecs::Anchor {
                &mut self.anchor
            }

            fn is_unique(&self) -> bool {
                true
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}
