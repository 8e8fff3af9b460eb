//! Scene: the owned set of live entities

use std::any::TypeId;
use std::collections::HashMap;

use crate::config::ConfigurationError;

use super::entity::{Entity, EntityId};

/// A pending structural change, applied at the next frame boundary
pub(crate) enum PendingOp {
    Spawn(Entity),
    Despawn(EntityId),
}

/// The root entity set owned by the game
///
/// The scene stores entities in insertion order and enforces scene-wide
/// single-instance constraints for components whose
/// [`super::Component::is_unique`] flag is set (the camera, for example).
///
/// Structural changes requested mid-frame go through [`Scene::spawn`] and
/// [`Scene::despawn`], which queue the change; the game loop applies the
/// queue at the top of the next frame, so systems never see the entity set
/// change under the collection they are iterating.
#[derive(Default)]
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    order: Vec<EntityId>,
    unique: HashMap<TypeId, EntityId>,
    pending: Vec<PendingOp>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity immediately
    ///
    /// Fails with [`ConfigurationError::DuplicateUnique`] if the entity
    /// carries a single-instance component type that another entity in the
    /// scene already holds; the scene is left unchanged in that case.
    pub fn insert(&mut self, entity: Entity) -> Result<EntityId, ConfigurationError> {
        let id = entity.id();
        for component in entity.components() {
            if !component.is_unique() {
                continue;
            }
            let ty = component.as_any().type_id();
            if self.unique.contains_key(&ty) {
                return Err(ConfigurationError::DuplicateUnique {
                    component: component.type_name(),
                });
            }
        }
        for component in entity.components() {
            if component.is_unique() {
                self.unique.insert(component.as_any().type_id(), id);
            }
        }
        log::debug!("scene: inserted {} with {} components", id, entity.len());
        self.entities.insert(id, entity);
        self.order.push(id);
        Ok(id)
    }

    /// Remove an entity immediately, returning it if present
    ///
    /// The entity's components go with it; single-instance reservations it
    /// held are released.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.unique.retain(|_, holder| *holder != id);
        log::debug!("scene: removed {}", id);
        Some(entity)
    }

    /// Queue an entity for insertion at the next frame boundary
    pub fn spawn(&mut self, entity: Entity) {
        self.pending.push(PendingOp::Spawn(entity));
    }

    /// Queue an entity for removal at the next frame boundary
    pub fn despawn(&mut self, id: EntityId) {
        self.pending.push(PendingOp::Despawn(id));
    }

    pub(crate) fn take_pending(&mut self) -> Vec<PendingOp> {
        std::mem::take(&mut self.pending)
    }

    /// Whether the scene holds the given entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Get an entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get an entity by id, mutably
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterate the entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Run every entity's update hook, in insertion order
    pub fn update(&mut self, delta: f32) {
        let ids: Vec<EntityId> = self.order.clone();
        for id in ids {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.update(delta);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Anchor;

    struct Marker {
        anchor: Anchor,
    }

    impl Marker {
        fn new() -> Self {
            Self { anchor: Anchor::new() }
        }
    }

    crate::impl_component!(Marker);

    struct Lens {
        anchor: Anchor,
    }

    impl Lens {
        fn new() -> Self {
            Self { anchor: Anchor::new() }
        }
    }

    crate::impl_component!(Lens, unique);

    #[test]
    fn test_insert_and_lookup() {
        let mut scene = Scene::new();
        let entity = Entity::new().with(Marker::new()).unwrap();
        let id = entity.id();

        scene.insert(entity).unwrap();
        assert!(scene.contains(id));
        assert!(scene.get(id).unwrap().contains::<Marker>());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_releases_unique_reservation() {
        let mut scene = Scene::new();
        let first = Entity::new().with(Lens::new()).unwrap();
        let first_id = first.id();
        scene.insert(first).unwrap();

        scene.remove(first_id).unwrap();
        assert!(scene.is_empty());

        // The reservation is gone, so a new holder is accepted.
        let second = Entity::new().with(Lens::new()).unwrap();
        scene.insert(second).unwrap();
    }

    #[test]
    fn test_second_unique_holder_rejected() {
        let mut scene = Scene::new();
        scene.insert(Entity::new().with(Lens::new()).unwrap()).unwrap();

        let rejected = Entity::new().with(Lens::new()).unwrap();
        let err = scene.insert(rejected).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateUnique { component: "Lens" });
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut scene = Scene::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let entity = Entity::new();
            ids.push(entity.id());
            scene.insert(entity).unwrap();
        }

        let seen: Vec<EntityId> = scene.iter().map(Entity::id).collect();
        assert_eq!(seen, ids);
    }

    #[test]
    fn test_update_runs_entity_hooks() {
        struct Counter {
            hits: u32,
            anchor: Anchor,
        }

        crate::impl_component!(Counter);

        let mut scene = Scene::new();
        let entity = Entity::new()
            .with(Counter { hits: 0, anchor: Anchor::new() })
            .unwrap()
            .with_update(|entity, _delta| {
                entity.get_mut::<Counter>().unwrap().hits += 1;
            });
        let id = entity.id();
        scene.insert(entity).unwrap();

        scene.update(0.016);
        scene.update(0.016);
        assert_eq!(scene.get(id).unwrap().get::<Counter>().unwrap().hits, 2);
    }

    #[test]
    fn test_spawn_is_deferred_until_taken() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new());
        assert!(scene.is_empty());

        let pending = scene.take_pending();
        assert_eq!(pending.len(), 1);
        assert!(scene.take_pending().is_empty());
    }
}
