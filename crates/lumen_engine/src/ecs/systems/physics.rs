//! Physics integration system

use std::any::TypeId;

use crate::ecs::components::{Motion, Transform};
use crate::ecs::{Entity, EntityFilter, EntityId, FrameError, Scene, System};
use crate::foundation::math::{Quat, Vec3};

/// Integrates [`Motion`] into [`Transform`] once per frame
///
/// Plain explicit Euler: position advances by `velocity * delta`, rotation
/// by the angular rates times `delta`.
pub struct PhysicsSystem {
    filter: EntityFilter,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSystem {
    /// Create the physics system
    pub fn new() -> Self {
        Self { filter: EntityFilter::new().with::<Transform>().with::<Motion>() }
    }
}

impl System for PhysicsSystem {
    fn required_components(&self) -> &[TypeId] {
        self.filter.required()
    }

    fn add(&mut self, entity: &Entity) {
        self.filter.insert(entity);
    }

    fn remove(&mut self, id: EntityId) {
        self.filter.remove(id);
    }

    fn step(&mut self, scene: &mut Scene, delta: f32) -> Result<(), FrameError> {
        for &id in self.filter.ids() {
            let Some(entity) = scene.get_mut(id) else { continue };

            let (velocity, angular) = {
                let motion = entity.get::<Motion>()?;
                (motion.velocity, motion.angular_velocity)
            };

            let transform = entity.get_mut::<Transform>()?;
            transform.position += velocity * delta;
            if angular != Vec3::zeros() {
                let spin = Quat::from_euler_angles(
                    angular.x * delta,
                    angular.y * delta,
                    angular.z * delta,
                );
                transform.rotation = spin * transform.rotation;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn moving_entity(velocity: Vec3) -> Entity {
        Entity::new()
            .with(Transform::identity())
            .and_then(|e| e.with(Motion::with_velocity(velocity)))
            .unwrap()
    }

    #[test]
    fn test_position_advances_by_velocity_times_delta() {
        let mut system = PhysicsSystem::new();
        let mut scene = Scene::new();

        let entity = moving_entity(Vec3::new(2.0, 0.0, -1.0));
        system.add(&entity);
        let id = scene.insert(entity).unwrap();

        system.step(&mut scene, 0.5).unwrap();

        let position = scene.get(id).unwrap().get::<Transform>().unwrap().position;
        assert_relative_eq!(position, Vec3::new(1.0, 0.0, -0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_angular_velocity_spins_the_transform() {
        let mut system = PhysicsSystem::new();
        let mut scene = Scene::new();

        let entity = Entity::new()
            .with(Transform::identity())
            .and_then(|e| {
                e.with(Motion::with_angular_velocity(Vec3::new(
                    0.0,
                    std::f32::consts::FRAC_PI_2,
                    0.0,
                )))
            })
            .unwrap();
        system.add(&entity);
        let id = scene.insert(entity).unwrap();

        // A quarter turn per second for one second.
        system.step(&mut scene, 1.0).unwrap();

        let forward = scene.get(id).unwrap().get::<Transform>().unwrap().forward();
        assert_relative_eq!(forward, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_entity_without_motion_is_not_tracked() {
        let mut system = PhysicsSystem::new();
        let entity = Entity::new().with(Transform::identity()).unwrap();

        system.add(&entity);
        let mut scene = Scene::new();
        let id = scene.insert(entity).unwrap();

        system.step(&mut scene, 1.0).unwrap();
        assert_eq!(scene.get(id).unwrap().get::<Transform>().unwrap().position, Vec3::zeros());
    }

    #[test]
    fn test_removed_entity_is_skipped() {
        let mut system = PhysicsSystem::new();
        let mut scene = Scene::new();

        let entity = moving_entity(Vec3::new(1.0, 0.0, 0.0));
        let id = entity.id();
        system.add(&entity);
        scene.insert(entity).unwrap();

        system.remove(id);
        scene.remove(id);
        system.step(&mut scene, 1.0).unwrap();
    }
}
