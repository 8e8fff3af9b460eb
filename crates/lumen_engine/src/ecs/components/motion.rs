//! Motion component

use crate::ecs::Anchor;
use crate::foundation::math::Vec3;
use crate::impl_component;

/// Linear and angular velocity for entities moved by the physics system
#[derive(Debug, Clone)]
pub struct Motion {
    /// Linear velocity in world units per second
    pub velocity: Vec3,

    /// Angular velocity in radians per second (XYZ Euler rates)
    pub angular_velocity: Vec3,

    anchor: Anchor,
}

impl_component!(Motion);

impl Default for Motion {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion {
    /// Create a motion component at rest
    pub fn new() -> Self {
        Self { velocity: Vec3::zeros(), angular_velocity: Vec3::zeros(), anchor: Anchor::new() }
    }

    /// Create a motion component with an initial linear velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self { velocity, ..Self::new() }
    }

    /// Create a motion component with an initial angular velocity
    pub fn with_angular_velocity(angular_velocity: Vec3) -> Self {
        Self { angular_velocity, ..Self::new() }
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = Vec3::zeros();
        self.angular_velocity = Vec3::zeros();
    }
}
