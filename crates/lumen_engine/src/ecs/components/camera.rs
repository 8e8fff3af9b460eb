//! Camera component

use nalgebra::{Orthographic3, Perspective3};

use crate::ecs::Anchor;
use crate::foundation::math::{deg_to_rad, Mat4, Point3};
use crate::impl_component;

use super::transform::Transform;

/// Projection parameters for a [`Camera`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Orthographic projection
    Orthographic {
        /// Height of the visible volume in world units
        size: f32,
        /// Near clipping plane
        near: f32,
        /// Far clipping plane
        far: f32,
    },
    /// Perspective projection
    Perspective {
        /// Vertical field of view in degrees
        fov_degrees: f32,
        /// Near clipping plane
        near: f32,
        /// Far clipping plane
        far: f32,
    },
}

/// The viewpoint a scene is rendered from
///
/// A camera is a component like any other, attached to an entity that also
/// carries a [`Transform`] for its position and orientation. At most one
/// camera may exist per scene; a second camera-holding entity is rejected
/// when it is added.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Projection parameters
    pub projection: Projection,

    anchor: Anchor,
}

impl_component!(Camera, unique);

impl Camera {
    /// Create an orthographic camera
    ///
    /// `size` is the height of the visible volume in world units; the
    /// width follows from the viewport aspect ratio.
    pub fn orthographic(size: f32) -> Self {
        Self {
            projection: Projection::Orthographic { size, near: 0.001, far: 10000.0 },
            anchor: Anchor::new(),
        }
    }

    /// Create a perspective camera with the given vertical field of view
    /// in degrees
    pub fn perspective(fov_degrees: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_degrees, near: 0.1, far: 1000.0 },
            anchor: Anchor::new(),
        }
    }

    /// Builder pattern: set the clipping planes
    pub fn with_planes(mut self, new_near: f32, new_far: f32) -> Self {
        match &mut self.projection {
            Projection::Orthographic { near, far, .. }
            | Projection::Perspective { near, far, .. } => {
                *near = new_near;
                *far = new_far;
            }
        }
        self
    }

    /// The view matrix given the camera entity's transform
    pub fn view_matrix(&self, transform: &Transform) -> Mat4 {
        let eye = Point3::from(transform.position);
        let target = eye + transform.forward();
        Mat4::look_at_rh(&eye, &target, &transform.up())
    }

    /// The projection matrix for a viewport with the given aspect ratio
    /// (width / height)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Orthographic { size, near, far } => {
                let half_height = size / 2.0;
                let half_width = half_height * aspect;
                Orthographic3::new(-half_width, half_width, -half_height, half_height, near, far)
                    .to_homogeneous()
            }
            Projection::Perspective { fov_degrees, near, far } => {
                Perspective3::new(aspect, deg_to_rad(fov_degrees), near, far).to_homogeneous()
            }
        }
    }
}
