//! Rendering systems
//!
//! The rendering stage is a pipeline of five systems in fixed order:
//! window clear, mesh draw, text draw, sprite draw, buffer swap. Later
//! systems depend on the side effects of earlier ones within the same
//! frame, so the order is part of the contract.

use std::any::TypeId;

use crate::config::ConfigurationError;
use crate::ecs::components::{Camera, Light, LightKind, Mesh, Sprite, Text, Transform};
use crate::ecs::{Entity, EntityFilter, EntityId, FrameError, Scene, SequentialSystem, System};
use crate::foundation::math::Vec3;
use crate::render::{
    DirectionalLightData, FrameLights, MeshRenderer, RendererSet, SpriteRenderer, TextRenderer,
};
use crate::window::WindowHandle;

/// Clears the framebuffer at the start of the rendering stage
pub struct WindowClearSystem {
    window: WindowHandle,
}

impl WindowClearSystem {
    /// Create the clear system
    pub fn new(window: WindowHandle) -> Self {
        Self { window }
    }
}

impl System for WindowClearSystem {
    fn step(&mut self, _scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        self.window.clear();
        Ok(())
    }
}

/// Presents the finished frame at the end of the rendering stage
pub struct BufferSwapSystem {
    window: WindowHandle,
}

impl BufferSwapSystem {
    /// Create the swap system
    pub fn new(window: WindowHandle) -> Self {
        Self { window }
    }
}

impl System for BufferSwapSystem {
    fn step(&mut self, _scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        self.window.swap_buffers();
        Ok(())
    }
}

/// Draws every entity holding a transform and a mesh
///
/// Tracks three views of the scene: the meshes to draw, the camera entity
/// (transform + camera), and the lights. Starting the system without a
/// camera in place is a configuration error, matching the rule that the
/// camera is added before the game runs.
pub struct MeshRenderSystem {
    meshes: EntityFilter,
    cameras: EntityFilter,
    lights: EntityFilter,
    renderer: Box<dyn MeshRenderer>,
    window: WindowHandle,
}

impl MeshRenderSystem {
    /// Create the mesh render system drawing through the given collaborator
    pub fn new(window: WindowHandle, renderer: Box<dyn MeshRenderer>) -> Self {
        Self {
            meshes: EntityFilter::new().with::<Transform>().with::<Mesh>(),
            cameras: EntityFilter::new().with::<Transform>().with::<Camera>(),
            lights: EntityFilter::new().with::<Light>(),
            renderer,
            window,
        }
    }

    /// Gather the lighting environment for this frame
    fn gather_lights(&self, scene: &Scene) -> Result<FrameLights, FrameError> {
        let mut lights = FrameLights::default();
        for &id in self.lights.ids() {
            let Some(entity) = scene.get(id) else { continue };
            let light = entity.get::<Light>()?;
            match light.kind {
                LightKind::Directional => {
                    // The light travels along its entity's forward axis;
                    // without a transform it points straight down.
                    let direction = entity
                        .get::<Transform>()
                        .map(|transform| transform.forward())
                        .unwrap_or_else(|_| Vec3::new(0.0, -1.0, 0.0));
                    lights.directional.push(DirectionalLightData {
                        direction,
                        color: light.color,
                        intensity: light.intensity,
                    });
                }
                LightKind::Ambient => {
                    let contribution = light.color.scaled(light.intensity);
                    lights.ambient.r += contribution.r;
                    lights.ambient.g += contribution.g;
                    lights.ambient.b += contribution.b;
                }
            }
        }
        Ok(lights)
    }
}

impl System for MeshRenderSystem {
    fn required_components(&self) -> &[TypeId] {
        self.meshes.required()
    }

    fn start(&mut self) -> Result<(), FrameError> {
        if self.cameras.is_empty() {
            return Err(ConfigurationError::MissingCamera.into());
        }
        if self.lights.is_empty() {
            log::warn!("mesh rendering started with no lights; meshes will render unlit");
        }
        Ok(())
    }

    fn add(&mut self, entity: &Entity) {
        self.meshes.insert(entity);
        if self.cameras.insert(entity) {
            log::debug!("mesh rendering: camera is {}", entity.id());
        }
        self.lights.insert(entity);
    }

    fn remove(&mut self, id: EntityId) {
        self.meshes.remove(id);
        self.cameras.remove(id);
        self.lights.remove(id);
    }

    fn step(&mut self, scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        let camera_id = self.cameras.first().ok_or(ConfigurationError::MissingCamera)?;
        let camera_entity = scene.get(camera_id).ok_or(ConfigurationError::MissingCamera)?;
        let camera = camera_entity.get::<Camera>()?;
        let camera_transform = camera_entity.get::<Transform>()?;

        let view = camera.view_matrix(camera_transform);
        let projection = camera.projection_matrix(self.window.aspect_ratio());
        self.renderer.set_view(&view, &projection);

        let lights = self.gather_lights(scene)?;

        for &id in self.meshes.ids() {
            let Some(entity) = scene.get(id) else { continue };
            let mesh = entity.get::<Mesh>()?;
            let transform = entity.get::<Transform>()?;
            self.renderer.draw(mesh, transform, &lights)?;
        }
        Ok(())
    }
}

/// Draws every entity holding a transform and a sprite
pub struct SpriteRenderSystem {
    filter: EntityFilter,
    renderer: Box<dyn SpriteRenderer>,
}

impl SpriteRenderSystem {
    /// Create the sprite render system drawing through the given
    /// collaborator
    pub fn new(renderer: Box<dyn SpriteRenderer>) -> Self {
        Self { filter: EntityFilter::new().with::<Transform>().with::<Sprite>(), renderer }
    }
}

impl System for SpriteRenderSystem {
    fn required_components(&self) -> &[TypeId] {
        self.filter.required()
    }

    fn add(&mut self, entity: &Entity) {
        self.filter.insert(entity);
    }

    fn remove(&mut self, id: EntityId) {
        self.filter.remove(id);
    }

    fn step(&mut self, scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        for &id in self.filter.ids() {
            let Some(entity) = scene.get(id) else { continue };
            let sprite = entity.get::<Sprite>()?;
            let transform = entity.get::<Transform>()?;
            self.renderer.draw(sprite, transform)?;
        }
        Ok(())
    }
}

/// Draws every entity holding a transform and a text block
pub struct TextRenderSystem {
    filter: EntityFilter,
    renderer: Box<dyn TextRenderer>,
}

impl TextRenderSystem {
    /// Create the text render system drawing through the given collaborator
    pub fn new(renderer: Box<dyn TextRenderer>) -> Self {
        Self { filter: EntityFilter::new().with::<Transform>().with::<Text>(), renderer }
    }
}

impl System for TextRenderSystem {
    fn required_components(&self) -> &[TypeId] {
        self.filter.required()
    }

    fn add(&mut self, entity: &Entity) {
        self.filter.insert(entity);
    }

    fn remove(&mut self, id: EntityId) {
        self.filter.remove(id);
    }

    fn step(&mut self, scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        for &id in self.filter.ids() {
            let Some(entity) = scene.get(id) else { continue };
            let text = entity.get::<Text>()?;
            let transform = entity.get::<Transform>()?;
            self.renderer.draw(text, transform)?;
        }
        Ok(())
    }
}

/// The rendering stage of the root pipeline
///
/// Clear, mesh, text, sprite, swap: in that order, every frame.
pub struct RenderingSystem {
    pipeline: SequentialSystem,
}

impl RenderingSystem {
    /// Construct and pipeline the systems needed to render a scene
    pub fn new(window: WindowHandle, renderers: RendererSet) -> Self {
        Self {
            pipeline: SequentialSystem::new(vec![
                Box::new(WindowClearSystem::new(window.clone())),
                Box::new(MeshRenderSystem::new(window.clone(), renderers.mesh)),
                Box::new(TextRenderSystem::new(renderers.text)),
                Box::new(SpriteRenderSystem::new(renderers.sprite)),
                Box::new(BufferSwapSystem::new(window)),
            ]),
        }
    }
}

impl System for RenderingSystem {
    fn start(&mut self) -> Result<(), FrameError> {
        self.pipeline.start()
    }

    fn step(&mut self, scene: &mut Scene, delta: f32) -> Result<(), FrameError> {
        self.pipeline.step(scene, delta)
    }

    fn add(&mut self, entity: &Entity) {
        self.pipeline.add(entity);
    }

    fn remove(&mut self, id: EntityId) {
        self.pipeline.remove(id);
    }
}
