//! Game orchestrator and frame loop

use thiserror::Error;

use crate::config::{ConfigurationError, WindowConfig};
use crate::ecs::component::ComponentError;
use crate::ecs::scene::PendingOp;
use crate::ecs::systems::{InputSystem, PhysicsSystem, RenderingSystem};
use crate::ecs::{Entity, EntityId, FrameError, Scene, SequentialSystem, System};
use crate::foundation::time::Timer;
use crate::input::KeyboardHandle;
use crate::render::RendererSet;
use crate::window::{HeadlessWindow, ResourceInitError, WindowBackend, WindowHandle};

/// Errors that abort [`Game::run`]
#[derive(Error, Debug)]
pub enum GameError {
    /// The game or scene was assembled inconsistently
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    /// The window could not be opened
    #[error(transparent)]
    Init(#[from] ResourceInitError),

    /// A system failed during startup or inside a frame
    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl From<ComponentError> for GameError {
    fn from(err: ComponentError) -> Self {
        Self::Frame(FrameError::Component(err))
    }
}

/// The process-wide orchestrator: owns the scene and the root pipeline
/// and drives the per-frame loop
///
/// Entities go in through [`Game::add`] before [`Game::run`] or, from
/// systems, through [`Scene::spawn`] during the loop; either way the
/// change is applied at the next frame boundary and broadcast to every
/// system in the root pipeline. The pipeline runs input, then physics,
/// then any user systems, then rendering; registration order is the only
/// ordering mechanism between systems.
///
/// A scene needs a camera entity before `run`: the mesh rendering stage
/// refuses to start without one.
///
/// ```no_run
/// use lumen_engine::prelude::*;
///
/// fn main() -> Result<(), GameError> {
///     let mut game = Game::new("Simple Demo");
///
///     let camera = Entity::new()
///         .with(Transform::from_position(Vec3::new(0.0, 0.0, 5.0)))?
///         .with(Camera::perspective(60.0))?;
///     game.add(camera);
///
///     game.run(800, 600)
/// }
/// ```
pub struct Game {
    title: String,
    scene: Scene,
    window: WindowHandle,
    keyboard: KeyboardHandle,
    renderers: RendererSet,
    user_systems: Vec<Box<dyn System>>,
}

impl Game {
    /// Create a game on the headless window backend
    ///
    /// Suitable for tests and tools; real applications pass their window
    /// backend through [`Game::with_window`].
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_window(title, Box::new(HeadlessWindow::new()))
    }

    /// Create a game on the given window backend
    pub fn with_window(title: impl Into<String>, backend: Box<dyn WindowBackend>) -> Self {
        let title = title.into();
        log::info!("creating game \"{}\"", title);
        Self {
            title,
            scene: Scene::new(),
            window: WindowHandle::new(backend),
            keyboard: KeyboardHandle::new(),
            renderers: RendererSet::default(),
            user_systems: Vec::new(),
        }
    }

    /// The game title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the renderer collaborators (defaults to no-op renderers)
    pub fn set_renderers(&mut self, renderers: RendererSet) {
        self.renderers = renderers;
    }

    /// A shared handle to the window
    pub fn window(&self) -> WindowHandle {
        self.window.clone()
    }

    /// A shared handle to the keyboard state, for entity update hooks and
    /// user systems
    pub fn keyboard(&self) -> KeyboardHandle {
        self.keyboard.clone()
    }

    /// The scene, for inspection
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Register a user system
    ///
    /// User systems run after physics and before rendering, in
    /// registration order. Register systems before `run`; entities added
    /// so far are offered to every system when the loop starts.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.user_systems.push(system);
    }

    /// Queue an entity for the scene
    ///
    /// Applied at the next frame boundary (or when the loop starts), at
    /// which point every system in the pipeline is offered the entity.
    pub fn add(&mut self, entity: Entity) {
        self.scene.spawn(entity);
    }

    /// Queue an entity for removal from the scene
    pub fn remove(&mut self, id: EntityId) {
        self.scene.despawn(id);
    }

    /// Open a window of the given size and run the frame loop until the
    /// window requests close
    pub fn run(self, width: u32, height: u32) -> Result<(), GameError> {
        let config = WindowConfig {
            title: self.title.clone(),
            width,
            height,
            ..Default::default()
        };
        self.run_with(config)
    }

    /// Run the frame loop with full control over the window configuration
    pub fn run_with(mut self, config: WindowConfig) -> Result<(), GameError> {
        config.validate()?;
        log::info!(
            "starting \"{}\" ({}x{}{})",
            self.title,
            config.width,
            config.height,
            if config.fullscreen { ", fullscreen" } else { "" }
        );

        self.window.open(&config)?;
        let mut pipeline = self.assemble_pipeline();
        let result = self.main_loop(&mut pipeline);
        self.window.close();
        result
    }

    /// Build the root pipeline: input, physics, user systems, rendering
    fn assemble_pipeline(&mut self) -> SequentialSystem {
        let mut children: Vec<Box<dyn System>> = Vec::new();
        children.push(Box::new(InputSystem::new(self.window.clone(), self.keyboard.clone())));
        children.push(Box::new(PhysicsSystem::new()));
        children.append(&mut self.user_systems);
        children.push(Box::new(RenderingSystem::new(
            self.window.clone(),
            std::mem::take(&mut self.renderers),
        )));
        SequentialSystem::new(children)
    }

    fn main_loop(&mut self, pipeline: &mut SequentialSystem) -> Result<(), GameError> {
        // Entities queued before run() join the scene before start(), so
        // systems like mesh rendering see their camera during startup.
        self.apply_pending(pipeline)?;
        pipeline.start()?;

        let mut timer = Timer::new();
        while !self.window.should_close() {
            let delta = timer.tick();
            self.window.poll_events();
            self.apply_pending(pipeline)?;
            self.scene.update(delta);
            pipeline.step(&mut self.scene, delta)?;
        }

        log::info!(
            "\"{}\" stopped after {} frames ({:.1} fps average)",
            self.title,
            timer.frame_count(),
            timer.average_fps()
        );
        Ok(())
    }

    /// Apply queued spawns and despawns at a frame boundary
    ///
    /// Spawns are validated against the scene's single-instance rules;
    /// accepted entities are broadcast to the pipeline. Despawns broadcast
    /// first, then drop the entity and its components.
    fn apply_pending(&mut self, pipeline: &mut SequentialSystem) -> Result<(), GameError> {
        for op in self.scene.take_pending() {
            match op {
                PendingOp::Spawn(entity) => {
                    let id = self.scene.insert(entity)?;
                    if let Some(entity) = self.scene.get(id) {
                        pipeline.add(entity);
                    }
                }
                PendingOp::Despawn(id) => {
                    pipeline.remove(id);
                    self.scene.remove(id);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ecs::components::{Camera, Mesh, Motion, Transform};
    use crate::foundation::math::Vec3;
    use crate::render::{RecordingRenderer, RenderEvent};

    fn camera_entity() -> Entity {
        Entity::new()
            .with(Transform::from_position(Vec3::new(0.0, 2.0, 10.0)))
            .and_then(|e| e.with(Camera::perspective(45.0)))
            .unwrap()
    }

    fn game_with_budget(frames: u64) -> Game {
        Game::with_window("test", Box::new(HeadlessWindow::with_frame_budget(frames)))
    }

    #[test]
    fn test_invalid_dimensions_fail_before_opening() {
        let game = game_with_budget(1);
        let err = game.run(0, 600).unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigurationError::InvalidDimensions { width: 0, height: 600 })
        ));
    }

    #[test]
    fn test_startup_without_camera_fails() {
        let game = game_with_budget(1);
        let err = game.run(320, 240).unwrap_err();
        assert!(matches!(
            err,
            GameError::Frame(FrameError::Config(ConfigurationError::MissingCamera))
        ));
    }

    #[test]
    fn test_second_camera_entity_is_rejected() {
        let mut game = game_with_budget(1);
        game.add(camera_entity());
        game.add(camera_entity());

        let err = game.run(320, 240).unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigurationError::DuplicateUnique { component: "Camera" })
        ));
    }

    #[test]
    fn test_meshes_draw_once_per_frame() {
        let mut game = game_with_budget(3);
        let recorder = RecordingRenderer::new();
        game.set_renderers(RendererSet {
            mesh: Box::new(recorder.clone()),
            ..Default::default()
        });

        game.add(camera_entity());
        game.add(
            Entity::new()
                .with(Transform::identity())
                .and_then(|e| e.with(Mesh::new("cube.obj")))
                .unwrap(),
        );

        game.run(320, 240).unwrap();

        let events = recorder.take_events();
        let frames: Vec<&[RenderEvent]> = events.chunks(2).collect();
        assert_eq!(frames.len(), 3);
        for frame in frames {
            assert_eq!(frame, &[RenderEvent::View, RenderEvent::Mesh("cube.obj".into())]);
        }
    }

    #[test]
    fn test_update_hooks_run_once_per_frame() {
        let mut game = game_with_budget(4);
        game.add(camera_entity());

        let hits = Rc::new(RefCell::new(0u32));
        let counter = hits.clone();
        game.add(Entity::new().with_update(move |_entity, _delta| {
            *counter.borrow_mut() += 1;
        }));

        game.run(320, 240).unwrap();
        assert_eq!(*hits.borrow(), 4);
    }

    #[test]
    fn test_physics_moves_entities_through_the_loop() {
        let mut game = game_with_budget(5);
        game.add(camera_entity());

        let track = Rc::new(RefCell::new(Vec3::zeros()));
        let probe = track.clone();
        game.add(
            Entity::new()
                .with(Transform::identity())
                .and_then(|e| e.with(Motion::with_velocity(Vec3::new(1.0, 0.0, 0.0))))
                .unwrap()
                .with_update(move |entity, _delta| {
                    if let Ok(transform) = entity.get::<Transform>() {
                        *probe.borrow_mut() = transform.position;
                    }
                }),
        );

        game.run(320, 240).unwrap();
        // Wall-clock deltas are tiny but strictly positive, so the entity
        // must have drifted along +X.
        assert!(track.borrow().x >= 0.0);
    }

    /// Spawns one mesh entity from inside the loop, on the first step.
    struct Spawner {
        spawned: bool,
    }

    impl System for Spawner {
        fn step(&mut self, scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
            if !self.spawned {
                self.spawned = true;
                scene.spawn(
                    Entity::new()
                        .with(Transform::identity())
                        .and_then(|e| e.with(Mesh::new("late.obj")))
                        .map_err(FrameError::Component)?,
                );
            }
            Ok(())
        }
    }

    #[test]
    fn test_mid_loop_spawn_is_visible_from_the_next_frame() {
        let mut game = game_with_budget(3);
        let recorder = RecordingRenderer::new();
        game.set_renderers(RendererSet {
            mesh: Box::new(recorder.clone()),
            ..Default::default()
        });
        game.add_system(Box::new(Spawner { spawned: false }));
        game.add(camera_entity());

        game.run(320, 240).unwrap();

        let events = recorder.take_events();
        let views = events.iter().filter(|e| **e == RenderEvent::View).count();
        let draws = events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Mesh(source) if source == "late.obj"))
            .count();
        assert_eq!(views, 3);
        // The entity spawned during frame 1 is tracked from frame 2 on.
        assert_eq!(draws, 2);
    }

    #[test]
    fn test_despawned_entity_stops_drawing() {
        let mut game = game_with_budget(3);
        let recorder = RecordingRenderer::new();
        game.set_renderers(RendererSet {
            mesh: Box::new(recorder.clone()),
            ..Default::default()
        });
        game.add(camera_entity());

        let cube = Entity::new()
            .with(Transform::identity())
            .and_then(|e| e.with(Mesh::new("cube.obj")))
            .unwrap();
        let cube_id = cube.id();
        game.add(cube);
        game.add_system(Box::new(Despawner { target: cube_id, done: false }));

        game.run(320, 240).unwrap();

        let draws = recorder
            .take_events()
            .iter()
            .filter(|e| matches!(e, RenderEvent::Mesh(_)))
            .count();
        // Drawn in frame 1 only; despawned at the frame 2 boundary.
        assert_eq!(draws, 1);
    }

    struct Despawner {
        target: EntityId,
        done: bool,
    }

    impl System for Despawner {
        fn step(&mut self, scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
            if !self.done {
                self.done = true;
                scene.despawn(self.target);
            }
            Ok(())
        }
    }
}
