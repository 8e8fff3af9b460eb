//! Headless renderer backends
//!
//! These implementations satisfy the renderer contracts without touching a
//! graphics API. [`NullRenderer`] logs and counts draw calls; it is the
//! default backend and keeps demos runnable anywhere. [`RecordingRenderer`]
//! captures every call into a shared buffer so tests can assert on draw
//! order and content.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::components::{Mesh, Sprite, Text, Transform};
use crate::foundation::math::Mat4;

use super::{FrameLights, MeshRenderer, RenderError, SpriteRenderer, TextRenderer};

/// A renderer that draws nothing
///
/// Every call succeeds; draws are counted and logged at trace level.
#[derive(Debug, Default)]
pub struct NullRenderer {
    draw_calls: u64,
}

impl NullRenderer {
    /// Create a null renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draw calls accepted so far
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

impl MeshRenderer for NullRenderer {
    fn set_view(&mut self, _view: &Mat4, _projection: &Mat4) {}

    fn draw(
        &mut self,
        mesh: &Mesh,
        transform: &Transform,
        _lights: &FrameLights,
    ) -> Result<(), RenderError> {
        self.draw_calls += 1;
        log::trace!("null renderer: mesh {:?} at {:?}", mesh.source, transform.position);
        Ok(())
    }
}

impl SpriteRenderer for NullRenderer {
    fn draw(&mut self, sprite: &Sprite, transform: &Transform) -> Result<(), RenderError> {
        self.draw_calls += 1;
        log::trace!("null renderer: sprite {:?} at {:?}", sprite.source, transform.position);
        Ok(())
    }
}

impl TextRenderer for NullRenderer {
    fn draw(&mut self, text: &Text, transform: &Transform) -> Result<(), RenderError> {
        self.draw_calls += 1;
        log::trace!("null renderer: text {:?} at {:?}", text.content, transform.position);
        Ok(())
    }
}

/// One call observed by a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// `set_view` was called
    View,
    /// A mesh was drawn, identified by its source path
    Mesh(String),
    /// A sprite was drawn, identified by its source path
    Sprite(String),
    /// A text block was drawn, identified by its content
    Text(String),
}

/// A renderer that records every call into a shared buffer
///
/// Clones share the buffer, so one recorder can serve all three renderer
/// slots while the test keeps a handle to the observed events.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared event buffer
    pub fn events(&self) -> Rc<RefCell<Vec<RenderEvent>>> {
        self.events.clone()
    }

    /// Drain and return the recorded events
    pub fn take_events(&self) -> Vec<RenderEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl MeshRenderer for RecordingRenderer {
    fn set_view(&mut self, _view: &Mat4, _projection: &Mat4) {
        self.events.borrow_mut().push(RenderEvent::View);
    }

    fn draw(
        &mut self,
        mesh: &Mesh,
        _transform: &Transform,
        _lights: &FrameLights,
    ) -> Result<(), RenderError> {
        self.events
            .borrow_mut()
            .push(RenderEvent::Mesh(mesh.source.display().to_string()));
        Ok(())
    }
}

impl SpriteRenderer for RecordingRenderer {
    fn draw(&mut self, sprite: &Sprite, _transform: &Transform) -> Result<(), RenderError> {
        self.events
            .borrow_mut()
            .push(RenderEvent::Sprite(sprite.source.display().to_string()));
        Ok(())
    }
}

impl TextRenderer for RecordingRenderer {
    fn draw(&mut self, text: &Text, _transform: &Transform) -> Result<(), RenderError> {
        self.events.borrow_mut().push(RenderEvent::Text(text.content.clone()));
        Ok(())
    }
}
