//! Input systems

use std::collections::HashSet;

use crate::ecs::{Entity, EntityId, FrameError, Scene, SequentialSystem, System};
use crate::input::{Key, KeyboardHandle};
use crate::window::WindowHandle;

/// Polls keyboard state from the window collaborator once per frame
///
/// The result lands in the shared [`KeyboardHandle`], where entity update
/// hooks and user systems read it. No component requirements: this system
/// tracks no entities.
pub struct KeyboardSystem {
    window: WindowHandle,
    keyboard: KeyboardHandle,
}

impl KeyboardSystem {
    /// Create the keyboard polling system
    pub fn new(window: WindowHandle, keyboard: KeyboardHandle) -> Self {
        Self { window, keyboard }
    }
}

impl System for KeyboardSystem {
    fn step(&mut self, _scene: &mut Scene, _delta: f32) -> Result<(), FrameError> {
        let mut pressed = HashSet::new();
        for key in Key::ALL {
            if self.window.is_key_down(key) {
                pressed.insert(key);
            }
        }
        self.keyboard.advance(pressed);
        Ok(())
    }
}

/// The input stage of the root pipeline
///
/// A sequential pipeline of the input-related systems; currently just
/// keyboard polling.
pub struct InputSystem {
    pipeline: SequentialSystem,
}

impl InputSystem {
    /// Construct and pipeline the systems needed to check for user input
    pub fn new(window: WindowHandle, keyboard: KeyboardHandle) -> Self {
        Self {
            pipeline: SequentialSystem::new(vec![Box::new(KeyboardSystem::new(
                window, keyboard,
            ))]),
        }
    }
}

impl System for InputSystem {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::HeadlessWindow;

    #[test]
    fn test_keyboard_state_mirrors_the_window() {
        let window = WindowHandle::new(Box::new(HeadlessWindow::new()));
        let keyboard = KeyboardHandle::new();
        let mut system = KeyboardSystem::new(window.clone(), keyboard.clone());
        let mut scene = Scene::new();

        window.with_backend(|backend| {
            backend
                .as_any_mut()
                .downcast_mut::<HeadlessWindow>()
                .expect("headless backend")
                .press(Key::Left);
        });

        system.step(&mut scene, 0.016).unwrap();
        assert!(keyboard.is_down(Key::Left));
        assert!(keyboard.was_pressed(Key::Left));
        assert!(!keyboard.is_down(Key::Right));

        window.with_backend(|backend| {
            backend
                .as_any_mut()
                .downcast_mut::<HeadlessWindow>()
                .expect("headless backend")
                .release(Key::Left);
        });

        system.step(&mut scene, 0.016).unwrap();
        assert!(!keyboard.is_down(Key::Left));
        assert!(keyboard.was_released(Key::Left));
    }
}
