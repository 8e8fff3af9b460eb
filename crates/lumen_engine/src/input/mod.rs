//! Input state shared between the input system and user code
//!
//! The keyboard system polls the window collaborator once per frame and
//! mirrors the result into a [`KeyboardState`]. User code (entity update
//! hooks, custom systems) reads the state through a cloned
//! [`KeyboardHandle`] rather than polling the window itself, so all input
//! observation within a frame is consistent.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Space,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Every key the engine polls
    pub const ALL: [Key; 33] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
    ];
}

/// Snapshot of keyboard state for the current and previous frame
#[derive(Debug, Default)]
pub struct KeyboardState {
    down: HashSet<Key>,
    previous: HashSet<Key>,
}

impl KeyboardState {
    /// Whether the key is held down this frame
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// Whether the key went down this frame
    pub fn was_pressed(&self, key: Key) -> bool {
        self.down.contains(&key) && !self.previous.contains(&key)
    }

    /// Whether the key went up this frame
    pub fn was_released(&self, key: Key) -> bool {
        !self.down.contains(&key) && self.previous.contains(&key)
    }

    pub(crate) fn advance(&mut self, pressed: HashSet<Key>) {
        self.previous = std::mem::replace(&mut self.down, pressed);
    }
}

/// Cloneable shared handle to the per-frame [`KeyboardState`]
///
/// The game owns one; the keyboard system writes through it and user code
/// reads through clones of it. Single-threaded by design, matching the
/// engine's frame loop.
#[derive(Clone, Default)]
pub struct KeyboardHandle {
    state: Rc<RefCell<KeyboardState>>,
}

impl KeyboardHandle {
    /// Create a handle with no keys down
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key is held down this frame
    pub fn is_down(&self, key: Key) -> bool {
        self.state.borrow().is_down(key)
    }

    /// Whether the key went down this frame
    pub fn was_pressed(&self, key: Key) -> bool {
        self.state.borrow().was_pressed(key)
    }

    /// Whether the key went up this frame
    pub fn was_released(&self, key: Key) -> bool {
        self.state.borrow().was_released(key)
    }

    pub(crate) fn advance(&self, pressed: HashSet<Key>) {
        self.state.borrow_mut().advance(pressed);
    }
}
