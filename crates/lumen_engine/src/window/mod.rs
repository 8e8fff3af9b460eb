//! Window collaborator contract
//!
//! The engine core opens, polls, and presents through this trait; it never
//! links a window system itself. A backend wraps whatever library actually
//! owns the OS window (or nothing at all, see [`headless`]). The
//! [`WindowHandle`] is a cloneable shared handle, so the systems that need
//! the window (clear, swap, keyboard polling) each hold their own copy
//! instead of reaching for process-global state.

pub mod headless;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::config::WindowConfig;
use crate::input::Key;

pub use headless::HeadlessWindow;

/// Errors opening or operating external resources
#[derive(Error, Debug)]
pub enum ResourceInitError {
    /// The window or rendering context could not be created
    #[error("failed to open window: {0}")]
    Window(String),

    /// An operation required an open window
    #[error("window is not open")]
    NotOpen,
}

/// Contract every window backend implements
///
/// One backend instance corresponds to at most one OS window. The game
/// loop drives it: `open` before the first frame, `poll_events` and
/// `should_close` every frame, `close` on the way out. The clear and
/// buffer-swap render systems call `clear` and `swap_buffers` from within
/// the frame.
pub trait WindowBackend {
    /// Open the window with the given configuration
    fn open(&mut self, config: &WindowConfig) -> Result<(), ResourceInitError>;

    /// Whether the window is currently open
    fn is_open(&self) -> bool;

    /// Whether the user or the application requested the window to close
    fn should_close(&self) -> bool;

    /// Process pending window-system events
    fn poll_events(&mut self);

    /// Clear the framebuffer for a new frame
    fn clear(&mut self);

    /// Present the finished frame
    fn swap_buffers(&mut self);

    /// Current client-area size in pixels
    fn size(&self) -> (u32, u32);

    /// Whether the given key is held down right now
    fn is_key_down(&self, key: Key) -> bool;

    /// Close the window and release its resources
    fn close(&mut self);

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Cloneable shared handle to the window backend
///
/// Systems hold clones of the handle and borrow the backend for the
/// duration of a single call. The engine is single-threaded (one frame
/// loop, no suspension points), so the interior `RefCell` borrows never
/// overlap.
#[derive(Clone)]
pub struct WindowHandle {
    backend: Rc<RefCell<Box<dyn WindowBackend>>>,
}

impl WindowHandle {
    /// Wrap a backend in a shareable handle
    pub fn new(backend: Box<dyn WindowBackend>) -> Self {
        Self { backend: Rc::new(RefCell::new(backend)) }
    }

    /// Open the window with the given configuration
    pub fn open(&self, config: &WindowConfig) -> Result<(), ResourceInitError> {
        self.backend.borrow_mut().open(config)
    }

    /// Whether the window is currently open
    pub fn is_open(&self) -> bool {
        self.backend.borrow().is_open()
    }

    /// Whether a close was requested
    pub fn should_close(&self) -> bool {
        self.backend.borrow().should_close()
    }

    /// Process pending window-system events
    pub fn poll_events(&self) {
        self.backend.borrow_mut().poll_events();
    }

    /// Clear the framebuffer for a new frame
    pub fn clear(&self) {
        self.backend.borrow_mut().clear();
    }

    /// Present the finished frame
    pub fn swap_buffers(&self) {
        self.backend.borrow_mut().swap_buffers();
    }

    /// Current client-area size in pixels
    pub fn size(&self) -> (u32, u32) {
        self.backend.borrow().size()
    }

    /// Aspect ratio (width / height) of the client area
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.size();
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// Whether the given key is held down right now
    pub fn is_key_down(&self, key: Key) -> bool {
        self.backend.borrow().is_key_down(key)
    }

    /// Close the window and release its resources
    pub fn close(&self) {
        self.backend.borrow_mut().close();
    }

    /// Run a closure against the backend, for backend-specific access
    ///
    /// Intended for tests and tooling that need to reach the concrete
    /// backend type through [`WindowBackend::as_any_mut`].
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut dyn WindowBackend) -> R) -> R {
        f(self.backend.borrow_mut().as_mut())
    }
}
