//! Headless window backend
//!
//! Stands in for a real window system in tests, demos, and CI. The close
//! condition is a configurable frame budget: the window reports
//! `should_close` once that many frames have been presented. Key state is
//! set programmatically through [`HeadlessWindow::press`] and
//! [`HeadlessWindow::release`].

use std::collections::HashSet;

use crate::config::WindowConfig;
use crate::input::Key;

use super::{ResourceInitError, WindowBackend};

/// A window backend without a window
pub struct HeadlessWindow {
    open: bool,
    size: (u32, u32),
    frame_budget: Option<u64>,
    frames_presented: u64,
    close_requested: bool,
    keys_down: HashSet<Key>,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessWindow {
    /// Create a headless window that never closes on its own
    pub fn new() -> Self {
        Self {
            open: false,
            size: (0, 0),
            frame_budget: None,
            frames_presented: 0,
            close_requested: false,
            keys_down: HashSet::new(),
        }
    }

    /// Create a headless window that requests close after `frames` frames
    pub fn with_frame_budget(frames: u64) -> Self {
        Self { frame_budget: Some(frames), ..Self::new() }
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Mark a key as held down
    pub fn press(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    /// Request the window to close at the next check
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }
}

impl WindowBackend for HeadlessWindow {
    fn open(&mut self, config: &WindowConfig) -> Result<(), ResourceInitError> {
        if self.open {
            return Err(ResourceInitError::Window("window is already open".into()));
        }
        self.open = true;
        self.size = (config.width, config.height);
        log::info!(
            "headless window opened: {}x{} \"{}\"",
            config.width,
            config.height,
            config.title
        );
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn should_close(&self) -> bool {
        if self.close_requested {
            return true;
        }
        match self.frame_budget {
            Some(budget) => self.frames_presented >= budget,
            None => false,
        }
    }

    fn poll_events(&mut self) {}

    fn clear(&mut self) {}

    fn swap_buffers(&mut self) {
        self.frames_presented += 1;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn close(&mut self) {
        if self.open {
            log::info!("headless window closed after {} frames", self.frames_presented);
        }
        self.open = false;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget_drives_close_condition() {
        let mut window = HeadlessWindow::with_frame_budget(2);
        window.open(&WindowConfig::default()).unwrap();

        assert!(!window.should_close());
        window.swap_buffers();
        assert!(!window.should_close());
        window.swap_buffers();
        assert!(window.should_close());
        assert_eq!(window.frames_presented(), 2);
    }

    #[test]
    fn test_double_open_fails() {
        let mut window = HeadlessWindow::new();
        window.open(&WindowConfig::default()).unwrap();
        assert!(window.open(&WindowConfig::default()).is_err());
    }

    #[test]
    fn test_key_state() {
        let mut window = HeadlessWindow::new();
        window.press(Key::W);
        assert!(window.is_key_down(Key::W));
        window.release(Key::W);
        assert!(!window.is_key_down(Key::W));
    }

    #[test]
    fn test_explicit_close_request() {
        let mut window = HeadlessWindow::new();
        assert!(!window.should_close());
        window.request_close();
        assert!(window.should_close());
    }
}
