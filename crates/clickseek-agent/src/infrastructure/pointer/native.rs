//! `enigo`-backed pointer control.

use std::sync::Mutex;

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use crate::application::click_target::{PointerDriver, PointerError};

/// The production pointer backend.
///
/// `enigo`'s `Mouse` methods take `&mut self`, so the handle sits behind a
/// `Mutex`. The scan loop is the only caller during a run, so there is no
/// contention in practice.
pub struct EnigoPointerDriver {
    enigo: Mutex<Enigo>,
}

impl EnigoPointerDriver {
    /// Connects to the OS input subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::Platform`] if the connection fails (e.g. no
    /// display server, or missing accessibility permission on macOS).
    pub fn new() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PointerError::Platform(e.to_string()))?;
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }
}

impl PointerDriver for EnigoPointerDriver {
    fn position(&self) -> Result<(i32, i32), PointerError> {
        self.enigo
            .lock()
            .unwrap()
            .location()
            .map_err(|e| PointerError::Platform(e.to_string()))
    }

    fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError> {
        self.enigo
            .lock()
            .unwrap()
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| PointerError::Platform(e.to_string()))
    }

    fn click(&self) -> Result<(), PointerError> {
        self.enigo
            .lock()
            .unwrap()
            .button(Button::Left, Direction::Click)
            .map_err(|e| PointerError::Platform(e.to_string()))
    }
}
