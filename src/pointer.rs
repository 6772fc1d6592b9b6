// OS pointer injection behind a narrow trait, so the pipeline can be tested
// by recording calls instead of actually moving the mouse.

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use crate::error::Error;

/// The two things the pipeline ever asks of the OS pointer. Fire-and-forget:
/// the pipeline never consumes a return value beyond the error.
pub trait Pointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), Error>;
    /// Press immediately followed by release of the primary button.
    fn click(&mut self) -> Result<(), Error>;
}

/// The real thing, backed by enigo.
pub struct SystemPointer {
    enigo: Enigo,
}

impl SystemPointer {
    pub fn new() -> Result<Self, Error> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| Error::PointerInit(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// Size of the main display, queried once at startup for the mapping.
    pub fn screen_size(&self) -> Result<(usize, usize), Error> {
        let (w, h) = self
            .enigo
            .main_display()
            .map_err(|e| Error::PointerInit(e.to_string()))?;
        Ok((w as usize, h as usize))
    }
}

impl Pointer for SystemPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), Error> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| Error::PointerActuation(e.to_string()))
    }

    fn click(&mut self) -> Result<(), Error> {
        self.enigo
            .button(Button::Left, Direction::Press)
            .and_then(|_| self.enigo.button(Button::Left, Direction::Release))
            .map_err(|e| Error::PointerActuation(e.to_string()))
    }
}
