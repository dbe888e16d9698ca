use winit::keyboard::{Key, NamedKey};

use crate::catalog::{Catalog, CatalogError};
use crate::loader::{file_name, load_frame, DecodedImage, Frame};

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,
    Prev,
    Delete,
}

pub fn action_for_key(key: &Key) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Action::Quit),
        Key::Named(NamedKey::ArrowRight | NamedKey::Space) => Some(Action::Next),
        Key::Named(NamedKey::ArrowLeft | NamedKey::Backspace) => Some(Action::Prev),
        Key::Named(NamedKey::Delete) => Some(Action::Delete),
        Key::Character(s) if s.eq_ignore_ascii_case("q") => Some(Action::Quit),
        _ => None,
    }
}

/// What the window has to do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    /// A new frame (or at least a new title) is ready.
    Redisplay,
    Unchanged,
}

// ---------------------------------------------------------------------------
// Window drag
// ---------------------------------------------------------------------------

/// Tracks a left-button window drag. Positions are cursor coordinates
/// relative to the window, so once the window has moved by the returned
/// delta the cursor sits on the grab point again.
#[derive(Debug, Default)]
pub struct DragState {
    grab: Option<(f64, f64)>,
}

impl DragState {
    pub fn begin(&mut self, cursor: (f64, f64)) {
        self.grab = Some(cursor);
    }

    pub fn end(&mut self) {
        self.grab = None;
    }

    /// Offset to move the window by for a cursor at `cursor`.
    pub fn motion(&self, cursor: (f64, f64)) -> Option<(i32, i32)> {
        let (gx, gy) = self.grab?;
        let dx = (cursor.0 - gx).round() as i32;
        let dy = (cursor.1 - gy).round() as i32;
        if dx == 0 && dy == 0 {
            None
        } else {
            Some((dx, dy))
        }
    }
}

// ---------------------------------------------------------------------------
// Viewer session
// ---------------------------------------------------------------------------

pub struct ViewerState {
    pub catalog: Catalog,
    /// Decoded start image, waiting for the monitor size to be known.
    pending: Option<DecodedImage>,
    pub frame: Option<Frame>,
    /// Title shown in the window; differs from the frame's title when the
    /// current file could not be loaded.
    pub title: String,
    pub area: (u32, u32),
    pub allow_delete: bool,
    pub drag: DragState,
    pub mouse_pos: (f64, f64),
}

impl ViewerState {
    pub fn new(catalog: Catalog, initial: DecodedImage, allow_delete: bool) -> Self {
        Self {
            catalog,
            pending: Some(initial),
            frame: None,
            title: "imgv".to_string(),
            area: (1, 1),
            allow_delete,
            drag: DragState::default(),
            mouse_pos: (0.0, 0.0),
        }
    }

    /// Fit the start image to `area` and remember the area for later frames.
    pub fn show_initial(&mut self, area: (u32, u32)) -> Result<(), crate::loader::DecodeError> {
        self.area = area;
        let Some(decoded) = self.pending.take() else {
            return Ok(());
        };
        let Some(path) = self.catalog.current_path() else {
            return Ok(());
        };
        let frame = Frame::prepare(path, decoded, area)?;
        self.set_frame(frame);
        Ok(())
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Quit => Outcome::Quit,
            Action::Next => {
                let idx = self.catalog.next();
                log::debug!("[nav] next -> {}/{}", idx + 1, self.catalog.len());
                self.load_current()
            }
            Action::Prev => {
                let idx = self.catalog.prev();
                log::debug!("[nav] prev -> {}/{}", idx + 1, self.catalog.len());
                self.load_current()
            }
            Action::Delete => self.delete_current(),
        }
    }

    fn delete_current(&mut self) -> Outcome {
        if !self.allow_delete {
            log::debug!("Delete ignored (--no-delete)");
            return Outcome::Unchanged;
        }
        match self.catalog.remove_current() {
            Ok(idx) => {
                log::debug!("[nav] deleted, now at {}", idx);
                self.load_current()
            }
            Err(CatalogError::Emptied) => {
                log::info!("Last image in {:?} deleted, closing", self.catalog.dir());
                Outcome::Quit
            }
            Err(e) => {
                log::error!("{}", e);
                Outcome::Unchanged
            }
        }
    }

    fn load_current(&mut self) -> Outcome {
        let Some(path) = self.catalog.current_path() else {
            return Outcome::Unchanged;
        };
        match load_frame(path, self.area) {
            Ok(frame) => {
                self.set_frame(frame);
            }
            Err(e) => {
                // Keep the previous frame on screen.
                log::warn!("{}", e);
                self.title = format!("imgv - cannot load {}", file_name(path));
            }
        }
        Outcome::Redisplay
    }

    fn set_frame(&mut self, frame: Frame) {
        self.title = frame.title.clone();
        self.frame = Some(frame);
    }

    /// Size the window should have for the current frame.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame.as_ref().map(|f| (f.width(), f.height()))
    }
}
