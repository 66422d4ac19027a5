//! Note views and the surfaces that host them.
//!
//! A [`Surface`] is a rendering target (a DOM container, a character grid)
//! that reports its current dimensions and builds one [`NoteView`] per note
//! record. The wall controller owns the views and keeps them in step with
//! the records; views never touch storage.

mod layout;
pub mod text;
#[cfg(feature = "web")]
pub mod web;

pub use layout::{NoteLayout, NoteRegion};

use crate::entity::{Note, NoteId};
use crate::error::Result;
use crate::geometry::{Point, Size};

/// On-screen counterpart of one note record.
pub trait NoteView {
    /// Show `note`'s title, body, color and position.
    fn render(&mut self, note: &Note);

    /// Attach input handling for the note `id`.
    fn bind_handlers(&mut self, id: NoteId);

    /// Remove the view from its surface.
    fn destroy(&mut self);

    /// Rendered top-left corner relative to the wall.
    fn position(&self) -> Point;

    fn set_position(&mut self, position: Point);

    /// Rendered size, which may exceed the configured note size when the
    /// body grows.
    fn size(&self) -> Size;
}

/// The wall a note view is placed on.
pub trait Surface {
    type View: NoteView;

    /// Current inner dimensions of the wall.
    fn dimensions(&self) -> Size;

    /// Build an unrendered view for `note` and attach it to the surface.
    fn mount(&mut self, note: &Note) -> Result<Self::View>;
}
