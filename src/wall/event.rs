use crate::entity::NoteId;
use crate::geometry::Point;

/// Content change coming from a note view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEdit {
    /// Raw title text as typed; trimmed before it is stored.
    Title(String),
    /// Body content with its inline markup, stored verbatim.
    Text(String),
}

/// Mutations the wall controller accepts from views and entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallEvent {
    NoteAdded,
    NoteEdited { id: NoteId, edit: NoteEdit },
    /// Final top-left of a note after a drag, before clamping.
    NoteMoved { id: NoteId, position: Point },
    NoteDeleted { id: NoteId },
}

impl WallEvent {
    /// Note the event targets, if it names one.
    pub fn note_id(&self) -> Option<NoteId> {
        match self {
            WallEvent::NoteAdded => None,
            WallEvent::NoteEdited { id, .. }
            | WallEvent::NoteMoved { id, .. }
            | WallEvent::NoteDeleted { id } => Some(*id),
        }
    }
}
