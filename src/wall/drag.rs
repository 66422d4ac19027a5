// src/wall/drag.rs
use crate::entity::NoteId;
use crate::geometry::Point;
use crate::view::NoteRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

impl std::fmt::Display for PointerButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerButton::Primary => write!(f, "primary"),
            PointerButton::Middle => write!(f, "middle"),
            PointerButton::Secondary => write!(f, "secondary"),
        }
    }
}

impl std::str::FromStr for PointerButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "left" => Ok(PointerButton::Primary),
            "middle" => Ok(PointerButton::Middle),
            "secondary" | "right" => Ok(PointerButton::Secondary),
            _ => Err(format!("Invalid pointer button: {}", s)),
        }
    }
}

/// Drag state of the wall. At most one note is dragged at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: NoteId,
        /// Pointer position minus the note's top-left at press time.
        offset: Point,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged(&self) -> Option<NoteId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { id, .. } => Some(*id),
        }
    }

    /// `Idle -> Dragging` for a primary press. Anything else leaves the state
    /// unchanged and returns `false`.
    pub fn press(&mut self, id: NoteId, button: PointerButton, pointer: Point, origin: Point) -> bool {
        if button != PointerButton::Primary || self.is_dragging() {
            return false;
        }
        *self = DragState::Dragging {
            id,
            offset: pointer.offset_from(origin),
        };
        true
    }

    /// Unclamped top-left for the dragged note under `pointer`.
    pub fn target(&self, pointer: Point) -> Option<(NoteId, Point)> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { id, offset } => Some((*id, pointer - *offset)),
        }
    }

    /// `Dragging -> Idle`. Yields the dragged note once; later calls yield
    /// nothing.
    pub fn release(&mut self) -> Option<NoteId> {
        let id = self.dragged();
        *self = DragState::Idle;
        id
    }
}

/// Result of routing a pointer press through the wall's hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// No note under the pointer.
    Missed,
    DragStarted(NoteId),
    Deleted(NoteId),
    /// Press landed in an editable region; the note does not move.
    Focused(NoteId, NoteRegion),
    /// Wrong button, or a drag is already running.
    Ignored,
}
