use crate::geometry::{Point, Size};

/// Interactive sub-region of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteRegion {
    /// Drag handle at the left of the header. The only place a drag starts.
    Handle,
    Title,
    Delete,
    Body,
}

impl std::fmt::Display for NoteRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteRegion::Handle => write!(f, "handle"),
            NoteRegion::Title => write!(f, "title"),
            NoteRegion::Delete => write!(f, "delete"),
            NoteRegion::Body => write!(f, "body"),
        }
    }
}

/// Pixel layout of a note's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLayout {
    pub header_height: i32,
    pub handle_width: i32,
    pub delete_width: i32,
}

impl Default for NoteLayout {
    fn default() -> Self {
        Self {
            header_height: 28,
            handle_width: 24,
            delete_width: 28,
        }
    }
}

impl NoteLayout {
    /// Region under `local`, a point relative to the note's top-left corner.
    pub fn region_at(&self, local: Point, size: Size) -> Option<NoteRegion> {
        if !size.contains(Point::default(), local) {
            return None;
        }
        if local.y >= self.header_height {
            return Some(NoteRegion::Body);
        }
        if local.x < self.handle_width {
            Some(NoteRegion::Handle)
        } else if local.x >= size.width - self.delete_width {
            Some(NoteRegion::Delete)
        } else {
            Some(NoteRegion::Title)
        }
    }

    /// Centre of the handle, relative to the note's top-left corner.
    pub fn handle_center(&self) -> Point {
        Point::new(self.handle_width / 2, self.header_height / 2)
    }

    /// Centre of the delete control for a note of `size`.
    pub fn delete_center(&self, size: Size) -> Point {
        Point::new(size.width - self.delete_width / 2, self.header_height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: Size = Size::new(200, 160);

    #[test]
    fn test_header_regions() {
        let layout = NoteLayout::default();
        assert_eq!(
            layout.region_at(Point::new(5, 5), NOTE),
            Some(NoteRegion::Handle)
        );
        assert_eq!(
            layout.region_at(Point::new(100, 10), NOTE),
            Some(NoteRegion::Title)
        );
        assert_eq!(
            layout.region_at(Point::new(190, 10), NOTE),
            Some(NoteRegion::Delete)
        );
    }

    #[test]
    fn test_body_region_spans_full_width() {
        let layout = NoteLayout::default();
        assert_eq!(
            layout.region_at(Point::new(2, 40), NOTE),
            Some(NoteRegion::Body)
        );
        assert_eq!(
            layout.region_at(Point::new(195, 150), NOTE),
            Some(NoteRegion::Body)
        );
    }

    #[test]
    fn test_outside_note_is_none() {
        let layout = NoteLayout::default();
        assert_eq!(layout.region_at(Point::new(-1, 5), NOTE), None);
        assert_eq!(layout.region_at(Point::new(200, 5), NOTE), None);
        assert_eq!(layout.region_at(Point::new(10, 160), NOTE), None);
    }

    #[test]
    fn test_control_centres_hit_their_regions() {
        let layout = NoteLayout::default();
        assert_eq!(
            layout.region_at(layout.handle_center(), NOTE),
            Some(NoteRegion::Handle)
        );
        assert_eq!(
            layout.region_at(layout.delete_center(NOTE), NOTE),
            Some(NoteRegion::Delete)
        );
    }
}
