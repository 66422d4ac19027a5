//! Character-cell surface used by the command line.
//!
//! Each cell stands for a `CELL_WIDTH` x `CELL_HEIGHT` pixel block. Notes are
//! drawn as boxed cards in collection order, so later notes cover earlier
//! ones.

use super::{NoteView, Surface};
use crate::config::WallConfig;
use crate::entity::{Note, NoteId};
use crate::error::Result;
use crate::geometry::{Point, Size};

pub const CELL_WIDTH: i32 = 10;
pub const CELL_HEIGHT: i32 = 20;

const HANDLE_GLYPH: char = '≡';
const DELETE_GLYPH: char = 'x';

/// Fixed-size wall rendered to text.
#[derive(Debug, Clone)]
pub struct TextSurface {
    size: Size,
    note_size: Size,
    placeholder: String,
}

impl TextSurface {
    pub fn new(size: Size, note_size: Size, placeholder: impl Into<String>) -> Self {
        Self {
            size,
            note_size,
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &WallConfig) -> Self {
        Self::new(config.wall, config.note, config.placeholder_title.clone())
    }

    /// Change the wall dimensions, as a browser window resize would.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Draw the wall and every attached view.
    pub fn draw<'a, I>(&self, views: I) -> String
    where
        I: IntoIterator<Item = &'a TextView>,
    {
        let cols = (self.size.width / CELL_WIDTH).max(1) as usize;
        let rows = (self.size.height / CELL_HEIGHT).max(1) as usize;
        let mut canvas = Canvas::new(cols, rows);

        for view in views.into_iter().filter(|v| v.attached) {
            view.draw_onto(&mut canvas);
        }

        canvas.into_string()
    }
}

impl Surface for TextSurface {
    type View = TextView;

    fn dimensions(&self) -> Size {
        self.size
    }

    fn mount(&mut self, note: &Note) -> Result<TextView> {
        Ok(TextView {
            id: None,
            position: Point::new(note.x, note.y),
            size: self.note_size,
            title: String::new(),
            body: String::new(),
            color: String::new(),
            placeholder: self.placeholder.clone(),
            attached: true,
        })
    }
}

/// Text rendition of one note.
#[derive(Debug, Clone)]
pub struct TextView {
    id: Option<NoteId>,
    position: Point,
    size: Size,
    title: String,
    body: String,
    color: String,
    placeholder: String,
    attached: bool,
}

impl TextView {
    /// Note this view was bound to, once handlers are attached.
    pub fn id(&self) -> Option<NoteId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn draw_onto(&self, canvas: &mut Canvas) {
        let col = (self.position.x / CELL_WIDTH) as i64;
        let row = (self.position.y / CELL_HEIGHT) as i64;
        let width = ((self.size.width / CELL_WIDTH) as i64).max(6);
        let height = ((self.size.height / CELL_HEIGHT) as i64).max(3);
        let inner = (width - 2) as usize;

        for r in 0..height {
            for c in 0..width {
                let edge_row = r == 0 || r == height - 1;
                let edge_col = c == 0 || c == width - 1;
                let ch = match (edge_row, edge_col) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
                canvas.put(col + c, row + r, ch);
            }
        }

        let title_room = inner.saturating_sub(3);
        let mut header: Vec<char> = vec![HANDLE_GLYPH, ' '];
        header.extend(self.title.chars().take(title_room));
        header.resize(inner.max(1) - 1, ' ');
        header.push(DELETE_GLYPH);
        canvas.write(col + 1, row + 1, header.into_iter());

        let body_rows = (height - 3).max(0) as usize;
        for (i, line) in self.body.lines().take(body_rows).enumerate() {
            canvas.write(col + 1, row + 2 + i as i64, line.chars().take(inner));
        }
    }
}

impl NoteView for TextView {
    fn render(&mut self, note: &Note) {
        self.title = note.display_title(&self.placeholder).to_string();
        self.body = note.plain_text();
        self.color = note.color.clone();
        self.position = Point::new(note.x, note.y);
    }

    fn bind_handlers(&mut self, id: NoteId) {
        self.id = Some(id);
    }

    fn destroy(&mut self) {
        self.attached = false;
        self.id = None;
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.size
    }
}

struct Canvas {
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![' '; cols]; rows],
        }
    }

    fn put(&mut self, col: i64, row: i64, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|line| line.get_mut(col as usize))
        {
            *cell = ch;
        }
    }

    fn write(&mut self, col: i64, row: i64, text: impl Iterator<Item = char>) {
        for (i, ch) in text.enumerate() {
            self.put(col + i as i64, row, ch);
        }
    }

    fn into_string(self) -> String {
        let cols = self.cells.first().map_or(0, Vec::len);
        let border = format!("+{}+", "-".repeat(cols));
        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        for line in self.cells {
            out.push('|');
            out.extend(line);
            out.push('|');
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
        out
    }
}
