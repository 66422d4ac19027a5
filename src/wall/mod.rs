//! The wall controller: owns the note collection and its views.
//!
//! Every completed mutation (add, edit, move, delete) is followed by a full
//! save of the collection within the same call. Drag moves only reposition
//! the view; the record and storage change once, when the drag ends.

mod drag;
mod event;

pub use drag::{DragState, PointerButton, PointerOutcome};
pub use event::{NoteEdit, WallEvent};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WallConfig;
use crate::entity::{random_pastel, Note, NoteId};
use crate::error::Result;
use crate::geometry::{clamp_origin, max_origin, Point};
use crate::storage::{KeyValueStore, NoteStorage};
use crate::view::{NoteLayout, NoteRegion, NoteView, Surface};

pub struct Wall<S, F: Surface> {
    notes: Vec<Note>,
    /// Index-aligned with `notes`.
    views: Vec<F::View>,
    storage: NoteStorage<S>,
    surface: F,
    config: WallConfig,
    layout: NoteLayout,
    drag: DragState,
    rng: StdRng,
}

impl<S: KeyValueStore, F: Surface> Wall<S, F> {
    /// Load persisted notes and render them onto `surface`.
    pub fn open(storage: NoteStorage<S>, surface: F, config: WallConfig) -> Result<Self> {
        let notes = storage.load();
        let mut wall = Self {
            notes,
            views: Vec::new(),
            storage,
            surface,
            config,
            layout: NoteLayout::default(),
            drag: DragState::Idle,
            rng: StdRng::from_entropy(),
        };
        wall.render_all()?;
        Ok(wall)
    }

    /// Use a seeded generator for positions and colors.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_layout(mut self, layout: NoteLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Mount a view for every record, in collection order.
    pub fn render_all(&mut self) -> Result<()> {
        for view in &mut self.views {
            view.destroy();
        }
        self.views = self
            .notes
            .iter()
            .map(|note| mount_view(&mut self.surface, note))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = self.views.len(), "rendered wall");
        Ok(())
    }

    pub fn add_note(&mut self) -> Result<NoteId> {
        self.add_note_at(Utc::now())
    }

    /// Add a note whose id derives from `created`.
    ///
    /// Two notes created in the same millisecond share an id; both are kept.
    pub fn add_note_at(&mut self, created: DateTime<Utc>) -> Result<NoteId> {
        let max = max_origin(self.surface.dimensions(), self.config.note);
        let x = self.rng.gen_range(0..=max.x);
        let y = self.rng.gen_range(0..=max.y);
        let color = random_pastel(&mut self.rng, self.config.saturation, self.config.lightness);

        let note = Note::new(
            NoteId::from_datetime(created),
            self.config.placeholder_title.clone(),
            x,
            y,
            color,
        );
        let id = note.id;

        self.views.push(mount_view(&mut self.surface, &note)?);
        self.notes.push(note);
        self.persist()?;

        tracing::info!(%id, x, y, "added note");
        Ok(id)
    }

    /// Remove the first note with `id` and its view. Returns `false` when no
    /// such note exists.
    pub fn remove_note(&mut self, id: NoteId) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        self.notes.remove(index);
        let mut view = self.views.remove(index);
        view.destroy();
        self.persist()?;

        tracing::info!(%id, "removed note");
        Ok(true)
    }

    /// Store the trimmed title.
    pub fn edit_title(&mut self, id: NoteId, raw: &str) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        self.notes[index].title = raw.trim().to_string();
        self.persist()?;

        tracing::debug!(%id, "edited title");
        Ok(true)
    }

    /// Store body content verbatim, markup included.
    pub fn edit_text(&mut self, id: NoteId, html: &str) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        self.notes[index].text = html.to_string();
        self.persist()?;

        tracing::debug!(%id, "edited text");
        Ok(true)
    }

    /// Clamp `position` into the wall, place the note there and persist.
    pub fn move_note(&mut self, id: NoteId, position: Point) -> Result<Option<Point>> {
        let Some(index) = self.index_of(id) else {
            return Ok(None);
        };

        let view = &mut self.views[index];
        let clamped = clamp_origin(position, self.surface.dimensions(), view.size());
        view.set_position(clamped);

        let note = &mut self.notes[index];
        note.x = clamped.x;
        note.y = clamped.y;
        self.persist()?;

        tracing::debug!(%id, x = clamped.x, y = clamped.y, "moved note");
        Ok(Some(clamped))
    }

    /// Apply one event. Returns the affected note, or `None` when the event
    /// named a note that no longer exists.
    pub fn dispatch(&mut self, event: WallEvent) -> Result<Option<NoteId>> {
        let applied = match event {
            WallEvent::NoteAdded => return self.add_note().map(Some),
            WallEvent::NoteEdited {
                id,
                edit: NoteEdit::Title(title),
            } => self.edit_title(id, &title)?.then_some(id),
            WallEvent::NoteEdited {
                id,
                edit: NoteEdit::Text(text),
            } => self.edit_text(id, &text)?.then_some(id),
            WallEvent::NoteMoved { id, position } => self.move_note(id, position)?.map(|_| id),
            WallEvent::NoteDeleted { id } => self.remove_note(id)?.then_some(id),
        };
        Ok(applied)
    }

    /// Start dragging `id` from a press on its handle.
    ///
    /// Only the primary button starts a drag, and only while idle.
    pub fn begin_drag(&mut self, id: NoteId, button: PointerButton, pointer: Point) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let origin = self.views[index].position();
        let started = self.drag.press(id, button, pointer, origin);
        if started {
            tracing::debug!(%id, %pointer, "drag started");
        }
        started
    }

    /// Follow the pointer with the dragged note's view, clamped to the wall.
    /// Nothing is persisted.
    pub fn drag_move(&mut self, pointer: Point) -> Option<Point> {
        let (id, target) = self.drag.target(pointer)?;
        let index = self.index_of(id)?;

        let view = &mut self.views[index];
        let clamped = clamp_origin(target, self.surface.dimensions(), view.size());
        view.set_position(clamped);

        tracing::trace!(%id, x = clamped.x, y = clamped.y, "drag move");
        Some(clamped)
    }

    /// Finish the drag: store the view's final position and persist once.
    pub fn end_drag(&mut self) -> Result<Option<Point>> {
        let Some(id) = self.drag.release() else {
            return Ok(None);
        };
        let Some(index) = self.index_of(id) else {
            return Ok(None);
        };

        let position = self.views[index].position();
        let stored = self.move_note(id, position)?;
        tracing::debug!(%id, "drag ended");
        Ok(stored)
    }

    /// Route a press at `pointer` to the topmost note under it.
    ///
    /// Handle presses start a drag, a press on the delete control removes the
    /// note, and presses on the title or body never move it.
    pub fn pointer_down(&mut self, pointer: Point, button: PointerButton) -> Result<PointerOutcome> {
        if self.drag.is_dragging() {
            return Ok(PointerOutcome::Ignored);
        }

        let hit = self.views.iter().enumerate().rev().find_map(|(index, view)| {
            let local = pointer.offset_from(view.position());
            self.layout
                .region_at(local, view.size())
                .map(|region| (self.notes[index].id, region))
        });

        let Some((id, region)) = hit else {
            return Ok(PointerOutcome::Missed);
        };

        let outcome = match region {
            NoteRegion::Handle if self.begin_drag(id, button, pointer) => PointerOutcome::DragStarted(id),
            NoteRegion::Delete if button == PointerButton::Primary => {
                self.remove_note(id)?;
                PointerOutcome::Deleted(id)
            }
            NoteRegion::Title | NoteRegion::Body => PointerOutcome::Focused(id, region),
            _ => PointerOutcome::Ignored,
        };
        Ok(outcome)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn views(&self) -> &[F::View] {
        &self.views
    }

    pub fn view(&self, id: NoteId) -> Option<&F::View> {
        self.index_of(id).map(|index| &self.views[index])
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage(&self) -> &NoteStorage<S> {
        &self.storage
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut F {
        &mut self.surface
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn layout(&self) -> &NoteLayout {
        &self.layout
    }

    fn index_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.notes)
    }
}

fn mount_view<F: Surface>(surface: &mut F, note: &Note) -> Result<F::View> {
    let mut view = surface.mount(note)?;
    view.render(note);
    view.bind_handlers(note.id);
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StickyError, StorageError};
    use crate::geometry::Size;
    use crate::storage::MemoryStore;
    use crate::view::text::{TextSurface, TextView};
    use chrono::TimeZone;

    type TestWall = Wall<MemoryStore, TextSurface>;

    fn wall_with(store: MemoryStore, size: Size) -> TestWall {
        let config = WallConfig::default().with_wall(size);
        let surface = TextSurface::from_config(&config);
        Wall::open(NoteStorage::new(store, "notes"), surface, config)
            .unwrap()
            .with_seed(42)
    }

    fn wall() -> TestWall {
        wall_with(MemoryStore::new(), Size::new(1000, 800))
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn assert_persisted(wall: &TestWall) {
        assert_eq!(wall.storage().load(), wall.notes());
    }

    fn writes(wall: &TestWall) -> usize {
        wall.storage().store().writes()
    }

    #[test]
    fn test_add_note_defaults() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1_700_000_000_000)).unwrap();

        let note = wall.get(id).unwrap();
        assert_eq!(id, NoteId(1_700_000_000_000));
        assert_eq!(note.title, "Title");
        assert_eq!(note.text, "");
        assert!(note.color.starts_with("hsl("));
        assert!(note.color.ends_with(", 80%, 80%)"));
        assert_eq!(writes(&wall), 1);
        assert_persisted(&wall);
    }

    #[test]
    fn test_add_note_spawns_inside_wall() {
        let mut wall = wall();
        for i in 0..200 {
            wall.add_note_at(at(i)).unwrap();
        }
        for note in wall.notes() {
            assert!((0..=800).contains(&note.x), "x out of range: {}", note.x);
            assert!((0..=640).contains(&note.y), "y out of range: {}", note.y);
        }
    }

    #[test]
    fn test_add_note_on_small_wall_collapses_to_origin() {
        let mut wall = wall_with(MemoryStore::new(), Size::new(150, 100));
        for i in 0..20 {
            wall.add_note_at(at(i)).unwrap();
        }
        assert!(wall.notes().iter().all(|n| n.x == 0 && n.y == 0));
    }

    #[test]
    fn test_same_millisecond_notes_are_both_kept() {
        let mut wall = wall();
        let a = wall.add_note_at(at(5)).unwrap();
        let b = wall.add_note_at(at(5)).unwrap();

        assert_eq!(a, b);
        assert_eq!(wall.len(), 2);

        assert!(wall.remove_note(a).unwrap());
        assert_eq!(wall.len(), 1);
        assert_persisted(&wall);
    }

    #[test]
    fn test_open_renders_stored_notes_in_order() {
        let mut first = wall();
        first.add_note_at(at(3)).unwrap();
        first.add_note_at(at(1)).unwrap();
        first.add_note_at(at(2)).unwrap();
        first.edit_title(NoteId(1), "middle").unwrap();

        let store = first.storage().store().clone();
        let reopened = wall_with(store, Size::new(1000, 800));

        let ids: Vec<i64> = reopened.notes().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let view_ids: Vec<Option<NoteId>> = reopened.views().iter().map(TextView::id).collect();
        assert_eq!(view_ids, vec![Some(NoteId(3)), Some(NoteId(1)), Some(NoteId(2))]);
        assert_eq!(reopened.view(NoteId(1)).unwrap().title(), "middle");
    }

    #[test]
    fn test_open_with_malformed_storage_is_empty() {
        let mut store = MemoryStore::new();
        store.set_item("notes", "{not json").unwrap();

        let wall = wall_with(store, Size::new(1000, 800));
        assert!(wall.is_empty());
        assert!(wall.views().is_empty());
    }

    #[test]
    fn test_edit_title_is_trimmed() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();

        assert!(wall.edit_title(id, "  Groceries  ").unwrap());
        assert_eq!(wall.get(id).unwrap().title, "Groceries");
        assert_persisted(&wall);
    }

    #[test]
    fn test_edit_text_keeps_markup() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();

        let html = "  <b>milk</b><div>eggs</div>  ";
        assert!(wall.edit_text(id, html).unwrap());
        assert_eq!(wall.get(id).unwrap().text, html);
        assert_persisted(&wall);
    }

    #[test]
    fn test_every_keystroke_is_saved() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        let before = writes(&wall);

        for typed in ["G", "Gr", "Gro"] {
            wall.edit_title(id, typed).unwrap();
        }
        assert_eq!(writes(&wall), before + 3);
    }

    #[test]
    fn test_remove_note_removes_exactly_one() {
        let mut wall = wall();
        let a = wall.add_note_at(at(1)).unwrap();
        let b = wall.add_note_at(at(2)).unwrap();
        let c = wall.add_note_at(at(3)).unwrap();

        assert!(wall.remove_note(b).unwrap());

        let ids: Vec<NoteId> = wall.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(wall.views().len(), 2);
        assert!(wall.view(b).is_none());
        assert_persisted(&wall);
    }

    #[test]
    fn test_missing_ids_are_silent_no_ops() {
        let mut wall = wall();
        wall.add_note_at(at(1)).unwrap();
        let before = writes(&wall);
        let snapshot = wall.notes().to_vec();

        let ghost = NoteId(999);
        assert!(!wall.remove_note(ghost).unwrap());
        assert!(!wall.edit_title(ghost, "x").unwrap());
        assert!(!wall.edit_text(ghost, "x").unwrap());
        assert_eq!(wall.move_note(ghost, Point::new(1, 1)).unwrap(), None);
        assert!(!wall.begin_drag(ghost, PointerButton::Primary, Point::default()));

        assert_eq!(wall.notes(), snapshot.as_slice());
        assert_eq!(writes(&wall), before);
    }

    #[test]
    fn test_drag_clamps_to_wall() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.move_note(id, Point::new(100, 100)).unwrap();

        // Grab 10px into the handle.
        assert!(wall.begin_drag(id, PointerButton::Primary, Point::new(110, 110)));
        wall.drag_move(Point::new(-40, 110));
        assert_eq!(wall.end_drag().unwrap(), Some(Point::new(0, 100)));
        assert_eq!(wall.get(id).unwrap().x, 0);

        assert!(wall.begin_drag(id, PointerButton::Primary, Point::new(10, 110)));
        wall.drag_move(Point::new(960, 110));
        wall.end_drag().unwrap();
        assert_eq!(wall.get(id).unwrap().x, 800);

        assert!(wall.begin_drag(id, PointerButton::Primary, Point::new(810, 110)));
        wall.drag_move(Point::new(500, 5000));
        wall.end_drag().unwrap();
        let note = wall.get(id).unwrap();
        assert_eq!((note.x, note.y), (490, 640));
        assert_persisted(&wall);
    }

    #[test]
    fn test_drag_moves_do_not_persist() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.move_note(id, Point::new(0, 0)).unwrap();
        let before = writes(&wall);

        wall.begin_drag(id, PointerButton::Primary, Point::new(5, 5));
        for step in 1..50 {
            wall.drag_move(Point::new(5 + step * 3, 5 + step));
        }
        assert_eq!(writes(&wall), before);
        // Record keeps its old position until the drag ends.
        assert_eq!(wall.get(id).unwrap().x, 0);
        assert_eq!(wall.view(id).unwrap().position(), Point::new(147, 49));

        wall.end_drag().unwrap();
        assert_eq!(writes(&wall), before + 1);
        assert_eq!(wall.get(id).unwrap().x, 147);
        assert_eq!(wall.get(id).unwrap().y, 49);
    }

    #[test]
    fn test_drag_end_happens_once() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.begin_drag(id, PointerButton::Primary, Point::new(5, 5));
        let before = writes(&wall);

        assert!(wall.end_drag().unwrap().is_some());
        assert_eq!(wall.end_drag().unwrap(), None);
        assert_eq!(wall.drag_move(Point::new(300, 300)), None);
        assert_eq!(writes(&wall), before + 1);
        assert_eq!(wall.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_secondary_button_never_drags() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();

        assert!(!wall.begin_drag(id, PointerButton::Secondary, Point::new(5, 5)));
        assert_eq!(wall.drag_move(Point::new(400, 400)), None);
        assert_eq!(wall.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_of_deleted_note_is_dropped() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.begin_drag(id, PointerButton::Primary, Point::new(5, 5));
        wall.remove_note(id).unwrap();
        let before = writes(&wall);

        assert_eq!(wall.drag_move(Point::new(50, 50)), None);
        assert_eq!(wall.end_drag().unwrap(), None);
        assert_eq!(writes(&wall), before);
    }

    #[test]
    fn test_pointer_down_routes_by_region() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.move_note(id, Point::new(100, 100)).unwrap();

        assert_eq!(
            wall.pointer_down(Point::new(200, 200), PointerButton::Primary).unwrap(),
            PointerOutcome::Focused(id, NoteRegion::Body)
        );
        assert_eq!(
            wall.pointer_down(Point::new(200, 110), PointerButton::Primary).unwrap(),
            PointerOutcome::Focused(id, NoteRegion::Title)
        );
        assert_eq!(wall.drag_state(), DragState::Idle);
        assert_eq!(wall.drag_move(Point::new(0, 0)), None);
        assert_eq!(wall.get(id).unwrap().x, 100);

        assert_eq!(
            wall.pointer_down(Point::new(50, 50), PointerButton::Primary).unwrap(),
            PointerOutcome::Missed
        );
        assert_eq!(
            wall.pointer_down(Point::new(105, 105), PointerButton::Secondary).unwrap(),
            PointerOutcome::Ignored
        );
        assert_eq!(
            wall.pointer_down(Point::new(105, 105), PointerButton::Primary).unwrap(),
            PointerOutcome::DragStarted(id)
        );
        wall.end_drag().unwrap();

        assert_eq!(
            wall.pointer_down(Point::new(290, 110), PointerButton::Primary).unwrap(),
            PointerOutcome::Deleted(id)
        );
        assert!(wall.is_empty());
        assert_persisted(&wall);
    }

    #[test]
    fn test_pointer_down_hits_topmost_note() {
        let mut wall = wall();
        let below = wall.add_note_at(at(1)).unwrap();
        let above = wall.add_note_at(at(2)).unwrap();
        wall.move_note(below, Point::new(0, 0)).unwrap();
        wall.move_note(above, Point::new(50, 0)).unwrap();

        assert_eq!(
            wall.pointer_down(Point::new(60, 60), PointerButton::Primary).unwrap(),
            PointerOutcome::Focused(above, NoteRegion::Body)
        );
        assert_eq!(
            wall.pointer_down(Point::new(20, 60), PointerButton::Primary).unwrap(),
            PointerOutcome::Focused(below, NoteRegion::Body)
        );
    }

    #[test]
    fn test_dispatch_events() {
        let mut wall = wall();
        let id = wall.dispatch(WallEvent::NoteAdded).unwrap().unwrap();

        let edited = wall
            .dispatch(WallEvent::NoteEdited {
                id,
                edit: NoteEdit::Title(" Plan ".to_string()),
            })
            .unwrap();
        assert_eq!(edited, Some(id));
        wall.dispatch(WallEvent::NoteEdited {
            id,
            edit: NoteEdit::Text("<i>soon</i>".to_string()),
        })
        .unwrap();
        wall.dispatch(WallEvent::NoteMoved {
            id,
            position: Point::new(-50, 9000),
        })
        .unwrap();

        let note = wall.get(id).unwrap();
        assert_eq!(note.title, "Plan");
        assert_eq!(note.text, "<i>soon</i>");
        assert_eq!((note.x, note.y), (0, 640));
        assert_persisted(&wall);

        assert_eq!(wall.dispatch(WallEvent::NoteDeleted { id }).unwrap(), Some(id));
        assert_eq!(wall.dispatch(WallEvent::NoteDeleted { id }).unwrap(), None);
        assert!(wall.is_empty());
    }

    #[test]
    fn test_storage_matches_memory_after_every_operation() {
        let mut wall = wall();
        let mut ids = Vec::new();

        for i in 0..6 {
            ids.push(wall.add_note_at(at(i)).unwrap());
            assert_persisted(&wall);
        }
        for (i, id) in ids.iter().enumerate() {
            wall.edit_title(*id, &format!(" note {} ", i)).unwrap();
            assert_persisted(&wall);
            wall.edit_text(*id, &format!("body<br>{}", i)).unwrap();
            assert_persisted(&wall);
        }
        for id in ids.iter().step_by(2) {
            wall.begin_drag(*id, PointerButton::Primary, Point::new(0, 0));
            wall.drag_move(Point::new(333, 222));
            wall.end_drag().unwrap();
            assert_persisted(&wall);
            wall.remove_note(*id).unwrap();
            assert_persisted(&wall);
        }
        assert_eq!(wall.len(), 3);
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut wall = wall_with(MemoryStore::with_quota(150), Size::new(1000, 800));
        let id = wall.add_note_at(at(1)).unwrap();

        let result = wall.edit_text(id, &"x".repeat(500));
        assert!(matches!(
            result,
            Err(StickyError::Storage(StorageError::QuotaExceeded { .. }))
        ));
    }

    #[test]
    fn test_shrunk_wall_clamps_on_next_drag() {
        let mut wall = wall();
        let id = wall.add_note_at(at(1)).unwrap();
        wall.move_note(id, Point::new(800, 640)).unwrap();

        wall.surface_mut().resize(Size::new(500, 400));
        assert_eq!(wall.get(id).unwrap().x, 800);

        wall.begin_drag(id, PointerButton::Primary, Point::new(805, 645));
        wall.drag_move(Point::new(805, 645));
        wall.end_drag().unwrap();
        let note = wall.get(id).unwrap();
        assert_eq!((note.x, note.y), (300, 240));
    }
}
