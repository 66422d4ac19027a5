use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::config::WallConfig;
use crate::entity::{Note, NoteId};
use crate::error::{Result, StickyError};
use crate::geometry::{Point, Size};
use crate::storage::{FileStore, NoteStorage, STICKYWALL_DIR};
use crate::view::text::TextSurface;
use crate::view::NoteView;
use crate::wall::{PointerButton, PointerOutcome, Wall};

type CliWall = Wall<FileStore, TextSurface>;

/// Find the project root by looking for .stickywall/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(STICKYWALL_DIR).is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_wall() -> Result<CliWall> {
    let root = find_project_root();
    let store = FileStore::open(&root)?;
    let config = WallConfig::load(store.dir())?;
    let surface = TextSurface::from_config(&config);
    let storage = NoteStorage::new(store, config.storage_key.clone());
    Wall::open(storage, surface, config)
}

fn find_note(wall: &CliWall, id: NoteId) -> Result<&Note> {
    wall.get(id).ok_or(StickyError::NoteNotFound(id))
}

fn print_note_line(note: &Note, placeholder: &str) {
    println!(
        "  {}  ({:>4}, {:>4})  {}",
        note.id,
        note.x,
        note.y,
        note.display_title(placeholder)
    );
}

pub fn handle_init(width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(StickyError::InvalidArgument(format!(
            "wall size must be positive, got {}x{}",
            width, height
        )));
    }

    let root = env::current_dir()?;
    let store = FileStore::init(&root)?;

    let config = WallConfig::default().with_wall(Size::new(width, height));
    config.save(store.dir())?;

    println!("Initialized stickywall in {}", root.display());
    println!("  wall: {}x{} px", width, height);

    Ok(())
}

pub fn handle_add(json: bool) -> Result<()> {
    let mut wall = open_wall()?;
    let id = wall.add_note()?;
    let note = find_note(&wall, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Added note {} at ({}, {})", note.id, note.x, note.y);
    }

    Ok(())
}

pub fn handle_list(json: bool) -> Result<()> {
    let wall = open_wall()?;
    let notes = wall.notes();

    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for note in notes {
            print_note_line(note, &wall.config().placeholder_title);
        }
    }

    Ok(())
}

pub fn handle_get(id: NoteId, json: bool) -> Result<()> {
    let wall = open_wall()?;
    let note = find_note(&wall, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    println!("Note {}", note.id);
    println!("Title: {}", note.display_title(&wall.config().placeholder_title));
    println!("Position: ({}, {})", note.x, note.y);
    println!("Color: {}", note.color);
    if let Some(created) = note.id.created_at() {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M"));
    }
    let body = note.plain_text();
    if !body.is_empty() {
        println!("\n{}", body);
    }

    Ok(())
}

pub fn handle_title(id: NoteId, title: String) -> Result<()> {
    let mut wall = open_wall()?;

    if !wall.edit_title(id, &title)? {
        return Err(StickyError::NoteNotFound(id));
    }

    let note = find_note(&wall, id)?;
    println!("Updated note {}: {}", note.id, note.title);
    Ok(())
}

pub fn handle_text(id: NoteId, text: Option<String>, stdin: bool) -> Result<()> {
    let content = if stdin {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        text.unwrap_or_default()
    };

    let mut wall = open_wall()?;
    if !wall.edit_text(id, &content)? {
        return Err(StickyError::NoteNotFound(id));
    }

    println!("Updated note {} ({} bytes)", id, content.len());
    Ok(())
}

pub fn handle_drag(id: NoteId, x: i32, y: i32, button: PointerButton) -> Result<()> {
    let mut wall = open_wall()?;

    let grab = wall.layout().handle_center();
    let origin = wall
        .view(id)
        .map(NoteView::position)
        .ok_or(StickyError::NoteNotFound(id))?;

    if !wall.begin_drag(id, button, origin + grab) {
        println!("Drag ignored: only the primary button drags notes.");
        return Ok(());
    }
    wall.drag_move(Point::new(x, y) + grab);

    match wall.end_drag()? {
        Some(position) => println!("Moved note {} to {}", id, position),
        None => return Err(StickyError::NoteNotFound(id)),
    }

    Ok(())
}

pub fn handle_click(at: Point, button: PointerButton) -> Result<()> {
    let mut wall = open_wall()?;

    match wall.pointer_down(at, button)? {
        PointerOutcome::Missed => println!("Nothing at {}", at),
        PointerOutcome::Ignored => println!("Ignored {} press at {}", button, at),
        PointerOutcome::Deleted(id) => println!("Deleted note {}", id),
        PointerOutcome::Focused(id, region) => println!("Focused {} of note {}", region, id),
        PointerOutcome::DragStarted(id) => {
            // Release in place.
            if let Some(position) = wall.end_drag()? {
                println!("Grabbed note {} at {}", id, position);
            }
        }
    }

    Ok(())
}

pub fn handle_delete(id: NoteId, force: bool) -> Result<()> {
    let mut wall = open_wall()?;
    let placeholder = wall.config().placeholder_title.clone();
    let title = find_note(&wall, id)?.display_title(&placeholder).to_string();

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", id, title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(StickyError::InvalidArgument(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    wall.remove_note(id)?;
    println!("Deleted note {} - {}", id, title);

    Ok(())
}

pub fn handle_render() -> Result<()> {
    let wall = open_wall()?;
    print!("{}", wall.surface().draw(wall.views()));
    Ok(())
}
