//! DOM surface for wasm32 builds.
//!
//! Expects a page with a `#wall` container and an `#addNoteBtn` trigger.
//! Input is handled by delegation: one listener per event kind on the wall
//! (and the document for pointer moves and releases) finds the note from the
//! `data-note-id` attribute of the enclosing `.note` element.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent};

use super::{NoteView, Surface};
use crate::config::WallConfig;
use crate::entity::{Note, NoteId};
use crate::error::{Result, StickyError, StorageError};
use crate::geometry::{Point, Size};
use crate::storage::{LocalStorage, NoteStorage};
use crate::wall::{NoteEdit, PointerButton, Wall, WallEvent};

const NOTE_ID_ATTR: &str = "data-note-id";

type WebWall = Wall<LocalStorage, WebSurface>;

/// The `#wall` element.
pub struct WebSurface {
    document: Document,
    wall: HtmlElement,
    placeholder: String,
}

impl WebSurface {
    pub fn new(document: Document, wall: HtmlElement, placeholder: impl Into<String>) -> Self {
        Self {
            document,
            wall,
            placeholder: placeholder.into(),
        }
    }

    fn element(&self, tag: &str, class: &str) -> Result<HtmlElement> {
        let element = self
            .document
            .create_element(tag)
            .map_err(dom_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|e| dom_error(e.into()))?;
        element.set_class_name(class);
        Ok(element)
    }
}

impl Surface for WebSurface {
    type View = WebView;

    fn dimensions(&self) -> Size {
        Size::new(self.wall.client_width(), self.wall.client_height())
    }

    fn mount(&mut self, _note: &Note) -> Result<WebView> {
        let root = self.element("div", "note")?;
        let header = self.element("div", "note-header")?;

        let handle = self.element("div", "drag-handle")?;
        handle.set_text_content(Some("≡"));

        let title = self.element("div", "note-title")?;

        let delete = self.element("button", "deleteBtn")?;
        delete.set_attribute("type", "button").map_err(dom_error)?;
        delete.set_text_content(Some("❌"));
        delete.set_content_editable("false");

        let content = self.element("div", "note-content")?;

        header.append_child(&handle).map_err(dom_error)?;
        header.append_child(&title).map_err(dom_error)?;
        header.append_child(&delete).map_err(dom_error)?;
        root.append_child(&header).map_err(dom_error)?;
        root.append_child(&content).map_err(dom_error)?;
        self.wall.append_child(&root).map_err(dom_error)?;

        Ok(WebView {
            root,
            title,
            content,
            placeholder: self.placeholder.clone(),
        })
    }
}

pub struct WebView {
    root: HtmlElement,
    title: HtmlElement,
    content: HtmlElement,
    placeholder: String,
}

impl NoteView for WebView {
    fn render(&mut self, note: &Note) {
        let style = self.root.style();
        let _ = style.set_property("background", &note.color);
        self.set_position(Point::new(note.x, note.y));
        self.title
            .set_text_content(Some(note.display_title(&self.placeholder)));
        // Markup from rich editing is loaded back as-is.
        self.content.set_inner_html(&note.text);
    }

    fn bind_handlers(&mut self, id: NoteId) {
        let _ = self.root.set_attribute(NOTE_ID_ATTR, &id.to_string());
        self.title.set_content_editable("true");
        self.content.set_content_editable("true");
    }

    fn destroy(&mut self) {
        self.root.remove();
    }

    fn position(&self) -> Point {
        Point::new(self.root.offset_left(), self.root.offset_top())
    }

    fn set_position(&mut self, position: Point) {
        let style = self.root.style();
        let _ = style.set_property("left", &format!("{}px", position.x));
        let _ = style.set_property("top", &format!("{}px", position.y));
    }

    fn size(&self) -> Size {
        Size::new(self.root.offset_width(), self.root.offset_height())
    }
}

/// Load the wall from local storage and wire up the page.
#[wasm_bindgen]
pub fn start() -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let wall_element = document
        .get_element_by_id("wall")
        .ok_or_else(|| JsValue::from_str("missing #wall element"))?
        .dyn_into::<HtmlElement>()?;
    let add_button = document
        .get_element_by_id("addNoteBtn")
        .ok_or_else(|| JsValue::from_str("missing #addNoteBtn element"))?;

    let config = WallConfig::default();
    let store = LocalStorage::open().map_err(to_js)?;
    let storage = NoteStorage::new(store, config.storage_key.clone());
    let surface = WebSurface::new(
        document.clone(),
        wall_element.clone(),
        config.placeholder_title.clone(),
    );
    let wall = Wall::open(storage, surface, config).map_err(to_js)?;
    let app = Rc::new(RefCell::new(wall));

    listen(&add_button, "click", {
        let app = Rc::clone(&app);
        move |_event: Event| with_wall(&app, |wall| wall.dispatch(WallEvent::NoteAdded).map(drop))
    })?;

    listen(&wall_element, "input", {
        let app = Rc::clone(&app);
        move |event: Event| {
            let Some(target) = event_element(&event) else {
                return;
            };
            let Some(id) = note_id_of(&target) else {
                return;
            };
            let edit = if matches_selector(&target, ".note-title") {
                NoteEdit::Title(target.text_content().unwrap_or_default())
            } else if matches_selector(&target, ".note-content") {
                NoteEdit::Text(target.inner_html())
            } else {
                return;
            };
            with_wall(&app, |wall| {
                wall.dispatch(WallEvent::NoteEdited { id, edit }).map(drop)
            });
        }
    })?;

    listen(&wall_element, "click", {
        let app = Rc::clone(&app);
        move |event: Event| {
            let Some(target) = event_element(&event) else {
                return;
            };
            if target.closest(".deleteBtn").ok().flatten().is_none() {
                return;
            }
            event.stop_propagation();
            if let Some(id) = note_id_of(&target) {
                with_wall(&app, |wall| wall.dispatch(WallEvent::NoteDeleted { id }).map(drop));
            }
        }
    })?;

    listen(&wall_element, "mousedown", {
        let app = Rc::clone(&app);
        move |event: Event| {
            let Some(target) = event_element(&event) else {
                return;
            };
            if target.closest(".drag-handle").ok().flatten().is_none() {
                return;
            }
            let (Some(id), Some(mouse)) = (note_id_of(&target), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            let Some(button) = PointerButton::from_dom(mouse.button()) else {
                return;
            };
            let pointer = Point::new(mouse.client_x(), mouse.client_y());
            if let Ok(mut wall) = app.try_borrow_mut() {
                wall.begin_drag(id, button, pointer);
            }
        }
    })?;

    // Installed once for the page. While no drag is active, `DragState` is
    // idle and both handlers below do nothing.
    listen(&document, "mousemove", {
        let app = Rc::clone(&app);
        move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut wall) = app.try_borrow_mut() {
                wall.drag_move(Point::new(mouse.client_x(), mouse.client_y()));
            }
        }
    })?;

    listen(&document, "mouseup", {
        let app = Rc::clone(&app);
        move |_event: Event| with_wall(&app, |wall| wall.end_drag().map(drop))
    })?;

    Ok(())
}

/// Install a listener for the lifetime of the page.
fn listen<H>(target: &EventTarget, kind: &str, handler: H) -> std::result::Result<(), JsValue>
where
    H: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run a wall mutation, reporting failures to the console.
fn with_wall<F>(app: &Rc<RefCell<WebWall>>, f: F)
where
    F: FnOnce(&mut WebWall) -> Result<()>,
{
    let Ok(mut wall) = app.try_borrow_mut() else {
        return;
    };
    if let Err(e) = f(&mut wall) {
        tracing::error!(error = %e, "wall update failed");
        web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn matches_selector(element: &Element, selector: &str) -> bool {
    element.matches(selector).unwrap_or(false)
}

fn note_id_of(element: &Element) -> Option<NoteId> {
    element
        .closest(".note")
        .ok()
        .flatten()?
        .get_attribute(NOTE_ID_ATTR)?
        .parse()
        .ok()
}

fn dom_error(value: JsValue) -> StickyError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    StorageError::Backend(message).into()
}

fn to_js(error: StickyError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
