// src/entity/note.rs
use serde::{Deserialize, Serialize};

use super::NoteId;

/// One sticky note as persisted.
///
/// Field order matches the stored layout: `{id, title, text, x, y, color}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    /// Body content, possibly carrying inline markup from rich editing.
    #[serde(default)]
    pub text: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub color: String,
}

impl Note {
    pub fn new(id: NoteId, title: String, x: i32, y: i32, color: String) -> Self {
        Self {
            id,
            title,
            text: String::new(),
            x,
            y,
            color,
        }
    }

    /// Title to show on screen: the stored title, or `placeholder` when empty.
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.title.is_empty() {
            placeholder
        } else {
            &self.title
        }
    }

    /// Body with markup removed.
    ///
    /// Block tags (`div`, `p`, `br`) become line breaks; every other tag is
    /// dropped. Common character entities are decoded.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut chars = self.text.chars();

        while let Some(c) = chars.next() {
            if c != '<' {
                out.push(c);
                continue;
            }

            let mut tag = String::new();
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
                tag.push(t);
            }

            let name: String = tag
                .trim_start_matches('/')
                .chars()
                .take_while(|ch| ch.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();
            let closing = tag.starts_with('/');

            match name.as_str() {
                "br" => out.push('\n'),
                "div" | "p" if !closing && !out.is_empty() && !out.ends_with('\n') => {
                    out.push('\n')
                }
                _ => {}
            }
        }

        decode_entities(&out).trim_end().to_string()
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
