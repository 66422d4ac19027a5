use clap::{Parser, Subcommand};

use crate::entity::NoteId;
use crate::geometry::Point;
use crate::wall::PointerButton;

#[derive(Parser, Debug)]
#[command(name = "stickywall")]
#[command(version, about = "A wall of draggable sticky notes")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new wall in the current directory
    Init {
        /// Wall width in pixels
        #[arg(long, default_value_t = 1000)]
        width: i32,

        /// Wall height in pixels
        #[arg(long, default_value_t = 800)]
        height: i32,
    },

    /// Add a note at a random position
    Add {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes in wall order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID
        id: NoteId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a note's title (surrounding whitespace is trimmed)
    Title {
        /// Note ID
        id: NoteId,

        /// New title
        title: String,
    },

    /// Set a note's body; inline markup is kept as-is
    Text {
        /// Note ID
        id: NoteId,

        /// New body content
        #[arg(required_unless_present = "stdin")]
        text: Option<String>,

        /// Read content from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Drag a note by its handle so its top-left lands at X,Y (clamped to the wall)
    Drag {
        /// Note ID
        id: NoteId,

        /// Target top-left x
        #[arg(allow_negative_numbers = true)]
        x: i32,

        /// Target top-left y
        #[arg(allow_negative_numbers = true)]
        y: i32,

        /// Pointer button (primary, middle, secondary)
        #[arg(long, default_value = "primary")]
        button: PointerButton,
    },

    /// Press and release the pointer at a wall position
    Click {
        /// Position as "x,y"
        #[arg(allow_hyphen_values = true)]
        at: Point,

        /// Pointer button (primary, middle, secondary)
        #[arg(long, default_value = "primary")]
        button: PointerButton,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: NoteId,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Draw the wall as text
    Render,
}
