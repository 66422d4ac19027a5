pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod storage;
pub mod view;
pub mod wall;

pub use config::WallConfig;
pub use entity::{Note, NoteId};
pub use error::{Result, StickyError, StorageError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, NoteStorage};
pub use wall::{Wall, WallEvent};
