mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_click, handle_delete, handle_drag, handle_get, handle_init, handle_list,
    handle_render, handle_text, handle_title,
};
