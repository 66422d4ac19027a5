use clap::Parser;
use stickywall::cli::{
    handle_add, handle_click, handle_delete, handle_drag, handle_get, handle_init, handle_list,
    handle_render, handle_text, handle_title, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("STICKYWALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { width, height } => handle_init(width, height),
        Commands::Add { json } => handle_add(json),
        Commands::List { json } => handle_list(json),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Title { id, title } => handle_title(id, title),
        Commands::Text { id, text, stdin } => handle_text(id, text, stdin),
        Commands::Drag { id, x, y, button } => handle_drag(id, x, y, button),
        Commands::Click { at, button } => handle_click(at, button),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Render => handle_render(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
