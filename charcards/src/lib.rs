pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    RunSettings, handle_grid, handle_random, init_tracing, resolve_output_path, run_grid,
    run_random,
};

// Re-export the rendering surface from charcards-core
pub use charcards_core::{
    Card, Container, OutputFormat, PageOptions, clear, mount, render_all, render_card,
};
