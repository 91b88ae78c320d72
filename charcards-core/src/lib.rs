pub mod gallery;
pub mod output;
pub mod page;
pub mod render;

pub use charcards_fetch::{CharacterRecord, CharacterSource, FetchError, Fetcher};
pub use gallery::{GalleryError, GalleryProgressCallback, draw_random, load_grid, random_index};
pub use output::{OutputFormat, render_output, save_output};
pub use page::{PageOptions, render_page};
pub use render::{Card, Container, Element, clear, mount, render_all, render_card};

use colored::Colorize;

/// Prints to stderr. Stdout carries rendered output.
pub fn print_banner() {
    let banner = r#"
   ┌─────────┐ ┌─────────┐ ┌─────────┐
   │ ▓▓▓▓▓▓▓ │ │ ▓▓▓▓▓▓▓ │ │ ▓▓▓▓▓▓▓ │
   │ ▓▓▓▓▓▓▓ │ │ ▓▓▓▓▓▓▓ │ │ ▓▓▓▓▓▓▓ │
   ├─────────┤ ├─────────┤ ├─────────┤
   │ ─────── │ │ ─────── │ │ ─────── │
   └─────────┘ └─────────┘ └─────────┘"#;

    eprintln!("{}", banner.bright_cyan());
    eprintln!(
        "   {} {}\n",
        "charcards".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
