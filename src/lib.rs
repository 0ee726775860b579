// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod orp;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;

pub use engine::{Command, PlaybackState, Reader, ReaderView, WordDisplay};
pub use orp::{orp_index, render_word_with_orp, split_words, OrpParts};
