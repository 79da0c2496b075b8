//! Terminal menu frontend for the character sheet tool.
//!
//! The menu is a numbered prompt loop over any `BufRead`/`Write` pair, so it
//! runs against the real terminal in the binary and against in-memory
//! buffers in tests. It owns no state beyond the borrowed
//! [`sheet_runtime::CharacterService`].

pub mod logging;
mod menu;
pub mod presentation;

pub use menu::{Menu, Prompt};
