//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and dialogs
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `panels`: Location table and resident gallery
//! - `portrait`: Half-block rendering of cached portraits

pub mod input;
pub mod panels;
pub mod portrait;
pub mod render;
pub mod styles;
