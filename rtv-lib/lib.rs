//! Numbered-list maintenance for styled text surfaces.
//!
//! [`NumberedLists`] keeps lines of the form `"<n>.\u{a0}text"` sequentially
//! numbered while the host surface is edited, and keeps the caret out of the
//! markers. The host implements [`surface::TextSurface`] and forwards its
//! "text will change" and "selection changed" callbacks to
//! [`NumberedLists::should_change_text`] and
//! [`NumberedLists::selection_did_change`].
//!
//! ```
//! use rtv_lib::{NumberedLists, buffer::StyledBuffer, selection::SelectionRange, surface::TextSurface};
//!
//! let mut buffer = StyledBuffer::<()>::new("a\nb\nc");
//! buffer.set_selection(SelectionRange::new(0, 5));
//!
//! let mut lists = NumberedLists::new();
//! lists.toggle_numbered_list(&mut buffer);
//! assert_eq!(buffer.text(), "1.\u{a0}a\n2.\u{a0}b\n3.\u{a0}c");
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod buffer;
pub mod config;
mod edit;
pub mod guard;
pub mod hooks;
pub mod lists;
pub mod marker;
pub mod selection;
pub mod surface;

pub use lists::NumberedLists;

pub type Tendril = SmartString<LazyCompact>;
