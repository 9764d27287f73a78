//! The host text surface the list engine edits.
//!
//! A [`TextSurface`] is whatever widget or model owns the styled text and the
//! selection. The engine only ever borrows it for the duration of one
//! operation. All indices are grapheme indices (see
//! [`rtv_core::grapheme`]).
//!
//! Raw mutations go through an [`EditScope`], which opens an edit
//! transaction on creation and closes it on drop, so the host observes every
//! logical edit as one coalesced change.

use std::{
  borrow::Cow,
  ops::{
    Deref,
    DerefMut,
  },
};

use rtv_core::grapheme::len_graphemes;

use crate::selection::SelectionRange;

pub trait TextSurface {
  /// Style metadata attached to every grapheme.
  type Attributes: Clone;

  fn text(&self) -> Cow<'_, str>;

  /// Number of graphemes in the text.
  fn len_graphemes(&self) -> usize {
    len_graphemes(&self.text())
  }

  /// Attributes in effect at `index`, `None` past the end of the text.
  fn attributes_at(&self, index: usize) -> Option<Self::Attributes>;

  /// Attributes applied to text typed at an empty caret.
  fn typing_attributes(&self) -> Self::Attributes;

  fn begin_edit(&mut self);

  fn end_edit(&mut self);

  /// Replaces `range` with `text` styled with `attributes`.
  fn replace_characters(&mut self, range: SelectionRange, text: &str, attributes: Self::Attributes);

  fn selection(&self) -> SelectionRange;

  fn set_selection(&mut self, selection: SelectionRange);
}

/// An open edit transaction on a surface. Ends the transaction when dropped.
pub struct EditScope<'a, S: TextSurface + ?Sized> {
  surface: &'a mut S,
}

impl<'a, S: TextSurface + ?Sized> EditScope<'a, S> {
  pub fn new(surface: &'a mut S) -> Self {
    surface.begin_edit();
    Self { surface }
  }
}

impl<S: TextSurface + ?Sized> Deref for EditScope<'_, S> {
  type Target = S;

  fn deref(&self) -> &Self::Target {
    self.surface
  }
}

impl<S: TextSurface + ?Sized> DerefMut for EditScope<'_, S> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.surface
  }
}

impl<S: TextSurface + ?Sized> Drop for EditScope<'_, S> {
  fn drop(&mut self) {
    self.surface.end_edit();
  }
}
