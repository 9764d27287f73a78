//! Intercepting host edits inside a list.
//!
//! The host asks [`NumberedLists::should_change_text`] before applying a
//! typed edit. Two edits are taken over when the caret sits after the
//! well-formed marker of its line:
//!
//! - Enter continues the list with the next number and renumbers the
//!   markers below it. Enter on an item with nothing after its marker ends
//!   the list instead.
//! - Backspace right after a marker deletes the whole marker.
//!
//! Every other edit is left to the host.

use rtv_core::line_ending::LINE_FEED;

use crate::{
  NumberedLists,
  selection::SelectionRange,
  surface::{
    EditScope,
    TextSurface,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
  /// A single line feed typed at a caret.
  Newline,
  /// One grapheme deleted with nothing inserted.
  Backspace,
  Other,
}

impl EditIntent {
  pub fn classify(range: SelectionRange, replacement: &str) -> Self {
    if replacement == LINE_FEED && range.is_empty() {
      EditIntent::Newline
    } else if replacement.is_empty() && range.length == 1 {
      EditIntent::Backspace
    } else {
      EditIntent::Other
    }
  }
}

impl NumberedLists {
  /// Host callback for a pending edit replacing `range` with `replacement`.
  /// Returns `false` when the edit was handled here and the host must not
  /// apply it.
  pub fn should_change_text<S: TextSurface + ?Sized>(
    &mut self,
    surface: &mut S,
    range: SelectionRange,
    replacement: &str,
  ) -> bool {
    let handled = match EditIntent::classify(range, replacement) {
      EditIntent::Newline => self.added_list_if_active(surface, range.location),
      EditIntent::Backspace => self.removed_list_if_active(surface, range),
      EditIntent::Other => false,
    };
    if handled {
      tracing::debug!(?range, replacement, "list edit intercepted");
    }
    !handled
  }

  /// Continues or ends the list on the caret's line. Returns whether the
  /// newline was handled.
  pub fn added_list_if_active<S: TextSurface + ?Sized>(&mut self, surface: &mut S, caret: usize) -> bool {
    let active = {
      let text = surface.text();
      let scan = self.scan(&text);
      scan
        .line_marker(caret)
        .filter(|marker| marker.range.end() <= caret)
        .map(|marker| {
          let line_is_empty = marker.range.end() == caret && scan.is_line_end(caret);
          (marker, line_is_empty)
        })
    };
    let Some((marker, line_is_empty)) = active else {
      return false;
    };

    if line_is_empty {
      tracing::debug!(?marker, "ending list on empty item");
      let mut surface = EditScope::new(surface);
      self.remove_range(&mut *surface, marker.range);
      return true;
    }

    let Some(number) = marker.number.checked_add(1) else {
      tracing::warn!(?marker, "list cannot be continued past the largest number");
      return false;
    };
    let mut surface = EditScope::new(surface);
    let mut continuation = String::from(LINE_FEED);
    continuation.push_str(&self.marker_text(number));
    let inserted = self.insert_text(&mut *surface, &continuation, caret);
    let renumbered = self.renumber_following_markers(&mut *surface, caret + inserted, number);
    tracing::debug!(number, renumbered, "continued list");
    true
  }

  /// Deletes the whole marker in front of the caret when `range` would
  /// delete its last grapheme. Returns whether the deletion was handled.
  pub fn removed_list_if_active<S: TextSurface + ?Sized>(
    &mut self,
    surface: &mut S,
    range: SelectionRange,
  ) -> bool {
    let selection = surface.selection();
    if !selection.is_empty() || selection.location <= 2 || range.end() != selection.location {
      return false;
    }

    let marker = {
      let text = surface.text();
      self
        .scan(&text)
        .line_marker(selection.location)
        .filter(|marker| marker.range.end() == selection.location)
    };
    let Some(marker) = marker else {
      return false;
    };

    tracing::debug!(?marker, "deleting whole marker");
    let mut surface = EditScope::new(surface);
    self.remove_range(&mut *surface, marker.range);
    true
  }
}
