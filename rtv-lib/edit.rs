//! Edit primitives the engine mutates the host through.
//!
//! Each primitive runs inside its own [`EditScope`] (nested inside the
//! caller's, when there is one), sets the selection the edit implies, and
//! finishes by re-running the selection guard.

use crate::{
  NumberedLists,
  selection::SelectionRange,
  surface::{
    EditScope,
    TextSurface,
  },
};

impl NumberedLists {
  /// Replaces `range` with `text`, styled like the text at `range.location`.
  pub(crate) fn replace_range<S: TextSurface + ?Sized>(
    &mut self,
    surface: &mut S,
    range: SelectionRange,
    text: &str,
  ) {
    let selection = surface.selection();
    let before = surface.len_graphemes();
    let attributes = surface
      .attributes_at(range.location)
      .unwrap_or_else(|| surface.typing_attributes());
    {
      let mut scope = EditScope::new(&mut *surface);
      scope.replace_characters(range, text, attributes);
    }
    let after = surface.len_graphemes();

    // Only a replacement in front of the selection moves it. Whatever the
    // host did to the selection while editing is discarded.
    let selection = if range.end() <= selection.location {
      SelectionRange::new(
        (selection.location + after).saturating_sub(before),
        selection.length,
      )
    } else {
      selection.clamp(after)
    };
    tracing::trace!(?range, text, ?selection, "replaced range");
    surface.set_selection(selection);
    self.selection_did_change(surface);
  }

  pub(crate) fn remove_range<S: TextSurface + ?Sized>(&mut self, surface: &mut S, range: SelectionRange) {
    let selection = surface.selection();
    let attributes = surface.typing_attributes();
    {
      let mut scope = EditScope::new(&mut *surface);
      scope.replace_characters(range, "", attributes);
    }

    let selection = selection.after_removal(range);
    tracing::trace!(?range, ?selection, "removed range");
    surface.set_selection(selection);
    self.selection_did_change(surface);
  }

  /// Inserts `text` at `at`, styled like the grapheme already there or with
  /// the typing attributes at the end of the text. Returns the number of
  /// graphemes the text grew by.
  pub(crate) fn insert_text<S: TextSurface + ?Sized>(
    &mut self,
    surface: &mut S,
    text: &str,
    at: usize,
  ) -> usize {
    let selection = surface.selection();
    let before = surface.len_graphemes();
    let attributes = surface
      .attributes_at(at)
      .unwrap_or_else(|| surface.typing_attributes());
    {
      let mut scope = EditScope::new(&mut *surface);
      scope.replace_characters(SelectionRange::point(at), text, attributes);
    }
    let inserted = surface.len_graphemes().saturating_sub(before);

    let selection = selection.after_insertion(at, inserted);
    tracing::trace!(at, text, ?selection, "inserted text");
    surface.set_selection(selection);
    self.selection_did_change(surface);
    inserted
  }
}

#[cfg(test)]
mod test {
  use std::borrow::Cow;

  use rtv_core::grapheme::GraphemeText;

  use super::*;
  use crate::buffer::StyledBuffer;

  #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
  enum Style {
    #[default]
    Plain,
    Bold,
  }

  fn host(text: &str, selection: SelectionRange) -> StyledBuffer<()> {
    StyledBuffer::new(text).with_selection(selection).unwrap()
  }

  /// Keeps whatever selection it is given and records it with the text
  /// length at that moment.
  #[derive(Default)]
  struct Unclamped {
    text:      String,
    selection: SelectionRange,
    given:     Vec<(SelectionRange, usize)>,
  }

  impl TextSurface for Unclamped {
    type Attributes = ();

    fn text(&self) -> Cow<'_, str> {
      Cow::Borrowed(&self.text)
    }

    fn attributes_at(&self, index: usize) -> Option<()> {
      (index < self.len_graphemes()).then_some(())
    }

    fn typing_attributes(&self) {}

    fn begin_edit(&mut self) {}

    fn end_edit(&mut self) {}

    fn replace_characters(&mut self, range: SelectionRange, text: &str, _: ()) {
      let graphemes = GraphemeText::new(&self.text);
      let replaced = format!(
        "{}{text}{}",
        graphemes.slice(0..range.location),
        graphemes.slice(range.end()..graphemes.len()),
      );
      self.text = replaced;
    }

    fn selection(&self) -> SelectionRange {
      self.selection
    }

    fn set_selection(&mut self, selection: SelectionRange) {
      self.given.push((selection, self.len_graphemes()));
      self.selection = selection;
    }
  }

  #[test]
  fn test_replace_range_shifts_following_selection() {
    let mut lists = NumberedLists::new();
    let mut buffer = host("9. a b", SelectionRange::new(4, 2));
    lists.replace_range(&mut buffer, SelectionRange::new(0, 1), "10");
    assert_eq!(buffer.text(), "10. a b");
    assert_eq!(buffer.selection(), SelectionRange::new(5, 2));
    assert_eq!(lists.previous_selection(), SelectionRange::new(5, 2));

    lists.replace_range(&mut buffer, SelectionRange::new(0, 2), "");
    assert_eq!(buffer.selection(), SelectionRange::new(3, 2));

    // overlapping the selection leaves it alone
    lists.replace_range(&mut buffer, SelectionRange::new(3, 1), "xyz");
    assert_eq!(buffer.text(), ". axyzb");
    assert_eq!(buffer.selection(), SelectionRange::new(3, 2));
    assert_eq!(buffer.committed_edits(), 3);
  }

  #[test]
  fn test_replace_range_clamps_overlapped_selection() {
    let mut lists = NumberedLists::new();
    let mut surface = Unclamped {
      text: "abcdef".into(),
      selection: SelectionRange::new(2, 4),
      ..Default::default()
    };
    lists.replace_range(&mut surface, SelectionRange::new(1, 4), "x");
    assert_eq!(surface.text, "axf");
    assert_eq!(surface.selection, SelectionRange::new(2, 1));
    assert!(
      surface
        .given
        .iter()
        .all(|&(selection, len)| selection.end() <= len)
    );
    assert_eq!(lists.previous_selection(), SelectionRange::new(2, 1));
  }

  #[test]
  fn test_replace_range_inherits_replaced_style() {
    let mut lists = NumberedLists::new();
    let mut buffer =
      StyledBuffer::with_attributes("ab", vec![Style::Plain, Style::Bold], Style::Plain).unwrap();
    lists.replace_range(&mut buffer, SelectionRange::new(1, 1), "cd");
    assert_eq!(buffer.attributes(), &[Style::Plain, Style::Bold, Style::Bold]);
  }

  #[test]
  fn test_remove_range_cases() {
    let mut lists = NumberedLists::new();
    let mut buffer = host("abcdefghij", SelectionRange::new(4, 4));

    // entirely before
    lists.remove_range(&mut buffer, SelectionRange::new(0, 2));
    assert_eq!(buffer.selection(), SelectionRange::new(2, 4));
    // straddles the start
    lists.remove_range(&mut buffer, SelectionRange::new(1, 2));
    assert_eq!(buffer.selection(), SelectionRange::new(1, 3));
    // inside
    lists.remove_range(&mut buffer, SelectionRange::new(2, 1));
    assert_eq!(buffer.selection(), SelectionRange::new(1, 2));
    // straddles the end
    lists.remove_range(&mut buffer, SelectionRange::new(2, 3));
    assert_eq!(buffer.selection(), SelectionRange::new(1, 1));
    assert_eq!(buffer.text(), "cf");
  }

  #[test]
  fn test_insert_text() {
    let mut lists = NumberedLists::new();
    let mut buffer = host("abcd", SelectionRange::new(1, 2));

    assert_eq!(lists.insert_text(&mut buffer, "xy", 2), 2);
    assert_eq!(buffer.selection(), SelectionRange::new(1, 4));
    assert_eq!(lists.insert_text(&mut buffer, "🙂", 0), 1);
    assert_eq!(buffer.selection(), SelectionRange::new(2, 4));
    assert_eq!(lists.insert_text(&mut buffer, "z", 6), 1);
    assert_eq!(buffer.selection(), SelectionRange::new(2, 4));
    assert_eq!(buffer.text(), "🙂abxyczd");
    assert_eq!(buffer.committed_edits(), 3);
  }

  #[test]
  fn test_insert_text_styles() {
    let mut lists = NumberedLists::new();
    let mut buffer = StyledBuffer::with_attributes("a", vec![Style::Bold], Style::Plain).unwrap();
    lists.insert_text(&mut buffer, "x", 0);
    lists.insert_text(&mut buffer, "y", 2);
    assert_eq!(buffer.attributes(), &[Style::Bold, Style::Bold, Style::Plain]);
  }

  #[test]
  fn test_primitives_run_the_guard() {
    let mut lists = NumberedLists::new();
    // completing a marker around the caret pushes it out
    let mut buffer = host("12a", SelectionRange::point(1));
    lists.insert_text(&mut buffer, ".\u{a0}", 2);
    assert_eq!(buffer.text(), "12.\u{a0}a");
    assert_eq!(buffer.selection(), SelectionRange::point(4));

    let mut buffer = host("x\n12a", SelectionRange::point(3));
    lists.set_previous_selection(SelectionRange::point(5));
    lists.insert_text(&mut buffer, ".\u{a0}", 4);
    assert_eq!(buffer.selection(), SelectionRange::point(1));
    assert_eq!(lists.previous_selection(), SelectionRange::point(1));
  }
}
