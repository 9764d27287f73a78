//! Half-open selection ranges in grapheme units.
//!
//! A [`SelectionRange`] covers `[location, location + length)`. A zero
//! length range is a caret.
//!
//! The edit primitives keep the host selection following the text through
//! [`SelectionRange::after_removal`] and [`SelectionRange::after_insertion`].
//! Removal is classified with [`Overlap`], whose cases are mutually
//! exclusive:
//!
//! ```text
//! selection:          [-----)
//! Before:      [--)
//! Inside:              [--)
//! StraddlesStart:  [----)
//! StraddlesEnd:            [----)
//! After:                      [--)
//! ```

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
  pub location: usize,
  pub length:   usize,
}

/// Where a range sits relative to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
  /// Ends at or before the selection start.
  Before,
  /// Lies within the selection.
  Inside,
  /// Starts before the selection and ends inside or past it.
  StraddlesStart,
  /// Starts inside the selection and ends past it.
  StraddlesEnd,
  /// Starts at or after the selection end.
  After,
}

impl SelectionRange {
  #[must_use]
  pub const fn new(location: usize, length: usize) -> Self {
    Self { location, length }
  }

  #[must_use]
  pub const fn point(location: usize) -> Self {
    Self::new(location, 0)
  }

  /// Range from `start` to `end`; an `end` before `start` gives a caret.
  #[must_use]
  pub const fn between(start: usize, end: usize) -> Self {
    Self::new(start, end.saturating_sub(start))
  }

  #[must_use]
  pub const fn end(&self) -> usize {
    self.location + self.length
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.length == 0
  }

  /// Shrinks the range so that it fits into a buffer of `len` graphemes.
  #[must_use]
  pub fn clamp(self, len: usize) -> Self {
    Self::between(self.location.min(len), self.end().min(len))
  }

  pub fn overlap(&self, range: SelectionRange) -> Overlap {
    if range.end() <= self.location {
      Overlap::Before
    } else if range.location >= self.end() {
      Overlap::After
    } else if range.location >= self.location && range.end() <= self.end() {
      Overlap::Inside
    } else if range.location < self.location {
      Overlap::StraddlesStart
    } else {
      Overlap::StraddlesEnd
    }
  }

  /// The selection after `removed` has been deleted from the text.
  #[must_use]
  pub fn after_removal(self, removed: SelectionRange) -> Self {
    let mut selection = self;
    match self.overlap(removed) {
      Overlap::Before => selection.location -= removed.length,
      Overlap::Inside => selection.length -= removed.length,
      Overlap::StraddlesStart => {
        let inside = removed.end().min(self.end()) - self.location;
        let outside = self.location - removed.location;
        selection.location -= outside;
        selection.length -= inside;
      },
      Overlap::StraddlesEnd => selection.length -= self.end() - removed.location,
      Overlap::After => {},
    }
    selection
  }

  /// The selection after `inserted` graphemes were inserted at `at`.
  #[must_use]
  pub fn after_insertion(self, at: usize, inserted: usize) -> Self {
    let mut selection = self;
    if !self.is_empty() && self.location <= at && at < self.end() {
      selection.length += inserted;
    } else if at <= self.location {
      selection.location += inserted;
    }
    selection
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_overlap_cases() {
    let selection = SelectionRange::new(5, 5);
    assert_eq!(selection.overlap(SelectionRange::new(1, 4)), Overlap::Before);
    assert_eq!(selection.overlap(SelectionRange::new(5, 2)), Overlap::Inside);
    assert_eq!(selection.overlap(SelectionRange::new(5, 5)), Overlap::Inside);
    assert_eq!(
      selection.overlap(SelectionRange::new(3, 4)),
      Overlap::StraddlesStart
    );
    assert_eq!(
      selection.overlap(SelectionRange::new(3, 20)),
      Overlap::StraddlesStart
    );
    assert_eq!(
      selection.overlap(SelectionRange::new(8, 4)),
      Overlap::StraddlesEnd
    );
    assert_eq!(selection.overlap(SelectionRange::new(10, 1)), Overlap::After);
  }

  #[test]
  fn test_overlap_with_caret() {
    let caret = SelectionRange::point(3);
    assert_eq!(caret.overlap(SelectionRange::new(0, 3)), Overlap::Before);
    assert_eq!(caret.overlap(SelectionRange::new(3, 2)), Overlap::After);
    assert_eq!(
      caret.overlap(SelectionRange::new(2, 3)),
      Overlap::StraddlesStart
    );
  }

  #[test]
  fn test_after_removal() {
    let selection = SelectionRange::new(5, 5);
    assert_eq!(
      selection.after_removal(SelectionRange::new(1, 3)),
      SelectionRange::new(2, 5)
    );
    assert_eq!(
      selection.after_removal(SelectionRange::new(6, 2)),
      SelectionRange::new(5, 3)
    );
    // two removed before the selection, two inside it
    assert_eq!(
      selection.after_removal(SelectionRange::new(3, 4)),
      SelectionRange::new(3, 3)
    );
    assert_eq!(
      selection.after_removal(SelectionRange::new(8, 4)),
      SelectionRange::new(5, 3)
    );
    assert_eq!(selection.after_removal(SelectionRange::new(12, 4)), selection);
    assert_eq!(
      SelectionRange::point(3).after_removal(SelectionRange::new(2, 3)),
      SelectionRange::point(2)
    );
    assert_eq!(
      selection.after_removal(SelectionRange::new(0, 20)),
      SelectionRange::point(0)
    );
  }

  #[test]
  fn test_after_insertion() {
    let selection = SelectionRange::new(5, 5);
    assert_eq!(selection.after_insertion(5, 3), SelectionRange::new(5, 8));
    assert_eq!(selection.after_insertion(9, 3), SelectionRange::new(5, 8));
    assert_eq!(selection.after_insertion(2, 3), SelectionRange::new(8, 5));
    assert_eq!(selection.after_insertion(10, 3), selection);

    let caret = SelectionRange::point(4);
    assert_eq!(caret.after_insertion(4, 3), SelectionRange::point(7));
    assert_eq!(caret.after_insertion(0, 3), SelectionRange::point(7));
    assert_eq!(caret.after_insertion(5, 3), caret);
  }

  #[test]
  fn test_clamp_and_between() {
    assert_eq!(SelectionRange::new(2, 10).clamp(5), SelectionRange::new(2, 3));
    assert_eq!(SelectionRange::new(8, 1).clamp(5), SelectionRange::point(5));
    assert_eq!(SelectionRange::between(4, 2), SelectionRange::point(4));
    assert_eq!(SelectionRange::new(2, 3).end(), 5);
  }
}
