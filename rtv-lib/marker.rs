//! Finding numbered-list markers in a text snapshot.
//!
//! Markers are never stored. Every query scans a fresh [`MarkerScan`] built
//! from the surface text, using the grapheme-safe search in
//! [`rtv_core::search`].
//!
//! Two notions of "marker" are used:
//!
//! - trailer anchored: the nearest trailer in a direction, extended back to
//!   its line start ([`MarkerScan::find_previous_marker_range`],
//!   [`MarkerScan::find_next_marker_range`]). These only answer the public
//!   queries; a trailer in running text (`"Mr.\u{a0}Smith"`) matches too.
//! - well formed: a line that starts with ASCII digits immediately followed
//!   by the trailer ([`MarkerScan::line_marker`]). Every edit the engine
//!   makes (toggling, Enter, Backspace, guarding, renumbering) is decided on
//!   this one.

use rtv_core::{
  grapheme::{
    GraphemeText,
    len_graphemes,
  },
  line_ending::{
    LINE_FEED,
    is_line_end,
    line_start,
    next_line_start,
  },
  search::{
    next_index_of,
    prev_index_of,
  },
};

use crate::selection::SelectionRange;

/// A well-formed marker at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
  /// From the line start through the end of the trailer.
  pub range:  SelectionRange,
  pub number: usize,
}

/// The text of the marker for `number`.
pub fn marker_text(number: usize, trailer: &str) -> String {
  format!("{number}{trailer}")
}

pub struct MarkerScan<'a> {
  text:        GraphemeText<'a>,
  trailer:     &'a str,
  trailer_len: usize,
}

impl<'a> MarkerScan<'a> {
  pub fn new(text: &'a str, trailer: &'a str) -> Self {
    Self {
      text: GraphemeText::new(text),
      trailer,
      trailer_len: len_graphemes(trailer),
    }
  }

  pub fn text(&self) -> &GraphemeText<'a> {
    &self.text
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn trailer_len(&self) -> usize {
    self.trailer_len
  }

  /// Text covered by `range`.
  pub fn slice(&self, range: SelectionRange) -> &'a str {
    self.text.slice(range.location..range.end())
  }

  pub fn prev_trailer(&self, from: usize) -> Option<usize> {
    prev_index_of(&self.text, self.trailer, from)
  }

  pub fn next_trailer(&self, from: usize) -> Option<usize> {
    next_index_of(&self.text, self.trailer, from)
  }

  pub fn prev_line_feed(&self, from: usize) -> Option<usize> {
    prev_index_of(&self.text, LINE_FEED, from)
  }

  pub fn next_line_feed(&self, from: usize) -> Option<usize> {
    next_index_of(&self.text, LINE_FEED, from)
  }

  pub fn line_start(&self, idx: usize) -> usize {
    line_start(&self.text, idx)
  }

  pub fn next_line_start(&self, idx: usize) -> Option<usize> {
    next_line_start(&self.text, idx)
  }

  pub fn is_line_end(&self, idx: usize) -> bool {
    is_line_end(&self.text, idx)
  }

  /// Range from the start of the trailer's line through the trailer.
  fn anchored(&self, trailer: usize) -> SelectionRange {
    let start = self.line_start(trailer);
    SelectionRange::between(start, trailer + self.trailer_len)
  }

  /// The nearest trailer ending before `from`, extended to its line start.
  pub fn find_previous_marker_range(&self, from: usize) -> Option<SelectionRange> {
    self.prev_trailer(from).map(|trailer| self.anchored(trailer))
  }

  /// The nearest trailer starting at or after `from`, extended back to its
  /// own line start (which may lie before `from`).
  pub fn find_next_marker_range(&self, from: usize) -> Option<SelectionRange> {
    self.next_trailer(from).map(|trailer| self.anchored(trailer))
  }

  pub fn contains_numbered_list(&self, selection: SelectionRange) -> bool {
    if selection.is_empty() {
      let Some(trailer) = self.prev_trailer(selection.location) else {
        return false;
      };
      return self.line_start(selection.location) <= trailer;
    }

    let trailer = self
      .prev_trailer(selection.location)
      .unwrap_or(selection.location);
    let line_feed = self.prev_line_feed(selection.location).unwrap_or(0);

    let window = if line_feed < trailer {
      // a one grapheme selection may land in the middle of the trailer
      let length = if selection.length < 2 && trailer + 2 < self.len() {
        2
      } else {
        selection.length
      };
      SelectionRange::new(trailer, length)
    } else {
      selection
    };
    self.window_contains_trailer(window)
  }

  fn window_contains_trailer(&self, window: SelectionRange) -> bool {
    self
      .next_trailer(window.location)
      .is_some_and(|trailer| trailer + self.trailer_len <= window.end())
  }

  /// The number in front of the nearest trailer on the line of
  /// `selection.location`, `0` when there is none or it does not parse.
  pub fn previous_number(&self, selection: SelectionRange) -> usize {
    let Some(trailer) = self.prev_trailer(selection.location) else {
      return 0;
    };
    let start = self.line_start(selection.location);
    if start > trailer {
      return 0;
    }
    self.text.slice(start..trailer).parse().unwrap_or(0)
  }

  /// The well-formed marker of the line containing `idx`.
  pub fn line_marker(&self, idx: usize) -> Option<Marker> {
    let start = self.line_start(idx);
    let digits = (start..self.len())
      .take_while(|&i| {
        self
          .text
          .get(i)
          .is_some_and(|g| g.len() == 1 && g.as_bytes()[0].is_ascii_digit())
      })
      .count();
    if digits == 0 {
      return None;
    }

    let trailer = start + digits;
    if self.text.slice(trailer..trailer + self.trailer_len) != self.trailer {
      return None;
    }
    let number = self
      .text
      .slice(start..trailer)
      .parse()
      .ok()
      .filter(|&number| number > 0)?;
    Some(Marker {
      range: SelectionRange::between(start, trailer + self.trailer_len),
      number,
    })
  }

  /// Number of the marker on the line before the one starting at
  /// `line_start`, `0` when that line is not part of a list.
  pub fn preceding_line_number(&self, line_start: usize) -> usize {
    match line_start.checked_sub(1) {
      Some(line_feed) => self.line_marker(line_feed).map_or(0, |marker| marker.number),
      None => 0,
    }
  }

  /// Number a new marker on the line starting at `line_start` gets. A list
  /// above that has run out of numbers is not continued.
  pub fn continuing_number(&self, line_start: usize) -> usize {
    self
      .preceding_line_number(line_start)
      .checked_add(1)
      .unwrap_or(1)
  }

  /// Starts of the lines `selection` covers: the line of its start, and the
  /// line after every line feed inside it.
  pub fn covered_lines(&self, selection: SelectionRange) -> Vec<usize> {
    let mut lines = vec![self.line_start(selection.location)];
    let mut from = selection.location;
    while let Some(line_feed) = self
      .next_line_feed(from)
      .filter(|&line_feed| line_feed < selection.end())
    {
      lines.push(line_feed + 1);
      from = line_feed + 1;
    }
    lines
  }
}
