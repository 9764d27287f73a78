//! Keeping the selection out of list markers.
//!
//! After every selection change each edge of the selection is classified
//! against the well-formed marker of its line:
//!
//! ```text
//! "\n12.\u{a0}text"
//!    ^ LineStart
//!     ^^ Number (up to the trailer)
//!        ^ Space (inside the trailer)
//! ```
//!
//! Positions outside a marker, and the position right after its trailer,
//! are never touched. Everything else is resolved by [`resolve_edge`]:
//!
//! | edge        | token       | direction | result                        |
//! |-------------|-------------|-----------|-------------------------------|
//! | start / end | `LineStart` | any       | unchanged                     |
//! | caret       | any         | backward  | end of previous line, or 0    |
//! | start / end | other       | backward  | line start (before marker)    |
//! | any         | any         | forward   | after the trailer             |
//!
//! The direction of an edge comes from comparing it with the same edge of
//! the previous selection. An edge that did not move counts as forward.

use crate::{
  NumberedLists,
  marker::{
    Marker,
    MarkerScan,
  },
  selection::SelectionRange,
  surface::TextSurface,
};

/// Part of a marker an edge rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerToken {
  /// Before the first digit.
  LineStart,
  /// After a digit, up to the start of the trailer.
  Number,
  /// Inside the trailer.
  Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Forward,
  Backward,
}

impl Direction {
  fn of(current: usize, previous: usize) -> Self {
    if current < previous {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  Caret,
  Start,
  End,
}

/// The marker and token at `idx`, `None` when `idx` is outside every marker
/// or right after one.
pub fn classify(scan: &MarkerScan, idx: usize) -> Option<(Marker, MarkerToken)> {
  let marker = scan.line_marker(idx)?;
  let trailer = marker.range.end() - scan.trailer_len();
  let token = if idx == marker.range.location {
    MarkerToken::LineStart
  } else if idx <= trailer {
    MarkerToken::Number
  } else if idx < marker.range.end() {
    MarkerToken::Space
  } else {
    return None;
  };
  Some((marker, token))
}

pub fn resolve_edge(edge: Edge, token: MarkerToken, direction: Direction, marker: Marker) -> Option<usize> {
  let range = marker.range;
  match (edge, token, direction) {
    (Edge::Start | Edge::End, MarkerToken::LineStart, _) => None,
    (Edge::Caret, _, Direction::Backward) => Some(range.location.saturating_sub(1)),
    (Edge::Start | Edge::End, _, Direction::Backward) => Some(range.location),
    (_, _, Direction::Forward) => Some(range.end()),
  }
}

fn guard_edge(scan: &MarkerScan, edge: Edge, idx: usize, direction: Direction) -> usize {
  classify(scan, idx)
    .and_then(|(marker, token)| resolve_edge(edge, token, direction, marker))
    .unwrap_or(idx)
}

/// `current` with both edges moved out of any marker they rest in.
pub fn guard_selection(
  scan: &MarkerScan,
  current: SelectionRange,
  previous: SelectionRange,
) -> SelectionRange {
  let current = current.clamp(scan.len());
  let start_direction = Direction::of(current.location, previous.location);
  if current.is_empty() {
    let caret = guard_edge(scan, Edge::Caret, current.location, start_direction);
    return SelectionRange::point(caret);
  }

  let start = guard_edge(scan, Edge::Start, current.location, start_direction);
  let end = guard_edge(
    scan,
    Edge::End,
    current.end(),
    Direction::of(current.end(), previous.end()),
  );
  if start < end {
    SelectionRange::between(start, end)
  } else {
    // both edges collapsed onto one marker
    SelectionRange::point(guard_edge(scan, Edge::Caret, start, start_direction))
  }
}

impl NumberedLists {
  /// Moves the host selection out of any marker it rests in and returns the
  /// resulting selection.
  pub fn move_selection_if_in_range_of_list<S: TextSurface + ?Sized>(
    &self,
    surface: &mut S,
  ) -> SelectionRange {
    let current = surface.selection();
    let guarded = {
      let text = surface.text();
      guard_selection(&self.scan(&text), current, self.previous_selection())
    };
    if guarded != current {
      tracing::trace!(?current, ?guarded, "moved selection out of marker");
      surface.set_selection(guarded);
    }
    guarded
  }

  /// Host callback for selection changes.
  pub fn selection_did_change<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
    let selection = self.move_selection_if_in_range_of_list(surface);
    self.set_previous_selection(selection);
  }
}
