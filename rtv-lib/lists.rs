//! Toggling numbered lists over a selection.
//!
//! A caret toggles the marker of its own line. A range either strips the
//! marker of every line it covers or, when none of them has one, numbers
//! them all:
//!
//! ```text
//! a          1. a
//! b    =>    2. b
//! c          3. c
//! ```
//!
//! Removal always wins, so a toggled selection is never left partially
//! numbered. Only well-formed markers at a line start count; a trailer in
//! running text is ordinary text. Numbering continues from the marker on the
//! line right above the first affected line, and the marked block that
//! follows is renumbered so the whole block stays sequential.

use crate::{
  Tendril,
  config::{
    self,
    ListConfig,
  },
  marker::{
    self,
    MarkerScan,
  },
  selection::SelectionRange,
  surface::{
    EditScope,
    TextSurface,
  },
};

#[derive(Debug, Clone)]
pub struct NumberedLists {
  after_number:       Tendril,
  space_after_number: Tendril,
  trailer:            Tendril,
  /// Selection seen by the last `selection_did_change`, used to tell which
  /// way an edge was moving.
  previous_selection: SelectionRange,
}

impl Default for NumberedLists {
  fn default() -> Self {
    Self::new()
  }
}

impl NumberedLists {
  pub fn new() -> Self {
    Self::from_parts(config::DEFAULT_AFTER_NUMBER, config::DEFAULT_SPACE_AFTER_NUMBER)
  }

  pub fn with_config(config: &ListConfig) -> config::Result<Self> {
    config.validate()?;
    Ok(Self::from_parts(
      &config.after_number,
      &config.space_after_number,
    ))
  }

  fn from_parts(after_number: &str, space_after_number: &str) -> Self {
    let mut trailer = Tendril::from(after_number);
    trailer.push_str(space_after_number);
    Self {
      after_number: after_number.into(),
      space_after_number: space_after_number.into(),
      trailer,
      previous_selection: SelectionRange::default(),
    }
  }

  pub fn after_number(&self) -> &str {
    &self.after_number
  }

  pub fn space_after_number(&self) -> &str {
    &self.space_after_number
  }

  /// Everything that follows the number in a marker.
  pub fn trailer(&self) -> &str {
    &self.trailer
  }

  pub fn previous_selection(&self) -> SelectionRange {
    self.previous_selection
  }

  pub(crate) fn set_previous_selection(&mut self, selection: SelectionRange) {
    self.previous_selection = selection;
  }

  pub fn marker_text(&self, number: usize) -> String {
    marker::marker_text(number, &self.trailer)
  }

  pub(crate) fn scan<'a>(&'a self, text: &'a str) -> MarkerScan<'a> {
    MarkerScan::new(text, &self.trailer)
  }

  pub fn selection_contains_numbered_list<S: TextSurface + ?Sized>(
    &self,
    surface: &S,
    selection: SelectionRange,
  ) -> bool {
    let text = surface.text();
    self.scan(&text).contains_numbered_list(selection)
  }

  pub fn previous_number_of_numbered_list<S: TextSurface + ?Sized>(
    &self,
    surface: &S,
    selection: SelectionRange,
  ) -> usize {
    let text = surface.text();
    self.scan(&text).previous_number(selection)
  }

  pub fn find_previous_marker_range<S: TextSurface + ?Sized>(
    &self,
    surface: &S,
    from: usize,
  ) -> Option<SelectionRange> {
    let text = surface.text();
    self.scan(&text).find_previous_marker_range(from)
  }

  pub fn find_next_marker_range<S: TextSurface + ?Sized>(
    &self,
    surface: &S,
    from: usize,
  ) -> Option<SelectionRange> {
    let text = surface.text();
    self.scan(&text).find_next_marker_range(from)
  }

  /// Adds or removes numbering for the host selection. The whole toggle is
  /// one edit transaction.
  pub fn toggle_numbered_list<S: TextSurface + ?Sized>(&mut self, surface: &mut S) {
    let mut surface = EditScope::new(surface);
    let selection = surface.selection();
    if selection.is_empty() {
      self.toggle_line(&mut *surface, selection.location);
    } else {
      self.toggle_range(&mut *surface, selection);
    }
  }

  fn toggle_line<S: TextSurface + ?Sized>(&mut self, surface: &mut S, caret: usize) {
    let (marker, line_start, number) = {
      let text = surface.text();
      let scan = self.scan(&text);
      let line_start = scan.line_start(caret);
      (
        scan.line_marker(line_start),
        line_start,
        scan.continuing_number(line_start),
      )
    };

    if let Some(marker) = marker {
      tracing::debug!(?marker, "removing marker at caret");
      self.remove_range(surface, marker.range);
      return;
    }

    tracing::debug!(line_start, number, "numbering caret line");
    let marker = self.marker_text(number);
    self.insert_text(surface, &marker, line_start);
    self.renumber_following_markers(surface, line_start, number);
  }

  fn toggle_range<S: TextSurface + ?Sized>(&mut self, surface: &mut S, selection: SelectionRange) {
    let (lines, markers, first_number) = {
      let text = surface.text();
      let scan = self.scan(&text);
      let lines = scan.covered_lines(selection);
      let markers: Vec<_> = lines
        .iter()
        .filter_map(|&line| scan.line_marker(line))
        .collect();
      let first_number = scan.continuing_number(scan.line_start(selection.location));
      (lines, markers, first_number)
    };

    if !markers.is_empty() {
      tracing::debug!(removed = markers.len(), "removing markers from selection");
      // back to front so earlier ranges stay valid
      for marker in markers.iter().rev() {
        self.remove_range(surface, marker.range);
      }
      return;
    }

    tracing::debug!(lines = lines.len(), first_number, "numbering selected lines");
    let mut offset = 0;
    let mut number = first_number;
    let mut last = None;
    for line in lines {
      let marker = self.marker_text(number);
      let start = line + offset;
      offset += self.insert_text(surface, &marker, start);
      last = Some((start, number));
      number = number.checked_add(1).unwrap_or(1);
    }
    if let Some((line, number)) = last {
      self.renumber_following_markers(surface, line, number);
    }
  }

  /// Renumbers the block of marked lines right below the line of `after` so
  /// that it continues from `number`. Stops at the first unmarked line, at
  /// the first marker that already has its expected number, or when the
  /// numbers run out. Returns how many markers were rewritten.
  pub(crate) fn renumber_following_markers<S: TextSurface + ?Sized>(
    &mut self,
    surface: &mut S,
    after: usize,
    number: usize,
  ) -> usize {
    let markers = {
      let text = surface.text();
      let scan = self.scan(&text);
      let mut markers = Vec::new();
      let mut line = scan.next_line_start(after);
      let mut next = number.checked_add(1);
      while let (Some(start), Some(expected)) = (line, next) {
        match scan.line_marker(start) {
          Some(marker) if marker.number != expected => {
            markers.push((marker.range, expected));
            next = expected.checked_add(1);
            line = scan.next_line_start(start);
          },
          _ => break,
        }
      }
      markers
    };

    // back to front so earlier ranges stay valid
    for &(range, number) in markers.iter().rev() {
      let text = self.marker_text(number);
      self.replace_range(surface, range, &text);
    }
    if !markers.is_empty() {
      tracing::trace!(renumbered = markers.len(), "renumbered following markers");
    }
    markers.len()
  }
}
