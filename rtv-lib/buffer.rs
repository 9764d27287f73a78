//! A rope-backed styled text buffer implementing [`TextSurface`].
//!
//! [`StyledBuffer`] is the in-process host used by tests and by embedders
//! without a widget of their own. It keeps one attribute value per grapheme,
//! a selection, typing attributes, and counts committed edit transactions so
//! callers can check that a logical operation was observed as one change.
//!
//! ```
//! use rtv_lib::{buffer::StyledBuffer, selection::SelectionRange, surface::TextSurface};
//!
//! let mut buffer = StyledBuffer::<()>::new("hello");
//! buffer.begin_edit();
//! buffer.replace_characters(SelectionRange::new(0, 1), "j", ());
//! buffer.end_edit();
//! assert_eq!(buffer.text(), "jello");
//! assert_eq!(buffer.committed_edits(), 1);
//! ```

use std::{
  borrow::Cow,
  iter,
};

use ropey::Rope;
use rtv_core::{
  grapheme::{
    grapheme_to_char_idx,
    len_graphemes,
    len_graphemes_in_rope,
  },
  line_ending::normalize_line_endings,
};
use thiserror::Error;

use crate::{
  selection::SelectionRange,
  surface::TextSurface,
};

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
  #[error("attribute map covers {attributes} graphemes, text has {graphemes}")]
  AttributeLengthMismatch {
    attributes: usize,
    graphemes:  usize,
  },
  #[error("selection {location}+{length} is out of bounds for buffer length {len}")]
  SelectionOutOfBounds {
    location: usize,
    length:   usize,
    len:      usize,
  },
}

#[derive(Debug, Clone)]
pub struct StyledBuffer<A = ()> {
  text:              Rope,
  /// One entry per grapheme of `text`.
  attributes:        Vec<A>,
  typing_attributes: A,
  selection:         SelectionRange,
  edit_depth:        usize,
  committed_edits:   usize,
}

impl<A: Clone + Default> StyledBuffer<A> {
  /// A buffer whose text carries default attributes everywhere. Line
  /// endings are normalized to `\n`.
  pub fn new(text: &str) -> Self {
    let text = normalize_line_endings(text);
    let len = len_graphemes(&text);
    Self {
      text:              Rope::from(text.as_ref()),
      attributes:        vec![A::default(); len],
      typing_attributes: A::default(),
      selection:         SelectionRange::point(0),
      edit_depth:        0,
      committed_edits:   0,
    }
  }
}

impl<A: Clone> StyledBuffer<A> {
  /// A buffer with an explicit attribute per grapheme of `text`.
  pub fn with_attributes(text: &str, attributes: Vec<A>, typing_attributes: A) -> Result<Self> {
    let text = normalize_line_endings(text);
    let graphemes = len_graphemes(&text);
    if attributes.len() != graphemes {
      return Err(BufferError::AttributeLengthMismatch {
        attributes: attributes.len(),
        graphemes,
      });
    }

    Ok(Self {
      text: Rope::from(text.as_ref()),
      attributes,
      typing_attributes,
      selection: SelectionRange::point(0),
      edit_depth: 0,
      committed_edits: 0,
    })
  }

  pub fn with_selection(mut self, selection: SelectionRange) -> Result<Self> {
    let len = self.attributes.len();
    if selection.end() > len {
      return Err(BufferError::SelectionOutOfBounds {
        location: selection.location,
        length: selection.length,
        len,
      });
    }
    self.selection = selection;
    Ok(self)
  }

  pub fn rope(&self) -> &Rope {
    &self.text
  }

  pub fn attributes(&self) -> &[A] {
    &self.attributes
  }

  pub fn set_typing_attributes(&mut self, attributes: A) {
    self.typing_attributes = attributes;
  }

  /// Number of edit transactions that have been closed.
  pub fn committed_edits(&self) -> usize {
    self.committed_edits
  }

  pub fn is_editing(&self) -> bool {
    self.edit_depth > 0
  }
}

impl<A: Clone> TextSurface for StyledBuffer<A> {
  type Attributes = A;

  fn text(&self) -> Cow<'_, str> {
    Cow::from(self.text.slice(..))
  }

  fn len_graphemes(&self) -> usize {
    self.attributes.len()
  }

  fn attributes_at(&self, index: usize) -> Option<A> {
    self.attributes.get(index).cloned()
  }

  fn typing_attributes(&self) -> A {
    self.typing_attributes.clone()
  }

  fn begin_edit(&mut self) {
    self.edit_depth += 1;
  }

  fn end_edit(&mut self) {
    match self.edit_depth {
      0 => tracing::warn!("end_edit called without a matching begin_edit"),
      1 => {
        self.edit_depth = 0;
        self.committed_edits += 1;
      },
      _ => self.edit_depth -= 1,
    }
  }

  fn replace_characters(&mut self, range: SelectionRange, text: &str, attributes: A) {
    if !self.is_editing() {
      tracing::warn!("replace_characters outside of an edit transaction");
    }

    let len = self.attributes.len();
    let clamped = range.clamp(len);
    if clamped != range {
      tracing::warn!(?range, len, "edit range out of bounds, clamping");
    }

    let text = normalize_line_endings(text);
    let slice = self.text.slice(..);
    let from = grapheme_to_char_idx(slice, clamped.location);
    let to = grapheme_to_char_idx(slice, clamped.end());
    self.text.remove(from..to);
    self.text.insert(from, &text);

    // Clusters can merge across the edit boundary, so count what the rope
    // actually holds instead of trusting the inserted text.
    let new_len = len_graphemes_in_rope(self.text.slice(..));
    let inserted = (new_len + clamped.length).saturating_sub(len);
    self.attributes.splice(
      clamped.location..clamped.end(),
      iter::repeat_n(attributes.clone(), inserted),
    );
    self.attributes.resize(new_len, attributes);

    self.selection = self.selection.clamp(new_len);
  }

  fn selection(&self) -> SelectionRange {
    self.selection
  }

  fn set_selection(&mut self, selection: SelectionRange) {
    self.selection = selection.clamp(self.attributes.len());
  }
}
