//! Grapheme-cluster indexing for text snapshots and ropes.
//!
//! Every position exchanged with a text surface is a grapheme index: the
//! number of extended grapheme clusters that precede it. [`GraphemeText`] is
//! the one place where those indices are turned into byte offsets of a
//! `&str`, and [`grapheme_to_char_idx`] does the same for a `ropey` slice.
//! Nothing else in the workspace is allowed to slice text by bytes or chars,
//! so a multi-scalar cluster (`"🙂"`, `"e\u{301}"`, a ZWJ family emoji) can
//! never be split.
//!
//! ```
//! use rtv_core::grapheme::GraphemeText;
//!
//! let text = GraphemeText::new("Yo🙂!");
//! assert_eq!(text.len(), 4);
//! assert_eq!(text.get(2), Some("🙂"));
//! assert_eq!(text.slice(1..3), "o🙂");
//! ```

use std::ops::Range;

use ropey::{
  RopeSlice,
  str_utils::byte_to_char_idx,
};
use unicode_segmentation::{
  GraphemeCursor,
  GraphemeIncomplete,
  UnicodeSegmentation,
};

/// A borrowed text snapshot with precomputed grapheme boundaries.
#[derive(Debug, Clone)]
pub struct GraphemeText<'a> {
  text:   &'a str,
  /// Byte offset of every grapheme start, followed by `text.len()`.
  bounds: Vec<usize>,
}

impl<'a> GraphemeText<'a> {
  pub fn new(text: &'a str) -> Self {
    let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(idx, _)| idx).collect();
    bounds.push(text.len());
    Self { text, bounds }
  }

  pub fn as_str(&self) -> &'a str {
    self.text
  }

  /// Number of grapheme clusters in the snapshot.
  #[inline]
  pub fn len(&self) -> usize {
    self.bounds.len() - 1
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Byte offset of grapheme `idx`, clamped to the end of the text.
  #[inline]
  pub fn byte_offset(&self, idx: usize) -> usize {
    self.bounds[idx.min(self.len())]
  }

  pub fn get(&self, idx: usize) -> Option<&'a str> {
    if idx >= self.len() {
      return None;
    }
    let text: &'a str = self.text;
    Some(&text[self.bounds[idx]..self.bounds[idx + 1]])
  }

  /// The text covered by the grapheme range, clamped to the snapshot.
  pub fn slice(&self, range: Range<usize>) -> &'a str {
    let start = self.byte_offset(range.start);
    let end = self.byte_offset(range.end).max(start);
    let text: &'a str = self.text;
    &text[start..end]
  }

  pub fn iter(&self) -> impl Iterator<Item = &'a str> {
    (0..self.len()).filter_map(|idx| self.get(idx))
  }
}

/// Number of graphemes in `text`.
#[inline]
pub fn len_graphemes(text: &str) -> usize {
  text.graphemes(true).count()
}

/// Char index `n` grapheme clusters after `char_idx`, walking the rope chunk
/// by chunk.
#[must_use]
pub fn nth_next_grapheme_boundary(slice: RopeSlice, char_idx: usize, n: usize) -> usize {
  assert!(char_idx <= slice.len_chars());

  let mut byte_idx = slice.char_to_byte(char_idx);
  let (mut chunk, mut chunk_byte_idx, mut chunk_char_idx, _) = slice.chunk_at_byte(byte_idx);
  let mut gc = GraphemeCursor::new(byte_idx, slice.len_bytes(), true);

  for _ in 0..n {
    loop {
      match gc.next_boundary(chunk, chunk_byte_idx) {
        Ok(None) => return slice.len_chars(),
        Ok(Some(n)) => {
          byte_idx = n;
          break;
        },
        Err(GraphemeIncomplete::NextChunk) => {
          chunk_byte_idx += chunk.len();
          let (a, _, c, _) = slice.chunk_at_byte(chunk_byte_idx);
          chunk = a;
          chunk_char_idx = c;
        },
        Err(GraphemeIncomplete::PreContext(n)) => {
          let ctx_chunk = slice.chunk_at_byte(n - 1).0;
          gc.provide_context(ctx_chunk, n - ctx_chunk.len());
        },
        _ => unreachable!(),
      }
    }
  }

  let tmp = byte_to_char_idx(chunk, byte_idx - chunk_byte_idx);
  chunk_char_idx + tmp
}

/// Char index of grapheme `grapheme_idx`; indices past the end map to
/// `slice.len_chars()`.
#[must_use]
#[inline]
pub fn grapheme_to_char_idx(slice: RopeSlice, grapheme_idx: usize) -> usize {
  nth_next_grapheme_boundary(slice, 0, grapheme_idx)
}

/// Number of graphemes in a rope slice.
#[must_use]
pub fn len_graphemes_in_rope(slice: RopeSlice) -> usize {
  let len = slice.len_chars();
  let mut char_idx = 0;
  let mut count = 0;
  while char_idx < len {
    char_idx = nth_next_grapheme_boundary(slice, char_idx, 1);
    count += 1;
  }
  count
}
