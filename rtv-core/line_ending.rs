//! Line breaks as seen by the list engine.
//!
//! A lone line feed grapheme is the only line separator. `"\r\n"` is a single
//! grapheme cluster and would never compare equal to `"\n"`, so hosts feed
//! text through [`normalize_line_endings`] before handing it out.

use std::borrow::Cow;

use crate::{
  grapheme::GraphemeText,
  search::{
    next_index_of,
    prev_index_of,
  },
};

pub const LINE_FEED: &str = "\n";

/// Rewrites `\r\n`, lone `\r`, and the unicode line/paragraph separators to
/// `\n`. Borrows when there is nothing to rewrite.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
  if !text.contains(['\r', '\u{2028}', '\u{2029}', '\u{0085}']) {
    return Cow::Borrowed(text);
  }

  let mut normalized = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\r' => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
        normalized.push('\n');
      },
      '\u{2028}' | '\u{2029}' | '\u{0085}' => normalized.push('\n'),
      ch => normalized.push(ch),
    }
  }
  Cow::Owned(normalized)
}

/// Start of the line containing `idx`.
#[must_use]
pub fn line_start(text: &GraphemeText, idx: usize) -> usize {
  prev_index_of(text, LINE_FEED, idx).map_or(0, |line_feed| line_feed + 1)
}

/// Start of the line after the one containing `idx`, if there is one.
#[must_use]
pub fn next_line_start(text: &GraphemeText, idx: usize) -> Option<usize> {
  next_index_of(text, LINE_FEED, idx).map(|line_feed| line_feed + 1)
}

/// Whether `idx` sits at the end of its line (before a line feed or at the
/// end of the text).
#[must_use]
pub fn is_line_end(text: &GraphemeText, idx: usize) -> bool {
  text.get(idx).is_none_or(|g| g == LINE_FEED)
}
