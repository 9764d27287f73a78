//! Substring search in grapheme units.
//!
//! Both directions compare whole grapheme clusters, so a needle only matches
//! where every one of its clusters lines up with a cluster of the haystack.
//! A needle that would start or end inside a multi-scalar cluster never
//! matches.
//!
//! # Bounds
//!
//! - [`next_index_of`] returns the first match that starts at or after
//!   `from`.
//! - [`prev_index_of`] returns the last match that lies entirely before
//!   `from`. A `from` past the end of the text is clamped to the end.
//!
//! ```
//! use rtv_core::{
//!   grapheme::GraphemeText,
//!   search::{next_index_of, prev_index_of},
//! };
//!
//! let text = GraphemeText::new("Yo🙂");
//! assert_eq!(prev_index_of(&text, "hi", 4), None);
//! assert_eq!(prev_index_of(&text, "🙂", 4), Some(2));
//! assert_eq!(next_index_of(&text, "o", 0), Some(1));
//! ```

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::grapheme::GraphemeText;

type Needle<'n> = SmallVec<[&'n str; 4]>;

fn needle_graphemes(needle: &str) -> Needle<'_> {
  needle.graphemes(true).collect()
}

#[inline]
fn matches_at(text: &GraphemeText, needle: &[&str], start: usize) -> bool {
  needle
    .iter()
    .enumerate()
    .all(|(offset, g)| text.get(start + offset) == Some(*g))
}

/// Index of the first occurrence of `needle` starting at or after `from`.
///
/// An empty needle never matches.
#[must_use]
pub fn next_index_of(text: &GraphemeText, needle: &str, from: usize) -> Option<usize> {
  let needle = needle_graphemes(needle);
  if needle.is_empty() || needle.len() > text.len() {
    return None;
  }

  let last = text.len() - needle.len();
  (from..=last).find(|&start| matches_at(text, &needle, start))
}

/// Index of the last occurrence of `needle` that ends at or before `from`.
///
/// An empty needle never matches.
#[must_use]
pub fn prev_index_of(text: &GraphemeText, needle: &str, from: usize) -> Option<usize> {
  let needle = needle_graphemes(needle);
  if needle.is_empty() {
    return None;
  }

  let end = from.min(text.len());
  let last = end.checked_sub(needle.len())?;
  (0..=last).rev().find(|&start| matches_at(text, &needle, start))
}
