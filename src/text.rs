//! Character-addressed view over a document's text.
//!
//! Tags address the document by 0-based character offsets, while Rust strings
//! are indexed by bytes. `DocumentText` keeps a boundary table so character
//! ranges can be sliced without rescanning the string.

/// A document's full text, addressable by character offsets.
#[derive(Clone)]
pub struct DocumentText<'a> {
    text: &'a str,
    /// Byte offset of every character, plus one trailing entry for `text.len()`.
    boundaries: Vec<usize>,
}

impl<'a> std::fmt::Debug for DocumentText<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentText")
            .field("chars", &self.len())
            .field("bytes", &self.text.len())
            .finish()
    }
}

impl<'a> DocumentText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Length of the document in characters.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying string.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Text between two character offsets (end-exclusive).
    ///
    /// Offsets past the end of the document are clamped, and an inverted range
    /// yields the empty string.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let len = self.len();
        let end = end.min(len);
        let start = start.min(end);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }
}
