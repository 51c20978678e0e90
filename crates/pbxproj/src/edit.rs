//! Byte-range edits against the original text
//!
//! Every splice is positioned against the same, unmodified source, so the
//! offsets computed from one parse stay valid no matter how many splices
//! are queued. [`EditSet::apply`] sorts them and stitches the output in a
//! single forward pass.

use std::ops::Range;

use xcpatch_core::{Error, Result};

/// Replace `range` of the source with `text`; an empty range inserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Byte range of the original text
    pub range: Range<usize>,
    /// Replacement
    pub text: String,
}

/// An ordered collection of non-overlapping splices
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    splices: Vec<Splice>,
}

impl EditSet {
    /// Create an empty edit set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `text` at `offset`
    ///
    /// Several inserts at the same offset land in the order they were added.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.replace(offset..offset, text);
    }

    /// Replace `range` with `text`
    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.splices.push(Splice {
            range,
            text: text.into(),
        });
    }

    /// Number of queued splices
    pub fn len(&self) -> usize {
        self.splices.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }

    /// Apply every splice to `source`
    ///
    /// # Errors
    ///
    /// `Corruption` if a range is out of bounds, splits a UTF-8 character,
    /// or overlaps another splice.
    pub fn apply(&self, source: &str) -> Result<String> {
        let mut order: Vec<&Splice> = self.splices.iter().collect();
        // Stable: equal positions keep insertion order
        order.sort_by_key(|s| (s.range.start, s.range.end));

        let added: usize = order.iter().map(|s| s.text.len()).sum();
        let mut out = String::with_capacity(source.len() + added);
        let mut cursor = 0;

        for splice in order {
            let Range { start, end } = splice.range.clone();
            if start > end || end > source.len() {
                return Err(Error::Corruption(format!(
                    "edit range {}..{} outside text of {} bytes",
                    start,
                    end,
                    source.len()
                )));
            }
            if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
                return Err(Error::Corruption(format!(
                    "edit range {}..{} splits a character",
                    start, end
                )));
            }
            if start < cursor {
                return Err(Error::Corruption(format!(
                    "edit range {}..{} overlaps a previous edit ending at {}",
                    start, end, cursor
                )));
            }
            out.push_str(&source[cursor..start]);
            out.push_str(&splice.text);
            cursor = end;
        }

        out.push_str(&source[cursor..]);
        Ok(out)
    }
}
