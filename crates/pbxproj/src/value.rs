//! Span-annotated property-list values
//!
//! The tree mirrors the text: every node remembers the byte range it was
//! parsed from, so edits can be positioned relative to a specific
//! dictionary entry or array without re-serializing anything else.

use crate::lexer::Span;

/// A parsed value and its source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The value
    pub value: Value,
    /// For containers, from the opening delimiter through the closing one
    pub span: Span,
}

/// Property-list value kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Quoted or bare string
    String(String),
    /// Hex data
    Data(String),
    /// `( ... )`
    Array(Array),
    /// `{ ... }`
    Dict(Dict),
}

/// Array contents
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    /// Elements in order
    pub items: Vec<Node>,
    /// Whether the last element is followed by a comma
    pub trailing_comma: bool,
}

/// Dictionary contents
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dict {
    /// Entries in source order; duplicate keys are kept
    pub entries: Vec<Entry>,
}

/// `key = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Decoded key
    pub key: String,
    /// Span of the key token
    pub key_span: Span,
    /// The value
    pub value: Node,
    /// From the key through the terminating `;`
    pub span: Span,
}

impl Node {
    /// The string, if this is a string node
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The array, if this is an array node
    pub fn as_array(&self) -> Option<&Array> {
        match &self.value {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The dictionary, if this is a dictionary node
    pub fn as_dict(&self) -> Option<&Dict> {
        match &self.value {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Offset of the closing `)` or `}` of a container node
    pub fn close_offset(&self) -> usize {
        self.span.end - 1
    }

    /// Offset just past the opening `(` or `{` of a container node
    pub fn open_end(&self) -> usize {
        self.span.start + 1
    }
}

impl Dict {
    /// First entry with `key`
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// First value under `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entry(key).map(|e| &e.value)
    }

    /// First value under `key`, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Array {
    /// String elements, skipping anything else
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(Node::as_str)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
