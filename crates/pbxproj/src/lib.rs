//! Project manifest (`project.pbxproj`) reading and splicing
//!
//! This crate provides:
//! - Lexer: tokens plus comments, each with byte spans
//! - Parser: span-annotated tree of dictionaries, arrays and strings
//! - Document: structural queries over the `objects` dictionary
//! - EditSet: byte-range splices against the original text
//! - Writer: rendering of new records in Xcode's layout
//!
//! The text is never re-serialized from the tree; edits are spliced into
//! the original so every untouched byte survives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod edit;
pub mod lexer;
pub mod parser;
pub mod value;
pub mod writer;

pub use document::{
    Document, PbxObject, ISA_BUILD_FILE, ISA_FILE_REFERENCE, ISA_GROUP, ISA_NATIVE_TARGET,
    ISA_SOURCES_PHASE,
};
pub use edit::{EditSet, Splice};
pub use lexer::{Comment, CommentStyle, Lexer, Span, Token, TokenKind};
pub use value::{Array, Dict, Entry, Node, Value};
