//! Parsed project manifest with structural queries
//!
//! A [`Document`] owns the original text and the span-annotated tree parsed
//! from it. Queries answer "where is X" questions in terms of the tree:
//! the `objects` dictionary, the section marker comments that sit inside
//! it, objects by `isa`, groups by display name, a target's build phases.
//! Nothing here mutates the text; see [`crate::edit::EditSet`].

use xcpatch_core::{Limits, ObjectId, Result};

use crate::lexer::{error_at, Comment, CommentStyle, Lexer, Span};
use crate::parser::parse_tokens;
use crate::value::{Array, Dict, Entry, Node};

/// `isa` of build-file records
pub const ISA_BUILD_FILE: &str = "PBXBuildFile";
/// `isa` of file-reference records
pub const ISA_FILE_REFERENCE: &str = "PBXFileReference";
/// `isa` of group records
pub const ISA_GROUP: &str = "PBXGroup";
/// `isa` of compile-sources build phases
pub const ISA_SOURCES_PHASE: &str = "PBXSourcesBuildPhase";
/// `isa` of native targets
pub const ISA_NATIVE_TARGET: &str = "PBXNativeTarget";

/// A project manifest: source text plus its syntax tree
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    root: Node,
    comments: Vec<Comment>,
}

/// One record of the `objects` dictionary
#[derive(Debug, Clone, Copy)]
pub struct PbxObject<'a> {
    /// Key in `objects`
    pub id: &'a str,
    /// The `ID = { ... };` entry
    pub entry: &'a Entry,
    /// The record's fields
    pub fields: &'a Dict,
}

impl<'a> PbxObject<'a> {
    /// The `isa` field
    pub fn isa(&self) -> Option<&'a str> {
        self.fields.get_str("isa")
    }

    /// A string field
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.fields.get_str(key)
    }

    /// An array field, as its node and contents
    pub fn get_array(&self, key: &str) -> Option<(&'a Node, &'a Array)> {
        let node = self.fields.get(key)?;
        node.as_array().map(|array| (node, array))
    }

    /// Name shown in the IDE: `name`, falling back to `path`
    pub fn display_name(&self) -> Option<&'a str> {
        self.get_str("name").or_else(|| self.get_str("path"))
    }

    /// The record id as an [`ObjectId`], if canonical
    pub fn object_id(&self) -> Option<ObjectId> {
        ObjectId::from_string(self.id)
    }
}

impl Document {
    /// Parse with default limits
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        Self::parse_with_limits(source, &Limits::default())
    }

    /// Parse with explicit limits
    pub fn parse_with_limits(source: impl Into<String>, limits: &Limits) -> Result<Self> {
        let source = source.into();
        limits.validate_manifest_size(source.len())?;
        let lexed = Lexer::new(&source).tokenize()?;
        let root = parse_tokens(&source, &lexed.tokens, limits)?;
        if root.as_dict().is_none() {
            return Err(error_at(
                &source,
                root.span.start,
                "top-level value must be a dictionary",
            ));
        }
        tracing::debug!(
            tokens = lexed.tokens.len(),
            comments = lexed.comments.len(),
            "parsed manifest"
        );
        Ok(Self {
            source,
            root,
            comments: lexed.comments,
        })
    }

    /// Original text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `objects` dictionary node
    pub fn objects_node(&self) -> Option<&Node> {
        self.root
            .as_dict()?
            .get("objects")
            .filter(|node| node.as_dict().is_some())
    }

    /// Every record of `objects` whose value is a dictionary
    pub fn objects(&self) -> impl Iterator<Item = PbxObject<'_>> {
        self.objects_node()
            .and_then(Node::as_dict)
            .into_iter()
            .flat_map(|dict| dict.entries.iter())
            .filter_map(|entry| {
                entry.value.as_dict().map(|fields| PbxObject {
                    id: &entry.key,
                    entry,
                    fields,
                })
            })
    }

    /// Records with the given `isa`, in document order
    pub fn objects_of_isa<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = PbxObject<'a>> {
        self.objects().filter(move |obj| obj.isa() == Some(isa))
    }

    /// Record by id
    pub fn object(&self, id: &str) -> Option<PbxObject<'_>> {
        self.objects().find(|obj| obj.id == id)
    }

    /// Ids of every record that parses as a canonical [`ObjectId`]
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects()
            .filter_map(|obj| obj.object_id())
            .collect()
    }

    /// Span of the `/* Begin <isa> section */` marker inside `objects`
    ///
    /// Markers anywhere else in the file (inside a string, after the
    /// `objects` dictionary) do not count.
    pub fn section_begin(&self, isa: &str) -> Option<Span> {
        self.section_marker(&format!("Begin {} section", isa))
    }

    fn section_marker(&self, text: &str) -> Option<Span> {
        let objects = self.objects_node()?.span;
        self.comments
            .iter()
            .find(|c| c.style == CommentStyle::Block && c.text == text && objects.contains(c.span))
            .map(|c| c.span)
    }

    /// Groups whose display name is `name`, in document order
    pub fn groups_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PbxObject<'a>> {
        self.objects_of_isa(ISA_GROUP)
            .filter(move |group| group.display_name() == Some(name))
    }

    /// Native target by `name`
    pub fn target_named(&self, name: &str) -> Option<PbxObject<'_>> {
        self.objects_of_isa(ISA_NATIVE_TARGET)
            .find(|target| target.get_str("name") == Some(name))
    }

    /// The compile-sources phase to link new build files into
    ///
    /// With a target name, the sources phase listed in that target's
    /// `buildPhases`. Without one, the first sources phase in the file.
    pub fn sources_phase(&self, target: Option<&str>) -> Option<PbxObject<'_>> {
        match target {
            Some(name) => {
                let target = self.target_named(name)?;
                let (_, phases) = target.get_array("buildPhases")?;
                phases
                    .strings()
                    .filter_map(|id| self.object(id))
                    .find(|phase| phase.isa() == Some(ISA_SOURCES_PHASE))
            }
            None => self.objects_of_isa(ISA_SOURCES_PHASE).next(),
        }
    }

    /// Leading whitespace of the line containing `offset`
    pub fn line_indent(&self, offset: usize) -> &str {
        let line_start = self.source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let rest = &self.source[line_start..];
        let width = rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rest.len());
        &rest[..width]
    }
}
