//! Manifest builder for tests
//!
//! Produces Xcode-shaped manifests with a configurable indent unit,
//! section order and set of existing groups.

use std::fmt::Write;

/// Ids used by [`ManifestBuilder`] for fixed records
pub const FEATURES_ID: &str = "F00000000000000000000001";
pub const SOURCES_ID: &str = "F00000000000000000000002";
pub const TARGET_ID: &str = "F00000000000000000000003";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BuildFile,
    FileReference,
    Group,
    NativeTarget,
    SourcesBuildPhase,
}

impl Section {
    pub fn isa(&self) -> &'static str {
        match self {
            Section::BuildFile => "PBXBuildFile",
            Section::FileReference => "PBXFileReference",
            Section::Group => "PBXGroup",
            Section::NativeTarget => "PBXNativeTarget",
            Section::SourcesBuildPhase => "PBXSourcesBuildPhase",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    indent: String,
    sections: Vec<Section>,
    features_children: Vec<String>,
    source_files: Vec<String>,
    extra_groups: Vec<(String, String)>,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            sections: vec![
                Section::BuildFile,
                Section::FileReference,
                Section::Group,
                Section::NativeTarget,
                Section::SourcesBuildPhase,
            ],
            features_children: Vec::new(),
            source_files: Vec::new(),
            extra_groups: Vec::new(),
        }
    }
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, unit: &str) -> Self {
        self.indent = unit.to_string();
        self
    }

    pub fn sections(mut self, sections: &[Section]) -> Self {
        self.sections = sections.to_vec();
        self
    }

    /// Existing member of `Features` (must be a 24-char id)
    pub fn feature_child(mut self, id: &str) -> Self {
        self.features_children.push(id.to_string());
        self
    }

    /// Existing member of the Sources phase
    pub fn source_file(mut self, id: &str) -> Self {
        self.source_files.push(id.to_string());
        self
    }

    /// Additional empty group
    pub fn group(mut self, id: &str, name: &str) -> Self {
        self.extra_groups.push((id.to_string(), name.to_string()));
        self
    }

    fn section(&self, out: &mut String, section: Section) {
        let i = |n: usize| self.indent.repeat(n);
        writeln!(out, "\n/* Begin {} section */", section.isa()).unwrap();
        match section {
            Section::BuildFile | Section::FileReference => {}
            Section::Group => {
                writeln!(out, "{}{} /* Features */ = {{", i(2), FEATURES_ID).unwrap();
                writeln!(out, "{}isa = PBXGroup;", i(3)).unwrap();
                writeln!(out, "{}children = (", i(3)).unwrap();
                for child in &self.features_children {
                    writeln!(out, "{}{} /* Child */,", i(4), child).unwrap();
                }
                writeln!(out, "{});", i(3)).unwrap();
                writeln!(out, "{}path = Features;", i(3)).unwrap();
                writeln!(out, "{}sourceTree = \"<group>\";", i(3)).unwrap();
                writeln!(out, "{}}};", i(2)).unwrap();
                for (id, name) in &self.extra_groups {
                    writeln!(
                        out,
                        "{}{} /* {} */ = {{isa = PBXGroup; children = (); name = \"{}\"; sourceTree = \"<group>\"; }};",
                        i(2),
                        id,
                        name,
                        name
                    )
                    .unwrap();
                }
            }
            Section::NativeTarget => {
                writeln!(out, "{}{} /* App */ = {{", i(2), TARGET_ID).unwrap();
                writeln!(out, "{}isa = PBXNativeTarget;", i(3)).unwrap();
                writeln!(out, "{}buildPhases = (", i(3)).unwrap();
                writeln!(out, "{}{} /* Sources */,", i(4), SOURCES_ID).unwrap();
                writeln!(out, "{});", i(3)).unwrap();
                writeln!(out, "{}name = App;", i(3)).unwrap();
                writeln!(out, "{}}};", i(2)).unwrap();
            }
            Section::SourcesBuildPhase => {
                writeln!(out, "{}{} /* Sources */ = {{", i(2), SOURCES_ID).unwrap();
                writeln!(out, "{}isa = PBXSourcesBuildPhase;", i(3)).unwrap();
                writeln!(out, "{}files = (", i(3)).unwrap();
                for file in &self.source_files {
                    writeln!(out, "{}{} /* File in Sources */,", i(4), file).unwrap();
                }
                writeln!(out, "{});", i(3)).unwrap();
                writeln!(out, "{}}};", i(2)).unwrap();
            }
        }
        writeln!(out, "/* End {} section */", section.isa()).unwrap();
    }

    pub fn build(&self) -> String {
        let mut out = String::from("// !$*UTF8*$!\n{\n");
        writeln!(out, "{}archiveVersion = 1;", self.indent).unwrap();
        writeln!(out, "{}objects = {{", self.indent).unwrap();
        for section in &self.sections {
            self.section(&mut out, *section);
        }
        writeln!(out, "{}}};", self.indent).unwrap();
        writeln!(out, "{}rootObject = {} /* Project object */;", self.indent, TARGET_ID).unwrap();
        out.push_str("}\n");
        out
    }
}
