//! Rendering of new manifest records
//!
//! Output follows the layout Xcode itself writes: build files and file
//! references on a single line, groups expanded one field per line, every
//! reference followed by a `/* label */` comment.

use std::borrow::Cow;
use std::path::Path;

use xcpatch_core::ObjectId;

use crate::lexer::is_unquoted_byte;

/// Quote `s` if it cannot be written bare
pub fn quote(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.bytes().all(is_unquoted_byte) && !s.contains("//") && !s.contains("/*")
    {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\U{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

/// `/* label */`, with any `*/` inside the label defused
pub fn comment(label: &str) -> String {
    format!("/* {} */", label.replace("*/", "* /"))
}

/// `lastKnownFileType` for a file name, by extension
pub fn file_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("swift") => "sourcecode.swift",
        Some("m") => "sourcecode.c.objc",
        Some("mm") => "sourcecode.cpp.objcpp",
        Some("c") => "sourcecode.c.c",
        Some("cc") | Some("cpp") | Some("cxx") => "sourcecode.cpp.cpp",
        Some("h") => "sourcecode.c.h",
        Some("hpp") | Some("hh") => "sourcecode.cpp.h",
        Some("metal") => "sourcecode.metal",
        Some("storyboard") => "file.storyboard",
        Some("xib") => "file.xib",
        Some("xcassets") => "folder.assetcatalog",
        Some("plist") => "text.plist.xml",
        Some("json") => "text.json",
        Some("strings") => "text.plist.strings",
        _ => "text",
    }
}

/// `ID /* Name in Phase */ = {isa = PBXBuildFile; fileRef = REF /* Name */; };`
pub fn build_file_entry(id: ObjectId, file_ref: ObjectId, name: &str, phase: &str) -> String {
    format!(
        "{} {} = {{isa = PBXBuildFile; fileRef = {} {}; }};",
        id,
        comment(&format!("{} in {}", name, phase)),
        file_ref,
        comment(name),
    )
}

/// `REF /* Name */ = {isa = PBXFileReference; lastKnownFileType = T; path = Name; sourceTree = "<group>"; };`
pub fn file_reference_entry(id: ObjectId, name: &str, file_type: &str) -> String {
    format!(
        "{} {} = {{isa = PBXFileReference; lastKnownFileType = {}; path = {}; sourceTree = {}; }};",
        id,
        comment(name),
        quote(file_type),
        quote(name),
        quote("<group>"),
    )
}

/// Multi-line group record; `indent` is the indentation of its first line
pub fn group_entry(id: ObjectId, name: &str, children: &[(ObjectId, &str)], indent: &str) -> String {
    let field = format!("{}\t", indent);
    let member = format!("{}\t\t", indent);
    let mut out = format!("{} {} = {{\n", id, comment(name));
    out.push_str(&format!("{}isa = PBXGroup;\n", field));
    out.push_str(&format!("{}children = (\n", field));
    for (child, label) in children {
        out.push_str(&format!("{}{}\n", member, member_line(*child, label)));
    }
    out.push_str(&format!("{});\n", field));
    out.push_str(&format!("{}path = {};\n", field, quote(name)));
    out.push_str(&format!("{}sourceTree = {};\n", field, quote("<group>")));
    out.push_str(&format!("{}}};", indent));
    out
}

/// `ID /* label */,` as written inside a list
pub fn member_line(id: ObjectId, label: &str) -> String {
    format!("{} {},", id, comment(label))
}
