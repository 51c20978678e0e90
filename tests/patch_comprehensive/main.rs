//! Patch Comprehensive Test Suite
//!
//! End-to-end coverage of the public `xcpatch` API against generated
//! manifests of different shapes.
//!
//! ## Modules
//!
//! - `layout`: indentation, compact lists, section order
//! - `anchors`: ambiguous and missing anchors
//! - `invariants`: properties over randomly generated manifests
//! - `files`: the file-level entry points
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test patch_comprehensive
//! cargo test --test patch_comprehensive invariants::
//! ```

use xcpatch::pbxproj::Document;
use xcpatch::{ObjectId, PatchPlan, Patched, Patcher, SequentialIds};

pub mod manifest;

mod anchors;
mod files;
mod invariants;
mod layout;

/// Patch `text` with counter ids
pub fn patch_seq(text: &str, plan: &PatchPlan) -> Patched {
    Patcher::new(SequentialIds::new())
        .patch_text(text, plan)
        .unwrap()
}

/// Members of `owner`'s array field `key`
pub fn members(doc: &Document, owner: &str, key: &str) -> Vec<String> {
    let (_, array) = doc
        .object(owner)
        .unwrap_or_else(|| panic!("no object {}", owner))
        .get_array(key)
        .unwrap_or_else(|| panic!("{} has no {}", owner, key));
    array.strings().map(str::to_string).collect()
}

/// Hex form of a counter id
pub fn seq(n: u64) -> String {
    ObjectId::from_u64(n).to_string()
}
