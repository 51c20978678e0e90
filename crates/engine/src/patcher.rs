//! The project patcher
//!
//! One run registers a pair of source files:
//!
//! 1. five fresh identifiers (two file references, two build files, one group)
//! 2. two `PBXBuildFile` records
//! 3. two `PBXFileReference` records
//! 4. the new group linked into the parent group, and its `PBXGroup` record
//! 5. the build files linked into a `PBXSourcesBuildPhase`
//!
//! Each insertion has its own anchor and is skipped, not failed, when the
//! anchor is missing. All anchors are resolved against one parse of the
//! original text and the splices are applied together; the result is parsed
//! again and every applied insertion is checked before anything is written.

use std::path::Path;

use tracing::{debug, info, warn};
use xcpatch_core::{Error, IdAllocator, IdGenerator, Limits, ObjectId, RandomIds, Result};
use xcpatch_pbxproj::writer::{build_file_entry, file_reference_entry, group_entry, member_line};
use xcpatch_pbxproj::{
    Array, Document, EditSet, Node, ISA_BUILD_FILE, ISA_FILE_REFERENCE, ISA_GROUP,
};

use crate::fsio;
use crate::plan::{ExistingPolicy, PatchPlan, SOURCES_PHASE_LABEL};
use crate::report::{AssignedIds, PatchReport, Step, StepOutcome, StepReport};

/// Indentation of records inside `objects`
const RECORD_INDENT: &str = "\t\t";

/// How [`Patcher::patch_file`] treats the file system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Compute everything, write nothing
    pub dry_run: bool,
    /// Save the original as `<name>.bak` before writing
    pub backup: bool,
}

/// Result of [`Patcher::patch_text`]
#[derive(Debug, Clone)]
pub struct Patched {
    /// The new manifest text
    pub text: String,
    /// What was done
    pub report: PatchReport,
}

/// Registers source files into a manifest
pub struct Patcher<G: IdGenerator> {
    ids: G,
    limits: Limits,
}

impl Patcher<RandomIds> {
    /// Patcher with random identifiers and default limits
    pub fn random() -> Self {
        Self::new(RandomIds)
    }
}

impl<G: IdGenerator> Patcher<G> {
    /// Patcher drawing identifiers from `ids`
    pub fn new(ids: G) -> Self {
        Self::with_limits(ids, Limits::default())
    }

    /// Patcher with explicit limits
    pub fn with_limits(ids: G, limits: Limits) -> Self {
        Self { ids, limits }
    }

    /// Patch manifest text in memory
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the plan is invalid
    /// - `ParseError` / `LimitExceeded` if the text is not a manifest
    /// - `AlreadyRegistered` under [`ExistingPolicy::Error`]
    /// - `IdExhausted` if no unique identifiers could be drawn
    /// - `Corruption` if the patched text fails validation
    pub fn patch_text(&mut self, text: &str, plan: &PatchPlan) -> Result<Patched> {
        plan.validate()?;
        let doc = Document::parse_with_limits(text, &self.limits)?;

        if doc.groups_named(&plan.group).next().is_some() {
            match plan.on_existing {
                ExistingPolicy::Duplicate => {
                    warn!(group = %plan.group, "group already exists, registering a duplicate");
                }
                ExistingPolicy::Skip => {
                    info!(group = %plan.group, "group already exists, leaving manifest untouched");
                    return Ok(Patched {
                        text: text.to_string(),
                        report: already_registered_report(plan),
                    });
                }
                ExistingPolicy::Error => {
                    return Err(Error::AlreadyRegistered(format!(
                        "group '{}' already exists",
                        plan.group
                    )));
                }
            }
        }

        let ids = self.allocate_ids(&doc)?;
        let parent = find_parent_group(&doc, &plan.parent_group);
        let mut edits = EditSet::new();
        let steps = vec![
            StepReport {
                step: Step::BuildFiles,
                outcome: add_build_files(&doc, plan, &ids, &mut edits),
            },
            StepReport {
                step: Step::FileReferences,
                outcome: add_file_references(&doc, plan, &ids, &mut edits),
            },
            StepReport {
                step: Step::ParentGroupLink,
                outcome: link_parent_group(&doc, plan, parent, &ids, &mut edits),
            },
            StepReport {
                step: Step::GroupRecord,
                outcome: add_group_record(&doc, plan, &ids, &mut edits),
            },
            StepReport {
                step: Step::SourcesPhase,
                outcome: link_sources_phase(&doc, plan, &ids, &mut edits),
            },
        ];

        for skipped in steps.iter().filter(|s| !s.is_applied()) {
            if let StepOutcome::Skipped { reason } = &skipped.outcome {
                warn!(step = skipped.step.describe(), %reason, "skipped");
            }
        }

        let changed = !edits.is_empty();
        let patched = edits.apply(doc.source())?;
        if changed {
            let parent_id = parent.map(|(id, _, _)| id);
            self.verify(&doc, &patched, plan, parent_id, &ids, &steps)?;
        }

        Ok(Patched {
            text: patched,
            report: PatchReport {
                project: None,
                group: plan.group.clone(),
                files: plan.file_names().map(str::to_string),
                ids: Some(ids),
                steps,
                changed,
                written: false,
                backup: None,
            },
        })
    }

    /// Patch the manifest at `path` in place
    ///
    /// The file is left untouched when nothing changed, in dry-run mode,
    /// and on any error.
    pub fn patch_file(
        &mut self,
        path: &Path,
        plan: &PatchPlan,
        options: &PatchOptions,
    ) -> Result<PatchReport> {
        let original = fsio::read_manifest(path, &self.limits)?;
        let Patched { text, mut report } = self.patch_text(&original, plan)?;
        report.project = Some(path.to_path_buf());

        if !report.changed {
            info!(path = %path.display(), "nothing to change");
            return Ok(report);
        }
        if options.dry_run {
            info!(path = %path.display(), "dry run, not writing");
            return Ok(report);
        }
        if options.backup {
            report.backup = Some(fsio::write_backup(path, &original)?);
        }
        fsio::write_atomic(path, &text)?;
        report.written = true;
        Ok(report)
    }

    fn allocate_ids(&mut self, doc: &Document) -> Result<AssignedIds> {
        let mut alloc = IdAllocator::new(
            &mut self.ids,
            doc.object_ids(),
            self.limits.max_id_attempts,
        );
        let file_references = alloc.allocate_n()?;
        let build_files = alloc.allocate_n()?;
        let group = alloc.allocate()?;
        let ids = AssignedIds {
            file_references,
            build_files,
            group,
        };
        debug!(ids = ?ids.all(), "allocated identifiers");
        Ok(ids)
    }

    /// Re-parse the output and look up every applied insertion
    fn verify(
        &self,
        original: &Document,
        patched: &str,
        plan: &PatchPlan,
        parent: Option<&str>,
        ids: &AssignedIds,
        steps: &[StepReport],
    ) -> Result<()> {
        let doc = Document::parse_with_limits(patched, &self.limits).map_err(|e| {
            Error::Corruption(format!("patched manifest no longer parses: {}", e))
        })?;

        let applied = |step: Step| steps.iter().any(|s| s.step == step && s.is_applied());
        let has_object = |id: ObjectId, isa: &str| {
            doc.object(&id.to_string())
                .map(|obj| obj.isa() == Some(isa))
                .unwrap_or(false)
        };
        let lists = |owner: Option<&str>, key: &str, members: &[ObjectId]| {
            owner
                .and_then(|id| doc.object(id))
                .and_then(|obj| obj.get_array(key))
                .map(|(_, array)| {
                    members
                        .iter()
                        .all(|m| array.strings().any(|s| s == m.to_string()))
                })
                .unwrap_or(false)
        };

        if applied(Step::BuildFiles) && !ids.build_files.iter().all(|id| has_object(*id, ISA_BUILD_FILE)) {
            return Err(Error::Corruption("build-file records missing after patch".into()));
        }
        if applied(Step::FileReferences)
            && !ids.file_references.iter().all(|id| has_object(*id, ISA_FILE_REFERENCE))
        {
            return Err(Error::Corruption("file-reference records missing after patch".into()));
        }
        if applied(Step::GroupRecord) {
            let group = ids.group.to_string();
            if !has_object(ids.group, ISA_GROUP)
                || !lists(Some(group.as_str()), "children", &ids.file_references)
            {
                return Err(Error::Corruption("group record missing after patch".into()));
            }
        }
        if applied(Step::ParentGroupLink) {
            if !lists(parent, "children", &[ids.group]) {
                return Err(Error::Corruption("parent group link missing after patch".into()));
            }
        }
        if applied(Step::SourcesPhase) {
            let phase = original.sources_phase(plan.target.as_deref()).map(|p| p.id);
            if !lists(phase, "files", &ids.build_files) {
                return Err(Error::Corruption("sources phase link missing after patch".into()));
            }
        }
        Ok(())
    }
}

/// Register the default pair into the manifest at `path`
///
/// Random identifiers, default plan, file overwritten in place.
pub fn patch(path: impl AsRef<Path>) -> Result<PatchReport> {
    Patcher::random().patch_file(path.as_ref(), &PatchPlan::default(), &PatchOptions::default())
}

fn skipped(reason: impl Into<String>) -> StepOutcome {
    StepOutcome::Skipped {
        reason: reason.into(),
    }
}

fn already_registered_report(plan: &PatchPlan) -> PatchReport {
    let reason = format!("group '{}' already registered", plan.group);
    PatchReport {
        project: None,
        group: plan.group.clone(),
        files: plan.file_names().map(str::to_string),
        ids: None,
        steps: Step::ALL
            .iter()
            .map(|step| StepReport {
                step: *step,
                outcome: skipped(reason.clone()),
            })
            .collect(),
        changed: false,
        written: false,
        backup: None,
    }
}

/// Insert whole records right after a section's begin marker
fn insert_in_section(
    doc: &Document,
    isa: &str,
    records: &[String],
    edits: &mut EditSet,
) -> StepOutcome {
    let Some(marker) = doc.section_begin(isa) else {
        return skipped(format!("no '/* Begin {} section */' marker", isa));
    };
    let text: String = records
        .iter()
        .map(|r| format!("\n{}{}", RECORD_INDENT, r))
        .collect();
    debug!(isa, offset = marker.end, "inserting records");
    edits.insert(marker.end, text);
    StepOutcome::Applied { offset: marker.end }
}

fn add_build_files(doc: &Document, plan: &PatchPlan, ids: &AssignedIds, edits: &mut EditSet) -> StepOutcome {
    let records: Vec<String> = (0..2)
        .map(|i| {
            build_file_entry(
                ids.build_files[i],
                ids.file_references[i],
                &plan.files[i].name,
                SOURCES_PHASE_LABEL,
            )
        })
        .collect();
    insert_in_section(doc, ISA_BUILD_FILE, &records, edits)
}

fn add_file_references(
    doc: &Document,
    plan: &PatchPlan,
    ids: &AssignedIds,
    edits: &mut EditSet,
) -> StepOutcome {
    let records: Vec<String> = (0..2)
        .map(|i| {
            file_reference_entry(
                ids.file_references[i],
                &plan.files[i].name,
                &plan.files[i].file_type,
            )
        })
        .collect();
    insert_in_section(doc, ISA_FILE_REFERENCE, &records, edits)
}

fn add_group_record(doc: &Document, plan: &PatchPlan, ids: &AssignedIds, edits: &mut EditSet) -> StepOutcome {
    let children = [
        (ids.file_references[0], plan.files[0].name.as_str()),
        (ids.file_references[1], plan.files[1].name.as_str()),
    ];
    let record = group_entry(ids.group, &plan.group, &children, RECORD_INDENT);
    insert_in_section(doc, ISA_GROUP, &[record], edits)
}

/// First group named `name` that has a `children` list
fn find_parent_group<'a>(doc: &'a Document, name: &'a str) -> Option<(&'a str, &'a Node, &'a Array)> {
    let mut candidates = doc
        .groups_named(name)
        .filter_map(|group| group.get_array("children").map(|(node, array)| (group.id, node, array)));
    let first = candidates.next()?;
    let others = candidates.count();
    if others > 0 {
        warn!(group = name, others, "several groups share this name, using the first");
    }
    Some(first)
}

fn link_parent_group(
    doc: &Document,
    plan: &PatchPlan,
    parent: Option<(&str, &Node, &Array)>,
    ids: &AssignedIds,
    edits: &mut EditSet,
) -> StepOutcome {
    let Some((parent_id, node, array)) = parent else {
        return skipped(format!(
            "no group named '{}' with a children list",
            plan.parent_group
        ));
    };
    debug!(parent = parent_id, "linking into parent group");
    let line = member_line(ids.group, &plan.group);
    append_members(doc, node, array, &[line], edits)
}

fn link_sources_phase(doc: &Document, plan: &PatchPlan, ids: &AssignedIds, edits: &mut EditSet) -> StepOutcome {
    let Some(phase) = doc.sources_phase(plan.target.as_deref()) else {
        return match &plan.target {
            Some(target) => skipped(format!("no sources phase for target '{}'", target)),
            None => skipped("no PBXSourcesBuildPhase"),
        };
    };
    let Some((node, array)) = phase.get_array("files") else {
        return skipped(format!("sources phase {} has no files list", phase.id));
    };
    debug!(phase = phase.id, "linking into sources phase");
    let lines: Vec<String> = (0..2)
        .map(|i| {
            member_line(
                ids.build_files[i],
                &format!("{} in {}", plan.files[i].name, SOURCES_PHASE_LABEL),
            )
        })
        .collect();
    append_members(doc, node, array, &lines, edits)
}

/// Append `lines` to a list, one per line
///
/// New members go right after the last non-blank text inside the
/// parentheses, indented like the last existing member (or one level deeper
/// than the list's own line when empty). When the last existing member lacks
/// a comma, one is inserted directly after that member, ahead of any comment
/// that follows it on the line.
fn append_members(
    doc: &Document,
    node: &Node,
    array: &Array,
    lines: &[String],
    edits: &mut EditSet,
) -> StepOutcome {
    let interior = &doc.source()[node.open_end()..node.close_offset()];
    let offset = node.open_end() + interior.trim_end().len();

    let indent = match array.items.last() {
        Some(last) => {
            if !array.trailing_comma {
                edits.insert(last.span.end, ",");
            }
            doc.line_indent(last.span.start).to_string()
        }
        None => format!("{}\t", doc.line_indent(node.span.start)),
    };

    let mut text = String::new();
    for line in lines {
        text.push('\n');
        text.push_str(&indent);
        text.push_str(line);
    }
    edits.insert(offset, text);
    StepOutcome::Applied { offset }
}
