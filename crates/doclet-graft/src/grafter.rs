//! The recursive grafter.
//!
//! Grafting selects the records that are members of a given container,
//! classifies each by kind (and by the kind of its container), runs the
//! matching hook and attaches the result to the container's output node.
//! Namespaces, classes, interfaces and mixins are grafted recursively with
//! their own node as the new parent.

use crate::hooks::{HookInput, HookTable};
use crate::kind::{Hook, ParentKind};
use crate::resolver::{MemberResolver, Resolution};
use crate::tree::{NodeId, OutputTree, Transformed};
use doclet_core::{DocletError, DocletOptions, Record, RecordKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Two merge requests competed for the same identifier; the earlier one
/// lost its place in the pending table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeAnomaly {
    pub longname: String,
    /// Position of the displaced record in the filtered input.
    pub replaced: usize,
    /// Position of the record that took its place.
    pub replacement: usize,
}

/// Summary of one graft pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraftReport {
    /// Records given to the grafter.
    pub records: usize,
    /// Nodes attached to the tree, enum values included.
    pub attached: usize,
    /// Deepest container nesting visited. The root call is depth 0.
    pub max_depth: usize,
    pub anomalies: Vec<MergeAnomaly>,
    /// Longnames of records held for a merge that never happened.
    pub unpaired: Vec<String>,
}

/// One graft pass over a filtered record sequence.
pub struct Grafter<'a> {
    records: &'a [Record],
    /// Record indices grouped by `memberof`, in input order.
    members: HashMap<Option<&'a str>, Vec<usize>>,
    hooks: &'a mut HookTable,
    resolver: MemberResolver,
    tree: OutputTree,
    /// Containers currently being grafted.
    stack: Vec<&'a str>,
    report: GraftReport,
}

impl<'a> Grafter<'a> {
    /// Creates a grafter over `records`.
    pub fn new(records: &'a [Record], hooks: &'a mut HookTable, options: &DocletOptions) -> Self {
        let mut members: HashMap<Option<&'a str>, Vec<usize>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            members
                .entry(record.memberof.as_deref())
                .or_default()
                .push(index);
        }

        Self {
            records,
            members,
            hooks,
            resolver: MemberResolver::new(options.treat_inherited_element),
            tree: OutputTree::new(),
            stack: Vec::new(),
            report: GraftReport {
                records: records.len(),
                ..GraftReport::default()
            },
        }
    }

    /// Grafts every root record, and recursively their members, into a
    /// fresh tree.
    pub fn run(mut self) -> Result<(OutputTree, GraftReport)> {
        let root = self.tree.root();
        self.graft(root, None, ParentKind::Root)?;

        let records = self.records;
        for index in self.resolver.finish() {
            let longname = records[index].display_name();
            debug!("{}: held for a merge that never happened", longname);
            self.report.unpaired.push(longname.to_string());
        }

        debug!(
            "Grafted {} of {} records, max depth {}",
            self.report.attached, self.report.records, self.report.max_depth
        );
        Ok((self.tree, self.report))
    }

    /// Grafts the members of `parent_longname` (roots when `None`) under
    /// `parent`.
    pub fn graft(
        &mut self,
        parent: NodeId,
        parent_longname: Option<&'a str>,
        parent_kind: ParentKind,
    ) -> Result<()> {
        if let Some(longname) = parent_longname {
            if self.stack.contains(&longname) {
                return Err(DocletError::Cycle(longname.to_string()));
            }
            self.stack.push(longname);
        }
        self.report.max_depth = self.report.max_depth.max(self.stack.len());

        // Cloned so hooks and recursion can borrow self mutably.
        let members = self
            .members
            .get(&parent_longname)
            .cloned()
            .unwrap_or_default();

        for index in members {
            self.graft_record(parent, index, parent_kind)?;
        }

        if parent_longname.is_some() {
            self.stack.pop();
        }
        Ok(())
    }

    fn graft_record(&mut self, parent: NodeId, index: usize, parent_kind: ParentKind) -> Result<()> {
        let records = self.records;
        let record = &records[index];
        let classifier = parent_kind == ParentKind::Classifier;

        match &record.kind {
            RecordKind::File => {
                self.graft_leaf(parent, Hook::File, record)?;
            }
            RecordKind::Package => {
                self.graft_leaf(parent, Hook::Package, record)?;
            }
            RecordKind::Namespace => {
                self.graft_container(parent, Hook::Namespace, record, ParentKind::Namespace)?;
            }
            RecordKind::Typedef if record.is_callback() => {
                self.graft_leaf(parent, Hook::Callback, record)?;
            }
            RecordKind::Typedef => {
                self.graft_leaf(parent, Hook::Typedef, record)?;
            }
            RecordKind::Class => {
                self.graft_container(parent, Hook::Class, record, ParentKind::Classifier)?;
            }
            RecordKind::Interface => {
                self.graft_container(parent, Hook::Interface, record, ParentKind::Classifier)?;
            }
            RecordKind::Member if record.is_enum => {
                self.graft_enum(parent, record)?;
            }
            _ if classifier && record.name == "constructor" => {
                self.graft_leaf(parent, Hook::Constructor, record)?;
            }
            kind if kind.is_member_like() && classifier => {
                self.graft_member(parent, Hook::Attribute, index)?;
            }
            kind if kind.is_member_like() => {
                self.graft_leaf(parent, Hook::Variable, record)?;
            }
            RecordKind::Function if classifier => {
                self.graft_member(parent, Hook::Method, index)?;
            }
            RecordKind::Function => {
                self.graft_leaf(parent, Hook::Function, record)?;
            }
            RecordKind::Mixin => {
                self.graft_container(parent, Hook::Mixin, record, ParentKind::Mixin)?;
            }
            RecordKind::Event => {
                self.graft_leaf(parent, Hook::Event, record)?;
            }
            _ => {
                record.dump();
                self.graft_leaf(parent, Hook::Unknown, record)?;
            }
        }
        Ok(())
    }

    fn graft_leaf(&mut self, parent: NodeId, hook: Hook, record: &'a Record) -> Result<Option<NodeId>> {
        let child = self.transform(hook, record, None)?;
        self.graft_child(parent, child, hook)
    }

    fn graft_container(
        &mut self,
        parent: NodeId,
        hook: Hook,
        record: &'a Record,
        kind: ParentKind,
    ) -> Result<()> {
        let node = self.graft_leaf(parent, hook, record)?;
        // A suppressed container still has its members grafted, one level up.
        self.graft(node.unwrap_or(parent), Some(record.longname.as_str()), kind)
    }

    fn graft_enum(&mut self, parent: NodeId, record: &'a Record) -> Result<()> {
        let Some(node) = self.graft_leaf(parent, Hook::Enum, record)? else {
            return Ok(());
        };
        for value in &record.properties {
            let child = self.transform(Hook::EnumConstant, value, None)?;
            self.graft_child(node, child, Hook::EnumConstant)?;
        }
        Ok(())
    }

    fn graft_member(&mut self, parent: NodeId, hook: Hook, index: usize) -> Result<()> {
        let records = self.records;
        match self.resolver.resolve(records, index) {
            Resolution::Resolved { record, parent_doc } => {
                let parent_doc = parent_doc.map(|doc| &records[doc]);
                let child = self.transform(hook, &records[record], parent_doc)?;
                self.graft_child(parent, child, hook)?;
            }
            Resolution::Held {
                replaced: Some(replaced),
            } => {
                let longname = records[index].longname.clone();
                warn!(
                    "{}: pending merge request replaced, record #{} loses its pairing",
                    longname, replaced
                );
                self.report.anomalies.push(MergeAnomaly {
                    longname,
                    replaced,
                    replacement: index,
                });
            }
            Resolution::Held { replaced: None } | Resolution::Dropped => {}
        }
        Ok(())
    }

    fn transform(
        &mut self,
        hook: Hook,
        record: &Record,
        parent_doc: Option<&Record>,
    ) -> Result<Option<Transformed>> {
        self.hooks.transform(HookInput {
            hook,
            record,
            parent_doc,
        })
    }

    /// Attaches `child` to `parent` under the hook's default slot unless the
    /// child names its own.
    fn graft_child(
        &mut self,
        parent: NodeId,
        child: Option<Transformed>,
        hook: Hook,
    ) -> Result<Option<NodeId>> {
        let node = self.tree.attach(parent, child, hook.default_slot())?;
        if node.is_some() {
            self.report.attached += 1;
        }
        Ok(node)
    }
}
