//! Doclet Graft - Flat records to nested documentation trees
//!
//! This crate turns the flat record sequence produced by a documentation
//! extractor into a tree grouped by containers: namespaces hold classes,
//! classes hold constructors, attributes and methods, and so on.
//!
//! # Architecture
//!
//! - [`Grafter`] walks the `memberof` forest and dispatches every record to
//!   a [`Hook`], routing members by the kind of their container.
//! - [`MemberResolver`] pairs inherited and overriding member records.
//! - [`HookTable`] holds the installed transforms; the defaults only log.
//! - [`OutputTree`] stores the results in named, ordered slots.
//! - [`Doclet`] drives a full run: pre-filter, graft, emit.
//!
//! # Example
//!
//! ```
//! use doclet_core::{DocletOptions, Record, RecordSet};
//! use doclet_graft::{Doclet, HookTable, JsonHooks, NullEmitter};
//!
//! let mut records = RecordSet::new(vec![
//!     Record::new("class", "Shape", "Shape"),
//!     Record::new("function", "Shape#area", "area").with_memberof("Shape"),
//! ]);
//!
//! let mut doclet = Doclet::new(DocletOptions::default())
//!     .with_hooks(HookTable::new(true).with_fallback(JsonHooks::new()))
//!     .with_emitter(NullEmitter);
//!
//! let outcome = doclet.run(&mut records).unwrap();
//! let json = outcome.tree.to_json();
//! assert_eq!(json["class"][0]["methods"][0]["name"], "area");
//! ```

mod doclet;
mod emit;
mod grafter;
mod hooks;
mod json_hooks;
mod kind;
mod pending;
mod resolver;
mod tree;

pub use doclet::{Doclet, RunOutcome};
pub use emit::{Emit, NullEmitter, WriterEmitter};
pub use grafter::{GraftReport, Grafter, MergeAnomaly};
pub use hooks::{hook_fn, FnHook, HookInput, HookResult, HookTable, LogHook, Transform};
pub use json_hooks::JsonHooks;
pub use kind::{slot, Hook, ParentKind};
pub use pending::{HoldOutcome, PendingMerges};
pub use resolver::{MemberResolver, Resolution};
pub use tree::{NodeId, OutputNode, OutputTree, Transformed};
