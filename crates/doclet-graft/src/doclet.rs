//! The doclet driver.
//!
//! A run has three steps:
//! 1. pre-filter the host collection with the configured remove query,
//! 2. graft the remaining records into a fresh tree,
//! 3. hand the tree to the emitter.

use crate::emit::{Emit, WriterEmitter};
use crate::grafter::{GraftReport, Grafter};
use crate::hooks::HookTable;
use crate::tree::OutputTree;
use doclet_core::{prefilter, DocletOptions, Record, RecordSource, Result};
use std::io::Stdout;
use tracing::debug;

/// Everything a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub tree: OutputTree,
    pub report: GraftReport,
}

/// A configured doclet: options, hooks and an emitter.
#[derive(Debug)]
pub struct Doclet<E: Emit = WriterEmitter<Stdout>> {
    options: DocletOptions,
    hooks: HookTable,
    emitter: E,
}

impl Doclet {
    /// Creates a doclet with logging hooks and the console emitter.
    pub fn new(options: DocletOptions) -> Self {
        let hooks = HookTable::new(options.quiet);
        Self {
            options,
            hooks,
            emitter: WriterEmitter::stdout(),
        }
    }
}

impl<E: Emit> Doclet<E> {
    /// Replaces the emitter.
    pub fn with_emitter<F: Emit>(self, emitter: F) -> Doclet<F> {
        Doclet {
            options: self.options,
            hooks: self.hooks,
            emitter,
        }
    }

    /// Replaces the whole hook table.
    pub fn with_hooks(mut self, hooks: HookTable) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn hooks_mut(&mut self) -> &mut HookTable {
        &mut self.hooks
    }

    pub fn options(&self) -> &DocletOptions {
        &self.options
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Removes unwanted records and returns the rest, in input order.
    pub fn before_treatment<S: RecordSource + ?Sized>(&self, source: &mut S) -> Result<Vec<Record>> {
        prefilter(source, &self.options.remove_query)
    }

    /// Grafts already-filtered records into a new tree.
    pub fn transform(&mut self, records: &[Record]) -> Result<RunOutcome> {
        let (tree, report) = Grafter::new(records, &mut self.hooks, &self.options).run()?;
        Ok(RunOutcome { tree, report })
    }

    /// Filters, grafts and emits.
    pub fn run<S: RecordSource + ?Sized>(&mut self, source: &mut S) -> Result<RunOutcome> {
        let records = self.before_treatment(source)?;
        let outcome = self.transform(&records)?;
        self.emitter.emit(&outcome.tree)?;
        debug!("Emitted tree of {} nodes", outcome.tree.node_count());
        Ok(outcome)
    }
}
