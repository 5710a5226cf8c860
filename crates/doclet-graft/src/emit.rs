//! Emission of the finished tree.

use crate::tree::OutputTree;
use doclet_core::{DocletError, Result};
use std::io::{self, Write};

/// Receives the output tree at the end of a run.
pub trait Emit {
    fn emit(&mut self, tree: &OutputTree) -> Result<()>;
}

/// Writes the tree as JSON to any writer.
#[derive(Debug)]
pub struct WriterEmitter<W: Write> {
    writer: W,
    pretty: bool,
}

impl WriterEmitter<io::Stdout> {
    /// The default emitter: a pretty JSON dump on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WriterEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    /// Emits single-line JSON.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Emit for WriterEmitter<W> {
    fn emit(&mut self, tree: &OutputTree) -> Result<()> {
        let json = tree.to_json();
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &json)?;
        } else {
            serde_json::to_writer(&mut self.writer, &json)?;
        }
        writeln!(self.writer).map_err(DocletError::Emit)?;
        self.writer.flush().map_err(DocletError::Emit)
    }
}

/// Discards the tree. For callers that only want the returned outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEmitter;

impl Emit for NullEmitter {
    fn emit(&mut self, _tree: &OutputTree) -> Result<()> {
        Ok(())
    }
}
