//! Record collections and the pre-filter step.
//!
//! The host extraction system owns the records. Doclet only needs to remove
//! the records matching a [`RemoveQuery`] and then materialize what is left,
//! in the extractor's order.

use crate::error::{DocletError, Result};
use crate::options::RemoveQuery;
use crate::record::Record;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A host collection of documentation records.
///
/// Implementations wrap their own failures with [`DocletError::source`].
pub trait RecordSource {
    /// Removes every record matching `query`. Returns how many were removed.
    fn remove(&mut self, query: &RemoveQuery) -> Result<usize>;

    /// Returns the remaining records in their original order.
    fn records(&self) -> Result<Vec<Record>>;
}

/// Applies the remove query to `source`, then materializes the remaining
/// records.
pub fn prefilter<S: RecordSource + ?Sized>(source: &mut S, query: &RemoveQuery) -> Result<Vec<Record>> {
    let removed = source.remove(query)?;
    let records = source.records()?;
    debug!("Pre-filter removed {} records, {} remain", removed, records.len());
    Ok(records)
}

/// In-memory record collection, typically loaded from the JSON array an
/// extractor prints in explain mode.
///
/// Each record keeps the JSON object it was parsed from, and the remove
/// query is evaluated against that object, so fields the typed model
/// normalizes away (explicit `false` flags, empty lists) still match.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
    raw: Vec<Value>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        let raw = records.iter().map(Record::to_value).collect();
        Self { records, raw }
    }

    /// Builds a set from raw JSON records.
    pub fn from_values(raw: Vec<Value>) -> Result<Self> {
        let records = raw
            .iter()
            .map(Record::deserialize)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { records, raw })
    }

    /// Parses a JSON array of records.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_values(serde_json::from_str(raw)?)
    }

    /// Reads a JSON array of records from any reader (e.g. stdin).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_values(serde_json::from_reader(reader)?)
    }

    /// Loads a JSON array of records from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| DocletError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

impl RecordSource for RecordSet {
    fn remove(&mut self, query: &RemoveQuery) -> Result<usize> {
        // Evaluate first so a failing query leaves the set untouched.
        let mut doomed = Vec::with_capacity(self.raw.len());
        for raw in &self.raw {
            doomed.push(query.matches(raw)?);
        }

        let before = self.records.len();
        let (records, raw): (Vec<Record>, Vec<Value>) = self
            .records
            .drain(..)
            .zip(self.raw.drain(..))
            .zip(doomed)
            .filter(|(_, remove)| !remove)
            .map(|(entry, _)| entry)
            .unzip();
        self.records = records;
        self.raw = raw;
        Ok(before - self.records.len())
    }

    fn records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
