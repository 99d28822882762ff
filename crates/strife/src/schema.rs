// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Serialized form of faults and their causal chains.
//!
//! A [`FaultChain`] is a sequence of [`ChainEntry`] values, one per reported fault. Each entry
//! carries the origin and stack of its fault, the fault's own [`ExcInfo`], and a flat list of
//! every transitive cause, first direct cause first.
//!
//! The field names are a stable contract. Fields are emitted in alphabetical order, and the
//! output is fully determined by the fault graph and its captured stack text, which makes it
//! suitable for snapshot comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type, message and rendering of one fault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExcInfo {
    /// The fault's message.
    pub exc_msg: String,
    /// The fault's type tag.
    pub exc_type: String,
    /// The fault's full rendering.
    pub exc_value: String,
}

/// One element of a chain entry's `caused_by` sequence.
pub type CauseEntry = ExcInfo;

/// The serialized form of one reported fault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Every transitive cause of the fault, first direct cause first.
    pub caused_by: Vec<CauseEntry>,
    /// The fault itself.
    pub exc_info: ExcInfo,
    /// Source file the fault was constructed in.
    pub file_name: String,
    /// Function the fault was constructed in.
    pub func_name: String,
    /// Line the fault was constructed at.
    pub lineno: u32,
    /// Module the fault was constructed in.
    pub module_name: String,
    /// Stack captured at construction, innermost-first.
    pub stack: Vec<String>,
}

/// The serialized form of one or more reported faults.
///
/// Serializes as a JSON array of entries. [`Display`](fmt::Display) renders compact JSON, and
/// the alternate form (`{:#}`) renders indented JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaultChain {
    entries: Vec<ChainEntry>,
}

impl ExcInfo {
    /// Converts into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("exc_msg".into(), Value::String(self.exc_msg.clone()));
        map.insert("exc_type".into(), Value::String(self.exc_type.clone()));
        map.insert("exc_value".into(), Value::String(self.exc_value.clone()));
        Value::Object(map)
    }
}

impl ChainEntry {
    /// Converts into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("caused_by".into(), Value::Array(self.caused_by.iter().map(ExcInfo::to_value).collect()));
        map.insert("exc_info".into(), self.exc_info.to_value());
        map.insert("file_name".into(), Value::String(self.file_name.clone()));
        map.insert("func_name".into(), Value::String(self.func_name.clone()));
        map.insert("lineno".into(), Value::from(self.lineno));
        map.insert("module_name".into(), Value::String(self.module_name.clone()));
        map.insert("stack".into(), Value::Array(self.stack.iter().cloned().map(Value::String).collect()));
        Value::Object(map)
    }
}

impl FaultChain {
    pub(crate) fn from_entries(entries: Vec<ChainEntry>) -> Self {
        Self { entries }
    }

    /// The entries, in reporting order.
    #[must_use]
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Consumes the chain, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ChainEntry> {
        self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears the captured stacks, leaving everything else untouched.
    ///
    /// Captured stacks depend on the build and the environment; removing them keeps snapshots
    /// and log lines stable.
    #[must_use]
    pub fn without_stacks(mut self) -> Self {
        for entry in &mut self.entries {
            entry.stack.clear();
        }
        self
    }

    /// Converts into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(self.entries.iter().map(ChainEntry::to_value).collect())
    }

    /// Parses a chain previously rendered as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid serialized chain.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for FaultChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_value();
        if f.alternate() { write!(f, "{value:#}") } else { write!(f, "{value}") }
    }
}

impl<'a> IntoIterator for &'a FaultChain {
    type Item = &'a ChainEntry;
    type IntoIter = std::slice::Iter<'a, ChainEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
