// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Walking causal chains into their serialized form.

use std::error::Error as StdError;

use tracing::{Level, event};

use crate::describe::{Describe, Foreign, display_text};
use crate::{Cause, ChainEntry, ExcInfo, Fault, FaultChain};

/// Default limit on the number of causes recorded for one fault.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which faults get their own entry in a [`FaultChain`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// One entry per reported fault; every cause goes into that entry's `caused_by`.
    #[default]
    PerReport,
    /// One entry per native fault in the chain. Each entry lists the causes below its fault.
    PerNode,
}

/// Configuration for serializing faults.
///
/// # Examples
///
/// ```rust
/// use strife::{ChainConfig, EntryMode, Fault};
///
/// let fault = Fault::new("outer").chain(Fault::new("inner"));
/// let config = ChainConfig::new().entry_mode(EntryMode::PerNode);
///
/// assert_eq!(fault.to_chain_with(&config).len(), 2);
/// assert_eq!(fault.to_chain().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    mode: EntryMode,
    max_depth: usize,
}

impl ChainConfig {
    /// Creates the default configuration: [`EntryMode::PerReport`] and [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: EntryMode::PerReport,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets which faults get their own entry.
    #[must_use]
    pub const fn entry_mode(mut self, mode: EntryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the maximum number of causes recorded for one fault.
    ///
    /// Walking stops silently, apart from a warning event, once the limit is reached.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured entry mode.
    #[must_use]
    pub const fn mode(&self) -> EntryMode {
        self.mode
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultChain {
    /// Serializes one fault with the default configuration.
    #[must_use]
    pub fn from_fault(fault: &Fault) -> Self {
        Self::from_faults_with([fault], &ChainConfig::new())
    }

    /// Serializes a batch of independently reported faults with the default configuration.
    #[must_use]
    pub fn from_faults<'a>(faults: impl IntoIterator<Item = &'a Fault>) -> Self {
        Self::from_faults_with(faults, &ChainConfig::new())
    }

    /// Serializes a batch of independently reported faults.
    ///
    /// The walk never fails: links that cannot be described precisely are rendered with
    /// placeholder text, and chains that exceed the depth limit or revisit a foreign error are
    /// cut short.
    #[must_use]
    pub fn from_faults_with<'a>(faults: impl IntoIterator<Item = &'a Fault>, config: &ChainConfig) -> Self {
        let mut entries = Vec::new();
        for fault in faults {
            let causes = walk(fault, config.max_depth);
            entries.push(entry_for(fault, causes.iter().map(|link| link.info.clone()).collect()));

            if config.mode == EntryMode::PerNode {
                for (index, link) in causes.iter().enumerate() {
                    if let Some(node) = link.fault {
                        let below = causes[index + 1..].iter().map(|link| link.info.clone()).collect();
                        entries.push(entry_for(node, below));
                    }
                }
            }
        }
        Self::from_entries(entries)
    }
}

fn entry_for(fault: &Fault, caused_by: Vec<ExcInfo>) -> ChainEntry {
    let origin = fault.origin();
    ChainEntry {
        caused_by,
        exc_info: fault.exc_info(),
        file_name: origin.file().to_string(),
        func_name: origin.function().to_string(),
        lineno: origin.line(),
        module_name: origin.module().to_string(),
        stack: fault.stack().frames().to_vec(),
    }
}

/// A described link of a causal chain.
struct Visited<'a> {
    info: ExcInfo,
    /// The link's fault, when it is a native one.
    fault: Option<&'a Fault>,
}

/// A link still to be visited.
enum Pending<'a> {
    Cause(&'a Cause),
    /// An error reached through `source()`, with the index of the source chain it belongs to.
    Source(&'a (dyn StdError + 'static), usize),
}

/// Flattens the causal chain below `fault`, first direct cause first.
fn walk(fault: &Fault, max_depth: usize) -> Vec<Visited<'_>> {
    let mut visited: Vec<Visited<'_>> = Vec::new();
    // One visited set per external fault's source chain. Links attached with `chain` are owned
    // by value and cannot loop, so only `source()` chains are guarded.
    let mut source_chains: Vec<Vec<Seen>> = Vec::new();
    // Links are popped from the end; an external fault's sources are visited before the link
    // attached after it.
    let mut pending: Vec<Pending<'_>> = fault.cause().map(Pending::Cause).into_iter().collect();

    while let Some(link) = pending.pop() {
        if visited.len() >= max_depth {
            event!(
                Level::WARN,
                max_depth,
                fault = %fault,
                "cause chain exceeds the depth limit, remaining causes are omitted"
            );
            break;
        }

        match link {
            Pending::Cause(Cause::Fault(native)) => visit_fault(native, &mut visited, &mut pending),
            Pending::Cause(Cause::External(external)) => {
                visited.push(Visited {
                    info: external.exc_info(),
                    fault: None,
                });
                if let Some(next) = external.next() {
                    pending.push(Pending::Cause(next));
                }
                if let Some(source) = external.error().source() {
                    let chain = source_chains.len();
                    source_chains.push(vec![Seen::of(external.error())]);
                    pending.push(Pending::Source(source, chain));
                }
            }
            Pending::Source(source, chain) => {
                if let Some(native) = source.downcast_ref::<Fault>() {
                    visit_fault(native, &mut visited, &mut pending);
                    continue;
                }
                let seen = &mut source_chains[chain];
                let key = Seen::of(source);
                if seen.contains(&key) {
                    warn_cycle(fault, crate::UNKNOWN);
                    continue;
                }
                seen.push(key);
                visited.push(Visited {
                    info: Foreign(source).exc_info(),
                    fault: None,
                });
                if let Some(next) = source.source() {
                    pending.push(Pending::Source(next, chain));
                }
            }
        }
    }

    visited
}

fn visit_fault<'a>(fault: &'a Fault, visited: &mut Vec<Visited<'a>>, pending: &mut Vec<Pending<'a>>) {
    visited.push(Visited {
        info: fault.exc_info(),
        fault: Some(fault),
    });
    if let Some(cause) = fault.cause() {
        pending.push(Pending::Cause(cause));
    }
}

/// Identity of a foreign error within one source chain.
///
/// An error that exposes one of its own fields as its source shares its address with that
/// field, so the address alone cannot tell the two apart.
#[derive(PartialEq, Eq)]
struct Seen {
    address: usize,
    size: usize,
    message: String,
}

impl Seen {
    fn of(error: &(dyn StdError + 'static)) -> Self {
        Self {
            address: std::ptr::from_ref(error).cast::<()>().addr(),
            size: size_of_val(error),
            message: display_text(error),
        }
    }
}

fn warn_cycle(fault: &Fault, type_tag: &str) {
    event!(
        Level::WARN,
        type_tag,
        fault = %fault,
        "source chain revisits an error it already reported, the rest of that chain is omitted"
    );
}
